use anyhow::{ensure, Result};

use super::beliefs::Beliefs;
use super::entities::Entities;
use super::grid::Grid;
use super::inputs::*;
use super::planning::{Command, Planner};

/// Everything we know about the match, updated once per turn.
pub struct Agent {
    grid: Grid,
    entities: Entities,
    beliefs: Beliefs,
    planner: Planner,
    cooldowns: Cooldowns,
    scores: [u32; NUM_PLAYERS],
    turn: u32,
}
impl Agent {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            grid: Grid::new(width, height)?,
            entities: Entities::new(),
            beliefs: Beliefs::new(width, height),
            planner: Planner::new(width, height),
            cooldowns: Cooldowns::default(),
            scores: [0; NUM_PLAYERS],
            turn: 0,
        })
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn entities(&self) -> &Entities { &self.entities }
    pub fn beliefs(&self) -> &Beliefs { &self.beliefs }
    pub fn cooldowns(&self) -> Cooldowns { self.cooldowns }
    pub fn scores(&self) -> [u32; NUM_PLAYERS] { self.scores }
    pub fn turn(&self) -> u32 { self.turn }

    /// Grid first, then entities, then beliefs derived from both.
    pub fn observe(&mut self, observation: Observation) -> Result<()> {
        ensure!(
            observation.cells.len() == self.grid.num_cells(),
            "turn {} has {} cells but the map has {}", self.turn + 1, observation.cells.len(), self.grid.num_cells());

        self.turn += 1;
        self.scores = observation.scores;
        self.cooldowns = observation.cooldowns;

        self.grid.apply_observation(&observation.cells)?;

        let casualties = self.entities.apply_observation(&observation.entities);
        for robot in casualties {
            tracing::warn!(turn = self.turn, robot, "robot destroyed");
            tracing::debug!("trap risk when robot {} was destroyed:\n{}", robot, self.beliefs.trap_risk_view());
        }

        for placement in self.entities.update_suspects() {
            self.beliefs.report_suspected_trap_placement(placement);
        }

        for enemy in self.entities.of_kind(EntityKind::EnemyRobot) {
            if enemy.dead || enemy.carried == Item::Nothing { continue }
            tracing::trace!(enemy = enemy.id, item = %enemy.carried, "enemy carrying");
        }

        self.beliefs.update(&self.grid, &self.entities);
        Ok(())
    }

    /// Plans this turn and remembers each command against its robot.
    pub fn act(&mut self) -> Vec<Command> {
        let commands = self.planner.plan_turn(&self.entities, &mut self.beliefs, &mut self.cooldowns);
        for command in commands.iter() {
            self.entities.record_command(command.robot, command.action);
        }

        tracing::info!(
            turn = self.turn,
            me = self.scores[ME],
            enemy = self.scores[ENEMY],
            radar_cooldown = self.cooldowns.radar,
            trap_cooldown = self.cooldowns.trap,
            robots = self.entities.my_robots().filter(|robot| !robot.dead).count(),
            "planned turn");

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(width: usize, height: usize, cooldowns: Cooldowns, entities: Vec<EntityObservation>) -> Observation {
        Observation {
            scores: [0, 0],
            cells: vec![CellObservation::default(); width * height],
            cooldowns,
            entities,
        }
    }

    fn robot(id: EntityId, x: i32, y: i32, item: Item) -> EntityObservation {
        EntityObservation { id, kind: EntityKind::MyRobot, position: Position::new(x, y), item }
    }

    #[test]
    fn rejects_mismatched_observation() {
        let mut agent = Agent::new(4, 3).unwrap();
        let mut wrong = observation(4, 3, Cooldowns::default(), vec![]);
        wrong.cells.pop();
        assert!(agent.observe(wrong).is_err());
    }

    #[test]
    fn remembers_commands_between_turns() {
        let mut agent = Agent::new(30, 15).unwrap();
        let busy = Cooldowns { radar: 2, trap: 2 };

        agent.observe(observation(30, 15, busy, vec![robot(0, 0, 5, Item::Nothing)])).unwrap();
        let commands = agent.act();
        let target = match commands[0].action {
            Action::Dig(target) => target,
            other => panic!("expected a dig, got {}", other),
        };
        assert_eq!(agent.entities().get(0).unwrap().last_command(), Some(&Action::Dig(target)));

        // Nothing came of the dig, so the cell is written off
        agent.observe(observation(30, 15, busy, vec![robot(0, 1, 5, Item::Nothing)])).unwrap();
        assert_eq!(agent.beliefs().ore_estimate(target), 0.0);
        assert_eq!(agent.turn(), 2);
    }

    #[test]
    fn local_cooldowns_do_not_outlive_the_turn() {
        let mut agent = Agent::new(30, 15).unwrap();
        agent.observe(observation(30, 15, Cooldowns::default(), vec![robot(0, 0, 5, Item::Nothing)])).unwrap();
        agent.act();
        assert_eq!(agent.cooldowns().radar, ITEM_COOLDOWN);

        agent.observe(observation(30, 15, Cooldowns::default(), vec![robot(0, 0, 5, Item::Nothing)])).unwrap();
        assert_eq!(agent.cooldowns(), Cooldowns::default());
    }
}
