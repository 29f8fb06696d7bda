use std::fmt::Display;

use super::beliefs::Beliefs;
use super::entities::{Entities, Entity};
use super::inputs::*;

#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
pub enum Role {
    Idle,
    Bank,
    PlaceRadar,
    PlaceTrap,
    FetchRadar,
    FetchTrap,
    Mine,
}
impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Idle => write!(f, "idle"),
            Role::Bank => write!(f, "bank"),
            Role::PlaceRadar => write!(f, "radar"),
            Role::PlaceTrap => write!(f, "trap"),
            Role::FetchRadar => write!(f, "fetch radar"),
            Role::FetchTrap => write!(f, "fetch trap"),
            Role::Mine => write!(f, "mine"),
        }
    }
}

#[derive(Copy,Clone,Debug,PartialEq)]
pub struct Command {
    pub robot: EntityId,
    pub action: Action,
    pub role: Role,
}
impl Command {
    fn new(robot: EntityId, role: Role, action: Action) -> Self {
        Self { robot, action, role }
    }

    fn idle(robot: EntityId) -> Self {
        Self::new(robot, Role::Idle, Action::Wait)
    }
}

/// A cell worth digging for ore, as seen from one robot
#[derive(Copy,Clone,Debug)]
struct DigCandidate {
    position: Position,
    trap_risk: f32,
    ore_estimate: f32,
    turns: i32,
}
impl DigCandidate {
    fn is_rich(&self) -> bool {
        self.ore_estimate >= 1.0
    }

    /// Safer first, then cells likely to hold a whole ore, then the quicker round trip.
    /// Among cells unlikely to hold a whole ore, a richer one must also be no further away.
    fn is_better_than(&self, best: &DigCandidate) -> bool {
        if self.trap_risk != best.trap_risk { return self.trap_risk < best.trap_risk }
        if self.is_rich() != best.is_rich() { return self.is_rich() }
        if self.is_rich() {
            self.turns <= best.turns
        } else {
            self.ore_estimate > best.ore_estimate && self.turns <= best.turns
        }
    }
}

/// Assigns one command per robot each turn. Scratch grids are kept between turns.
pub struct Planner {
    width: usize,
    height: usize,
    /// Cells one of our robots has already been told to dig this turn
    has_digger: Box<[bool]>,
    /// Cells our radars reveal, including radars placed this turn
    coverage: Box<[bool]>,
    coverage_ready: bool,
}
impl Planner {
    pub fn new(width: usize, height: usize) -> Self {
        let mut has_digger = Vec::new();
        has_digger.resize(width * height, false);
        let mut coverage = Vec::new();
        coverage.resize(width * height, false);

        Self {
            width,
            height,
            has_digger: has_digger.into_boxed_slice(),
            coverage: coverage.into_boxed_slice(),
            coverage_ready: false,
        }
    }

    fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && (position.x as usize) < self.width && (position.y as usize) < self.height
    }

    fn index_of(&self, position: Position) -> usize {
        position.y as usize * self.width + position.x as usize
    }

    fn positions(&self) -> impl Iterator<Item=Position> {
        let width = self.width as i32;
        (0..self.height as i32).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    fn reserve(&mut self, position: Position) -> bool {
        if !self.contains(position) { return false }
        let index = self.index_of(position);
        if self.has_digger[index] { return false }
        self.has_digger[index] = true;
        true
    }

    /// One command for each of our robots, in id order. Requests lower the cooldowns
    /// so that later robots this turn do not request the same item.
    pub fn plan_turn(&mut self, entities: &Entities, beliefs: &mut Beliefs, cooldowns: &mut Cooldowns) -> Vec<Command> {
        self.has_digger.fill(false);
        self.coverage_ready = false;

        let mut commands = Vec::new();
        for robot in entities.my_robots() {
            let command = self.choose_command(robot, entities, beliefs, cooldowns);
            tracing::debug!(robot = robot.id, role = %command.role, action = %command.action, "planned");
            commands.push(command);
        }
        commands
    }

    fn choose_command(&mut self, robot: &Entity, entities: &Entities, beliefs: &mut Beliefs, cooldowns: &mut Cooldowns) -> Command {
        if robot.dead { return Command::idle(robot.id) }

        match robot.carried {
            Item::Ore => {
                Command::new(robot.id, Role::Bank, Action::Move(Position::new(HOME_COLUMN, robot.position.y)))
            },
            Item::Radar => {
                match self.pick_radar_cell(entities, beliefs) {
                    Some(target) => Command::new(robot.id, Role::PlaceRadar, Action::Dig(target)),
                    None => Command::idle(robot.id),
                }
            },
            Item::Trap => {
                let previous = match robot.last_command() {
                    Some(&Action::Dig(target)) => Some(target),
                    _ => None,
                }.filter(|&target| self.reserve(target));
                match previous.or_else(|| self.pick_dig_cell(robot.position, beliefs)) {
                    Some(target) => {
                        beliefs.note_own_trap_placement(target);
                        Command::new(robot.id, Role::PlaceTrap, Action::Dig(target))
                    },
                    None => Command::idle(robot.id),
                }
            },
            Item::Nothing => {
                if robot.position.is_home() && cooldowns.radar == 0 {
                    cooldowns.radar = ITEM_COOLDOWN;
                    Command::new(robot.id, Role::FetchRadar, Action::Request(Item::Radar))
                } else if robot.position.is_home() && cooldowns.trap == 0 {
                    cooldowns.trap = ITEM_COOLDOWN;
                    Command::new(robot.id, Role::FetchTrap, Action::Request(Item::Trap))
                } else {
                    match self.pick_dig_cell(robot.position, beliefs) {
                        Some(target) => Command::new(robot.id, Role::Mine, Action::Dig(target)),
                        None => Command::idle(robot.id),
                    }
                }
            },
        }
    }

    /// The best unreserved cell away from home that may still hold ore, reserved for the caller.
    pub fn pick_dig_cell(&mut self, from: Position, beliefs: &Beliefs) -> Option<Position> {
        let mut best: Option<DigCandidate> = None;
        for position in self.positions() {
            if position.x <= HOME_COLUMN { continue }

            let ore_estimate = beliefs.ore_estimate(position);
            if ore_estimate <= 0.0 || self.has_digger[self.index_of(position)] { continue }

            let candidate = DigCandidate {
                position,
                trap_risk: beliefs.trap_risk(position),
                ore_estimate,
                turns: from.turns_to_dig_at_and_return(position),
            };
            let is_better = match best {
                Some(ref best) => candidate.is_better_than(best),
                None => true,
            };
            if is_better {
                best = Some(candidate);
            }
        }

        let best = best?;
        self.reserve(best.position);
        Some(best.position)
    }

    /// The safest cell to bury a radar, preferring the one that reveals the most unseen cells.
    pub fn pick_radar_cell(&mut self, entities: &Entities, beliefs: &Beliefs) -> Option<Position> {
        if !self.coverage_ready {
            self.coverage.fill(false);
            for radar in entities.of_kind(EntityKind::Radar) {
                if radar.dead { continue }
                self.cover(radar.position);
            }
            self.coverage_ready = true;
        }

        let mut best: Option<(Position, f32, usize)> = None;
        for position in self.positions() {
            if position.x <= HOME_COLUMN { continue }

            let trap_risk = beliefs.trap_risk(position);
            if trap_risk >= 1.0 || self.has_digger[self.index_of(position)] { continue }

            let score = position.diamond(RADAR_RADIUS)
                .filter(|&cell| self.contains(cell) && !self.coverage[self.index_of(cell)])
                .count();

            let is_better = match best {
                Some((_, best_risk, best_score)) => trap_risk < best_risk || (trap_risk == best_risk && score > best_score),
                None => true,
            };
            if is_better {
                best = Some((position, trap_risk, score));
            }
        }

        let (position, _, score) = best?;
        tracing::debug!(at = %position, score, "radar cell");
        self.reserve(position);
        self.cover(position);
        Some(position)
    }

    fn cover(&mut self, center: Position) {
        for cell in center.diamond(RADAR_RADIUS) {
            if !self.contains(cell) { continue }
            let index = self.index_of(cell);
            self.coverage[index] = true;
        }
    }
}
