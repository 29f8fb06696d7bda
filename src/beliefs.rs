use std::fmt::Display;

use super::entities::Entities;
use super::grid::Grid;
use super::inputs::*;

/// Ore is likelier further from home, with no preference between rows.
const PRIOR_ORE_SCALE: f32 = 0.95;
const ENEMY_HOLE_TRAP_RISK: f32 = 0.5;
const SUSPECTED_TRAP_RISK: f32 = 0.25;
const CERTAIN_TRAP_RISK: f32 = 1.0;

#[derive(Copy,Clone,Debug,PartialEq,Eq)]
enum DigOutcome {
    Successful,
    Fruitless,
}

/// What we believe lies in each cell that radar cannot currently see.
#[derive(Clone,Debug,PartialEq)]
pub struct Beliefs {
    width: usize,
    height: usize,
    ore_estimate: Box<[f32]>,
    trap_risk: Box<[f32]>,
}
impl Beliefs {
    pub fn new(width: usize, height: usize) -> Self {
        let mut ore_estimate = Vec::with_capacity(width * height);
        for _y in 0..height {
            for x in 0..width {
                let estimate = if x as i32 == HOME_COLUMN { 0.0 } else { PRIOR_ORE_SCALE * x as f32 / width as f32 };
                ore_estimate.push(estimate);
            }
        }

        let mut trap_risk = Vec::new();
        trap_risk.resize(width * height, 0.0);

        Self {
            width,
            height,
            ore_estimate: ore_estimate.into_boxed_slice(),
            trap_risk: trap_risk.into_boxed_slice(),
        }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && (position.x as usize) < self.width && (position.y as usize) < self.height
    }

    fn index_of(&self, position: Position) -> usize {
        position.y as usize * self.width + position.x as usize
    }

    pub fn ore_estimate(&self, position: Position) -> f32 {
        self.ore_estimate[self.index_of(position)]
    }

    pub fn trap_risk(&self, position: Position) -> f32 {
        self.trap_risk[self.index_of(position)]
    }

    /// Refreshes both grids from this turn's observation. Must run after the grid and
    /// the entities have been updated, and before our robots are given new commands.
    pub fn update(&mut self, grid: &Grid, entities: &Entities) {
        let outcomes = collect_dig_outcomes(entities);

        for index in 0..self.ore_estimate.len() {
            let position = grid.position_of(index);

            if let Some(ore) = grid.ore_at(position) {
                self.ore_estimate[index] = ore as f32; // ground truth wins
                continue;
            }

            let outcome = outcomes.iter()
                .filter(|&&(target, _)| target == position)
                .map(|&(_, outcome)| outcome)
                .min_by_key(|&outcome| outcome != DigOutcome::Successful);

            let estimate = &mut self.ore_estimate[index];
            match outcome {
                Some(DigOutcome::Successful) => {
                    *estimate = (*estimate - 1.0).max(0.0);
                    tracing::debug!(at = %position, estimate = *estimate, "successful dig");
                },
                Some(DigOutcome::Fruitless) => {
                    *estimate = 0.0;
                    tracing::debug!(at = %position, "fruitless dig");
                },
                None => {
                    if grid.has_hole(position) && grid.hole_age(position) == 0 {
                        // Someone else dug here since last turn
                        if *estimate >= 1.0 {
                            *estimate -= 1.0;
                        } else {
                            *estimate /= 2.0;
                        }
                        let risk = &mut self.trap_risk[index];
                        *risk = risk.max(ENEMY_HOLE_TRAP_RISK);
                        tracing::debug!(at = %position, estimate = *estimate, "fresh enemy hole");
                    }
                },
            }
        }

        for trap in entities.of_kind(EntityKind::Trap) {
            if trap.dead || !self.contains(trap.position) { continue }
            let index = self.index_of(trap.position);
            self.trap_risk[index] = CERTAIN_TRAP_RISK;
        }

        for y in 0..self.height {
            self.ore_estimate[y * self.width + HOME_COLUMN as usize] = 0.0;
        }
    }

    pub fn report_suspected_trap_placement(&mut self, position: Position) {
        tracing::debug!(at = %position, "suspected enemy trap");
        for neighbor in position.with_neighbors() {
            if !self.contains(neighbor) { continue }
            let index = self.index_of(neighbor);
            let risk = &mut self.trap_risk[index];
            *risk = (*risk + SUSPECTED_TRAP_RISK).min(CERTAIN_TRAP_RISK);
        }
    }

    pub fn note_own_trap_placement(&mut self, position: Position) {
        if !self.contains(position) { return }
        tracing::debug!(at = %position, "own trap");
        let index = self.index_of(position);
        self.trap_risk[index] = CERTAIN_TRAP_RISK;
    }

    pub fn trap_risk_view(&self) -> GridView<'_> {
        GridView { width: self.width, values: &self.trap_risk }
    }

    pub fn ore_estimate_view(&self) -> GridView<'_> {
        GridView { width: self.width, values: &self.ore_estimate }
    }
}
impl Display for Beliefs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ore estimate:")?;
        write!(f, "{}", self.ore_estimate_view())?;
        writeln!(f, "trap risk:")?;
        write!(f, "{}", self.trap_risk_view())
    }
}

/// Prints one belief grid with one row per line.
pub struct GridView<'a> {
    width: usize,
    values: &'a [f32],
}
impl Display for GridView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.values.chunks(self.width) {
            let mut is_first = true;
            for value in row.iter() {
                if is_first {
                    is_first = false;
                } else {
                    write!(f, " ")?;
                }
                write!(f, "{:.2}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Our robots carry ore on the turn after a dig lands only if the dig found some.
fn collect_dig_outcomes(entities: &Entities) -> Vec<(Position, DigOutcome)> {
    let mut outcomes = Vec::new();
    for robot in entities.my_robots() {
        if robot.dead { continue }
        if let Some(&Action::Dig(target)) = robot.last_command() {
            let outcome = if robot.carried == Item::Ore { DigOutcome::Successful } else { DigOutcome::Fruitless };
            outcomes.push((target, outcome));
        }
    }
    outcomes
}
