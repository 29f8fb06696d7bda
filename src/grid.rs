use anyhow::{ensure, Result};

use super::inputs::*;

#[derive(Copy,Clone,Debug,Default,PartialEq,Eq)]
pub struct Cell {
    /// Only known while one of our radars covers the cell
    pub ore: Option<u8>,
    pub has_hole: bool,
    /// Turns since the hole first appeared, 0 on the turn it appears
    pub hole_age: u32,
}

/// The last observed state of every cell, stored row-major.
pub struct Grid {
    width: usize,
    height: usize,
    cells: Box<[Cell]>,
}
impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        ensure!(width > 0 && height > 0, "grid must have at least one cell, got {}x{}", width, height);

        let mut cells = Vec::new();
        cells.resize(width * height, Cell::default());
        Ok(Self {
            width,
            height,
            cells: cells.into_boxed_slice(),
        })
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn num_cells(&self) -> usize { self.cells.len() }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && (position.x as usize) < self.width && (position.y as usize) < self.height
    }

    /// Row-major index of an in-bounds position.
    pub fn index_of(&self, position: Position) -> usize {
        position.y as usize * self.width + position.x as usize
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub fn cell(&self, position: Position) -> &Cell {
        &self.cells[self.index_of(position)]
    }

    pub fn ore_at(&self, position: Position) -> Option<u8> {
        self.cell(position).ore
    }

    pub fn has_hole(&self, position: Position) -> bool {
        self.cell(position).has_hole
    }

    pub fn hole_age(&self, position: Position) -> u32 {
        self.cell(position).hole_age
    }

    pub fn apply_observation(&mut self, observed: &[CellObservation]) -> Result<()> {
        ensure!(
            observed.len() == self.cells.len(),
            "expected {} cell records, got {}", self.cells.len(), observed.len());

        for (cell, observation) in self.cells.iter_mut().zip(observed.iter()) {
            cell.ore = observation.ore;
            if cell.has_hole {
                cell.hole_age += 1;
            }
            cell.has_hole = observation.has_hole;
            if !cell.has_hole {
                cell.hole_age = 0; // holes never fill in during a match, only on a map reset
            }
        }
        Ok(())
    }
}
