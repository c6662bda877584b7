//! Cell and grid location value types.

use serde::{Deserialize, Serialize};

/// Largest attainable fitness: all three channels saturated.
pub const MAX_FITNESS: u16 = 3 * u8::MAX as u16;

/// Grid coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Location of grid slot `(row, col)`.
    #[inline]
    pub fn at(row: usize, col: usize) -> Self {
        // Dimensions are validated to fit in u32 before any cell is built.
        Self {
            x: col as u32,
            y: row as u32,
        }
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.y as usize
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.x as usize
    }
}

/// A colored grid cell.
///
/// Cells are plain values: the cell "at" a slot is whatever value the current
/// population holds there for this generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Slot this cell occupies (or, for fresh offspring, the slot it was bred for).
    pub location: Point,
    /// Commit destination nominated during breeding. Only set under the
    /// neighborhood-worst and one-parent merge policies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_at: Option<Point>,
}

impl Cell {
    /// Black cell at `location`.
    pub fn new(location: Point) -> Self {
        Self::with_color(location, [0, 0, 0])
    }

    pub fn with_color(location: Point, [r, g, b]: [u8; 3]) -> Self {
        Self {
            r,
            g,
            b,
            location,
            replace_at: None,
        }
    }

    #[inline]
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channel sum, in `0..=MAX_FITNESS`.
    #[inline]
    pub fn fitness(&self) -> u16 {
        self.r as u16 + self.g as u16 + self.b as u16
    }

    /// Fitness scaled into `[0, 1]`; the roulette weight of this cell.
    #[inline]
    pub fn normalized_fitness(&self) -> f64 {
        f64::from(self.fitness()) / f64::from(MAX_FITNESS)
    }

    /// Distance from the maximum fitness.
    #[inline]
    pub fn objective(&self) -> u16 {
        MAX_FITNESS - self.fitness()
    }

    #[inline]
    pub fn is_saturated(&self) -> bool {
        self.fitness() == MAX_FITNESS
    }

    /// Copy of this cell settled into `destination`, with any nomination cleared.
    #[inline]
    pub fn settled_at(self, destination: Point) -> Self {
        Self {
            location: destination,
            replace_at: None,
            ..self
        }
    }
}

/// Supplies the initial population of a run.
///
/// Implementations return `rows * cols` cells in row-major order, each located
/// at its own slot.
pub trait PopulationProvider {
    fn provide(&self, rows: usize, cols: usize) -> Vec<Cell>;
}

impl<F> PopulationProvider for F
where
    F: Fn(usize, usize) -> [u8; 3],
{
    fn provide(&self, rows: usize, cols: usize) -> Vec<Cell> {
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|(row, col)| Cell::with_color(Point::at(row, col), self(row, col)))
            .collect()
    }
}
