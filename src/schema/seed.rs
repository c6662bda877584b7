//! Seed types for initializing cellular GA populations.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::compute::{Cell, Point, PopulationProvider};

/// Seed settings for population initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            pattern: Pattern::Discriminated { seed: 0 },
        }
    }
}

/// Predefined patterns for initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// Uniform random channels.
    Noise {
        /// Random seed.
        seed: u64,
    },
    /// Uniform random channels, darkened by `(row * col) mod 255`.
    ///
    /// Cells far from the top and left edges start noticeably less fit.
    Discriminated {
        /// Random seed.
        seed: u64,
    },
    /// Every cell the same color.
    Solid {
        color: [u8; 3],
    },
    /// Custom cell colors (sparse representation) over a solid background.
    Custom {
        background: [u8; 3],
        /// List of (row, col, color) entries. Out-of-grid entries are ignored.
        cells: Vec<(usize, usize, [u8; 3])>,
    },
}

impl Seed {
    /// Generate the initial population, row-major.
    pub fn generate(&self, rows: usize, cols: usize) -> Vec<Cell> {
        match &self.pattern {
            Pattern::Noise { seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                fill(rows, cols, |_, _| rng.r#gen::<[u8; 3]>())
            }
            Pattern::Discriminated { seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                fill(rows, cols, |row, col| {
                    let discrimination = ((row * col) % u8::MAX as usize) as u8;
                    rng.r#gen::<[u8; 3]>()
                        .map(|channel| darken(channel, discrimination))
                })
            }
            Pattern::Solid { color } => fill(rows, cols, |_, _| *color),
            Pattern::Custom { background, cells } => {
                let mut population = fill(rows, cols, |_, _| *background);
                for &(row, col, color) in cells {
                    if row < rows && col < cols {
                        population[row * cols + col] = Cell::with_color(Point::at(row, col), color);
                    }
                }
                population
            }
        }
    }
}

impl PopulationProvider for Seed {
    fn provide(&self, rows: usize, cols: usize) -> Vec<Cell> {
        self.generate(rows, cols)
    }
}

/// Build a row-major population from a color function.
fn fill<F>(rows: usize, cols: usize, mut color: F) -> Vec<Cell>
where
    F: FnMut(usize, usize) -> [u8; 3],
{
    let mut population = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            population.push(Cell::with_color(Point::at(row, col), color(row, col)));
        }
    }
    population
}

/// Subtract `amount` from channels brighter than it; dimmer channels are kept.
#[inline]
fn darken(channel: u8, amount: u8) -> u8 {
    if channel > amount {
        channel - amount
    } else {
        channel
    }
}
