//! Generation scoring and population statistics.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, MAX_FITNESS};

/// Sum of cell fitness over the population.
pub fn total_fitness(population: &[Cell]) -> u64 {
    population.iter().map(|cell| u64::from(cell.fitness())).sum()
}

/// Aggregate fitness normalized to `[0, 1]`.
///
/// An empty population scores 0.
pub fn score(population: &[Cell]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    let attainable = population.len() as f64 * f64::from(MAX_FITNESS);
    let score = total_fitness(population) as f64 / attainable;
    assert!(
        (0.0..=1.0).contains(&score),
        "generation score {score} outside [0, 1]"
    );
    score
}

/// Whether every cell is at maximum fitness.
pub fn is_converged(population: &[Cell]) -> bool {
    !population.is_empty() && population.iter().all(Cell::is_saturated)
}

/// Population statistics for monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub total_fitness: u64,
    pub min_fitness: u16,
    pub max_fitness: u16,
    pub mean_fitness: f64,
    /// Cells at maximum fitness.
    pub saturated_cells: usize,
}

impl PopulationStats {
    /// Compute statistics from a population.
    pub fn from_population(population: &[Cell]) -> Self {
        let mut total_fitness = 0u64;
        let mut min_fitness = MAX_FITNESS;
        let mut max_fitness = 0u16;
        let mut saturated_cells = 0usize;

        for cell in population {
            let fitness = cell.fitness();
            total_fitness += u64::from(fitness);
            min_fitness = min_fitness.min(fitness);
            max_fitness = max_fitness.max(fitness);
            if fitness == MAX_FITNESS {
                saturated_cells += 1;
            }
        }

        if population.is_empty() {
            min_fitness = 0;
        }

        Self {
            total_fitness,
            min_fitness,
            max_fitness,
            mean_fitness: total_fitness as f64 / population.len().max(1) as f64,
            saturated_cells,
        }
    }
}
