//! Evolution driver.
//!
//! Owns the current population and advances it one generation at a time
//! with a pluggable execution strategy, until the population converges or the
//! generation budget runs out.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::schema::{Execution, GridConfig};

use super::EngineError;
use super::cell::{Cell, PopulationProvider};
use super::geometry::Geometry;
use super::merge::MergeStrategy;
use super::neighborhood::NeighborhoodStrategy;
use super::random::{SeededStreams, SourceFactory};
use super::score::{PopulationStats, is_converged, score};
use super::strategy::{self, Breeder};

/// Lifecycle of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// Configured, no population yet.
    Idle,
    /// Population loaded; generations may be stepped.
    Running,
    /// Every cell reached maximum fitness.
    Converged,
    /// The generation budget was consumed first.
    Exhausted,
}

/// Reason a run stopped. Neither is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    Converged,
    Exhausted,
}

/// Per-generation progress passed to run observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    /// 1-based generation index.
    pub generation: u64,
    pub score: f64,
    /// Wall time spent computing the generation.
    pub elapsed: Duration,
}

/// Cellular GA engine over a toroidal grid.
pub struct EvolutionEngine<S: SourceFactory = SeededStreams> {
    config: GridConfig,
    geometry: Geometry,
    neighborhood: Box<dyn NeighborhoodStrategy>,
    merge: Box<dyn MergeStrategy>,
    sources: S,
    population: Vec<Cell>,
    state: EngineState,
    generation: u64,
    score: f64,
    pool: Option<(usize, Arc<rayon::ThreadPool>)>,
}

impl EvolutionEngine<SeededStreams> {
    /// Create an engine whose random streams are seeded from entropy.
    pub fn new(config: GridConfig) -> Result<Self, EngineError> {
        Self::with_sources(config, SeededStreams::from_entropy())
    }

    /// Create a reproducible engine.
    pub fn with_seed(config: GridConfig, seed: u64) -> Result<Self, EngineError> {
        Self::with_sources(config, SeededStreams::new(seed))
    }
}

impl<S: SourceFactory> EvolutionEngine<S> {
    /// Create an engine drawing randomness from `sources`.
    pub fn with_sources(config: GridConfig, sources: S) -> Result<Self, EngineError> {
        config.validate()?;

        Ok(Self {
            geometry: Geometry::new(config.rows, config.cols),
            neighborhood: config.topology.strategy(),
            merge: config.merge.strategy(),
            config,
            sources,
            population: Vec::new(),
            state: EngineState::Idle,
            generation: 0,
            score: 0.0,
            pool: None,
        })
    }

    /// Load the initial population and enter the running state.
    ///
    /// The population must hold exactly one cell per slot, row-major, each
    /// located at its own slot.
    pub fn initialize(&mut self, population: Vec<Cell>) -> Result<(), EngineError> {
        let expected = self.geometry.len();
        if population.len() != expected {
            return Err(EngineError::PopulationSize {
                expected,
                actual: population.len(),
            });
        }
        if let Some(index) = population
            .iter()
            .enumerate()
            .position(|(i, cell)| cell.location != self.geometry.point(i))
        {
            return Err(EngineError::MisplacedCell { index });
        }

        self.score = score(&population);
        self.population = population;
        self.generation = 0;
        self.state = EngineState::Running;
        log::debug!(
            "initialized {}x{} population, score {:.6}",
            self.config.rows,
            self.config.cols,
            self.score
        );
        Ok(())
    }

    /// Load the initial population from a provider.
    pub fn initialize_with<P>(&mut self, provider: &P) -> Result<(), EngineError>
    where
        P: PopulationProvider + ?Sized,
    {
        self.initialize(provider.provide(self.config.rows, self.config.cols))
    }

    /// Advance exactly one generation and return the new score.
    ///
    /// A population that ends the step saturated moves the engine to
    /// [`EngineState::Converged`]; otherwise it is left running.
    pub fn step(&mut self, execution: Execution) -> Result<f64, EngineError> {
        if self.state == EngineState::Idle {
            return Err(EngineError::NotInitialized);
        }
        if execution.threads() == 0 {
            return Err(EngineError::InvalidThreadCount);
        }

        let pool = match execution {
            Execution::DataParallel { threads } => Some(self.worker_pool(threads)?),
            Execution::Sequential | Execution::RowSharded { .. } => None,
        };

        let breeder = Breeder::new(
            &self.population,
            self.geometry,
            self.neighborhood.as_ref(),
            self.merge.as_ref(),
        );
        let generation = self.generation;

        let next = match (execution, pool) {
            (Execution::RowSharded { threads }, _) => {
                strategy::row_sharded(breeder, &self.sources, generation, threads)?
            }
            (Execution::DataParallel { .. }, Some(pool)) => {
                strategy::data_parallel(breeder, &self.sources, generation, &pool)?
            }
            _ => strategy::sequential(breeder, &self.sources, generation)?,
        };

        self.population = next;
        self.generation += 1;
        self.score = score(&self.population);
        self.state = if is_converged(&self.population) {
            EngineState::Converged
        } else {
            EngineState::Running
        };
        Ok(self.score)
    }

    /// Run until convergence or until `max_generations` have been stepped.
    pub fn run(
        &mut self,
        max_generations: u64,
        execution: Execution,
    ) -> Result<TerminationReason, EngineError> {
        self.run_with_callback(max_generations, execution, |_| {})
    }

    /// Run with a per-generation observer.
    ///
    /// Convergence is checked after each generation, so a population that is
    /// already saturated still steps once before reporting it.
    pub fn run_with_callback<F>(
        &mut self,
        max_generations: u64,
        execution: Execution,
        mut callback: F,
    ) -> Result<TerminationReason, EngineError>
    where
        F: FnMut(&GenerationReport),
    {
        if self.state == EngineState::Idle {
            return Err(EngineError::NotInitialized);
        }
        self.state = EngineState::Running;

        log::info!(
            "evolving {}x{} grid: topology {}, merge {}, {}, up to {} generations",
            self.config.rows,
            self.config.cols,
            self.config.topology,
            self.config.merge,
            execution,
            max_generations
        );
        log::info!("initial generation score: {:.6}", self.score);

        for _ in 0..max_generations {
            let start = Instant::now();
            let score = self.step(execution)?;
            let generation = self.generation;
            let report = GenerationReport {
                generation,
                score,
                elapsed: start.elapsed(),
            };
            log::debug!(
                "generation {}: score {:.6} ({:.3} ms)",
                generation,
                score,
                report.elapsed.as_secs_f64() * 1e3
            );
            callback(&report);

            if is_converged(&self.population) {
                log::info!("converged after {} generations", generation);
                self.state = EngineState::Converged;
                return Ok(TerminationReason::Converged);
            }
        }

        log::info!(
            "generation budget exhausted, final score {:.6}",
            self.score
        );
        self.state = EngineState::Exhausted;
        Ok(TerminationReason::Exhausted)
    }

    /// Read-only view of the current population, row-major.
    pub fn current_population(&self) -> &[Cell] {
        &self.population
    }

    /// Score of the current population.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Number of generations stepped since initialization.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn stats(&self) -> PopulationStats {
        PopulationStats::from_population(&self.population)
    }

    /// Pool for data-parallel steps, rebuilt only when the thread count changes.
    fn worker_pool(&mut self, threads: usize) -> Result<Arc<rayon::ThreadPool>, EngineError> {
        if let Some((size, pool)) = &self.pool
            && *size == threads
        {
            return Ok(Arc::clone(pool));
        }

        log::debug!("building data-parallel pool with {} threads", threads);
        let pool = Arc::new(
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("cell-worker-{i}"))
                .build()?,
        );
        self.pool = Some((threads, Arc::clone(&pool)));
        Ok(pool)
    }
}
