//! Compute module - The cellular genetic algorithm core.

mod cell;
mod engine;
mod geometry;
mod merge;
mod neighborhood;
mod operators;
mod partition;
mod random;
mod score;

pub mod strategy;

pub use cell::*;
pub use engine::*;
pub use geometry::*;
pub use merge::*;
pub use neighborhood::*;
pub use operators::*;
pub use partition::*;
pub use random::*;
pub use score::*;

use crate::schema::ConfigError;

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Engine has no population; initialize it first")]
    NotInitialized,

    #[error("Population has {actual} cells, grid needs {expected}")]
    PopulationSize { expected: usize, actual: usize },

    #[error("Cell at index {index} is not located at its own slot")]
    MisplacedCell { index: usize },

    #[error("Channel rotation selector {0} outside 0..=2")]
    InvalidRotation(u8),

    #[error("Neighborhood of {0} cells cannot supply two parents")]
    NeighborhoodTooSmall(usize),

    #[error("Thread count must be non-zero")]
    InvalidThreadCount,

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to spawn worker thread: {0}")]
    WorkerSpawn(std::io::Error),

    #[error("Worker for shard {shard} panicked")]
    WorkerPanicked { shard: usize },

    #[error("Population buffer poisoned by a panicking worker")]
    PoisonedBuffer,
}
