//! Cellular GA - spatially local evolution of a colored toroidal grid.
//!
//! Every generation, each grid slot breeds one offspring from two parents
//! picked fitness-proportionately from its local neighborhood. The bred
//! population is folded back into the current one by a replacement policy,
//! and the loop repeats until every cell is at maximum fitness or the
//! generation budget runs out.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration types and seeding for runs
//! - `compute`: The evolution core (neighborhoods, operators, merge
//!   policies, execution strategies, engine)
//!
//! # Example
//!
//! ```rust,no_run
//! use cellular_ga::{
//!     compute::{EvolutionEngine, TerminationReason},
//!     schema::{Execution, GridConfig, MergePolicy, Pattern, Seed, Topology},
//! };
//!
//! let config = GridConfig {
//!     rows: 128,
//!     cols: 128,
//!     topology: Topology::L9,
//!     merge: MergePolicy::ReplaceWorstInNeighborhood,
//! };
//!
//! let mut engine = EvolutionEngine::with_seed(config, 42).unwrap();
//! engine
//!     .initialize_with(&Seed { pattern: Pattern::Discriminated { seed: 7 } })
//!     .unwrap();
//!
//! let reason = engine
//!     .run_with_callback(100, Execution::RowSharded { threads: 4 }, |report| {
//!         println!("generation {}: score {:.4}", report.generation, report.score);
//!     })
//!     .unwrap();
//!
//! assert!(matches!(
//!     reason,
//!     TerminationReason::Converged | TerminationReason::Exhausted
//! ));
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{
    Cell, EngineError, EvolutionEngine, GenerationReport, Point, PopulationStats,
    TerminationReason,
};
pub use schema::{Execution, GridConfig, MergePolicy, Pattern, RunConfig, Seed, Topology};
