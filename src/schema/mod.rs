//! Schema module - Configuration and seeding types for cellular GA runs.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
