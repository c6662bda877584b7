//! Configuration types for cellular GA runs.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Seed;

/// Neighborhood shape used to pick breeding candidates around a grid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    /// Axis-aligned cross of radius 1 (5 cells).
    L5,
    /// Axis-aligned cross of radius 2 (9 cells).
    L9,
    /// Full 3x3 block (9 cells).
    C9,
    /// 3x3 block plus the four axis cells at distance 2 (13 cells).
    C13,
}

impl Topology {
    /// All topologies, in declaration order.
    pub const ALL: [Topology; 4] = [Topology::L5, Topology::L9, Topology::C9, Topology::C13];

    /// Number of cells in a neighborhood of this shape, origin included.
    pub fn size(self) -> usize {
        match self {
            Topology::L5 => 5,
            Topology::L9 | Topology::C9 => 9,
            Topology::C13 => 13,
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topology::L5 => "L5",
            Topology::L9 => "L9",
            Topology::C9 => "C9",
            Topology::C13 => "C13",
        };
        f.write_str(name)
    }
}

impl FromStr for Topology {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L5" => Ok(Topology::L5),
            "L9" => Ok(Topology::L9),
            "C9" => Ok(Topology::C9),
            "C13" => Ok(Topology::C13),
            _ => Err(ConfigError::UnknownTopology(s.to_string())),
        }
    }
}

/// Rule for folding freshly bred offspring back into the current population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MergePolicy {
    /// Offspring population becomes the current population.
    ReplaceAll,
    /// Each offspring overwrites the least fit member of its neighborhood.
    ReplaceWorstInNeighborhood,
    /// Each offspring overwrites one of its parents, chosen 50/50.
    ReplaceOneParent,
}

impl MergePolicy {
    pub const ALL: [MergePolicy; 3] = [
        MergePolicy::ReplaceAll,
        MergePolicy::ReplaceWorstInNeighborhood,
        MergePolicy::ReplaceOneParent,
    ];
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergePolicy::ReplaceAll => "ReplaceAll",
            MergePolicy::ReplaceWorstInNeighborhood => "ReplaceWorstInNeighborhood",
            MergePolicy::ReplaceOneParent => "ReplaceOneParent",
        };
        f.write_str(name)
    }
}

impl FromStr for MergePolicy {
    type Err = ConfigError;

    /// Accepts the variant name or its kebab/snake-case spelling, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "replaceall" => Ok(MergePolicy::ReplaceAll),
            "replaceworstinneighborhood" | "replaceworst" => {
                Ok(MergePolicy::ReplaceWorstInNeighborhood)
            }
            "replaceoneparent" => Ok(MergePolicy::ReplaceOneParent),
            _ => Err(ConfigError::UnknownMergePolicy(s.to_string())),
        }
    }
}

/// Grid shape and genetic operator selection. Fixed for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of rows (Y dimension).
    pub rows: usize,
    /// Number of columns (X dimension).
    pub cols: usize,
    /// Breeding neighborhood shape.
    pub topology: Topology,
    /// Offspring replacement rule.
    pub merge: MergePolicy,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 256,
            cols: 256,
            topology: Topology::L5,
            merge: MergePolicy::ReplaceAll,
        }
    }
}

impl GridConfig {
    /// Get total population size (rows * cols).
    #[inline]
    pub fn population_size(&self) -> usize {
        self.rows * self.cols
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if u32::try_from(self.rows).is_err() || u32::try_from(self.cols).is_err() {
            return Err(ConfigError::InvalidDimensions);
        }
        Ok(())
    }
}

/// How a single generation is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum Execution {
    /// One control flow, row-major, one random stream.
    #[default]
    Sequential,
    /// Contiguous row ranges bred on dedicated worker threads.
    RowSharded { threads: usize },
    /// Every grid slot scheduled on a fixed-size thread pool.
    DataParallel { threads: usize },
}

impl Execution {
    /// Map the classic `(multi_threaded, thread_count)` switch onto an execution mode.
    pub fn from_flags(multi_threaded: bool, thread_count: usize) -> Self {
        if multi_threaded {
            Execution::RowSharded {
                threads: thread_count,
            }
        } else {
            Execution::Sequential
        }
    }

    /// Worker count, 1 for sequential execution.
    pub fn threads(&self) -> usize {
        match *self {
            Execution::Sequential => 1,
            Execution::RowSharded { threads } | Execution::DataParallel { threads } => threads,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads() == 0 {
            return Err(ConfigError::InvalidThreadCount);
        }
        Ok(())
    }
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Execution::Sequential => f.write_str("sequential"),
            Execution::RowSharded { threads } => write!(f, "row-sharded x{threads}"),
            Execution::DataParallel { threads } => write!(f, "data-parallel x{threads}"),
        }
    }
}

/// Full description of a run, as loaded by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub grid: GridConfig,
    /// Generation budget.
    pub max_generations: u64,
    #[serde(default)]
    pub execution: Execution,
    /// Random seed for reproducibility. Drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Initial population pattern.
    #[serde(default)]
    pub pattern: Seed,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            max_generations: 100,
            execution: Execution::RowSharded { threads: 4 },
            seed: None,
            pattern: Seed::default(),
        }
    }
}

impl RunConfig {
    /// Load and validate a run configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.execution.validate()
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions (rows, cols) must be non-zero and fit in 32 bits")]
    InvalidDimensions,
    #[error("Thread count must be non-zero")]
    InvalidThreadCount,
    #[error("Unknown neighborhood topology: {0}")]
    UnknownTopology(String),
    #[error("Unknown merge policy: {0}")]
    UnknownMergePolicy(String),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let config = GridConfig {
            rows: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = RunConfig {
            execution: Execution::DataParallel { threads: 0 },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreadCount)
        ));
    }

    #[test]
    fn test_topology_parsing() {
        assert_eq!("l5".parse::<Topology>().unwrap(), Topology::L5);
        assert_eq!(" C13 ".parse::<Topology>().unwrap(), Topology::C13);
        assert!(matches!(
            "L7".parse::<Topology>(),
            Err(ConfigError::UnknownTopology(name)) if name == "L7"
        ));
    }

    #[test]
    fn test_merge_policy_parsing() {
        assert_eq!(
            "replace-all".parse::<MergePolicy>().unwrap(),
            MergePolicy::ReplaceAll
        );
        assert_eq!(
            "ReplaceWorstInNeighborhood".parse::<MergePolicy>().unwrap(),
            MergePolicy::ReplaceWorstInNeighborhood
        );
        assert_eq!(
            "replace_one_parent".parse::<MergePolicy>().unwrap(),
            MergePolicy::ReplaceOneParent
        );
        assert!("replace-best".parse::<MergePolicy>().is_err());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for topology in Topology::ALL {
            assert_eq!(topology.to_string().parse::<Topology>().unwrap(), topology);
        }
        for policy in MergePolicy::ALL {
            assert_eq!(policy.to_string().parse::<MergePolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(Execution::from_flags(false, 12), Execution::Sequential);
        assert_eq!(
            Execution::from_flags(true, 12),
            Execution::RowSharded { threads: 12 }
        );
    }

    #[test]
    fn test_unknown_variant_rejected_by_serde() {
        let json = r#"{"rows": 4, "cols": 4, "topology": "X3", "merge": "ReplaceAll"}"#;
        assert!(serde_json::from_str::<GridConfig>(json).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "grid": {{"rows": 8, "cols": 16, "topology": "C9", "merge": "ReplaceOneParent"}},
                "max_generations": 5,
                "execution": {{"mode": "DataParallel", "threads": 2}},
                "seed": 7
            }}"#
        )
        .unwrap();

        let config = RunConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.grid.population_size(), 128);
        assert_eq!(config.grid.topology, Topology::C9);
        assert_eq!(config.execution, Execution::DataParallel { threads: 2 });
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "grid": {{"rows": 0, "cols": 16, "topology": "C9", "merge": "ReplaceAll"}},
                "max_generations": 5
            }}"#
        )
        .unwrap();

        assert!(matches!(
            RunConfig::from_json_file(file.path()),
            Err(ConfigError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            RunConfig::from_json_file("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
