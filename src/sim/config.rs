use std::path::PathBuf;

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use toml::Value;

use crate::error::{Result, SimError};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimConfig {
    pub log_level: u64,
    pub record_latencies: bool,
    pub charts: bool,
    pub results_json: Option<PathBuf>,
    pub latency_csv: Option<PathBuf>,
}

pub trait Config: DeserializeOwned + Default {
    fn from_section(section: Option<&Value>) -> Result<Self> {
        match section {
            Some(value) => value
                .clone()
                .try_into()
                .map_err(|err| SimError::config(format!("cannot deserialize config: {err}"))),
            None => {
                warn!("config section not found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

impl Config for SimConfig {}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            log_level: 0,
            record_latencies: true,
            charts: true,
            results_json: None,
            latency_csv: None,
        }
    }
}

/// One cache tier. Raw signed values are kept so that nonsensical input
/// (negative capacity, zero latency) is reported instead of failing to parse.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LevelConfig {
    pub name: String,
    pub capacity: i64,
    pub latency: i64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            capacity: 4,
            latency: 1,
        }
    }
}

impl LevelConfig {
    pub fn new(name: &str, capacity: i64, latency: i64) -> Self {
        Self {
            name: name.to_string(),
            capacity,
            latency,
        }
    }
}

/// Levels are ordered fastest first.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HierarchyConfig {
    pub name: String,
    pub levels: Vec<LevelConfig>,
    pub backing_latency: Option<i64>,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            levels: Vec::new(),
            backing_latency: Some(10),
        }
    }
}

impl HierarchyConfig {
    pub fn new(name: &str, levels: Vec<LevelConfig>, backing_latency: i64) -> Self {
        Self {
            name: name.to_string(),
            levels,
            backing_latency: Some(backing_latency),
        }
    }

    /// Checks every field and returns the backing latency as a cycle count.
    pub fn validate(&self) -> Result<u64> {
        let backing = match self.backing_latency {
            Some(latency) => latency,
            None if self.levels.is_empty() => {
                return Err(SimError::config(format!(
                    "hierarchy '{}' has no levels and no backing latency",
                    self.name
                )))
            }
            None => {
                return Err(SimError::config(format!(
                    "hierarchy '{}' has no backing latency",
                    self.name
                )))
            }
        };
        if backing <= 0 {
            return Err(SimError::config(format!(
                "hierarchy '{}': backing latency must be positive, got {}",
                self.name, backing
            )));
        }
        for (idx, level) in self.levels.iter().enumerate() {
            if level.capacity < 0 {
                return Err(SimError::config(format!(
                    "hierarchy '{}': level {} capacity must not be negative, got {}",
                    self.name, idx, level.capacity
                )));
            }
            if level.latency <= 0 {
                return Err(SimError::config(format!(
                    "hierarchy '{}': level {} latency must be positive, got {}",
                    self.name, idx, level.latency
                )));
            }
        }
        Ok(backing as u64)
    }

    /// Level names with unnamed levels filled in as `L1`, `L2`, ...
    pub fn level_names(&self) -> Vec<String> {
        self.levels
            .iter()
            .enumerate()
            .map(|(idx, level)| {
                if level.name.is_empty() {
                    format!("L{}", idx + 1)
                } else {
                    level.name.clone()
                }
            })
            .collect()
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    pub hierarchies: Vec<HierarchyConfig>,
}

impl Config for CacheConfig {}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            hierarchies: vec![
                HierarchyConfig::new("L1", vec![LevelConfig::new("L1", 4, 1)], 10),
                HierarchyConfig::new(
                    "L1+L2",
                    vec![LevelConfig::new("L1", 4, 1), LevelConfig::new("L2", 8, 5)],
                    10,
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_section_falls_back_to_defaults() {
        let cfg = CacheConfig::from_section(None).unwrap();
        assert_eq!(cfg.hierarchies.len(), 2);
        assert_eq!(cfg.hierarchies[1].levels[1].capacity, 8);
    }

    #[test]
    fn hierarchy_section_parses() {
        let table: toml::Table = toml::from_str(
            r#"
            [cache]
            [[cache.hierarchies]]
            name = "tiny"
            backing_latency = 20
            levels = [{ capacity = 2, latency = 1 }, { name = "LLC", capacity = 16, latency = 7 }]
            "#,
        )
        .unwrap();
        let cfg = CacheConfig::from_section(table.get("cache")).unwrap();
        let h = &cfg.hierarchies[0];
        assert_eq!(h.backing_latency, Some(20));
        assert_eq!(h.level_names(), vec!["L1".to_string(), "LLC".to_string()]);
        assert_eq!(h.validate().unwrap(), 20);
    }

    #[test]
    fn malformed_section_is_a_configuration_error() {
        let table: toml::Table = toml::from_str("[sim]\nlog_level = \"loud\"").unwrap();
        let err = SimConfig::from_section(table.get("sim")).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
    }

    #[test]
    fn validate_rejects_bad_levels() {
        let negative = HierarchyConfig::new("n", vec![LevelConfig::new("L1", -1, 1)], 10);
        assert!(negative.validate().is_err());

        let zero_latency = HierarchyConfig::new("z", vec![LevelConfig::new("L1", 4, 0)], 10);
        assert!(zero_latency.validate().is_err());

        let bad_backing = HierarchyConfig::new("b", vec![LevelConfig::new("L1", 4, 1)], 0);
        assert!(bad_backing.validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_backing_latency() {
        let empty = HierarchyConfig {
            name: "empty".to_string(),
            levels: Vec::new(),
            backing_latency: None,
        };
        assert!(matches!(
            empty.validate(),
            Err(SimError::InvalidConfiguration(_))
        ));

        let no_backing = HierarchyConfig {
            backing_latency: None,
            ..HierarchyConfig::new("nb", vec![LevelConfig::new("L1", 4, 1)], 10)
        };
        assert!(no_backing.validate().is_err());
    }

    #[test]
    fn zero_capacity_and_backing_only_are_legal() {
        let zero = HierarchyConfig::new("zero", vec![LevelConfig::new("L1", 0, 1)], 10);
        assert_eq!(zero.validate().unwrap(), 10);

        let backing_only = HierarchyConfig::new("mem", Vec::new(), 10);
        assert_eq!(backing_only.validate().unwrap(), 10);
    }
}
