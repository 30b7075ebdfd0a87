use std::path::PathBuf;

use serde::Deserialize;

use crate::sim::config::Config;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TraceConfig {
    pub address_space: u64,
    pub seed: u64,
    pub patterns: Vec<TracePatternSpec>,
}

impl Config for TraceConfig {}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            address_space: 20,
            seed: 0,
            patterns: vec![
                TracePatternSpec {
                    name: "sequential".to_string(),
                    kind: "sequential".to_string(),
                    ..TracePatternSpec::default()
                },
                TracePatternSpec {
                    name: "random".to_string(),
                    kind: "random".to_string(),
                    ..TracePatternSpec::default()
                },
            ],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TracePatternSpec {
    pub name: String,
    pub kind: String,
    pub repeats: u32,
    pub length: Option<usize>,
    pub seed: Option<u64>,
    pub path: Option<PathBuf>,
}

impl Default for TracePatternSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: "sequential".to_string(),
            repeats: 3,
            length: None,
            seed: None,
            path: None,
        }
    }
}
