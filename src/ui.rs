use clap::Parser;
use std::path::PathBuf;
use toml::Table;

use crate::error::{Result, SimError};
use crate::sim::config::{CacheConfig, Config, SimConfig};
use crate::sim::top::Sim;
use crate::trace::TraceConfig;

#[derive(Parser, Debug, Default)]
#[command(version, about = "Multi-level LRU cache hierarchy simulator")]
pub struct HiersimArgs {
    #[arg(help = "Path to config.toml (built-in defaults when omitted)")]
    pub config_path: Option<PathBuf>,
    #[arg(long, help = "Log at level (0:warn, 1:info, 2:debug, 3:trace)")]
    pub log: Option<u64>,
    #[arg(long, help = "Override the base seed for random traces")]
    pub seed: Option<u64>,
    #[arg(long, help = "Override the address-space size")]
    pub address_space: Option<u64>,
    #[arg(long, help = "Write all run results as JSON")]
    pub results_json: Option<PathBuf>,
    #[arg(long, help = "Write per-access latencies as CSV")]
    pub latency_csv: Option<PathBuf>,
    #[arg(long, help = "Print tables only")]
    pub no_charts: bool,
}

pub fn parse_config(toml_string: &str) -> Result<Table> {
    toml::from_str(toml_string)
        .map_err(|err| SimError::config(format!("cannot parse config toml: {err}")))
}

/// `[sim] log_level` read straight from the table, without deserializing
/// (and warning about) the rest of the section.
pub fn config_log_level(config_table: &Table) -> Option<u64> {
    config_table
        .get("sim")?
        .get("log_level")?
        .as_integer()
        .and_then(|level| u64::try_from(level).ok())
}

/// Make a Sim object from the parsed TOML configuration.
/// If `cli_args` is given, override TOML options with CLI arguments.
pub fn make_sim(config_table: &Table, cli_args: Option<&HiersimArgs>) -> Result<Sim> {
    let mut sim_config = SimConfig::from_section(config_table.get("sim"))?;
    let cache_config = CacheConfig::from_section(config_table.get("cache"))?;
    let mut trace_config = TraceConfig::from_section(config_table.get("trace"))?;

    // override toml configs with CLI args
    if let Some(args) = cli_args {
        sim_config.log_level = args.log.unwrap_or(sim_config.log_level);
        sim_config.charts &= !args.no_charts;
        if args.results_json.is_some() {
            sim_config.results_json = args.results_json.clone();
        }
        if args.latency_csv.is_some() {
            sim_config.latency_csv = args.latency_csv.clone();
        }
        trace_config.seed = args.seed.unwrap_or(trace_config.seed);
        trace_config.address_space = args.address_space.unwrap_or(trace_config.address_space);
    }

    Sim::new(sim_config, cache_config, trace_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let sim = make_sim(&parse_config("").unwrap(), None).unwrap();
        assert_eq!(sim.hierarchies().len(), 2);
        assert_eq!(sim.traces().len(), 2);
        assert!(sim.sim_config.charts);
    }

    #[test]
    fn cli_overrides_toml() {
        let toml = r#"
            [sim]
            log_level = 1
            [trace]
            address_space = 32
            seed = 5
        "#;
        let args = HiersimArgs {
            log: Some(2),
            address_space: Some(8),
            no_charts: true,
            ..HiersimArgs::default()
        };
        let sim = make_sim(&parse_config(toml).unwrap(), Some(&args)).unwrap();
        assert_eq!(sim.sim_config.log_level, 2);
        assert!(!sim.sim_config.charts);
        assert_eq!(sim.traces()[0].address_space(), 8);
        // sequential default: three laps
        assert_eq!(sim.traces()[0].len(), 24);
    }

    #[test]
    fn log_level_is_read_without_loading_sections() {
        let table = parse_config("[sim]\nlog_level = 2\n").unwrap();
        assert_eq!(config_log_level(&table), Some(2));
        assert_eq!(config_log_level(&parse_config("").unwrap()), None);
        let negative = parse_config("[sim]\nlog_level = -1\n").unwrap();
        assert_eq!(config_log_level(&negative), None);
    }

    #[test]
    fn full_config_end_to_end() {
        let toml = r#"
            [sim]
            record_latencies = false

            [trace]
            address_space = 20
            [[trace.patterns]]
            name = "laps"
            kind = "sequential"
            repeats = 3

            [[cache.hierarchies]]
            name = "big"
            backing_latency = 10
            levels = [{ name = "L1", capacity = 20, latency = 1 }]
        "#;
        let results = make_sim(&parse_config(toml).unwrap(), None).unwrap().simulate().unwrap();
        assert_eq!(results.len(), 1);
        let snap = &results[0].snapshot;
        assert_eq!(snap.level_hits, vec![40]);
        assert_eq!(snap.misses, 20);
        assert!((snap.average_latency - 4.0).abs() < 1e-9);
        assert!(snap.latency_log.is_none());
    }

    #[test]
    fn invalid_toml_is_a_configuration_error() {
        assert!(matches!(
            parse_config("[cache\n"),
            Err(SimError::InvalidConfiguration(_))
        ));
        let negative = r#"
            [[cache.hierarchies]]
            name = "neg"
            levels = [{ capacity = -4, latency = 1 }]
        "#;
        assert!(matches!(
            make_sim(&parse_config(negative).unwrap(), None),
            Err(SimError::InvalidConfiguration(_))
        ));
    }
}
