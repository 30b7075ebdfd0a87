use std::fs;

use anyhow::Context;
use clap::Parser;
use hiersim::report::TextReport;
use hiersim::sim::results;
use hiersim::ui::{config_log_level, make_sim, parse_config, HiersimArgs};
use log::info;

pub fn main() -> anyhow::Result<()> {
    let argv = HiersimArgs::parse();
    let config = match &argv.config_path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?,
        None => String::new(),
    };

    let table = parse_config(&config)?;
    // logging has to be up before the sections are loaded
    let log_level = argv.log.or_else(|| config_log_level(&table)).unwrap_or(0);
    hiersim::sim::log::init(log_level);

    let sim = make_sim(&table, Some(&argv)).context("invalid simulator configuration")?;

    let runs = sim.simulate()?;

    let report = TextReport {
        charts: sim.sim_config.charts,
        ..TextReport::default()
    };
    print!("{}", report.render(&runs));

    if let Some(path) = &sim.sim_config.results_json {
        results::write_summary(path, &runs)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote run summary to {}", path.display());
    }
    if let Some(path) = &sim.sim_config.latency_csv {
        results::write_latency_csv_file(path, &runs)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote latency log to {}", path.display());
    }
    Ok(())
}
