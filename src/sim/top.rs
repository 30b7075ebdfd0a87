use log::info;
use serde::Serialize;

use crate::error::{Result, SimError};
use crate::hier::{HierarchySimulator, StatsSnapshot};
use crate::sim::config::{CacheConfig, HierarchyConfig, SimConfig};
use crate::trace::{compile_traces, TraceConfig, TraceSource};

/// Outcome of one hierarchy simulated against one trace.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub hierarchy: String,
    pub trace: String,
    pub level_names: Vec<String>,
    pub snapshot: StatsSnapshot,
}

/// A full experiment: every configured hierarchy against every trace.
pub struct Sim {
    pub sim_config: SimConfig,
    hierarchies: Vec<HierarchyConfig>,
    traces: Vec<TraceSource>,
}

impl Sim {
    /// Validates the hierarchies and builds the traces up front, so a bad
    /// config fails before any run starts.
    pub fn new(sim_config: SimConfig, cache_config: CacheConfig, trace_config: TraceConfig) -> Result<Sim> {
        if cache_config.hierarchies.is_empty() {
            return Err(SimError::config("no cache hierarchies configured"));
        }
        for hierarchy in &cache_config.hierarchies {
            hierarchy.validate()?;
        }
        let traces = compile_traces(&trace_config)?;
        if traces.is_empty() {
            return Err(SimError::config("no trace patterns configured"));
        }
        Ok(Sim {
            sim_config,
            hierarchies: cache_config.hierarchies,
            traces,
        })
    }

    pub fn hierarchies(&self) -> &[HierarchyConfig] {
        &self.hierarchies
    }

    pub fn traces(&self) -> &[TraceSource] {
        &self.traces
    }

    /// Runs hierarchy-major, trace-minor. Each run gets a fresh simulator.
    pub fn simulate(&self) -> Result<Vec<RunResult>> {
        let mut results = Vec::with_capacity(self.hierarchies.len() * self.traces.len());
        for hierarchy in &self.hierarchies {
            for trace in &self.traces {
                results.push(self.run_one(hierarchy, trace)?);
            }
        }
        Ok(results)
    }

    pub fn run_one(&self, hierarchy: &HierarchyConfig, trace: &TraceSource) -> Result<RunResult> {
        info!(
            "simulating '{}' over trace '{}' ({} accesses)",
            hierarchy.name,
            trace.name(),
            trace.len()
        );
        let mut sim = HierarchySimulator::new(hierarchy, self.sim_config.record_latencies)?;
        let snapshot = sim.run(trace.addresses())?;
        info!(
            "'{}'/'{}': {} hits, {} misses, avg latency {:.2}",
            hierarchy.name,
            trace.name(),
            snapshot.hits(),
            snapshot.misses,
            snapshot.average_latency
        );
        Ok(RunResult {
            hierarchy: hierarchy.name.clone(),
            trace: trace.name().to_string(),
            level_names: hierarchy.level_names(),
            snapshot,
        })
    }
}
