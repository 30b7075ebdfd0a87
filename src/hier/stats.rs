use serde::Serialize;

use crate::error::{Result, SimError};
use crate::hier::simulator::AccessKind;

/// Running counters for one simulation run.
#[derive(Debug, Clone, Default)]
pub struct AccessStatistics {
    level_hits: Vec<u64>,
    level_evictions: Vec<u64>,
    misses: u64,
    accesses: u64,
    total_latency: u64,
    latency_log: Option<Vec<u64>>,
}

impl AccessStatistics {
    pub fn new(num_levels: usize, record_latencies: bool) -> Self {
        Self {
            level_hits: vec![0; num_levels],
            level_evictions: vec![0; num_levels],
            latency_log: record_latencies.then(Vec::new),
            ..Self::default()
        }
    }

    pub fn accesses(&self) -> u64 {
        self.accesses
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn total_latency(&self) -> u64 {
        self.total_latency
    }

    pub fn level_hits(&self) -> &[u64] {
        &self.level_hits
    }

    pub fn level_evictions(&self) -> &[u64] {
        &self.level_evictions
    }

    pub fn latency_log(&self) -> Option<&[u64]> {
        self.latency_log.as_deref()
    }

    pub fn record(&mut self, kind: AccessKind, latency: u64) {
        match kind {
            AccessKind::HitAtLevel(level) => {
                if level >= self.level_hits.len() {
                    self.level_hits.resize(level + 1, 0);
                }
                self.level_hits[level] = self.level_hits[level].saturating_add(1);
            }
            AccessKind::Miss => self.misses = self.misses.saturating_add(1),
        }
        self.accesses = self.accesses.saturating_add(1);
        self.total_latency = self.total_latency.saturating_add(latency);
        if let Some(log) = self.latency_log.as_mut() {
            log.push(latency);
        }
    }

    pub fn record_eviction(&mut self, level: usize) {
        if level >= self.level_evictions.len() {
            self.level_evictions.resize(level + 1, 0);
        }
        self.level_evictions[level] = self.level_evictions[level].saturating_add(1);
    }

    /// Freezes the counters into ratios. Fails with `EmptyTrace` before the
    /// first access, since the average latency is undefined.
    pub fn snapshot(&self) -> Result<StatsSnapshot> {
        if self.accesses == 0 {
            return Err(SimError::EmptyTrace);
        }
        let total = self.accesses as f64;
        let hits: u64 = self.level_hits.iter().sum();
        Ok(StatsSnapshot {
            accesses: self.accesses,
            level_hits: self.level_hits.clone(),
            level_evictions: self.level_evictions.clone(),
            misses: self.misses,
            total_latency: self.total_latency,
            average_latency: self.total_latency as f64 / total,
            level_hit_ratios: self
                .level_hits
                .iter()
                .map(|&h| h as f64 / total)
                .collect(),
            hit_ratio: hits as f64 / total,
            miss_ratio: self.misses as f64 / total,
            latency_log: self.latency_log.clone(),
        })
    }
}

/// Immutable aggregates handed to reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub accesses: u64,
    pub level_hits: Vec<u64>,
    pub level_evictions: Vec<u64>,
    pub misses: u64,
    pub total_latency: u64,
    pub average_latency: f64,
    pub level_hit_ratios: Vec<f64>,
    pub hit_ratio: f64,
    pub miss_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_log: Option<Vec<u64>>,
}

impl StatsSnapshot {
    pub fn hits(&self) -> u64 {
        self.level_hits.iter().sum()
    }

    pub fn hits_at(&self, level: usize) -> u64 {
        self.level_hits.get(level).copied().unwrap_or(0)
    }
}
