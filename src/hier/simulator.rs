use log::{debug, trace, warn};

use crate::error::{Result, SimError};
use crate::hier::level::CacheLevel;
use crate::hier::stats::{AccessStatistics, StatsSnapshot};
use crate::sim::config::HierarchyConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    HitAtLevel(usize),
    Miss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessOutcome {
    pub kind: AccessKind,
    pub latency: u64,
}

impl AccessOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self.kind, AccessKind::HitAtLevel(_))
    }
}

/// An ordered stack of LRU levels in front of an always-hitting backing store.
///
/// Level 0 is probed first. On a hit at level `i`, the line is copied into
/// every faster level `0..i` and touched at `i`, so it ends up resident in
/// both. On a full miss the line is inserted into every level.
#[derive(Debug, Clone)]
pub struct HierarchySimulator {
    name: String,
    levels: Vec<CacheLevel>,
    backing_latency: u64,
    stats: AccessStatistics,
}

impl HierarchySimulator {
    pub fn new(config: &HierarchyConfig, record_latencies: bool) -> Result<Self> {
        let backing_latency = config.validate()?;
        let levels: Vec<CacheLevel> = config
            .levels
            .iter()
            .zip(config.level_names())
            .map(|(level, name)| CacheLevel::new(&name, level.capacity as usize, level.latency as u64))
            .collect();

        let latencies = levels.iter().map(CacheLevel::latency).chain([backing_latency]);
        let ordered = latencies
            .clone()
            .zip(latencies.skip(1))
            .all(|(faster, slower)| faster <= slower);
        if !ordered {
            warn!(
                "hierarchy '{}': latencies are not non-decreasing from L1 to backing store",
                config.name
            );
        }

        Ok(Self {
            name: config.name.clone(),
            stats: AccessStatistics::new(levels.len(), record_latencies),
            levels,
            backing_latency,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn levels(&self) -> &[CacheLevel] {
        &self.levels
    }

    pub fn level(&self, idx: usize) -> Option<&CacheLevel> {
        self.levels.get(idx)
    }

    pub fn backing_latency(&self) -> u64 {
        self.backing_latency
    }

    pub fn stats(&self) -> &AccessStatistics {
        &self.stats
    }

    pub fn into_stats(self) -> AccessStatistics {
        self.stats
    }

    /// Classifies one access, updates LRU state and statistics.
    pub fn process(&mut self, addr: u64) -> AccessOutcome {
        let outcome = match self.levels.iter().position(|level| level.contains(addr)) {
            Some(hit) => {
                for j in 0..hit {
                    self.fill(j, addr);
                }
                if hit > 0 {
                    debug!("{}: promoted {:#x} from {}", self.name, addr, self.levels[hit].name());
                }
                self.levels[hit].touch(addr);
                AccessOutcome {
                    kind: AccessKind::HitAtLevel(hit),
                    latency: self.levels[hit].latency(),
                }
            }
            None => {
                for j in (0..self.levels.len()).rev() {
                    self.fill(j, addr);
                }
                AccessOutcome {
                    kind: AccessKind::Miss,
                    latency: self.backing_latency,
                }
            }
        };
        trace!("{}: {:#x} -> {:?}", self.name, addr, outcome);
        self.stats.record(outcome.kind, outcome.latency);
        outcome
    }

    /// Feeds a whole trace through `process` and summarizes it.
    pub fn run<I: IntoIterator<Item = u64>>(&mut self, trace: I) -> Result<StatsSnapshot> {
        let start = self.stats.accesses();
        for addr in trace {
            self.process(addr);
        }
        if self.stats.accesses() == start {
            return Err(SimError::EmptyTrace);
        }
        self.stats.snapshot()
    }

    fn fill(&mut self, level: usize, addr: u64) {
        if let Some(evicted) = self.levels[level].insert(addr) {
            debug!(
                "{}: {} evicted {:#x} for {:#x}",
                self.name,
                self.levels[level].name(),
                evicted,
                addr
            );
            self.stats.record_eviction(level);
        }
    }
}
