use std::fs;
use std::path::Path;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, SimError};
use crate::trace::config::{TraceConfig, TracePatternSpec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceKind {
    /// `0..address_space`, repeated `repeats` times.
    Sequential { repeats: u32 },
    /// `length` independent uniform draws from `0..address_space`.
    Random { length: usize, seed: u64 },
    /// Addresses loaded from a trace file.
    Recorded(Vec<u64>),
}

/// A finite, restartable address sequence. Every call to `addresses` starts
/// over and yields the same addresses in the same order.
#[derive(Debug, Clone)]
pub struct TraceSource {
    name: String,
    address_space: u64,
    kind: TraceKind,
}

impl TraceSource {
    pub fn sequential(name: &str, address_space: u64, repeats: u32) -> Result<Self> {
        check_address_space(address_space)?;
        if repeats == 0 {
            return Err(SimError::config(format!(
                "trace '{}': sequential pattern needs at least one repeat",
                name
            )));
        }
        Ok(Self {
            name: name.to_string(),
            address_space,
            kind: TraceKind::Sequential { repeats },
        })
    }

    pub fn random(name: &str, address_space: u64, length: usize, seed: u64) -> Result<Self> {
        check_address_space(address_space)?;
        if length == 0 {
            return Err(SimError::config(format!(
                "trace '{}': random pattern length must be positive",
                name
            )));
        }
        Ok(Self {
            name: name.to_string(),
            address_space,
            kind: TraceKind::Random { length, seed },
        })
    }

    pub fn recorded(name: &str, address_space: u64, addrs: Vec<u64>) -> Result<Self> {
        check_address_space(address_space)?;
        if addrs.is_empty() {
            return Err(SimError::InvalidTrace(format!("trace '{}' has no addresses", name)));
        }
        if let Some(&bad) = addrs.iter().find(|&&addr| addr >= address_space) {
            return Err(SimError::InvalidTrace(format!(
                "trace '{}': address {} outside address space of {}",
                name, bad, address_space
            )));
        }
        Ok(Self {
            name: name.to_string(),
            address_space,
            kind: TraceKind::Recorded(addrs),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address_space(&self) -> u64 {
        self.address_space
    }

    pub fn kind(&self) -> &TraceKind {
        &self.kind
    }

    pub fn len(&self) -> usize {
        match &self.kind {
            TraceKind::Sequential { repeats } => {
                (self.address_space as usize).saturating_mul(*repeats as usize)
            }
            TraceKind::Random { length, .. } => *length,
            TraceKind::Recorded(addrs) => addrs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn addresses(&self) -> TraceIter<'_> {
        match &self.kind {
            TraceKind::Sequential { .. } => TraceIter::Sequential {
                address_space: self.address_space,
                pos: 0,
                total: self.len(),
            },
            TraceKind::Random { length, seed } => TraceIter::Random {
                rng: StdRng::seed_from_u64(*seed),
                address_space: self.address_space,
                remaining: *length,
            },
            TraceKind::Recorded(addrs) => TraceIter::Recorded(addrs.iter()),
        }
    }
}

pub enum TraceIter<'a> {
    Sequential {
        address_space: u64,
        pos: usize,
        total: usize,
    },
    Random {
        rng: StdRng,
        address_space: u64,
        remaining: usize,
    },
    Recorded(std::slice::Iter<'a, u64>),
}

impl Iterator for TraceIter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        match self {
            TraceIter::Sequential {
                address_space,
                pos,
                total,
            } => {
                if *pos >= *total {
                    return None;
                }
                let addr = *pos as u64 % *address_space;
                *pos += 1;
                Some(addr)
            }
            TraceIter::Random {
                rng,
                address_space,
                remaining,
            } => {
                if *remaining == 0 {
                    return None;
                }
                *remaining -= 1;
                Some(rng.gen_range(0..*address_space))
            }
            TraceIter::Recorded(iter) => iter.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = match self {
            TraceIter::Sequential { pos, total, .. } => total.saturating_sub(*pos),
            TraceIter::Random { remaining, .. } => *remaining,
            TraceIter::Recorded(iter) => iter.len(),
        };
        (left, Some(left))
    }
}

impl ExactSizeIterator for TraceIter<'_> {}

/// Builds every configured trace, in configuration order.
pub fn compile_traces(config: &TraceConfig) -> Result<Vec<TraceSource>> {
    check_address_space(config.address_space)?;
    config
        .patterns
        .iter()
        .enumerate()
        .map(|(idx, spec)| compile_pattern(spec, idx, config))
        .collect()
}

fn compile_pattern(spec: &TracePatternSpec, index: usize, config: &TraceConfig) -> Result<TraceSource> {
    let kind_key = spec.kind.trim().to_ascii_lowercase();
    let address_space = config.address_space;
    let source = match kind_key.as_str() {
        "sequential" | "seq" => {
            let name = name_or(spec, || format!("sequential(x{})", spec.repeats));
            TraceSource::sequential(&name, address_space, spec.repeats)?
        }
        "random" | "rand" => {
            let seed = spec
                .seed
                .unwrap_or_else(|| config.seed.wrapping_add(index as u64));
            let length = spec
                .length
                .unwrap_or_else(|| (address_space as usize).saturating_mul(spec.repeats as usize));
            let name = name_or(spec, || format!("random({})", seed));
            TraceSource::random(&name, address_space, length, seed)?
        }
        "file" => {
            let Some(path) = spec.path.as_deref() else {
                return Err(SimError::config(format!(
                    "trace pattern {} has kind 'file' but no path",
                    index
                )));
            };
            let name = name_or(spec, || format!("file({})", path.display()));
            TraceSource::recorded(&name, address_space, load_trace_file(path)?)?
        }
        other => {
            return Err(SimError::config(format!(
                "unsupported trace pattern kind '{}' at index {} (expected sequential|random|file)",
                other, index
            )))
        }
    };
    debug!("compiled trace '{}' with {} accesses", source.name(), source.len());
    Ok(source)
}

fn name_or(spec: &TracePatternSpec, default: impl FnOnce() -> String) -> String {
    if spec.name.is_empty() {
        default()
    } else {
        spec.name.clone()
    }
}

fn check_address_space(address_space: u64) -> Result<()> {
    if address_space == 0 {
        return Err(SimError::config("address space size must be positive"));
    }
    Ok(())
}

pub fn load_trace_file(path: &Path) -> Result<Vec<u64>> {
    let text = fs::read_to_string(path).map_err(|source| SimError::TraceFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_trace(&text)
}

/// Whitespace-separated addresses, decimal or `0x` hex; `#` starts a comment.
pub fn parse_trace(text: &str) -> Result<Vec<u64>> {
    let mut addrs = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("");
        for token in line.split_whitespace() {
            let parsed = match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
                Some(hex) => u64::from_str_radix(hex, 16),
                None => token.parse::<u64>(),
            };
            let addr = parsed.map_err(|_| {
                SimError::InvalidTrace(format!("line {}: '{}' is not an address", lineno + 1, token))
            })?;
            addrs.push(addr);
        }
    }
    Ok(addrs)
}
