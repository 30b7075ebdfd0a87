pub mod config;
pub mod patterns;

pub use config::{TraceConfig, TracePatternSpec};
pub use patterns::{compile_traces, TraceKind, TraceSource};
