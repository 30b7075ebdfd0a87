//! Terminal rendering of finished runs. Nothing here feeds back into the
//! simulation; it only reads `RunResult`s.

pub mod chart;
pub mod table;

use crate::sim::top::RunResult;

pub use chart::{bar_chart, latency_strip, share_bar};
pub use table::render_tables;

#[derive(Debug, Clone, Copy)]
pub struct TextReport {
    pub charts: bool,
    pub width: usize,
}

impl Default for TextReport {
    fn default() -> Self {
        Self {
            charts: true,
            width: 48,
        }
    }
}

impl TextReport {
    pub fn render(&self, results: &[RunResult]) -> String {
        let mut out = render_tables(results);
        if !self.charts || results.is_empty() {
            return out;
        }

        let label = |r: &RunResult| format!("{} / {}", r.hierarchy, r.trace);
        let hits: Vec<(String, f64)> = results
            .iter()
            .map(|r| (label(r), r.snapshot.hits() as f64))
            .collect();
        let avg: Vec<(String, f64)> = results
            .iter()
            .map(|r| (label(r), r.snapshot.average_latency))
            .collect();
        out.push_str(&bar_chart("Cache Hits Comparison", &hits, self.width, 0));
        out.push_str(&bar_chart("Average Access Time (cycles)", &avg, self.width, 2));

        out.push_str("\nHit/Miss Share\n");
        for result in results {
            out.push_str(&share_bar(result, self.width));
        }

        let strips: Vec<String> = results
            .iter()
            .filter_map(|r| latency_strip(r, self.width))
            .collect();
        if !strips.is_empty() {
            out.push_str("\nStep-by-step Access Time\n");
            for strip in strips {
                out.push_str(&strip);
            }
        }
        out
    }
}
