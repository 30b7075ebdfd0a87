use std::fmt::Write;

use crate::sim::top::RunResult;

const LEVEL_FILLS: [char; 3] = ['█', '▓', '▒'];
const MISS_FILL: char = '░';
const STRIP_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Horizontal bars scaled so the largest value spans `width` cells.
pub fn bar_chart(title: &str, bars: &[(String, f64)], width: usize, precision: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{title}");
    let label_width = bars.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    let max = bars.iter().map(|&(_, v)| v).fold(0.0_f64, f64::max);
    for (label, value) in bars {
        let cells = if max > 0.0 {
            ((value / max) * width as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {label:<label_width$} | {} {value:.precision$}",
            "█".repeat(cells)
        );
    }
    out
}

/// Hit/miss share of one run as a single proportional bar plus a legend.
pub fn share_bar(result: &RunResult, width: usize) -> String {
    let snap = &result.snapshot;
    let total = snap.accesses.max(1) as f64;
    let mut segments: Vec<(String, char, u64)> = result
        .level_names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            (
                format!("{name} hits"),
                LEVEL_FILLS[i % LEVEL_FILLS.len()],
                snap.hits_at(i),
            )
        })
        .collect();
    segments.push(("misses".to_string(), MISS_FILL, snap.misses));

    let mut bar = String::new();
    let mut legend = Vec::new();
    for (name, fill, count) in &segments {
        let cells = ((*count as f64 / total) * width as f64).round() as usize;
        bar.extend(std::iter::repeat(*fill).take(cells));
        legend.push(format!("{fill} {name} {:.1}%", *count as f64 * 100.0 / total));
    }
    format!(
        "  {} / {}\n  [{bar}]\n  {}\n",
        result.hierarchy,
        result.trace,
        legend.join("  ")
    )
}

/// Per-access latency as a strip of block glyphs, `width` accesses per line.
/// Returns `None` when the run kept no latency log.
pub fn latency_strip(result: &RunResult, width: usize) -> Option<String> {
    let log = result.snapshot.latency_log.as_ref()?;
    let lo = log.iter().copied().min()?;
    let hi = log.iter().copied().max()?;
    let span = (hi - lo).max(1) as f64;
    let top = (STRIP_GLYPHS.len() - 1) as f64;
    let glyphs: Vec<char> = log
        .iter()
        .map(|&latency| STRIP_GLYPHS[(((latency - lo) as f64 / span) * top).round() as usize])
        .collect();

    let mut out = format!(
        "  {} / {} (latency {}..{} cycles)\n",
        result.hierarchy, result.trace, lo, hi
    );
    for chunk in glyphs.chunks(width.max(1)) {
        let _ = writeln!(out, "  {}", chunk.iter().collect::<String>());
    }
    Some(out)
}
