use std::fmt::Write;

use crate::sim::top::RunResult;

/// Groups runs by hierarchy, keeping first-seen order.
pub(crate) fn by_hierarchy(results: &[RunResult]) -> Vec<(&str, Vec<&RunResult>)> {
    let mut groups: Vec<(&str, Vec<&RunResult>)> = Vec::new();
    for result in results {
        match groups.iter_mut().find(|(name, _)| *name == result.hierarchy) {
            Some((_, runs)) => runs.push(result),
            None => groups.push((result.hierarchy.as_str(), vec![result])),
        }
    }
    groups
}

/// One table per hierarchy, one row per trace.
pub fn render_tables(results: &[RunResult]) -> String {
    let mut out = String::new();
    for (hierarchy, runs) in by_hierarchy(results) {
        let level_names = &runs[0].level_names;
        let mut header = vec!["Trace".to_string()];
        header.extend(level_names.iter().map(|name| format!("{name} Hits")));
        header.push("Misses".to_string());
        header.push("Avg Time".to_string());
        header.extend(level_names.iter().map(|name| format!("{name} Hit Ratio")));
        header.push("Miss Ratio".to_string());

        let rows: Vec<Vec<String>> = runs
            .iter()
            .map(|run| {
                let snap = &run.snapshot;
                let mut row = vec![run.trace.clone()];
                row.extend((0..level_names.len()).map(|i| snap.hits_at(i).to_string()));
                row.push(snap.misses.to_string());
                row.push(format!("{:.2}", snap.average_latency));
                row.extend(
                    (0..level_names.len())
                        .map(|i| format!("{:.2}", snap.level_hit_ratios.get(i).copied().unwrap_or(0.0))),
                );
                row.push(format!("{:.2}", snap.miss_ratio));
                row
            })
            .collect();

        let widths: Vec<usize> = (0..header.len())
            .map(|col| {
                rows.iter()
                    .map(|row| row[col].len())
                    .chain([header[col].len()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let rule = "-".repeat(widths.iter().sum::<usize>() + 3 * (widths.len() - 1));

        let _ = writeln!(out, "\n{hierarchy}");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "{}", join_row(&header, &widths));
        let _ = writeln!(out, "{rule}");
        for row in &rows {
            let _ = writeln!(out, "{}", join_row(row, &widths));
        }
    }
    out
}

fn join_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
