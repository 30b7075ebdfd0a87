use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::sim::top::RunResult;

fn create_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

pub fn write_summary(path: &Path, results: &[RunResult]) -> io::Result<()> {
    create_parent(path)?;
    let payload = serde_json::to_string_pretty(results)?;
    fs::write(path, payload)
}

/// One row per access: `hierarchy,trace,index,latency`. Runs without a
/// latency log contribute no rows.
pub fn write_latency_csv<W: Write>(out: &mut W, results: &[RunResult]) -> io::Result<()> {
    writeln!(out, "hierarchy,trace,index,latency")?;
    for result in results {
        let Some(log) = result.snapshot.latency_log.as_ref() else {
            continue;
        };
        for (idx, latency) in log.iter().enumerate() {
            writeln!(
                out,
                "{},{},{},{}",
                csv_field(&result.hierarchy),
                csv_field(&result.trace),
                idx,
                latency
            )?;
        }
    }
    Ok(())
}

pub fn write_latency_csv_file(path: &Path, results: &[RunResult]) -> io::Result<()> {
    create_parent(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    write_latency_csv(&mut writer, results)?;
    writer.flush()
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
