//! Text tables and CSV export for benchmark measurements

use super::Measurement;
use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// First line of every exported CSV file
pub const CSV_HEADER: &str = "LoadFactor,Algorithm,InsertTime(us),SearchTime(us),DeleteTime(us),AvgProbeSearchHit,AvgProbeSearchMiss,AvgProbeInsertAfterDelete";

const RULE_WIDTH: usize = 100;

fn rule<W: Write>(out: &mut W, c: char) -> Result<()> {
    writeln!(out, "{}", c.to_string().repeat(RULE_WIDTH))?;
    Ok(())
}

/// Banner naming the key count, pattern, resize mode and table capacities
pub fn print_header<W: Write>(
    out: &mut W,
    size: usize,
    pattern: &str,
    resize_enabled: bool,
    capacities: &[(f64, usize)],
) -> Result<()> {
    rule(out, '=')?;
    writeln!(
        out,
        "M = {} keys | pattern {} | resize {}",
        size,
        pattern,
        if resize_enabled { "enabled" } else { "disabled" }
    )?;
    for (lf, capacity) in capacities {
        writeln!(out, "  load factor {:.2} -> table size {}", lf, capacity)?;
    }
    rule(out, '=')?;
    Ok(())
}

/// Cluster count, longest and mean cluster per table after the insert phase
pub fn print_cluster_stats<W: Write>(out: &mut W, measurements: &[Measurement]) -> Result<()> {
    writeln!(out, "Cluster statistics after insertion")?;
    writeln!(
        out,
        "{:<20} {:>8} {:>10} {:>10} {:>12}",
        "Algorithm", "LoadFac", "Clusters", "MaxLen", "AvgLen"
    )?;
    rule(out, '-')?;
    for m in measurements {
        writeln!(
            out,
            "{:<20} {:>8.2} {:>10} {:>10} {:>12.2}",
            m.kind.display_name(),
            m.load_factor,
            m.run.clusters.count,
            m.run.clusters.max_length,
            m.run.clusters.avg_length
        )?;
    }
    writeln!(out)?;
    Ok(())
}

/// Timings and probe averages, one row per table
pub fn print_summary<W: Write>(out: &mut W, measurements: &[Measurement]) -> Result<()> {
    writeln!(
        out,
        "{:<20} {:>8} {:>12} {:>12} {:>12} {:>10} {:>10} {:>10} {:>8}",
        "Algorithm",
        "LoadFac",
        "Insert(us)",
        "Search(us)",
        "Delete(us)",
        "Hit",
        "Miss",
        "ReIns",
        "Failed"
    )?;
    rule(out, '-')?;
    for m in measurements {
        let r = &m.run.result;
        writeln!(
            out,
            "{:<20} {:>8.2} {:>12.2} {:>12.2} {:>12.2} {:>10.3} {:>10.3} {:>10.3} {:>8}",
            m.kind.display_name(),
            m.load_factor,
            r.insert_time_us,
            r.search_time_us,
            r.delete_time_us,
            r.avg_probe_search_hit,
            r.avg_probe_search_miss,
            r.avg_probe_insert_after_delete,
            r.failed_inserts
        )?;
    }
    writeln!(out)?;
    Ok(())
}

/// Raw counters of the first run, one row per table
pub fn print_detail<W: Write>(out: &mut W, measurements: &[Measurement]) -> Result<()> {
    writeln!(
        out,
        "{:<20} {:>8} {:>8} {:>10} {:>8} {:>9} {:>8} {:>8} {:>8} {:>8}",
        "Algorithm",
        "LoadFac",
        "Insert",
        "Probe/Ins",
        "Coll",
        "CollRate",
        "Search",
        "Probe/S",
        "Delete",
        "Probe/D"
    )?;
    rule(out, '-')?;
    for m in measurements {
        let s = &m.run.stats;
        writeln!(
            out,
            "{:<20} {:>8.2} {:>8} {:>10.3} {:>8} {:>8.2}% {:>8} {:>8.3} {:>8} {:>8.3}",
            format!("{}-LF{}", m.kind.short_name(), m.load_factor),
            m.load_factor,
            s.n_insert,
            s.avg_insert_probes(),
            s.total_collisions,
            s.collision_rate(),
            s.n_search,
            s.avg_search_probes(),
            s.n_delete,
            s.avg_delete_probes()
        )?;
    }
    writeln!(out)?;
    Ok(())
}

/// One CSV line (without newline) for `m`
pub fn csv_row(m: &Measurement) -> String {
    let r = &m.run.result;
    format!(
        "{:.2},{},{:.2},{:.2},{:.2},{:.4},{:.4},{:.4}",
        m.load_factor,
        m.kind.display_name(),
        r.insert_time_us,
        r.search_time_us,
        r.delete_time_us,
        r.avg_probe_search_hit,
        r.avg_probe_search_miss,
        r.avg_probe_insert_after_delete
    )
}

/// Appends measurements to a CSV file, writing [`CSV_HEADER`] into new files
#[derive(Debug, Clone)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    /// Exporter targeting `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row per measurement, returning the number of rows written
    pub fn append(&self, measurements: &[Measurement]) -> Result<usize> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let needs_header = fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = BufWriter::new(file);
        if needs_header {
            writeln!(writer, "{}", CSV_HEADER)?;
        }
        for m in measurements {
            writeln!(writer, "{}", csv_row(m))?;
        }
        writer.flush()?;

        log::debug!(
            "appended {} rows to {}",
            measurements.len(),
            self.path.display()
        );
        Ok(measurements.len())
    }
}
