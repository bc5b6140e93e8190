//! # Table Export
//!
//! Renders a [`StressTable`] for people and for other tools:
//!
//! - [`write_csv`] / [`export_csv`] - spreadsheet-friendly CSV, one row per sample
//! - [`format_table`] - fixed-precision text table for terminals
//! - [`format_report`] - titled plain-text report with parameters, table and extremes
//!
//! ## Example
//!
//! ```rust
//! use stress_core::calculations::{calculate, BeamSectionParameters};
//! use stress_core::export::format_table;
//! use stress_core::project::ReportSettings;
//!
//! let table = calculate(&BeamSectionParameters::new(0.0, 100.0, 0.0, 10.0, 5.0)).unwrap();
//! let text = format_table(&table, &ReportSettings::default());
//! assert!(text.contains("10.00"));
//! ```

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::calculations::flexure::{BeamSectionParameters, StressTable};
use crate::errors::{StressError, StressResult};
use crate::file_io::write_atomic;
use crate::project::ReportSettings;

const COLUMN_WIDTH: usize = 16;

/// Write the table as CSV with a `y_mm,stress_n_per_mm2` header.
pub fn write_csv<W: Write>(table: &StressTable, writer: W) -> StressResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for sample in table {
        csv_writer
            .serialize(sample)
            .map_err(|e| StressError::serialization(e.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|e| StressError::serialization(e.to_string()))?;
    Ok(())
}

/// Write the table as a CSV file, replacing `path` atomically.
pub fn export_csv(table: &StressTable, path: &Path) -> StressResult<()> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    write_atomic(path, &buffer)?;
    info!("exported {} samples to {}", table.len(), path.display());
    Ok(())
}

/// Text table with a `y (mm)` / `σ (N/mm²)` header.
pub fn format_table(table: &StressTable, settings: &ReportSettings) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>w$}{:>w$}",
        "y (mm)",
        "σ (N/mm²)",
        w = COLUMN_WIDTH
    );
    let _ = writeln!(out, "{}", "-".repeat(COLUMN_WIDTH * 2));
    for sample in table {
        let _ = writeln!(
            out,
            "{:>w$.yp$}{:>w$.sp$}",
            sample.y_mm,
            sample.stress_n_per_mm2,
            w = COLUMN_WIDTH,
            yp = settings.y_precision,
            sp = settings.stress_precision
        );
    }
    out
}

/// Plain-text report: title, parameters, table, then σ_max / σ_min.
pub fn format_report(
    title: &str,
    params: &BeamSectionParameters,
    table: &StressTable,
    settings: &ReportSettings,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Bending stress report: {}", title);
    let _ = writeln!(out, "{}", "=".repeat(COLUMN_WIDTH * 2));
    let _ = writeln!(out, "Bending moment:     {} N·mm", params.bending_moment_nmm);
    let _ = writeln!(out, "Moment of inertia:  {} mm⁴", params.inertia_mm4);
    let _ = writeln!(
        out,
        "Section bounds:     {}...{} mm",
        params.min_y_mm, params.max_y_mm
    );
    let _ = writeln!(out, "Section height:     {} mm", params.height_mm());
    let _ = writeln!(out, "Step:               {} mm", params.step_mm);
    let _ = writeln!(out);
    out.push_str(&format_table(table, settings));

    if let Some(extremes) = table.extremes() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "σ_max = {:.sp$} N/mm² at y = {:.yp$} mm",
            extremes.max.stress_n_per_mm2,
            extremes.max.y_mm,
            sp = settings.stress_precision,
            yp = settings.y_precision
        );
        let _ = writeln!(
            out,
            "σ_min = {:.sp$} N/mm² at y = {:.yp$} mm",
            extremes.min.stress_n_per_mm2,
            extremes.min.y_mm,
            sp = settings.stress_precision,
            yp = settings.y_precision
        );
    }
    if !table.neutral_axis_in_range() {
        let _ = writeln!(out, "Neutral axis (y = 0) lies outside the sampled range");
    }
    out
}
