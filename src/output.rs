//! Report formatting for per-port summaries.
//!
//! Produces the tabular view, the fixed-width text export, and JSON and CSV
//! renderings of the same rows.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

use crate::analyzers::types::{BucketSummary, SummaryRow};

/// Default export file name, without extension.
pub const DEFAULT_EXPORT_NAME: &str = "post_race_summary";

/// Mime type of the text export.
pub const EXPORT_MIME: &str = "text/plain";

/// Length of the dash line under the export header.
pub const SEPARATOR_WIDTH: usize = 105;

/// One display row with pre-formatted percentage and tier columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    #[serde(rename = "Device")]
    pub device: String,
    #[serde(rename = "Port")]
    pub port: String,
    #[serde(rename = "Count")]
    pub count: usize,
    #[serde(rename = "% Dev")]
    pub percent: String,
    #[serde(rename = "Avg RSSI")]
    pub avg_rssi: f64,
    #[serde(rename = "Avg Stat")]
    pub avg_stat: f64,
    #[serde(rename = "Strong")]
    pub strong: String,
    #[serde(rename = "Good")]
    pub good: String,
    #[serde(rename = "Weak")]
    pub weak: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    rows: &'a [TableRow],
}

fn bucket_cell(bucket: &BucketSummary) -> String {
    format!("{} ({:.1}%)", bucket.count, bucket.percent)
}

impl From<&SummaryRow> for TableRow {
    fn from(row: &SummaryRow) -> Self {
        TableRow {
            device: row.device.clone(),
            port: row.port.clone(),
            count: row.count,
            percent: format!("{:.1}%", row.percent),
            avg_rssi: row.avg_rssi,
            avg_stat: row.avg_stat,
            strong: bucket_cell(&row.strong),
            good: bucket_cell(&row.good),
            weak: bucket_cell(&row.weak),
        }
    }
}

/// Projects summary rows into display rows, keeping their order.
pub fn table_rows(rows: &[SummaryRow]) -> Vec<TableRow> {
    rows.iter().map(TableRow::from).collect()
}

/// Renders the fixed-width text export.
///
/// Column widths and the separator length are fixed so that downstream
/// tooling can read the file by position.
pub fn render_text(rows: &[TableRow]) -> String {
    let mut out = format!(
        "{:<10} {:<5} {:<6} {:<7} {:<9} {:<9} {:<13} {:<13} {:<13}\n",
        "Device", "Port", "Count", "% Dev", "Avg RSSI", "Avg Stat", "Strong", "Good", "Weak"
    );
    out.push_str(&"-".repeat(SEPARATOR_WIDTH));
    out.push('\n');

    for row in rows {
        out.push_str(&format!(
            "{:<10} {:<5} {:<6} {:<7} {:<9} {:<9} {:<13} {:<13} {:<13}\n",
            row.device,
            row.port,
            row.count,
            row.percent,
            format!("{:.1}", row.avg_rssi),
            format!("{:.1}", row.avg_stat),
            row.strong,
            row.good,
            row.weak
        ));
    }

    out
}

/// Serializes the rows as pretty-printed JSON with a generation timestamp.
pub fn to_json(rows: &[TableRow]) -> Result<String> {
    let report = JsonReport {
        generated_at: Utc::now(),
        rows,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Writes the rows as CSV with a header record.
pub fn write_csv<W: Write>(writer: W, rows: &[TableRow]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// File name of the text export for a user-chosen `name`.
pub fn export_file_name(name: &str) -> String {
    format!("{name}.txt")
}
