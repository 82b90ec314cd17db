use crate::analyzers::aggregate::aggregate_reads;
use crate::analyzers::types::SummaryRow;
use crate::config::LineLayout;
use crate::output::{TableRow, render_text, table_rows};
use crate::stats::summarize;
use anyhow::Result;
use std::io::BufRead;
use tracing::info;

/// Everything derived from one read log.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub summaries: Vec<SummaryRow>,
    pub table: Vec<TableRow>,
    /// Fixed-width text export payload.
    pub text: String,
}

/// Runs parse, aggregate, summarize and format over `reader`.
///
/// Returns only after the whole input is consumed; an I/O error yields no
/// report at all.
pub fn analyze<R: BufRead>(reader: R, layout: &LineLayout) -> Result<Report> {
    let store = aggregate_reads(reader, layout)?;
    let summaries = summarize(&store);
    let table = table_rows(&summaries);
    let text = render_text(&table);

    info!(
        lines = store.lines(),
        skipped = store.skipped(),
        ports = summaries.len(),
        "Read log analyzed"
    );

    Ok(Report {
        summaries,
        table,
        text,
    })
}
