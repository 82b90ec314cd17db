use crate::analyzers::types::{Read, Sample};
use crate::config::LineLayout;
use crate::parser::reads;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::BufRead;
use tracing::debug;

/// Samples grouped by device id, then port id. Devices iterate in
/// lexicographic order; samples keep insertion order within a port.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GroupedStore {
    devices: BTreeMap<String, BTreeMap<String, Vec<Sample>>>,
    lines: usize,
    skipped: usize,
}

impl GroupedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the read's sample to its (device, port) sequence.
    pub fn push(&mut self, read: Read) {
        self.devices
            .entry(read.device)
            .or_default()
            .entry(read.port)
            .or_default()
            .push(read.sample);
    }

    /// Ports and their samples for every device.
    pub fn devices(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Vec<Sample>>)> {
        self.devices.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn samples(&self, device: &str, port: &str) -> Option<&[Sample]> {
        self.devices
            .get(device)
            .and_then(|ports| ports.get(port))
            .map(Vec::as_slice)
    }

    /// Number of samples recorded for `device` across all its ports.
    pub fn device_total(&self, device: &str) -> usize {
        self.devices
            .get(device)
            .map(|ports| ports.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Raw lines seen while ingesting.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Raw lines discarded as malformed while ingesting.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Extend<Read> for GroupedStore {
    fn extend<I: IntoIterator<Item = Read>>(&mut self, iter: I) {
        for read in iter {
            self.push(read);
        }
    }
}

impl FromIterator<Read> for GroupedStore {
    fn from_iter<I: IntoIterator<Item = Read>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

/// Streams `reader` line by line into a [`GroupedStore`].
///
/// Malformed lines are skipped. The store is only returned once the whole
/// input has been consumed; the first I/O error aborts the ingest.
pub fn aggregate_reads<R: BufRead>(reader: R, layout: &LineLayout) -> Result<GroupedStore> {
    let mut store = GroupedStore::new();

    for (index, item) in reads(reader, layout).enumerate() {
        let parsed = item.with_context(|| format!("failed to read line {}", index + 1))?;
        store.lines += 1;
        match parsed {
            Some(read) => store.push(read),
            None => store.skipped += 1,
        }
    }

    debug!(
        lines = store.lines,
        skipped = store.skipped,
        devices = store.devices.len(),
        "Read log ingested"
    );

    Ok(store)
}
