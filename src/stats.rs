//! Per-port signal statistics over a [`GroupedStore`].

use std::cmp::Ordering;

use tracing::debug;

use crate::analyzers::aggregate::GroupedStore;
use crate::analyzers::tier::{SignalTier, tier};
use crate::analyzers::types::{BucketSummary, Sample, SummaryRow};
use crate::analyzers::utility::{mean, pct, round1};

/// Orders port ids by integer value, numeric ids first.
///
/// Ids that do not parse as an integer sort after every numeric id, in
/// lexicographic order. Numeric ties such as `"1"` and `"01"` fall back to
/// the id string.
pub fn port_order(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Computes one [`SummaryRow`] per (device, port).
///
/// Rows come out with devices in lexicographic order and ports in
/// [`port_order`] within each device.
pub fn summarize(store: &GroupedStore) -> Vec<SummaryRow> {
    let mut rows = Vec::new();

    for (device, ports) in store.devices() {
        let total_reads = store.device_total(device);

        let mut port_ids: Vec<&String> = ports.keys().collect();
        port_ids.sort_by(|a, b| port_order(a, b));

        for port in port_ids {
            let row = summarize_port(device, port, &ports[port], total_reads);
            if row.out_of_range > 0 {
                debug!(
                    device,
                    port = %port,
                    out_of_range = row.out_of_range,
                    "Signal values outside tier range"
                );
            }
            rows.push(row);
        }
    }

    rows
}

fn summarize_port(device: &str, port: &str, samples: &[Sample], total_reads: usize) -> SummaryRow {
    let count = samples.len();

    let rssi: Vec<f64> = samples.iter().map(|s| s.rssi as f64).collect();
    let stat: Vec<f64> = samples.iter().map(|s| s.stat).collect();

    let (mut strong, mut good, mut weak, mut out_of_range) = (0, 0, 0, 0);
    for sample in samples {
        match tier(sample.rssi) {
            Some(SignalTier::Strong) => strong += 1,
            Some(SignalTier::Good) => good += 1,
            Some(SignalTier::Weak) => weak += 1,
            None => out_of_range += 1,
        }
    }

    let bucket = |n: usize| BucketSummary {
        count: n,
        percent: pct(n, count),
    };

    SummaryRow {
        device: device.to_string(),
        port: port.to_string(),
        count,
        percent: pct(count, total_reads),
        avg_rssi: round1(mean(&rssi)),
        avg_stat: round1(mean(&stat)),
        strong: bucket(strong),
        good: bucket(good),
        weak: bucket(weak),
        out_of_range,
    }
}
