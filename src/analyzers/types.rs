//! Data types used by the aggregation pipeline.

use serde::Serialize;

/// One signal reading attributed to a device and port.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub rssi: i64,
    pub stat: f64,
}

/// A valid raw line after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Read {
    pub device: String,
    pub port: String,
    pub sample: Sample,
}

/// Member count of one signal tier and its share of the port's reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BucketSummary {
    pub count: usize,
    pub percent: f64,
}

/// Statistics for a single (device, port) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub device: String,
    pub port: String,
    pub count: usize,
    /// Share of the device's reads, unrounded.
    pub percent: f64,
    /// Mean signal strength rounded to one decimal place.
    pub avg_rssi: f64,
    /// Mean secondary metric rounded to one decimal place.
    pub avg_stat: f64,
    pub strong: BucketSummary,
    pub good: BucketSummary,
    pub weak: BucketSummary,
    /// Samples outside [-99, 0], which fall in no tier.
    pub out_of_range: usize,
}
