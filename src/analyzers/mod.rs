//! Read log aggregation pipeline.
//!
//! This module groups parsed reads by device and port, classifies signal
//! strength into tiers, and ties parsing, statistics and formatting into a
//! single [`analyzer::Report`].

pub mod aggregate;
pub mod analyzer;
pub mod tier;
pub mod types;
pub mod utility;
