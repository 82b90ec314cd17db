pub mod analyzers;
pub mod config;
pub mod export;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod stats;
