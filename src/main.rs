//! CLI entry point for the post-race read analyzer.
//!
//! Provides subcommands for printing per-port signal statistics of a read log
//! and for exporting them as a fixed-width text summary.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use race_read_analyzer::analyzers::analyzer::{Report, analyze};
use race_read_analyzer::config::LineLayout;
use race_read_analyzer::export::{upload_text_to_s3, write_local};
use race_read_analyzer::fetch::open_source;
use race_read_analyzer::output::{DEFAULT_EXPORT_NAME, export_file_name, to_json, write_csv};
use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "race_read_analyzer")]
#[command(about = "Per-port signal statistics for race timing read logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Fixed-width table, identical to the text export
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Print per-port statistics for a read log
    Analyze {
        /// Path to file or URL to fetch (`.gz` is decompressed)
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// JSON file overriding the delimiter and field positions
        #[arg(short, long)]
        layout: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Bearer token for fetching from a URL
        #[arg(long)]
        token: Option<String>,
    },
    /// Write the fixed-width text summary to a file and optionally to S3
    Export {
        /// Path to file or URL to fetch (`.gz` is decompressed)
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// JSON file overriding the delimiter and field positions
        #[arg(short, long)]
        layout: Option<String>,

        /// Export file name, without extension
        #[arg(short, long, default_value = DEFAULT_EXPORT_NAME)]
        name: String,

        /// Directory to write the export into
        #[arg(short = 'd', long, default_value = ".")]
        output_dir: String,

        /// Optional: S3 bucket to upload the export to (e.g., "my-bucket")
        #[arg(long)]
        s3_bucket: Option<String>,

        /// Optional: Gzip compress the export before uploading to S3
        #[arg(long, default_value_t = false)]
        gzip: bool,

        /// Bearer token for fetching from a URL
        #[arg(long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/race_read_analyzer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("race_read_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("RUST_LOG")
                .from_env_lossy(),
        );

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::DEBUG.into())
                .with_env_var("RUST_LOG_JSON")
                .from_env_lossy(),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            layout,
            format,
            token,
        } => {
            let report = load_report(&source, layout.as_deref(), token.as_deref()).await?;
            print_report(&report, format)?;
        }
        Commands::Export {
            source,
            layout,
            name,
            output_dir,
            s3_bucket,
            gzip,
            token,
        } => {
            let report = load_report(&source, layout.as_deref(), token.as_deref()).await?;
            export_report(&report, &name, &output_dir, s3_bucket.as_deref(), gzip).await?;
        }
    }

    Ok(())
}

/// Resolves the layout, opens the source and runs the full pipeline.
#[tracing::instrument(skip(token), fields(source = %source))]
async fn load_report(source: &str, layout: Option<&str>, token: Option<&str>) -> Result<Report> {
    let layout = match layout {
        Some(path) => LineLayout::load(path)?,
        None => LineLayout::default(),
    };

    let reader = open_source(source, token).await?;
    analyze(reader, &layout)
}

fn print_report(report: &Report, format: Format) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        Format::Table => out.write_all(report.text.as_bytes())?,
        Format::Json => writeln!(out, "{}", to_json(&report.table)?)?,
        Format::Csv => write_csv(&mut out, &report.table)?,
    }
    out.flush()?;

    Ok(())
}

/// Writes the text export locally, then uploads it when a bucket is given.
#[tracing::instrument(skip(report))]
async fn export_report(
    report: &Report,
    name: &str,
    output_dir: &str,
    s3_bucket: Option<&str>,
    gzip: bool,
) -> Result<()> {
    let path = write_local(output_dir, name, &report.text)?;

    match s3_bucket {
        Some(bucket) => {
            let config = aws_config::load_from_env().await;
            let s3 = aws_sdk_s3::Client::new(&config);
            let key = upload_text_to_s3(&s3, bucket, &export_file_name(name), &report.text, gzip)
                .await?;
            info!(path = %path.display(), bucket, key = %key, "Export complete");
        }
        None => {
            info!(path = %path.display(), "Export complete, S3 upload not requested");
        }
    }

    Ok(())
}
