//! CLI entry point for the PM route planner.
//!
//! Loads maintenance-due records from the service API or a file, groups them
//! into location clusters, and prints or exports the resulting route plan.

use anyhow::{Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use pm_route_planner::clustering::{Cluster, PlanSummary, find_cluster, plan};
use pm_route_planner::config::AppConfig;
use pm_route_planner::export::{ExportFormat, save_cluster};
use pm_route_planner::fetch::{BasicClient, load_source};
use pm_route_planner::output::{plan_json, print_pretty, write_summary_csv};
use pm_route_planner::parser::parse_records;
use pm_route_planner::upload::upload_export;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "pm_route_planner")]
#[command(about = "Group due preventive maintenance into location clusters for route planning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum PlanFormat {
    Pretty,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Build clusters and print or save a summary of them
    Clusters {
        /// Path to file or URL to fetch (defaults to PM_API_URL)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// How to present the plan
        #[arg(short, long, value_enum, default_value_t = PlanFormat::Pretty)]
        format: PlanFormat,

        /// File to write JSON or CSV output to instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Export one cluster (or every cluster) as a spreadsheet
    Export {
        /// Path to file or URL to fetch (defaults to PM_API_URL)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Cluster key or city to export, e.g. "St Paul, MN"
        #[arg(short, long, required_unless_present = "all", conflicts_with = "all")]
        cluster: Option<String>,

        /// Export every cluster, one file each
        #[arg(long, default_value_t = false)]
        all: bool,

        /// Spreadsheet format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Xlsx)]
        format: ExportFormat,

        /// Directory to write exports to (defaults to PM_EXPORT_DIR)
        #[arg(short = 'd', long)]
        output_dir: Option<String>,

        /// Optional: S3 bucket to upload exports to (e.g., "my-bucket")
        #[arg(long)]
        s3_bucket: Option<String>,

        /// Key prefix for uploaded exports
        #[arg(long, default_value = "pm-routes")]
        s3_prefix: String,

        /// Optional: Gzip compress exports before uploading to S3
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    // Logging setup: colored stderr + JSON rolling log file
    let log_path = Path::new(&config.log_file_path);
    let log_dir = log_path.parent().unwrap_or(Path::new("logs"));
    let log_file_name = log_path
        .file_name()
        .unwrap_or(OsStr::new("pm_route_planner.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Clusters {
            source,
            format,
            output,
        } => {
            let (clusters, summary) = load_plan(&config, source).await?;

            match format {
                PlanFormat::Pretty => print_pretty(&clusters, &summary),
                PlanFormat::Json => {
                    let json = plan_json(&clusters, &summary)?;
                    match output {
                        Some(path) => {
                            std::fs::write(&path, json)?;
                            info!(path = %path, "Plan JSON written");
                        }
                        None => println!("{json}"),
                    }
                }
                PlanFormat::Csv => {
                    let path = output.unwrap_or_else(|| "clusters.csv".to_string());
                    write_summary_csv(&path, &clusters)?;
                    info!(path = %path, clusters = clusters.len(), "Cluster summary written");
                }
            }
        }
        Commands::Export {
            source,
            cluster,
            all,
            format,
            output_dir,
            s3_bucket,
            s3_prefix,
            gzip,
        } => {
            let (clusters, summary) = load_plan(&config, source).await?;
            let output_dir = PathBuf::from(output_dir.unwrap_or_else(|| config.export_dir.clone()));

            let selected: Vec<&Cluster> = match (all, cluster) {
                (true, _) => clusters.iter().collect(),
                (false, Some(query)) => vec![find_cluster(&clusters, &query)?],
                (false, None) => bail!("either --cluster or --all is required"),
            };

            if selected.is_empty() {
                warn!(records = summary.records, "No clusters to export");
                return Ok(());
            }

            let today = Local::now().date_naive();
            let mut written = Vec::with_capacity(selected.len());
            for cluster in selected {
                written.push(save_cluster(cluster, &output_dir, format, today)?);
            }

            if let Some(bucket) = s3_bucket {
                upload_all(&bucket, &s3_prefix, &written, gzip).await?;
            }

            info!(files = written.len(), dir = %output_dir.display(), "Export finished");
        }
    }

    Ok(())
}

/// Loads, parses and clusters one record snapshot.
#[tracing::instrument(skip(config))]
async fn load_plan(config: &AppConfig, source: Option<String>) -> Result<(Vec<Cluster>, PlanSummary)> {
    let Some(source) = source.or_else(|| config.api_url.clone()) else {
        bail!("no record source given and PM_API_URL is not set");
    };

    let client = BasicClient::new(config.fetch_timeout)?;
    let bytes = load_source(&client, &source).await?;
    let parsed = parse_records(&bytes)?;

    let (clusters, build_stats) = plan(&parsed.records);
    let summary = PlanSummary::from_clusters(&clusters).with_diagnostics(parsed.stats, build_stats);

    if summary.malformed > 0 || summary.dropped_status > 0 {
        warn!(
            malformed = summary.malformed,
            dropped_status = summary.dropped_status,
            "Some records were left out of the plan"
        );
    }
    info!(
        clusters = summary.clusters,
        records = summary.records,
        "Plan built"
    );

    Ok((clusters, summary))
}

/// Uploads every written export to S3.
#[tracing::instrument(skip(paths), fields(files = paths.len()))]
async fn upload_all(bucket: &str, prefix: &str, paths: &[PathBuf], gzip: bool) -> Result<()> {
    let aws_config = aws_config::load_from_env().await;
    let s3 = aws_sdk_s3::Client::new(&aws_config);

    for path in paths {
        upload_export(&s3, bucket, prefix, path, gzip).await?;
    }

    info!(bucket, count = paths.len(), "S3 upload complete");
    Ok(())
}
