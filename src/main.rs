//! drivestat - metadata, checksum and permission reports for remote drive trees.
//!
//! Usage:
//!   drivestat --snapshot drive.json /docs           Metadata and permissions
//!   drivestat --snapshot drive.json --md5 -d -1 /   Checksums of every file
//!   drivestat --snapshot drive.json --csv /shared   Permissions as CSV
//!   drivestat --snapshot drive.json --id 0Bx9...    Look sources up by id
//!   drivestat --help                                Show help

use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use drivestat_core::{ReportOptions, path};
use drivestat_report::WriterSink;
use drivestat_walk::{Snapshot, TraversalEngine, TraversalRequest};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "DRIVESTAT_LOG";

#[derive(Parser)]
#[command(
    name = "drivestat",
    version,
    about = "Recursive metadata, checksum and permission reports for remote drive trees",
    long_about = "drivestat walks a remote drive tree and prints, for every object it visits, \
                  either its full metadata and permissions, a CSV row per permission, or an \
                  md5sum-compatible checksum line.\n\n\
                  The tree is read from a JSON snapshot given with --snapshot or in the \
                  configuration file."
)]
struct Cli {
    /// Paths to report on (object ids with --id)
    #[arg(required = true)]
    sources: Vec<String>,

    /// JSON snapshot of the remote tree
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Treat sources as object ids instead of paths
    #[arg(long)]
    id: bool,

    /// Print only `<md5>  <path>` lines
    #[arg(long, conflicts_with = "csv")]
    md5: bool,

    /// Print permissions as CSV rows
    #[arg(long)]
    csv: bool,

    /// Levels to descend below each source (negative for no limit)
    #[arg(short, long, allow_negative_numbers = true)]
    depth: Option<i64>,

    /// Include hidden objects when listing folders
    #[arg(long)]
    hidden: bool,

    /// Disable colored path headers
    #[arg(long)]
    no_color: bool,

    /// Children per listing page
    #[arg(long)]
    page_size: Option<usize>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Settings read from the configuration file. Flags take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    snapshot: Option<PathBuf>,
    depth: Option<i64>,
    md5: Option<bool>,
    csv: Option<bool>,
    hidden: Option<bool>,
    color: Option<bool>,
    page_size: Option<usize>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }
}

/// Everything one run needs, after merging flags over the config file.
struct Settings {
    snapshot: PathBuf,
    page_size: Option<usize>,
    by_id: bool,
    options: ReportOptions,
}

impl Settings {
    fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let snapshot = cli
            .snapshot
            .clone()
            .or(file.snapshot)
            .ok_or_else(|| eyre!("No snapshot given; pass --snapshot or set `snapshot` in the config file"))?;

        let root_is_trivial =
            !cli.id && cli.sources.iter().any(|source| path::is_root_like(source));

        let options = ReportOptions::builder()
            .checksum_only(cli.md5 || file.md5.unwrap_or(false))
            .csv(cli.csv || file.csv.unwrap_or(false))
            .depth(cli.depth.or(file.depth).unwrap_or(0))
            .include_hidden(cli.hidden || file.hidden.unwrap_or(false))
            .color(!cli.no_color && file.color.unwrap_or(true))
            .root_is_trivial(root_is_trivial)
            .build()
            .context("Invalid report options")?;

        Ok(Self {
            snapshot,
            page_size: cli.page_size.or(file.page_size),
            by_id: cli.id,
            options,
        })
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&cli, file_config)?;
    debug!(options = ?settings.options, "resolved settings");

    let mut store = Snapshot::load(&settings.snapshot)
        .and_then(Snapshot::into_store)
        .with_context(|| format!("Failed to load snapshot {}", settings.snapshot.display()))?;
    if let Some(page_size) = settings.page_size {
        store = store.with_page_size(page_size);
    }

    let requests: Vec<TraversalRequest> = cli
        .sources
        .iter()
        .map(|source| {
            if settings.by_id {
                TraversalRequest::by_id(source.as_str())
            } else {
                TraversalRequest::by_path(source.as_str())
            }
        })
        .collect();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create async runtime")?;

    let mut sink = WriterSink::new(BufWriter::new(io::stdout()));
    let engine = TraversalEngine::new(&store, &settings.options);
    let outcome = runtime.block_on(engine.run(requests, &mut sink));
    sink.finish().context("Failed to write report")?;

    match outcome {
        Ok(stats) => {
            info!(
                objects = stats.objects_rendered,
                pages = stats.pages_received,
                elapsed_ms = stats.elapsed.as_millis() as u64,
                "done"
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.status().exit_code());
        }
    }
}

fn setup_logging(verbose: bool) {
    let default = if verbose {
        "drivestat=debug,warn"
    } else {
        "drivestat=warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
