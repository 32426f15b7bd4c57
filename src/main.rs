#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use hdfs_ls::cli::Args;
use hdfs_ls::fs::WebHdfsClient;
use hdfs_ls::listing::ls;
use hdfs_ls::resolve::resolve_paths;
use std::io::{self, BufWriter};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("hdfs-ls: {e:#}");
        std::process::exit(1);
    }
}

/// Log to stderr so listings on stdout stay clean. `RUST_LOG` wins over `-v`.
fn init_tracing(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();
    init_tracing(args.log_level());

    let config = args
        .client_config()
        .context("no namenode configured (use --namenode or set HADOOP_NAMENODE)")?;
    info!(namenode = %config.namenode, user = ?config.user, "connecting");

    let client = WebHdfsClient::new(&config).context("failed to create WebHDFS client")?;
    let paths = resolve_paths(&client, &args.paths)?;

    let stdout = io::stdout();
    let out = BufWriter::new(stdout.lock());
    ls(&client, &paths, args.listing_options(), out)?;
    Ok(())
}
