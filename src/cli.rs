use clap::Parser;
use std::time::Duration;

use crate::fs::WebHdfsConfig;
use crate::listing::ListingOptions;

/// Smallest accepted request timeout, in seconds.
const MIN_TIMEOUT_SECS: u64 = 1;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "hdfs-ls",
    version,
    about = "List directory contents on HDFS",
    disable_help_flag = true,
    after_help = "Examples:\n  hdfs-ls\n  hdfs-ls -lh /data\n  hdfs-ls -R logs\n  hdfs-ls -d '/user/*'"
)]
pub struct Args {
    /// Paths to list (default: your home directory). Globs are expanded remotely.
    pub paths: Vec<String>,

    /// Long listing with mode, owner, group, size and modification time
    #[arg(short = 'l', long = "long")]
    pub long: bool,

    /// Include entries starting with '.', plus '.' and '..'
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Print sizes with unit suffixes (1.5K, 2.0M, ...)
    #[arg(short = 'h', long = "human-readable")]
    pub human_readable: bool,

    /// List directories themselves, not their contents
    #[arg(short = 'd', long = "directory")]
    pub directory: bool,

    /// List subdirectories recursively
    #[arg(short = 'R', long = "recursive")]
    pub recursive: bool,

    /// Namenode address (host:port or http(s)://host:port)
    #[arg(long = "namenode", env = "HADOOP_NAMENODE")]
    pub namenode: Option<String>,

    /// User name sent to the namenode
    #[arg(long = "user", env = "HADOOP_USER_NAME")]
    pub user: Option<String>,

    /// Request timeout in seconds (minimum 1)
    #[arg(long = "timeout", default_value = "30")]
    pub timeout_secs: u64,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print help
    #[arg(long = "help", action = clap::ArgAction::Help)]
    pub help: Option<bool>,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        if self.timeout_secs < MIN_TIMEOUT_SECS {
            self.timeout_secs = MIN_TIMEOUT_SECS;
        }
        // Fall back to the login name, as Hadoop clients do
        if self.user.is_none() {
            self.user = std::env::var("USER").ok().filter(|u| !u.is_empty());
        }
        self
    }

    pub fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            long: self.long,
            all: self.all,
            human_readable: self.human_readable,
            dirs_as_plain: self.directory,
            recurse: self.recursive,
        }
    }

    /// Client settings, or `None` when no namenode was configured.
    pub fn client_config(&self) -> Option<WebHdfsConfig> {
        Some(WebHdfsConfig {
            namenode: self.namenode.clone()?,
            user: self.user.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }

    /// Default log filter for the given verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
