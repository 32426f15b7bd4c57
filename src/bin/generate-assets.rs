#![forbid(unsafe_code)]

//! Writes shell completions and the `hdfs-ls(1)` man page for packaging.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::{generate_to, Shell};
use clap_mangen::Man;
use hdfs_ls::cli::Args;
use std::fs;
use std::path::{Path, PathBuf};

const BIN_NAME: &str = "hdfs-ls";

#[derive(Parser, Debug)]
#[command(name = "generate-assets", about = "Generate hdfs-ls completions and man page")]
struct Options {
    /// Directory receiving `completions/` and `man/`
    #[arg(default_value = "dist")]
    out_dir: PathBuf,

    /// Only generate completions for these shells (repeatable)
    #[arg(long = "shell", value_enum)]
    shells: Vec<Shell>,

    /// Skip the man page
    #[arg(long)]
    no_man: bool,
}

impl Options {
    fn shells(&self) -> Vec<Shell> {
        if self.shells.is_empty() {
            vec![Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell]
        } else {
            self.shells.clone()
        }
    }
}

fn write_completions(dir: &Path, shells: &[Shell]) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut cmd = Args::command();
    shells
        .iter()
        .map(|&shell| {
            generate_to(shell, &mut cmd, BIN_NAME, dir)
                .with_context(|| format!("writing {shell} completions"))
        })
        .collect()
}

fn write_man_page(dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut page = Vec::new();
    Man::new(Args::command()).render(&mut page)?;
    let path = dir.join(format!("{BIN_NAME}.1"));
    fs::write(&path, page).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();

    let mut written = write_completions(&options.out_dir.join("completions"), &options.shells())?;
    if !options.no_man {
        written.push(write_man_page(&options.out_dir.join("man"))?);
    }

    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
