use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::RunConfig;

#[derive(Parser, Debug)]
#[command(name = "gzwalk")]
#[command(version)]
#[command(about = "Walk a directory tree and gunzip every file into a mirrored destination", long_about = None)]
#[command(after_help = "Examples:\n  \
  gzwalk --root backups --dest restored          extract every .gz under backups\n  \
  gzwalk --root backups --dest restored --list   also print each visited path\n  \
  gzwalk --root backups --list --log walk.log    write the listing to walk.log")]
pub struct Cli {
    /// Root directory from where to unarchive
    #[arg(long, value_name = "DIR", env = "GZWALK_ROOT")]
    pub root: Option<PathBuf>,

    /// Destination directory where to store unarchived files (must exist)
    #[arg(long, value_name = "DIR", env = "GZWALK_DEST")]
    pub dest: Option<PathBuf>,

    /// List every visited path
    #[arg(long)]
    pub list: bool,

    /// The outfile for listing, logging and errors
    #[arg(long, value_name = "FILE", env = "GZWALK_LOG")]
    pub log: Option<PathBuf>,
}

impl Cli {
    /// Source root, or `None` when absent or empty (nothing to do).
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref().filter(|p| !p.as_os_str().is_empty())
    }

    pub fn destination(&self) -> PathBuf {
        self.dest.clone().unwrap_or_default()
    }

    /// Open the `--log` file for create/append/read-write, if one was given.
    pub fn open_log(&self) -> Result<Option<File>> {
        let Some(path) = self.log.as_deref() else {
            return Ok(None);
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        Ok(Some(file))
    }

    pub fn run_config<W: Write>(&self, root: &Path, sink: W) -> RunConfig<W> {
        RunConfig::new(root, self.destination(), sink).with_list(self.list)
    }
}
