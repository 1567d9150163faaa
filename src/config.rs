//! Run configuration.

use std::io::Write;
use std::path::{Path, PathBuf};

/// Settings for a single walk-and-extract run.
///
/// Built once before traversal and never changed afterwards. The output
/// sink is owned by the configuration so every line of the run goes to the
/// same place.
#[derive(Debug)]
pub struct RunConfig<W: Write> {
    source_root: PathBuf,
    destination_root: PathBuf,
    list: bool,
    sink: W,
}

impl<W: Write> RunConfig<W> {
    pub fn new(source_root: impl Into<PathBuf>, destination_root: impl Into<PathBuf>, sink: W) -> Self {
        Self {
            source_root: source_root.into(),
            destination_root: destination_root.into(),
            list: false,
            sink,
        }
    }

    /// Print every visited path to the sink before processing it.
    pub fn with_list(mut self, list: bool) -> Self {
        self.list = list;
        self
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    pub fn list(&self) -> bool {
        self.list
    }

    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_sink(self) -> W {
        self.sink
    }
}
