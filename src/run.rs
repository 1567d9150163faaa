//! The walk-and-extract pipeline.

use std::io::Write;
use std::path::Path;

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::gzip::{Destination, GzipExtractor};
use crate::walk::TreeWalker;

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub entries_visited: usize,
    pub directories_skipped: usize,
    pub files_extracted: usize,
    pub bytes_written: u64,
}

/// Walk the source root and extract every regular file.
///
/// Entries are handled one at a time: the path is listed (in list mode),
/// directories are skipped, and files are extracted before the walk moves
/// on. The first error stops the run; files extracted before it stay on
/// disk.
///
/// The destination root is checked once, when the first file is reached.
pub fn run<W: Write>(config: &mut RunConfig<W>) -> Result<RunSummary> {
    let source_root = config.source_root().to_path_buf();
    let mut summary = RunSummary::default();
    let mut extractor: Option<GzipExtractor> = None;

    for entry in TreeWalker::new(&source_root) {
        let entry = entry?;
        summary.entries_visited += 1;
        log::trace!("visit {}", entry.path.display());

        if config.list() {
            list_entry(config.sink_mut(), &entry.path)?;
        }

        if entry.is_dir {
            summary.directories_skipped += 1;
            continue;
        }

        if extractor.is_none() {
            let destination = Destination::resolve(config.destination_root())?;
            extractor = Some(GzipExtractor::new(destination));
        }
        if let Some(extractor) = &extractor {
            let extraction = extractor.extract(&source_root, &entry.path)?;
            summary.files_extracted += 1;
            summary.bytes_written += extraction.bytes_written;
        }
    }

    log::info!(
        "{}: visited {} entries, extracted {} files ({} bytes)",
        source_root.display(),
        summary.entries_visited,
        summary.files_extracted,
        summary.bytes_written
    );

    Ok(summary)
}

/// Write one listing line for `path`.
fn list_entry<W: Write>(sink: &mut W, path: &Path) -> Result<()> {
    writeln!(sink, "{}", path.display()).map_err(|source| Error::Sink {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io;

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn list_entry_writes_bare_path() {
        let mut out = Vec::new();
        list_entry(&mut out, Path::new("root")).unwrap();
        assert_eq!(out, b"root\n");
    }

    #[test]
    fn sink_failure_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RunConfig::new(dir.path(), dir.path(), FailingSink).with_list(true);
        let err = run(&mut config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Sink);
    }

    #[test]
    fn directories_only_tree_needs_no_destination() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a/b")).unwrap();
        let mut config = RunConfig::new(dir.path(), dir.path().join("missing"), Vec::new());

        let summary = run(&mut config).unwrap();
        assert_eq!(summary.entries_visited, 3);
        assert_eq!(summary.directories_skipped, 3);
        assert_eq!(summary.files_extracted, 0);
    }
}
