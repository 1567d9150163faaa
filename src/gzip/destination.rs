use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DestinationProblem, Error, Result};

/// A destination root that was checked to be an existing directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    root: PathBuf,
}

impl Destination {
    /// Check that `path` exists and is a directory.
    ///
    /// The destination is never created here; a missing root is an error.
    pub fn resolve(path: &Path) -> Result<Self> {
        let invalid = |problem| Error::InvalidDestination {
            path: path.to_path_buf(),
            problem,
        };

        let meta = fs::metadata(path).map_err(|_| invalid(DestinationProblem::Missing))?;
        if !meta.is_dir() {
            return Err(invalid(DestinationProblem::NotADirectory));
        }

        Ok(Self {
            root: path.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn problem(err: Error) -> DestinationProblem {
        match err {
            Error::InvalidDestination { problem, .. } => problem,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn accepts_existing_directory() {
        let dir = TempDir::new().unwrap();
        let dest = Destination::resolve(dir.path()).unwrap();
        assert_eq!(dest.root(), dir.path());
    }

    #[test]
    fn rejects_missing_and_file_paths() {
        let dir = TempDir::new().unwrap();

        let err = Destination::resolve(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDestination);
        assert_eq!(problem(err), DestinationProblem::Missing);

        let file = dir.path().join("file");
        fs::write(&file, b"x").unwrap();
        let err = Destination::resolve(&file).unwrap_err();
        assert_eq!(problem(err), DestinationProblem::NotADirectory);
    }

    #[test]
    fn empty_path_is_missing() {
        let err = Destination::resolve(Path::new("")).unwrap_err();
        assert_eq!(problem(err), DestinationProblem::Missing);
    }
}
