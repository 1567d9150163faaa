//! Recursive source tree traversal.
//!
//! Entries come out depth-first in pre-order: a directory is yielded before
//! its children, and siblings are sorted by file name. The root itself is the
//! first entry. Symbolic links are not followed.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// One entry produced by [`TreeWalker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Lazy, single-pass walk over a directory tree.
pub struct TreeWalker {
    inner: walkdir::IntoIter,
}

impl TreeWalker {
    pub fn new(root: &Path) -> Self {
        let inner = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        Self { inner }
    }
}

impl Iterator for TreeWalker {
    type Item = Result<VisitedEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.inner.next()? {
            Ok(entry) => entry,
            Err(err) => return Some(Err(err.into())),
        };
        let is_dir = entry.file_type().is_dir();
        Some(Ok(VisitedEntry {
            path: entry.into_path(),
            is_dir,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn walks_depth_first_in_name_order() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b/inner")).unwrap();
        fs::create_dir(root.join("a")).unwrap();
        fs::write(root.join("c.gz"), b"").unwrap();
        fs::write(root.join("b/inner/z.gz"), b"").unwrap();
        fs::write(root.join("b/y.gz"), b"").unwrap();

        let entries: Vec<VisitedEntry> = TreeWalker::new(root).map(|e| e.unwrap()).collect();
        let rel: Vec<(String, bool)> = entries
            .iter()
            .map(|e| {
                let p = e.path.strip_prefix(root).unwrap();
                (p.to_string_lossy().replace('\\', "/"), e.is_dir)
            })
            .collect();

        assert_eq!(
            rel,
            vec![
                (String::new(), true),
                ("a".to_string(), true),
                ("b".to_string(), true),
                ("b/inner".to_string(), true),
                ("b/inner/z.gz".to_string(), false),
                ("b/y.gz".to_string(), false),
                ("c.gz".to_string(), false),
            ]
        );
    }

    #[test]
    fn missing_root_is_a_walk_error() {
        let dir = TempDir::new().unwrap();
        let mut walker = TreeWalker::new(&dir.path().join("nope"));
        let err = walker.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Walk);
    }

    #[test]
    fn file_root_yields_only_itself() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("single.gz");
        fs::write(&file, b"").unwrap();

        let entries: Vec<VisitedEntry> = TreeWalker::new(&file).map(|e| e.unwrap()).collect();
        assert_eq!(
            entries,
            vec![VisitedEntry {
                path: file,
                is_dir: false
            }]
        );
    }
}
