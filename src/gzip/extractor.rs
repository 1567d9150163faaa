use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Cursor, ErrorKind, Read, Write};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;

use crate::error::{Error, HeaderProblem, IoOp, Result};

use super::destination::Destination;
use super::header::{GzipHeader, decode_embedded_name};

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Outcome of extracting one gzip file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub source: PathBuf,
    pub target: PathBuf,
    pub bytes_written: u64,
}

/// Decompresses single-member gzip files into a destination tree that
/// mirrors the source tree.
///
/// The output file name is the original name stored in the gzip header, not
/// the name of the compressed file on disk.
pub struct GzipExtractor {
    destination: Destination,
}

impl GzipExtractor {
    pub fn new(destination: Destination) -> Self {
        Self { destination }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Extract `file`, which must live under `source_root`.
    ///
    /// Nothing is written unless the file starts with a valid gzip header.
    /// A failure after the target was created leaves the partial file in
    /// place.
    pub fn extract(&self, source_root: &Path, file: &Path) -> Result<Extraction> {
        let mut input = File::open(file).map_err(|e| Error::io(IoOp::OpenSource, file, e))?;

        let mut prefix = Vec::with_capacity(GzipHeader::SIZE);
        (&mut input)
            .take(GzipHeader::SIZE as u64)
            .read_to_end(&mut prefix)
            .map_err(|e| Error::io(IoOp::ReadHeader, file, e))?;
        let header = GzipHeader::sniff(&prefix).map_err(|reason| Error::NotGzip {
            path: file.to_path_buf(),
            reason,
        })?;
        log::debug!(
            "{}: gzip member, mtime {}, os {}",
            file.display(),
            header.mtime,
            header.os
        );

        // The decoder sees the whole stream again, prefix first.
        let mut decoder = GzDecoder::new(Cursor::new(prefix).chain(input));
        let embedded_name = match decoder.header() {
            Some(parsed) => parsed.filename().map(decode_embedded_name),
            None => {
                return Err(Error::NotGzip {
                    path: file.to_path_buf(),
                    reason: HeaderProblem::Corrupt,
                });
            }
        };

        let rel_dir = relative_dir(source_root, file)?;
        let target = target_path(self.destination.root(), &rel_dir, embedded_name.as_deref(), file)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(IoOp::CreateDir, parent, e))?;
        }

        let output = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&target)
            .map_err(|e| Error::io(IoOp::CreateTarget, &target, e))?;
        let mut output = BufWriter::new(output);

        let bytes_written = copy_decompressed(&mut decoder, &mut output, file, &target)?;

        // Close order: source file, then the gzip stream, then the target.
        let (_, input) = decoder.into_inner().into_inner();
        drop(input);
        let output = output
            .into_inner()
            .map_err(|e| Error::io(IoOp::CloseTarget, &target, e.into_error()))?;
        drop(output);

        log::debug!(
            "{} -> {} ({bytes_written} bytes)",
            file.display(),
            target.display()
        );

        Ok(Extraction {
            source: file.to_path_buf(),
            target,
            bytes_written,
        })
    }
}

/// Directory of `file` relative to `source_root`.
///
/// When the walk root is itself a file the relative directory is empty, so
/// the output lands directly in the destination root.
pub fn relative_dir(source_root: &Path, file: &Path) -> Result<PathBuf> {
    if file == source_root {
        return Ok(PathBuf::new());
    }

    file.parent()
        .and_then(|dir| dir.strip_prefix(source_root).ok())
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::OutsideRoot {
            path: file.to_path_buf(),
            root: source_root.to_path_buf(),
        })
}

/// Join the destination root, the relative directory and the embedded name.
///
/// `source` is only used for error reporting. The embedded name may contain
/// sub directories but never `..`, `.` or an absolute prefix.
pub fn target_path(
    destination_root: &Path,
    rel_dir: &Path,
    embedded_name: Option<&str>,
    source: &Path,
) -> Result<PathBuf> {
    let name = match embedded_name {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(Error::MissingEmbeddedName {
                path: source.to_path_buf(),
            });
        }
    };

    let safe = Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !safe {
        return Err(Error::UnsafeEmbeddedName {
            path: source.to_path_buf(),
            name: name.to_string(),
        });
    }

    Ok(destination_root.join(rel_dir).join(name))
}

/// Stream decompressed bytes into the target file.
///
/// Read errors come from the decoder (corrupt deflate data or a bad CRC32 or
/// size footer), write errors from the target.
fn copy_decompressed<R: Read, W: Write>(
    decoder: &mut R,
    output: &mut W,
    source: &Path,
    target: &Path,
) -> Result<u64> {
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let n = match decoder.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source_err) => {
                return Err(Error::Decompress {
                    path: source.to_path_buf(),
                    source: source_err,
                });
            }
        };
        output
            .write_all(&buf[..n])
            .map_err(|e| Error::io(IoOp::WriteTarget, target, e))?;
        total += n as u64;
    }

    Ok(total)
}
