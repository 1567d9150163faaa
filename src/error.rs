//! Error types for walking and extracting gzip files.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// File system operation that failed, used to label [`Error::Io`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    OpenSource,
    ReadHeader,
    CreateDir,
    CreateTarget,
    WriteTarget,
    CloseTarget,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IoOp::OpenSource => "cannot open source file",
            IoOp::ReadHeader => "cannot read gzip header",
            IoOp::CreateDir => "cannot create directory",
            IoOp::CreateTarget => "cannot create target file",
            IoOp::WriteTarget => "cannot write target file",
            IoOp::CloseTarget => "cannot close target file",
        };
        f.write_str(s)
    }
}

/// Why a file was rejected as a gzip stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderProblem {
    /// Fewer than 10 bytes before end of file
    Truncated,
    /// First two bytes are not `1f 8b`
    BadMagic,
    /// Compression method other than deflate
    UnsupportedMethod(u8),
    /// Reserved flag bits are set
    ReservedFlags(u8),
    /// Fixed header is fine but the optional fields are corrupt
    Corrupt,
}

impl fmt::Display for HeaderProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderProblem::Truncated => f.write_str("file is shorter than a gzip header"),
            HeaderProblem::BadMagic => f.write_str("bad magic bytes"),
            HeaderProblem::UnsupportedMethod(m) => write!(f, "unsupported compression method {m}"),
            HeaderProblem::ReservedFlags(flags) => write!(f, "reserved flag bits set ({flags:#04x})"),
            HeaderProblem::Corrupt => f.write_str("corrupt header fields"),
        }
    }
}

/// Why the destination root cannot receive extracted files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationProblem {
    Missing,
    NotADirectory,
}

impl fmt::Display for DestinationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationProblem::Missing => f.write_str("the destination does not exist"),
            DestinationProblem::NotADirectory => f.write_str("the destination is not a directory"),
        }
    }
}

/// Main error type for a walk-and-extract run.
#[derive(Debug, Error)]
pub enum Error {
    /// The tree walk could not stat or read an entry
    #[error("cannot walk the source tree: {source}")]
    Walk {
        #[source]
        source: walkdir::Error,
    },

    /// Writing a listing line to the output sink failed
    #[error("{}: cannot write archive info: {source}", path.display())]
    Sink {
        /// Path that was being listed
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file system operation on a source or target path failed
    #[error("{}: {op}: {source}", path.display())]
    Io {
        op: IoOp,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file does not start with a valid gzip header
    #[error("{}: not a gzip stream: {reason}", path.display())]
    NotGzip { path: PathBuf, reason: HeaderProblem },

    /// The deflate payload or the CRC32/size footer is invalid
    #[error("{}: decompression failed: {source}", path.display())]
    Decompress {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination root is missing or is not a directory
    #[error("{}: provided an invalid path: {problem}", path.display())]
    InvalidDestination {
        path: PathBuf,
        problem: DestinationProblem,
    },

    /// The gzip header carries no original file name
    #[error("{}: gzip header has no embedded file name", path.display())]
    MissingEmbeddedName { path: PathBuf },

    /// The embedded file name would escape the destination root
    #[error("{}: unsafe embedded file name {name:?}", path.display())]
    UnsafeEmbeddedName { path: PathBuf, name: String },

    /// The visited file does not live under the source root
    #[error("{}: not under source root {}", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

/// Fieldless failure category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Walk,
    Sink,
    Io,
    NotGzip,
    Decompress,
    InvalidDestination,
    MissingEmbeddedName,
    UnsafeEmbeddedName,
    OutsideRoot,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Walk { .. } => ErrorKind::Walk,
            Error::Sink { .. } => ErrorKind::Sink,
            Error::Io { .. } => ErrorKind::Io,
            Error::NotGzip { .. } => ErrorKind::NotGzip,
            Error::Decompress { .. } => ErrorKind::Decompress,
            Error::InvalidDestination { .. } => ErrorKind::InvalidDestination,
            Error::MissingEmbeddedName { .. } => ErrorKind::MissingEmbeddedName,
            Error::UnsafeEmbeddedName { .. } => ErrorKind::UnsafeEmbeddedName,
            Error::OutsideRoot { .. } => ErrorKind::OutsideRoot,
        }
    }

    pub(crate) fn io(op: IoOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(source: walkdir::Error) -> Self {
        Error::Walk { source }
    }
}

/// Specialized `Result` type for gzwalk operations.
pub type Result<T> = std::result::Result<T, Error>;
