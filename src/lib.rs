//! # gzwalk
//!
//! Walk a directory tree and decompress every gzip file into a destination
//! tree that mirrors the source layout.
//!
//! Each regular file found under the source root is read as a single gzip
//! member. The decompressed bytes are written to
//! `<dest>/<directory relative to root>/<name stored in the gzip header>`.
//! Missing intermediate directories under the destination are created; the
//! destination root itself must already exist.
//!
//! ## Features
//!
//! - Depth-first walk with entries sorted by name at each level
//! - Optional listing of every visited path to an explicit output sink
//! - Output file names taken from the gzip header's original name field
//! - Typed errors so callers can tell bad input from bad destinations
//!
//! ## Example
//!
//! ```no_run
//! use gzwalk::{RunConfig, run};
//!
//! fn main() -> gzwalk::Result<()> {
//!     let mut config = RunConfig::new("backups", "restored", std::io::stdout()).with_list(true);
//!     let summary = run(&mut config)?;
//!     eprintln!("extracted {} files", summary.files_extracted);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod gzip;
pub mod run;
pub mod walk;

pub use cli::Cli;
pub use config::RunConfig;
pub use error::{Error, ErrorKind, Result};
pub use gzip::{Destination, Extraction, GzipExtractor};
pub use run::{RunSummary, run};
pub use walk::{TreeWalker, VisitedEntry};
