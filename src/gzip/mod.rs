//! Gzip file extraction.
//!
//! The module is organized into three parts:
//!
//! - [`header`]: checks on the fixed gzip member header and embedded name decoding
//! - [`destination`]: the validated destination root
//! - [`extractor`]: decompression of one file into the mirrored destination tree
//!
//! ## Supported Format
//!
//! A single gzip member (RFC 1952) with a deflate payload. The CRC32 and
//! size footer are verified by the decoder while the payload is read; a
//! mismatch surfaces as a decompression error at the end of the copy.
//!
//! ## Limitations
//!
//! - Only the first member of a multi-member file is decompressed
//! - No tar, zip or bzip2 detection
//! - The destination root is never created

pub mod destination;
pub mod extractor;
pub mod header;

pub use destination::Destination;
pub use extractor::{Extraction, GzipExtractor, relative_dir, target_path};
pub use header::{GzipHeader, decode_embedded_name};
