//! Gzip member header checks (RFC 1952).
//!
//! Only the fixed 10-byte prefix is parsed here. The optional fields that
//! follow it (extra, name, comment, header CRC) are left to the decoder.

use std::io::Cursor;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::error::HeaderProblem;

const FTEXT: u8 = 0x01;
const FHCRC: u8 = 0x02;
const FEXTRA: u8 = 0x04;
const FNAME: u8 = 0x08;
const FCOMMENT: u8 = 0x10;
const RESERVED: u8 = !(FTEXT | FHCRC | FEXTRA | FNAME | FCOMMENT);

/// Fixed part of a gzip member header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GzipHeader {
    pub method: u8,
    pub flags: u8,
    /// Modification time, seconds since the Unix epoch (0 if unknown)
    pub mtime: u32,
    pub extra_flags: u8,
    pub os: u8,
}

impl GzipHeader {
    pub const MAGIC: u16 = 0x1f8b;
    pub const DEFLATE: u8 = 8;
    pub const SIZE: usize = 10;

    /// Validate and parse the first bytes of a file.
    pub fn sniff(data: &[u8]) -> Result<Self, HeaderProblem> {
        if data.len() < Self::SIZE {
            return Err(HeaderProblem::Truncated);
        }

        // Slice is long enough, so none of the reads below can fail.
        let mut cursor = Cursor::new(&data[..Self::SIZE]);
        let magic = cursor.read_u16::<BigEndian>().map_err(|_| HeaderProblem::Truncated)?;
        if magic != Self::MAGIC {
            return Err(HeaderProblem::BadMagic);
        }

        let method = cursor.read_u8().map_err(|_| HeaderProblem::Truncated)?;
        if method != Self::DEFLATE {
            return Err(HeaderProblem::UnsupportedMethod(method));
        }

        let flags = cursor.read_u8().map_err(|_| HeaderProblem::Truncated)?;
        if flags & RESERVED != 0 {
            return Err(HeaderProblem::ReservedFlags(flags));
        }

        Ok(Self {
            method,
            flags,
            mtime: cursor.read_u32::<LittleEndian>().map_err(|_| HeaderProblem::Truncated)?,
            extra_flags: cursor.read_u8().map_err(|_| HeaderProblem::Truncated)?,
            os: cursor.read_u8().map_err(|_| HeaderProblem::Truncated)?,
        })
    }

    /// Whether the header declares an original file name field.
    pub fn has_name(&self) -> bool {
        self.flags & FNAME != 0
    }
}

/// Decode a header file name. Gzip names are ISO-8859-1.
pub fn decode_embedded_name(raw: &[u8]) -> String {
    raw.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::{Compression, GzBuilder};
    use std::io::Write;

    fn member(name: Option<&str>) -> Vec<u8> {
        let builder = match name {
            Some(name) => GzBuilder::new().filename(name).mtime(1_700_000_000),
            None => GzBuilder::new().mtime(1_700_000_000),
        };
        let mut enc = builder.write(Vec::new(), Compression::default());
        enc.write_all(b"payload").unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn parses_encoder_output() {
        let header = GzipHeader::sniff(&member(Some("out.txt"))).unwrap();
        assert_eq!(header.method, GzipHeader::DEFLATE);
        assert_eq!(header.mtime, 1_700_000_000);
        assert!(header.has_name());

        let header = GzipHeader::sniff(&member(None)).unwrap();
        assert!(!header.has_name());
    }

    #[test]
    fn rejects_short_input() {
        assert_eq!(GzipHeader::sniff(&[0x1f, 0x8b, 8]), Err(HeaderProblem::Truncated));
        assert_eq!(GzipHeader::sniff(&[]), Err(HeaderProblem::Truncated));
    }

    #[test]
    fn rejects_plain_text() {
        assert_eq!(
            GzipHeader::sniff(b"hello, plain world"),
            Err(HeaderProblem::BadMagic)
        );
    }

    #[test]
    fn rejects_unknown_method_and_reserved_flags() {
        let mut data = GzEncoder::new(Vec::new(), Compression::fast())
            .finish()
            .unwrap();
        data[2] = 7;
        assert_eq!(GzipHeader::sniff(&data), Err(HeaderProblem::UnsupportedMethod(7)));

        data[2] = GzipHeader::DEFLATE;
        data[3] = 0x20;
        assert_eq!(GzipHeader::sniff(&data), Err(HeaderProblem::ReservedFlags(0x20)));
    }

    #[test]
    fn latin1_names_decode_per_byte() {
        assert_eq!(decode_embedded_name(b"out.txt"), "out.txt");
        assert_eq!(decode_embedded_name(&[0x63, 0x61, 0x66, 0xe9]), "caf\u{e9}");
    }
}
