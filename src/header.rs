//! Module: header
//!
//! Parses the RFC 1952 gzip member header and returns the byte offset at
//! which the DEFLATE payload begins.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

use crate::error::GzipError;

const GZ_MAGIC: [u8; 2] = [0x1f, 0x8b];
const DEFLATE_METHOD: u8 = 8;

const FTEXT: u8 = 1 << 0;
const FHCRC: u8 = 1 << 1;
const FEXTRA: u8 = 1 << 2;
const FNAME: u8 = 1 << 3;
const FCOMMENT: u8 = 1 << 4;
const KNOWN_FLAGS: u8 = FTEXT | FHCRC | FEXTRA | FNAME | FCOMMENT;

/// The parsed flag byte of a gzip member header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub ftext: bool,
    pub fhcrc: bool,
    pub fextra: bool,
    pub fname: bool,
    pub fcomment: bool,
}

impl Flags {
    fn parse(byte: u8) -> Result<Flags, GzipError> {
        if byte & !KNOWN_FLAGS != 0 {
            return Err(GzipError::UnknownFlags(byte));
        }
        Ok(Flags {
            ftext: byte & FTEXT != 0,
            fhcrc: byte & FHCRC != 0,
            fextra: byte & FEXTRA != 0,
            fname: byte & FNAME != 0,
            fcomment: byte & FCOMMENT != 0,
        })
    }
}

/// A parsed gzip member header.
#[derive(Debug, PartialEq, Eq)]
pub struct GzipHeader {
    pub flags: Flags,
    pub mtime: u32,
    pub extra_flags: u8,
    pub os: u8,
    /// Byte offset into the original buffer at which the DEFLATE payload starts.
    pub payload_offset: usize,
}

struct Cursor<'a> {
    inner: std::io::Cursor<&'a [u8]>,
}

impl<'a> Cursor<'a> {
    fn byte(&mut self) -> Result<u8, GzipError> {
        self.inner.read_u8().map_err(|_| GzipError::TooShort)
    }

    fn u16_le(&mut self) -> Result<u16, GzipError> {
        self.inner
            .read_u16::<LittleEndian>()
            .map_err(|_| GzipError::TooShort)
    }

    fn u32_le(&mut self) -> Result<u32, GzipError> {
        self.inner
            .read_u32::<LittleEndian>()
            .map_err(|_| GzipError::TooShort)
    }

    fn skip(&mut self, n: usize) -> Result<(), GzipError> {
        let mut sink = vec![0u8; n];
        self.inner
            .read_exact(&mut sink)
            .map_err(|_| GzipError::TooShort)
    }

    fn skip_nul_terminated(&mut self) -> Result<(), GzipError> {
        loop {
            if self.byte()? == 0 {
                return Ok(());
            }
        }
    }

    fn position(&self) -> usize {
        self.inner.position() as usize
    }
}

/// Parses the header at the start of `buffer` and returns it along with
/// the offset of the DEFLATE payload.
pub fn parse_header(buffer: &[u8]) -> Result<GzipHeader, GzipError> {
    let mut cursor = Cursor {
        inner: std::io::Cursor::new(buffer),
    };

    if cursor.byte()? != GZ_MAGIC[0] || cursor.byte()? != GZ_MAGIC[1] {
        return Err(GzipError::BadMagic);
    }
    let method = cursor.byte()?;
    if method != DEFLATE_METHOD {
        return Err(GzipError::UnsupportedMethod(method));
    }
    let flags = Flags::parse(cursor.byte()?)?;
    let mtime = cursor.u32_le()?;
    let extra_flags = cursor.byte()?;
    let os = cursor.byte()?;

    if flags.fextra {
        let xlen = cursor.u16_le()? as usize;
        cursor.skip(xlen)?;
    }
    if flags.fname {
        cursor.skip_nul_terminated()?;
    }
    if flags.fcomment {
        cursor.skip_nul_terminated()?;
    }
    if flags.fhcrc {
        cursor.skip(2)?;
    }

    Ok(GzipHeader {
        flags,
        mtime,
        extra_flags,
        os,
        payload_offset: cursor.position(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_header() {
        let bytes: &[u8] = &[0x1f, 0x8b, 0x08, 0x00, 0x12, 0x34, 0x56, 0x78, 0x00, 0x07];
        let header = parse_header(bytes).unwrap();
        assert_eq!(header.mtime, 0x78563412);
        assert_eq!(header.extra_flags, 0);
        assert_eq!(header.os, 7);
        assert_eq!(header.payload_offset, 10);
        assert_eq!(
            header.flags,
            Flags { ftext: false, fhcrc: false, fextra: false, fname: false, fcomment: false }
        );
    }

    #[test]
    fn header_with_name_and_comment() {
        let bytes: &[u8] = &[
            0x1f, 0x8b, 0x08, 0b0001_1000, 0, 0, 0, 0, 0, 0xff, b'a', b'.', b't', b'x', b't', 0,
            b'h', b'i', 0,
        ];
        let header = parse_header(bytes).unwrap();
        assert!(header.flags.fname && header.flags.fcomment);
        assert_eq!(header.payload_offset, bytes.len());
    }

    #[test]
    fn ftext_alone_is_a_known_flag() {
        let bytes: &[u8] = &[0x1f, 0x8b, 0x08, 0b0000_0001, 0, 0, 0, 0, 0, 0];
        let header = parse_header(bytes).unwrap();
        assert!(header.flags.ftext);
    }

    #[test]
    fn unknown_flag_bit_is_fatal() {
        let bytes: &[u8] = &[0x1f, 0x8b, 0x08, 0b0010_0000, 0, 0, 0, 0, 0, 0];
        assert!(matches!(parse_header(bytes), Err(GzipError::UnknownFlags(_))));
    }

    #[test]
    fn bad_magic_is_fatal() {
        let bytes: &[u8] = &[0x1f, 0x8c, 0x08, 0x00, 0, 0, 0, 0, 0, 0];
        assert!(matches!(parse_header(bytes), Err(GzipError::BadMagic)));
    }

    #[test]
    fn unsupported_method_is_fatal() {
        let bytes: &[u8] = &[0x1f, 0x8b, 0x07, 0x00, 0, 0, 0, 0, 0, 0];
        assert!(matches!(parse_header(bytes), Err(GzipError::UnsupportedMethod(7))));
    }

    #[test]
    fn truncated_header_is_fatal() {
        let bytes: &[u8] = &[0x1f, 0x8b, 0x08];
        assert!(matches!(parse_header(bytes), Err(GzipError::TooShort)));
    }

    #[test]
    fn fextra_length_is_little_endian() {
        let mut bytes = vec![0x1f, 0x8b, 0x08, 0b0000_0100, 0, 0, 0, 0, 0, 0];
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&[0xaa, 0xbb]);
        let header = parse_header(&bytes).unwrap();
        assert_eq!(header.payload_offset, bytes.len());
    }
}
