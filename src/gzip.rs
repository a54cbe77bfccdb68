//! Module: gzip
//!
//! Top-level gzip member decoding: parse the header (G1), run the
//! DEFLATE core over the payload, then check the trailer (G2).

use byteorder::{LittleEndian, ReadBytesExt};
use log::{info, warn};

use crate::bit_reader::BitReader;
use crate::crc32;
use crate::error::GzipError;
use crate::header::parse_header;
use crate::inflate::inflate;

const TRAILER_LEN: usize = 8;

/// Decodes a complete gzip member and returns the decompressed bytes.
///
/// The trailer's CRC32 and ISIZE are checked on a best-effort basis: a
/// mismatch is logged as a warning and does not fail the decode, since
/// the format this is ported from is silent on trailer verification.
pub fn decompress_gzip(buffer: &[u8]) -> Result<Vec<u8>, GzipError> {
    let header = parse_header(buffer)?;
    info!(
        "gzip member: mtime={} os={} payload starts at byte {}",
        header.mtime, header.os, header.payload_offset
    );

    if buffer.len() < header.payload_offset + TRAILER_LEN {
        return Err(GzipError::TooShort);
    }
    let payload_end = buffer.len() - TRAILER_LEN;
    let payload = &buffer[header.payload_offset..payload_end];
    let trailer = &buffer[payload_end..];

    let mut out = Vec::new();
    let mut reader = BitReader::new(payload);
    inflate(&mut reader, &mut out)?;

    check_trailer(trailer, &out);
    Ok(out)
}

fn check_trailer(mut trailer: &[u8], decoded: &[u8]) {
    let expected_crc = trailer
        .read_u32::<LittleEndian>()
        .expect("caller guarantees an 8-byte trailer slice");
    let expected_isize = trailer
        .read_u32::<LittleEndian>()
        .expect("caller guarantees an 8-byte trailer slice");

    let actual_crc = crc32::checksum(decoded);
    if actual_crc != expected_crc {
        warn!(
            "gzip trailer CRC32 mismatch: expected {expected_crc:#010x}, got {actual_crc:#010x}"
        );
    }
    let actual_isize = decoded.len() as u32;
    if actual_isize != expected_isize {
        warn!(
            "gzip trailer ISIZE mismatch: expected {expected_isize}, got {actual_isize}"
        );
    }
}
