//! Module: error
//!
//! Error types for the bit reader / Huffman / DEFLATE layer and for the
//! gzip container layer that wraps it.

use thiserror::Error;

/// Errors that can occur while decoding a DEFLATE bitstream.
#[derive(Error, Debug)]
pub enum DeflateError {
    #[error("unexpected end of input while reading the bitstream")]
    UnexpectedEof,
    #[error("reserved block type 11")]
    ReservedBlockType,
    #[error("stored block length check failed: LEN={len:#06x} NLEN={nlen:#06x}")]
    StoredLengthMismatch { len: u16, nlen: u16 },
    #[error("literal/length symbol {0} is out of range")]
    InvalidLiteralLengthSymbol(u32),
    #[error("distance symbol {0} is out of range")]
    InvalidDistanceSymbol(u32),
    #[error("back-reference distance {distance} exceeds the {available} bytes decoded so far")]
    DistanceTooFar { distance: usize, available: usize },
    #[error("meta code 16 (repeat previous length) encountered with no previous length")]
    RepeatWithNoPrevious,
    #[error("run-length repeat in the dynamic code-length sequence overshoots its expected size")]
    RunLengthOverflow,
    #[error("two symbols were assigned the same Huffman leaf")]
    HuffmanCodeCollision,
    #[error("Huffman code description does not describe a complete tree")]
    IncompleteHuffmanTree,
}

/// Errors that can occur while parsing the gzip container around a DEFLATE payload.
#[derive(Error, Debug)]
pub enum GzipError {
    #[error("input is too short to be a gzip member")]
    TooShort,
    #[error("bad gzip magic bytes")]
    BadMagic,
    #[error("unsupported compression method {0} (only method 8, DEFLATE, is supported)")]
    UnsupportedMethod(u8),
    #[error("unknown gzip header flag bits: {0:#010b}")]
    UnknownFlags(u8),
    #[error(transparent)]
    Deflate(#[from] DeflateError),
}
