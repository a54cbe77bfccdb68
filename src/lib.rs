//! A gzip/DEFLATE decompressor.
//!
//! The bit-level DEFLATE decoder (`bit_reader`, `huffman`, `fixed`,
//! `dynamic`, `inflate`) does the interesting work; `header` and `gzip`
//! are the RFC 1952 container glue around it.

pub mod bit_reader;
pub mod crc32;
pub mod dynamic;
pub mod error;
pub mod fixed;
pub mod gzip;
pub mod header;
pub mod huffman;
pub mod inflate;

pub use error::{DeflateError, GzipError};
pub use gzip::decompress_gzip;
