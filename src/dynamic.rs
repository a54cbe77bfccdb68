//! Module: dynamic
//!
//! Decodes the meta-description at the start of a dynamic (type `10`)
//! DEFLATE block and materialises the block's literal/length and
//! distance trees.

use crate::bit_reader::BitReader;
use crate::error::DeflateError;
use crate::huffman::HuffmanTree;

const CODE_LENGTH_ORDER: [usize; 19] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Reads HLIT/HDIST/HCLEN, the 19 meta code lengths, and the resulting
/// literal/length + distance code-length sequence, returning the two
/// trees it describes.
pub fn read_dynamic_trees(
    reader: &mut BitReader,
) -> Result<(HuffmanTree, HuffmanTree), DeflateError> {
    let hlit = reader.read_bits_lsb(5)? as usize + 257;
    let hdist = reader.read_bits_lsb(5)? as usize + 1;
    let hclen = reader.read_bits_lsb(4)? as usize + 4;

    let mut meta_lengths = [0u8; 19];
    for &position in &CODE_LENGTH_ORDER[..hclen] {
        meta_lengths[position] = reader.read_bits_lsb(3)? as u8;
    }
    let meta_tree = HuffmanTree::build(&meta_lengths)?;

    let total = hlit + hdist;
    let lengths = read_code_length_sequence(reader, &meta_tree, total)?;

    let literal_tree = HuffmanTree::build(&lengths[..hlit])?;
    let distance_tree = HuffmanTree::build(&lengths[hlit..])?;
    Ok((literal_tree, distance_tree))
}

fn read_code_length_sequence(
    reader: &mut BitReader,
    meta_tree: &HuffmanTree,
    total: usize,
) -> Result<Vec<u8>, DeflateError> {
    let mut lengths: Vec<u8> = Vec::with_capacity(total);
    while lengths.len() < total {
        let symbol = meta_tree.read_symbol(reader)?;
        match symbol {
            0..=15 => lengths.push(symbol as u8),
            16 => {
                let &previous = lengths.last().ok_or(DeflateError::RepeatWithNoPrevious)?;
                let repeat = reader.read_bits_lsb(2)? as usize + 3;
                push_repeat(&mut lengths, previous, repeat, total)?;
            }
            17 => {
                let repeat = reader.read_bits_lsb(3)? as usize + 3;
                push_repeat(&mut lengths, 0, repeat, total)?;
            }
            18 => {
                let repeat = reader.read_bits_lsb(7)? as usize + 11;
                push_repeat(&mut lengths, 0, repeat, total)?;
            }
            // The meta tree is built from a 19-entry length array, so
            // `read_symbol` can never hand back anything outside 0..=18.
            other => unreachable!("meta alphabet has no symbol {other}"),
        }
    }
    Ok(lengths)
}

fn push_repeat(
    lengths: &mut Vec<u8>,
    value: u8,
    repeat: usize,
    total: usize,
) -> Result<(), DeflateError> {
    if lengths.len() + repeat > total {
        return Err(DeflateError::RunLengthOverflow);
    }
    lengths.extend(std::iter::repeat(value).take(repeat));
    Ok(())
}
