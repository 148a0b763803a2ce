use log::{debug, info};

use crate::bitstream::bitreader::BitReader;
use crate::error::{Error, Result};
use crate::huffman_coding::huffman::Huffman;
use crate::huffman_coding::tree_io;
use crate::lz77::{token_io, window};

/// Reverse the pipeline from the two artifacts back to the original
/// bytes. The tree container is parsed in full before any payload bit is
/// consumed.
pub fn decompress(tree: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    let root = tree_io::deserialize_tree(tree)?;
    let huffman = Huffman::from_tree(root);

    if payload.len() < 8 {
        return Err(Error::TruncatedPayload);
    }
    let bit_count = u64::from_be_bytes(payload[0..8].try_into().unwrap());
    let packed = &payload[8..];
    if bit_count > packed.len() as u64 * 8 {
        return Err(Error::TruncatedPayload);
    }

    let mut reader = BitReader::new(packed);
    let records = huffman.decode(&mut reader, bit_count)?;
    debug!(
        "{} payload bits decoded to {} record bytes",
        bit_count,
        records.len()
    );

    let tokens = token_io::parse_tokens(&records)?;
    let output = window::decompress(&tokens)?;
    info!(
        "reconstructed {} bytes from {} tokens",
        output.len(),
        tokens.len()
    );
    Ok(output)
}
