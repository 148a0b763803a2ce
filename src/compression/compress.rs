use log::{debug, info, trace};

use crate::bitstream::bitpacker::BitPacker;
use crate::error::Result;
use crate::huffman_coding::huffman::Huffman;
use crate::huffman_coding::tree_io;
use crate::lz77::{token_io, window};

/// The two artifacts produced per input: the tree container and the
/// bit-count framed payload. They are written and read independently.
#[derive(Debug)]
pub struct Artifacts {
    pub tree: Vec<u8>,
    pub payload: Vec<u8>,
}

/// Run the full pipeline over `input`: window matching, token records,
/// tree construction, entropy coding, bit packing.
pub fn compress(input: &[u8]) -> Result<Artifacts> {
    let tokens = window::compress(input);
    let records = token_io::serialize_tokens(&tokens);
    debug!(
        "{} tokens serialized to {} record bytes",
        tokens.len(),
        records.len()
    );

    let mut huffman = Huffman::new();
    huffman.build(&records);

    let mut packer = BitPacker::new(records.len());
    huffman.encode(&records, &mut packer)?;
    let bit_count = packer.bit_count();
    packer.flush();
    trace!("payload ends at {}", packer.loc());

    let tree = tree_io::serialize_tree(huffman.root());

    // The payload leads with the exact bit count so decode can stop at
    // the final leaf boundary instead of chewing into the flush padding.
    let mut payload = Vec::with_capacity(8 + packer.output.len());
    payload.extend_from_slice(&bit_count.to_be_bytes());
    payload.extend_from_slice(&packer.output);

    info!(
        "compressed {} bytes: tree container {} bytes, payload {} bytes",
        input.len(),
        tree.len(),
        payload.len()
    );
    Ok(Artifacts { tree, payload })
}
