//! The on-disk container for the code tree.
//!
//! Layout: a u32 node count, then one preorder record per node. A record
//! is a tag byte (1 = leaf, 0 = internal) followed by the leaf's byte
//! value and u32 weight, or just the u32 weight with the left and right
//! subtrees following recursively. The leading count bounds the recursion
//! so a truncated or padded blob is caught instead of walked off the end.

use log::trace;

use super::huffman::{Node, NodeData};
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitreader::BitReader;
use crate::error::{Error, Result};

const TAG_INTERNAL: u8 = 0;
const TAG_LEAF: u8 = 1;

/// Serialize a code tree into its container form. An absent tree becomes
/// a bare zero count.
pub fn serialize_tree(root: Option<&Node>) -> Vec<u8> {
    let count = count_nodes(root);
    let mut packer = BitPacker::new(4 + count as usize * 6);
    packer.out32(count);
    if let Some(node) = root {
        write_node(node, &mut packer);
    }
    // Records are whole bytes; flush is bookkeeping, not padding.
    packer.flush();
    trace!("tree container: {} nodes, {} bytes", count, packer.output.len());
    packer.output
}

fn count_nodes(node: Option<&Node>) -> u32 {
    match node {
        None => 0,
        Some(node) => match &node.node_data {
            NodeData::Leaf(_) => 1,
            NodeData::Kids(left, right) => {
                1 + count_nodes(Some(left)) + count_nodes(Some(right))
            }
        },
    }
}

fn write_node(node: &Node, packer: &mut BitPacker) {
    match &node.node_data {
        NodeData::Leaf(byte) => {
            packer.out8(TAG_LEAF);
            packer.out8(*byte);
            packer.out32(node.weight);
        }
        NodeData::Kids(left, right) => {
            packer.out8(TAG_INTERNAL);
            packer.out32(node.weight);
            write_node(left, packer);
            write_node(right, packer);
        }
    }
}

/// Rebuild a tree from its container form. Any disagreement between the
/// declared node count and the records behind it is a corruption error.
pub fn deserialize_tree(blob: &[u8]) -> Result<Option<Box<Node>>> {
    let mut reader = BitReader::new(blob);
    let count = reader
        .bint(32)
        .ok_or_else(|| corrupt("node count missing"))? as u32;
    if count == 0 {
        return Ok(None);
    }
    let mut remaining = count;
    let root = read_node(&mut reader, &mut remaining)?;
    if remaining != 0 {
        return Err(corrupt(&format!(
            "node count overshoots the tree by {remaining}"
        )));
    }
    Ok(Some(root))
}

fn read_node(reader: &mut BitReader<'_>, remaining: &mut u32) -> Result<Box<Node>> {
    if *remaining == 0 {
        return Err(corrupt("node count exhausted mid-tree"));
    }
    *remaining -= 1;
    let tag = reader
        .byte()
        .ok_or_else(|| corrupt("record truncated at tag"))?;
    match tag {
        TAG_LEAF => {
            let value = reader
                .byte()
                .ok_or_else(|| corrupt("leaf record truncated"))?;
            let weight = reader
                .bint(32)
                .ok_or_else(|| corrupt("leaf record truncated"))? as u32;
            Ok(Box::new(Node::new(weight, NodeData::Leaf(value))))
        }
        TAG_INTERNAL => {
            let weight = reader
                .bint(32)
                .ok_or_else(|| corrupt("internal record truncated"))?
                as u32;
            let left = read_node(reader, remaining)?;
            let right = read_node(reader, remaining)?;
            Ok(Box::new(Node::new(weight, NodeData::Kids(left, right))))
        }
        tag => Err(corrupt(&format!("unknown node tag {tag}"))),
    }
}

fn corrupt(detail: &str) -> Error {
    Error::CorruptTree(detail.to_string())
}

#[cfg(test)]
mod test {
    use super::{deserialize_tree, serialize_tree};
    use crate::huffman_coding::huffman::Huffman;

    fn tree_blob(data: &[u8]) -> Vec<u8> {
        let mut huffman = Huffman::new();
        huffman.build(data);
        serialize_tree(huffman.root())
    }

    #[test]
    fn container_round_trip_test() {
        let mut huffman = Huffman::new();
        huffman.build(b"abracadabra");
        let blob = serialize_tree(huffman.root());
        let rebuilt = deserialize_tree(&blob).unwrap().unwrap();
        // Same shape, weights, and leaf placement means identical codes.
        assert_eq!(&*rebuilt, huffman.root().unwrap());
    }

    #[test]
    fn single_leaf_round_trip_test() {
        let blob = tree_blob(b"zzzz");
        assert_eq!(blob.len(), 4 + 6);
        let rebuilt = deserialize_tree(&blob).unwrap().unwrap();
        assert_eq!(rebuilt.weight, 4);
    }

    #[test]
    fn empty_tree_round_trip_test() {
        let blob = serialize_tree(None);
        assert_eq!(blob, [0, 0, 0, 0]);
        assert!(deserialize_tree(&blob).unwrap().is_none());
    }

    #[test]
    fn truncated_blob_is_an_error_test() {
        let blob = tree_blob(b"abracadabra");
        for cut in 1..blob.len() {
            assert!(
                deserialize_tree(&blob[..cut]).is_err(),
                "blob cut to {cut} bytes should not parse"
            );
        }
    }

    #[test]
    fn overshooting_count_is_an_error_test() {
        let mut blob = tree_blob(b"zzzz");
        // Claim two nodes but supply one leaf record.
        blob[3] = 2;
        assert!(deserialize_tree(&blob).is_err());
    }

    #[test]
    fn undershooting_count_is_an_error_test() {
        let mut blob = tree_blob(b"abracadabra");
        blob[3] = 1;
        assert!(deserialize_tree(&blob).is_err());
    }

    #[test]
    fn unknown_tag_is_an_error_test() {
        let mut blob = tree_blob(b"zzzz");
        blob[4] = 9;
        assert!(deserialize_tree(&blob).is_err());
    }
}
