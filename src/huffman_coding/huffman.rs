use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::trace;
use rustc_hash::FxHashMap;

use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitreader::BitReader;
use crate::error::{Error, Result};
use crate::tools::freq_count::freqs;

/// Payload of a tree node: two children, or a leaf byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

/// One node of the code tree. `weight` is the byte frequency for a leaf
/// and the sum of both children for an internal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub weight: u32,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u32, node_data: NodeData) -> Node {
        Node { weight, node_data }
    }
}

/// A code path from the root: the low `len` bits of `bits`, written most
/// significant first. Weights are u32, so no tree can reach depth 64 and
/// u64 holds any code this coder can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

/// Heap entry for tree construction. Ordered min-first by weight, then by
/// insertion sequence, so equal weights pop in FIFO order and the tree
/// shape is reproducible run to run.
#[derive(Debug, PartialEq, Eq)]
struct HeapNode {
    weight: u32,
    seq: u32,
    node: Box<Node>,
}

impl Ord for HeapNode {
    /// Reversed so BinaryHeap pops the lowest weight first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Huffman coder. Owns the code tree for one compression and the code
/// dictionary derived from it; both drop with the coder.
pub struct Huffman {
    root: Option<Box<Node>>,
    codes: FxHashMap<u8, Code>,
}

impl Huffman {
    pub fn new() -> Self {
        Self {
            root: None,
            codes: FxHashMap::default(),
        }
    }

    /// Wrap a deserialized tree for decoding. The code dictionary is not
    /// rebuilt; a coder made this way only decodes.
    pub fn from_tree(root: Option<Box<Node>>) -> Self {
        Self {
            root,
            codes: FxHashMap::default(),
        }
    }

    /// Count byte frequencies in `data`, build the code tree, and derive
    /// the code dictionary. Empty input leaves the coder without a tree.
    pub fn build(&mut self, data: &[u8]) {
        self.root = build_tree(data);
        self.codes.clear();
        if let Some(root) = &self.root {
            fill_codes(
                root,
                Code { bits: 0, len: 0 },
                &mut self.codes,
            );
        }
        trace!("code dictionary holds {} symbols", self.codes.len());
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// The derived byte -> code dictionary.
    pub fn code_table(&self) -> &FxHashMap<u8, Code> {
        &self.codes
    }

    /// Append the code for every byte of `data` to the packer, in input
    /// order. A byte without a dictionary entry means the caller encoded
    /// data the tree was not built from.
    pub fn encode(&self, data: &[u8], packer: &mut BitPacker) -> Result<()> {
        for &byte in data {
            let code = self.codes.get(&byte).ok_or(Error::MissingCode(byte))?;
            packer.out_bits(code.bits, code.len);
        }
        Ok(())
    }

    /// Consume exactly `bit_count` bits from the reader, walking left on 0
    /// and right on 1 and emitting a byte at each leaf. A single-leaf tree
    /// never descends: the root doubles as the terminal state and every
    /// bit emits the lone symbol.
    pub fn decode(&self, reader: &mut BitReader<'_>, bit_count: u64) -> Result<Vec<u8>> {
        let root = match &self.root {
            Some(root) => root,
            None if bit_count == 0 => return Ok(Vec::new()),
            None => {
                return Err(Error::CorruptTree(
                    "payload carries bits but the tree is empty".to_string(),
                ))
            }
        };

        let mut out = Vec::new();
        let mut node = root;
        let mut mid_path = false;
        for _ in 0..bit_count {
            let bit = reader.bit().ok_or(Error::TruncatedPayload)?;
            if let NodeData::Kids(left, right) = &node.node_data {
                node = if bit == 0 { left } else { right };
                mid_path = true;
            }
            if let NodeData::Leaf(byte) = node.node_data {
                out.push(byte);
                node = root;
                mid_path = false;
            }
        }
        if mid_path {
            return Err(Error::DanglingBits);
        }
        Ok(out)
    }
}

impl Default for Huffman {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge leaves lowest-weight-first until one root remains. One distinct
/// byte yields a single-leaf tree; no bytes yields no tree.
fn build_tree(data: &[u8]) -> Option<Box<Node>> {
    let counts = freqs(data);
    let mut heap = BinaryHeap::new();
    let mut seq = 0_u32;
    for (byte, &count) in counts.iter().enumerate() {
        if count > 0 {
            heap.push(HeapNode {
                weight: count,
                seq,
                node: Box::new(Node::new(count, NodeData::Leaf(byte as u8))),
            });
            seq += 1;
        }
    }
    if heap.is_empty() {
        return None;
    }
    while heap.len() > 1 {
        let left = heap.pop().unwrap();
        let right = heap.pop().unwrap();
        let weight = left.weight + right.weight;
        heap.push(HeapNode {
            weight,
            seq,
            node: Box::new(Node::new(weight, NodeData::Kids(left.node, right.node))),
        });
        seq += 1;
    }
    Some(heap.pop().unwrap().node)
}

/// Walk the tree assigning 0 to left edges and 1 to right edges. Only
/// leaves get dictionary entries, so no code prefixes another.
fn fill_codes(node: &Node, path: Code, codes: &mut FxHashMap<u8, Code>) {
    match &node.node_data {
        NodeData::Leaf(byte) => {
            // A lone-leaf tree reaches here with an empty path; the
            // symbol still needs one bit on the wire.
            let code = if path.len == 0 {
                Code { bits: 0, len: 1 }
            } else {
                path
            };
            codes.insert(*byte, code);
        }
        NodeData::Kids(left, right) => {
            fill_codes(
                left,
                Code {
                    bits: path.bits << 1,
                    len: path.len + 1,
                },
                codes,
            );
            fill_codes(
                right,
                Code {
                    bits: path.bits << 1 | 1,
                    len: path.len + 1,
                },
                codes,
            );
        }
    }
}
