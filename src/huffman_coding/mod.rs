//! The huffman_coding module is the entropy stage of the lzhuf compressor.
//!
//! A code tree is built per compression from the byte frequencies of the
//! serialized token stream: the two lowest-weight nodes are merged until
//! one root remains, so frequent bytes end up near the root with short
//! codes. Only leaves receive codes, which makes the table a prefix code
//! and lets the decoder walk the tree bit by bit without lookahead.
//!
//! The tree itself ships alongside the payload in a count-prefixed
//! preorder container so the decoder can rebuild it before touching any
//! payload bits; see tree_io.

pub mod huffman;
pub mod tree_io;
