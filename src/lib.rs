//! lzhuf: a DEFLATE-style general-purpose file compressor.
//!
//! Compression runs the input through LZ77 dictionary substitution over a
//! 32k sliding window, renders the resulting tokens as fixed-width binary
//! records, Huffman-codes the record bytes, and packs the code bits into
//! a byte-aligned payload. Each compressed file is a pair of artifacts: a
//! self-describing code tree container and a bit-count framed payload.
//! Decompression reverses the stages exactly; round-trip identity holds
//! for any input, including empty and arbitrary binary data.
//!
//! The library works on whole in-memory byte buffers. Paths, console
//! messages, and file housekeeping live in the accompanying binary.

pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod lz77;
pub mod tools;

pub use compression::compress::{compress, Artifacts};
pub use compression::decompress::decompress;
pub use error::{Error, Result};
