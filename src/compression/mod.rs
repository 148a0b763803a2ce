//! The compression module wires the lzhuf stages into the two pipeline
//! operations.
//!
//! Compression happens in the following steps:
//! - LZ77: replace repeated byte runs with back-references into a 32k
//!   sliding window.
//! - Token records: render the token sequence as fixed-width binary
//!   records.
//! - Huffman coding: build a code tree over the record bytes and encode
//!   frequent bytes with short codes.
//! - Bit packing: pack the code bits into bytes behind a bit-count header.
//!
//! The result is two independent artifacts: the serialized code tree and
//! the packed payload. Decompression is the exact inverse and loads the
//! tree before touching a payload bit.
//!
//! Both directions work on whole in-memory buffers; file handling belongs
//! to the binary.

pub mod compress;
pub mod decompress;
