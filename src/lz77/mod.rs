//! The lz77 module is the dictionary-substitution stage of the lzhuf
//! compressor.
//!
//! Repeated byte runs are replaced with (offset, length) back-references
//! into a 32k sliding window over the bytes already processed, each paired
//! with the literal byte that follows the match. A match may extend past
//! the current position (the copy overlaps itself), which is what turns
//! long runs of one byte into a single token.
//!
//! The token sequence is rendered for the entropy stage as fixed-width
//! binary records; see token_io.

pub mod token_io;
pub mod window;
