//! Fixed-width binary rendering of the token sequence.
//!
//! Each token is one 10-byte record: offset (u32, big endian), length
//! (u32, big endian), a presence flag, and the trailing byte (zero when
//! absent). Records concatenate with no separators, so the stream length
//! must be a whole multiple of the record size.

use super::window::Token;
use crate::error::{Error, Result};

/// Byte width of one serialized token record.
pub const RECORD_SIZE: usize = 10;

/// Render tokens as a flat record stream for the entropy stage.
pub fn serialize_tokens(tokens: &[Token]) -> Vec<u8> {
    let mut out = Vec::with_capacity(tokens.len() * RECORD_SIZE);
    for token in tokens {
        out.extend_from_slice(&token.offset.to_be_bytes());
        out.extend_from_slice(&token.length.to_be_bytes());
        match token.next {
            Some(byte) => {
                out.push(1);
                out.push(byte);
            }
            None => {
                out.push(0);
                out.push(0);
            }
        }
    }
    out
}

/// Parse a record stream back into tokens. Partial trailing records and
/// unknown flag values abort the parse; nothing is skipped or guessed.
pub fn parse_tokens(data: &[u8]) -> Result<Vec<Token>> {
    if data.len() % RECORD_SIZE != 0 {
        return Err(Error::BadTokenStream(format!(
            "{} stray bytes after the last whole record",
            data.len() % RECORD_SIZE
        )));
    }
    let mut tokens = Vec::with_capacity(data.len() / RECORD_SIZE);
    for record in data.chunks_exact(RECORD_SIZE) {
        let offset = u32::from_be_bytes(record[0..4].try_into().unwrap());
        let length = u32::from_be_bytes(record[4..8].try_into().unwrap());
        let next = match record[8] {
            0 => None,
            1 => Some(record[9]),
            flag => {
                return Err(Error::BadTokenStream(format!(
                    "unknown presence flag {flag}"
                )))
            }
        };
        tokens.push(Token {
            offset,
            length,
            next,
        });
    }
    Ok(tokens)
}

#[cfg(test)]
mod test {
    use super::{parse_tokens, serialize_tokens, RECORD_SIZE};
    use crate::lz77::window::Token;

    #[test]
    fn record_round_trip_test() {
        let tokens = vec![
            Token {
                offset: 0,
                length: 0,
                next: Some(b'a'),
            },
            Token {
                offset: 70000,
                length: 3,
                next: Some(0x00),
            },
            Token {
                offset: 1,
                length: 9,
                next: None,
            },
        ];
        let bytes = serialize_tokens(&tokens);
        assert_eq!(bytes.len(), tokens.len() * RECORD_SIZE);
        assert_eq!(parse_tokens(&bytes).unwrap(), tokens);
    }

    // The bytes that broke the original text rendering of tokens:
    // delimiters and non-printables must survive as literals.
    #[test]
    fn delimiter_bytes_round_trip_test() {
        for byte in [b'(', b')', b',', 0x00, 0x0a, 0xff] {
            let tokens = vec![Token {
                offset: 0,
                length: 0,
                next: Some(byte),
            }];
            assert_eq!(parse_tokens(&serialize_tokens(&tokens)).unwrap(), tokens);
        }
    }

    #[test]
    fn empty_stream_test() {
        assert_eq!(serialize_tokens(&[]), Vec::<u8>::new());
        assert!(parse_tokens(&[]).unwrap().is_empty());
    }

    #[test]
    fn partial_record_is_an_error_test() {
        let tokens = vec![Token {
            offset: 2,
            length: 2,
            next: Some(b'z'),
        }];
        let mut bytes = serialize_tokens(&tokens);
        bytes.pop();
        assert!(parse_tokens(&bytes).is_err());
    }

    #[test]
    fn unknown_flag_is_an_error_test() {
        let mut bytes = serialize_tokens(&[Token {
            offset: 0,
            length: 0,
            next: Some(b'a'),
        }]);
        bytes[8] = 7;
        assert!(parse_tokens(&bytes).is_err());
    }
}
