use log::debug;

use crate::error::{Error, Result};

/// Bytes of already-processed input eligible as back-reference sources.
pub const WINDOW_SIZE: usize = 32768;

/// One LZ77 output unit: a back-reference into the window plus the literal
/// byte that follows it. `offset == 0 && length == 0` means no match was
/// found and `next` is a plain literal. `next` is None only for the final
/// token, when the match runs to the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub offset: u32,
    pub length: u32,
    pub next: Option<u8>,
}

/// Compress `data` into a token sequence. Every window position is probed
/// and the best candidate is replaced only on strict improvement, so the
/// earliest qualifying position wins ties and the output is reproducible.
pub fn compress(data: &[u8]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut index = 0;

    while index < data.len() {
        let mut best_length = 0_usize;
        let mut best_offset = 0_usize;
        let window_start = index.saturating_sub(WINDOW_SIZE);

        for window_index in window_start..index {
            let mut length = 0_usize;
            // The run may extend past `index` itself; an overlapping copy
            // is how a long single-byte run becomes one token.
            while index + length < data.len()
                && data[index + length] == data[window_index + length]
            {
                length += 1;
            }
            if length > best_length {
                best_length = length;
                best_offset = index - window_index;
            }
        }

        tokens.push(Token {
            offset: best_offset as u32,
            length: best_length as u32,
            next: data.get(index + best_length).copied(),
        });
        index += best_length + 1;
    }

    debug!("{} bytes in, {} tokens out", data.len(), tokens.len());
    tokens
}

/// Replay a token sequence into the original bytes. Copies are done a byte
/// at a time so a back-reference may read bytes produced earlier in the
/// same copy.
pub fn decompress(tokens: &[Token]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for token in tokens {
        if token.length > 0 {
            let offset = token.offset as usize;
            if offset == 0 || offset > out.len() {
                return Err(Error::BadTokenStream(format!(
                    "back-reference offset {} with only {} bytes reconstructed",
                    offset,
                    out.len()
                )));
            }
            let start = out.len() - offset;
            for i in 0..token.length as usize {
                let byte = out[start + i];
                out.push(byte);
            }
        }
        if let Some(byte) = token.next {
            out.push(byte);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::{compress, decompress, Token};

    #[test]
    fn empty_input_test() {
        assert!(compress(b"").is_empty());
        assert_eq!(decompress(&[]).unwrap(), b"");
    }

    #[test]
    fn run_of_one_byte_test() {
        // First byte is a literal, the rest is one overlapping copy.
        let tokens = compress(b"aaaa");
        assert_eq!(
            tokens,
            vec![
                Token {
                    offset: 0,
                    length: 0,
                    next: Some(b'a')
                },
                Token {
                    offset: 1,
                    length: 3,
                    next: None
                },
            ]
        );
        assert_eq!(decompress(&tokens).unwrap(), b"aaaa");
    }

    #[test]
    fn no_repetition_test() {
        let tokens = compress(b"abcdefgh");
        assert_eq!(tokens.len(), 8);
        assert!(tokens.iter().all(|t| t.offset == 0 && t.length == 0));
        assert_eq!(decompress(&tokens).unwrap(), b"abcdefgh");
    }

    #[test]
    fn single_byte_test() {
        let tokens = compress(b"q");
        assert_eq!(
            tokens,
            vec![Token {
                offset: 0,
                length: 0,
                next: Some(b'q')
            }]
        );
        assert_eq!(decompress(&tokens).unwrap(), b"q");
    }

    #[test]
    fn text_round_trip_test() {
        let data = "the quick brown fox jumps over the lazy dog. the quick brown fox jumps."
            .as_bytes();
        let tokens = compress(data);
        assert!(tokens.len() < data.len());
        assert_eq!(decompress(&tokens).unwrap(), data);
    }

    #[test]
    fn binary_round_trip_test() {
        let mut data = Vec::new();
        for i in 0..1024_usize {
            data.push((i % 7) as u8);
            data.push((i % 251) as u8);
        }
        let tokens = compress(&data);
        assert_eq!(decompress(&tokens).unwrap(), data);
    }

    #[test]
    fn match_to_end_of_input_test() {
        // "abab": two literals then a length 2 overlap-free copy that
        // runs to the end, so the final token has no trailing byte.
        let tokens = compress(b"abab");
        assert_eq!(
            tokens.last(),
            Some(&Token {
                offset: 2,
                length: 2,
                next: None
            })
        );
        assert_eq!(decompress(&tokens).unwrap(), b"abab");
    }

    #[test]
    fn bad_offset_is_an_error_test() {
        let tokens = [Token {
            offset: 5,
            length: 2,
            next: None,
        }];
        assert!(decompress(&tokens).is_err());
    }

    #[test]
    fn zero_offset_with_length_is_an_error_test() {
        let tokens = [
            Token {
                offset: 0,
                length: 0,
                next: Some(b'x'),
            },
            Token {
                offset: 0,
                length: 3,
                next: None,
            },
        ];
        assert!(decompress(&tokens).is_err());
    }
}
