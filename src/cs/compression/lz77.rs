use log::{debug, trace};

use crate::cs::compression::{bit_width, Codec, Result};
use crate::error::Error;

/// Default number of previous positions searched for a match.
pub const DEFAULT_WINDOW: usize = 20;

/// An LZ77 token.
///
/// When a match is found, the token is:
///   (distance, length, literal)
/// meaning "copy `length` bytes starting `distance` positions back, then emit
/// `literal`".
///
/// If no match is found, then distance and length are zero, and `literal` is
/// the next input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub distance: usize,
    pub length: usize,
    pub literal: u8,
}

impl Token {
    pub fn literal(byte: u8) -> Self {
        Token {
            distance: 0,
            length: 0,
            literal: byte,
        }
    }

    pub fn is_literal(&self) -> bool {
        self.distance == 0 && self.length == 0
    }

    /// Number of output bytes this token expands to.
    pub fn expanded_len(&self) -> usize {
        self.length.saturating_add(1)
    }
}

/// LZ77 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lz77Config {
    /// The maximum number of previous bytes to search for a match.
    pub window: usize,
}

impl Default for Lz77Config {
    fn default() -> Self {
        Lz77Config {
            window: DEFAULT_WINDOW,
        }
    }
}

/// Compress the input data using the LZ77 algorithm.
///
/// # Parameters
///
/// - `input`: the data to compress as a byte slice.
/// - `window`: the maximum number of previous bytes to search for a match.
///
/// # Details
///
/// Distances are tried in increasing order, so the nearest of several
/// equally long matches wins. A match may run past the current position into
/// the bytes it is itself reproducing. Matches stop one byte short of the end
/// of the input so every token carries a real trailing literal.
///
/// # Example
///
/// ```
/// use infocodec::cs::compression::lz77::compress;
///
/// let tokens = compress(b"ABABABAB", 20);
/// assert_eq!(tokens.len(), 3);
/// ```
pub fn compress(input: &[u8], window: usize) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < input.len() {
        let max_length = input.len() - i - 1;
        let mut best_length = 0;
        let mut best_distance = 0;
        // Look for the longest match in the sliding window.
        for distance in 1..=window.min(i) {
            let mut length = 0;
            while length < max_length && input[i - distance + length] == input[i + length] {
                length += 1;
            }
            if length > best_length {
                best_length = length;
                best_distance = distance;
                if length == max_length {
                    break;
                }
            }
        }

        if best_length > 0 {
            trace!("match at {i}: distance {best_distance}, length {best_length}");
            tokens.push(Token {
                distance: best_distance,
                length: best_length,
                literal: input[i + best_length],
            });
            i += best_length + 1;
        } else {
            // No match found: output literal token.
            tokens.push(Token::literal(input[i]));
            i += 1;
        }
    }
    debug!(
        "LZ77: {} bytes -> {} tokens (window {})",
        input.len(),
        tokens.len(),
        window
    );
    tokens
}

/// Decompress a sequence of LZ77 tokens into the original data.
///
/// Matches are copied one byte at a time so a source range may overlap the
/// bytes being written.
///
/// # Errors
///
/// `Error::MalformedInput` if a token reaches back before the start of the
/// output, has a length without a distance, or copies more bytes than can be
/// allocated.
///
/// # Example
///
/// ```
/// use infocodec::cs::compression::lz77::{compress, decompress};
///
/// let data = b"abracadabra abracadabra";
/// let tokens = compress(data, 16);
/// let decompressed = decompress(&tokens).unwrap();
/// assert_eq!(decompressed, data);
/// ```
pub fn decompress(tokens: &[Token]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        if token.distance == 0 {
            if token.length > 0 {
                return Err(Error::malformed(format!(
                    "token {index} has length {} but no distance",
                    token.length
                )));
            }
        } else {
            if token.distance > output.len() {
                return Err(Error::malformed(format!(
                    "token {index} reaches {} bytes back but only {} are decoded",
                    token.distance,
                    output.len()
                )));
            }
            output.try_reserve(token.expanded_len()).map_err(|_| {
                Error::malformed(format!(
                    "token {index} copies {} bytes, more than can be allocated",
                    token.length
                ))
            })?;
            let start = output.len() - token.distance;
            for k in 0..token.length {
                output.push(output[start + k]);
            }
        }
        output.push(token.literal);
    }
    Ok(output)
}

/// LZ77 as a [`Codec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz77 {
    config: Lz77Config,
}

impl Lz77 {
    pub fn new(config: Lz77Config) -> Self {
        Lz77 { config }
    }

    pub fn with_window(window: usize) -> Self {
        Lz77::new(Lz77Config { window })
    }

    pub fn config(&self) -> &Lz77Config {
        &self.config
    }
}

impl Codec for Lz77 {
    type Encoded = Vec<Token>;

    fn name(&self) -> &'static str {
        "LZ77"
    }

    fn encode(&self, data: &[u8]) -> Result<Vec<Token>> {
        Ok(compress(data, self.config.window))
    }

    fn decode(&self, encoded: &Vec<Token>) -> Result<Vec<u8>> {
        decompress(encoded)
    }

    /// Fixed-width estimate: every token stores a distance wide enough for the
    /// window, a length wide enough for the longest match and an 8-bit literal.
    fn encoded_bits(&self, encoded: &Vec<Token>) -> usize {
        let longest = encoded.iter().map(|t| t.length).max().unwrap_or(0);
        encoded.len() * (bit_width(self.config.window) + bit_width(longest) + 8)
    }
}
