use std::cmp::Ordering;

use log::debug;
use rustc_hash::FxHashMap;

use crate::cs::compression::{bit_width, Codec, Result};
use crate::error::Error;

/// Number of single-byte phrases every dictionary starts with.
pub const INITIAL_DICTIONARY_SIZE: usize = 256;

/// Encoder-side LZW dictionary.
///
/// A phrase is identified by the code of its prefix plus its last byte; the
/// 256 single-byte phrases use their byte value as code and are implicit. The
/// dictionary only grows, one code per insertion.
#[derive(Debug, Clone, Default)]
pub struct LzwDictionary {
    extensions: FxHashMap<(u32, u8), u32>,
}

impl LzwDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of phrases, including the 256 initial ones.
    pub fn len(&self) -> usize {
        INITIAL_DICTIONARY_SIZE + self.extensions.len()
    }

    /// Never true: the single-byte phrases are always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Code of the phrase `prefix` extended by `byte`, if registered.
    pub fn get(&self, prefix: u32, byte: u8) -> Option<u32> {
        self.extensions.get(&(prefix, byte)).copied()
    }

    /// Register `prefix + byte` under the next free code and return that code.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` once the codes no longer fit in a `u32`.
    pub fn insert(&mut self, prefix: u32, byte: u8) -> Result<u32> {
        let code = u32::try_from(self.len()).map_err(|_| {
            Error::invalid_input("input too long: LZW codes exceed 32 bits")
        })?;
        self.extensions.insert((prefix, byte), code);
        Ok(code)
    }
}

/// Compresses the input data using the LZW algorithm.
///
/// # Details
///
/// The working phrase is tracked by its code alone. Each input byte first
/// tries the `(code, byte)` extension in the [`LzwDictionary`]; on a miss the
/// current code is emitted, the extension is registered under the next `u32`
/// code and the byte starts a new phrase. The final phrase is flushed at the
/// end, so an empty input emits no codes.
///
/// # Errors
///
/// `Error::InvalidInput` if the input is long enough that new codes would no
/// longer fit in a `u32`.
///
/// # Example
///
/// ```
/// use infocodec::cs::compression::lzw::compress;
///
/// let input = b"TOBEORNOTTOBE";
/// let compressed = compress(input).unwrap();
/// assert!(compressed.len() < input.len());
/// ```
pub fn compress(input: &[u8]) -> Result<Vec<u32>> {
    compress_with_dictionary(input).map(|(codes, _)| codes)
}

/// Like [`compress`], also returning the dictionary built along the way.
pub fn compress_with_dictionary(input: &[u8]) -> Result<(Vec<u32>, LzwDictionary)> {
    let mut dict = LzwDictionary::new();
    let mut result = Vec::new();
    // Code of the working phrase; `None` while it is empty.
    let mut w: Option<u32> = None;

    for &byte in input {
        let next = match w {
            None => u32::from(byte),
            Some(prefix) => match dict.get(prefix, byte) {
                Some(code) => code,
                None => {
                    result.push(prefix);
                    dict.insert(prefix, byte)?;
                    u32::from(byte)
                }
            },
        };
        w = Some(next);
    }
    // Output remaining code.
    if let Some(code) = w {
        result.push(code);
    }

    debug!(
        "LZW: {} bytes -> {} codes, dictionary size {}",
        input.len(),
        result.len(),
        dict.len()
    );
    Ok((result, dict))
}

/// Decompresses a sequence of LZW codes back into the original byte data.
///
/// # Details
///
/// Phrases live in an append-only arena indexed by code, seeded with the 256
/// single bytes. After every code but the first, the previous phrase plus the
/// first byte of the current one is appended, which keeps the arena in step
/// with the encoder's `(code, byte)` table. A code equal to the arena length
/// is the one the encoder defined on the very step that emitted it; its
/// phrase is the previous phrase plus that phrase's own first byte.
///
/// An empty code sequence decodes to an empty buffer.
///
/// # Errors
///
/// `Error::InvalidInput` if the first code is not a single-byte phrase,
/// `Error::MalformedInput` if a later code is beyond the next free code.
///
/// # Example
///
/// ```
/// use infocodec::cs::compression::lzw::{compress, decompress};
///
/// let input = b"TOBEORNOTTOBE";
/// let compressed = compress(input).unwrap();
/// let decompressed = decompress(&compressed).unwrap();
/// assert_eq!(decompressed, input);
/// ```
pub fn decompress(codes: &[u32]) -> Result<Vec<u8>> {
    let Some((&first, rest)) = codes.split_first() else {
        return Ok(Vec::new());
    };
    let first = u8::try_from(first).map_err(|_| {
        Error::invalid_input(format!(
            "first LZW code {first} is not a single-byte phrase"
        ))
    })?;

    // Initialize the dictionary with all 256 single-byte sequences.
    let mut dict: Vec<Vec<u8>> = (0..=u8::MAX).map(|byte| vec![byte]).collect();
    let mut w = vec![first];
    let mut result = w.clone();

    for (index, &code) in rest.iter().enumerate() {
        let code = code as usize;
        let entry = match code.cmp(&dict.len()) {
            Ordering::Less => dict[code].clone(),
            Ordering::Equal => {
                // Special case: code equals dictionary size.
                let mut entry = w.clone();
                entry.push(w[0]);
                entry
            }
            Ordering::Greater => {
                return Err(Error::malformed(format!(
                    "LZW code {code} at position {} exceeds next free code {}",
                    index + 1,
                    dict.len()
                )));
            }
        };
        result.extend_from_slice(&entry);
        // Add new dictionary entry: w + first byte of entry.
        let mut new_entry = w;
        new_entry.push(entry[0]);
        dict.push(new_entry);
        w = entry;
    }
    Ok(result)
}

/// LZW as a [`Codec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Lzw;

impl Codec for Lzw {
    type Encoded = Vec<u32>;

    fn name(&self) -> &'static str {
        "LZW"
    }

    fn encode(&self, data: &[u8]) -> Result<Vec<u32>> {
        compress(data)
    }

    fn decode(&self, encoded: &Vec<u32>) -> Result<Vec<u8>> {
        decompress(encoded)
    }

    /// Every code at the width of the largest one, never below 8 bits.
    fn encoded_bits(&self, encoded: &Vec<u32>) -> usize {
        let largest = encoded.iter().copied().max().unwrap_or(0) as usize;
        encoded.len() * bit_width(largest).max(8)
    }
}
