//! Shannon-Fano coding.
//!
//! Symbols are sorted by probability and the list is split recursively, top
//! down, where the running probability mass first reaches half of the part
//! being split. The left part extends its prefix with `0`, the right part with
//! `1`. The greedy split is not optimal in general (Huffman is), so the decoder
//! relies on the transmitted code table rather than rebuilding it.

use bitvec::prelude::*;
use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::cs::compression::frequency::FrequencyTable;
use crate::cs::compression::prefix::{bit_string, PrefixCode};
use crate::cs::compression::{Codec, Result};
use crate::error::Error;

/// Bit string produced by a prefix coder together with its code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixEncoded {
    pub bits: BitVec,
    pub code: PrefixCode,
}

/// Build the Shannon-Fano code for `table`.
///
/// Symbols are ordered by descending count with a stable sort, so equal counts
/// keep the table's first-occurrence order. An empty table yields an empty code.
pub fn build_code(table: &FrequencyTable) -> PrefixCode {
    let mut symbols: Vec<(u8, usize)> = table.iter().collect();
    symbols.sort_by(|a, b| b.1.cmp(&a.1));

    let mut code = PrefixCode::new();
    if !symbols.is_empty() {
        split(&symbols, BitVec::new(), &mut code);
    }
    debug!(
        "Shannon-Fano code for {} symbols, longest word {} bits",
        code.len(),
        code.max_len()
    );
    code
}

fn split(symbols: &[(u8, usize)], prefix: BitVec, code: &mut PrefixCode) {
    if let [(symbol, _)] = symbols {
        let word = if prefix.is_empty() {
            bitvec![0]
        } else {
            prefix
        };
        code.insert(*symbol, word);
        return;
    }

    // First index where the running mass reaches half of this part's mass.
    let total: usize = symbols.iter().map(|&(_, count)| count).sum();
    let mut acc = 0;
    let mut at = 1;
    for (i, &(_, count)) in symbols.iter().enumerate() {
        acc += count;
        if 2 * acc >= total {
            at = i + 1;
            break;
        }
    }
    // Both halves stay non-empty.
    let at = at.min(symbols.len() - 1);
    trace!(
        "split {} symbols at {} under prefix {}",
        symbols.len(),
        at,
        bit_string(&prefix)
    );

    let (left, right) = symbols.split_at(at);
    let mut left_prefix = prefix.clone();
    left_prefix.push(false);
    split(left, left_prefix, code);
    let mut right_prefix = prefix;
    right_prefix.push(true);
    split(right, right_prefix, code);
}

/// Encode `data`, returning the bit string and the code used.
///
/// # Example
///
/// ```
/// use infocodec::cs::compression::shannon_fano::{decode, encode};
///
/// let (bits, code) = encode(b"abracadabra");
/// assert_eq!(decode(&bits, &code).unwrap(), b"abracadabra");
/// ```
pub fn encode(data: &[u8]) -> (BitVec, PrefixCode) {
    let code = build_code(&FrequencyTable::new(data));
    let mut bits = BitVec::new();
    for &byte in data {
        // Every byte of `data` was counted, so each has a word.
        if let Some(word) = code.get(byte) {
            bits.extend_from_bitslice(word);
        }
    }
    (bits, code)
}

/// Decode `bits` by matching the accumulated bits against `code`'s words.
///
/// # Errors
///
/// `Error::MalformedInput` if the bits end inside a word, or if the pending
/// bits grow past the longest word without matching one.
pub fn decode(bits: &BitSlice, code: &PrefixCode) -> Result<Vec<u8>> {
    let inverse: FxHashMap<BitVec, u8> = code
        .iter()
        .map(|(symbol, word)| (word.to_bitvec(), symbol))
        .collect();
    let longest = code.max_len();

    let mut output = Vec::new();
    let mut candidate = BitVec::new();
    for (position, bit) in bits.iter().by_vals().enumerate() {
        candidate.push(bit);
        if let Some(&symbol) = inverse.get(&candidate) {
            output.push(symbol);
            candidate.clear();
        } else if candidate.len() >= longest {
            return Err(Error::malformed(format!(
                "no code word matches {} ending at bit {position}",
                bit_string(&candidate)
            )));
        }
    }

    if !candidate.is_empty() {
        return Err(Error::malformed(format!(
            "bit string ends inside a code word ({} pending bits)",
            candidate.len()
        )));
    }
    Ok(output)
}

/// Shannon-Fano as a [`Codec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShannonFano;

impl Codec for ShannonFano {
    type Encoded = PrefixEncoded;

    fn name(&self) -> &'static str {
        "Shannon-Fano"
    }

    fn encode(&self, data: &[u8]) -> Result<PrefixEncoded> {
        let (bits, code) = encode(data);
        Ok(PrefixEncoded { bits, code })
    }

    fn decode(&self, encoded: &PrefixEncoded) -> Result<Vec<u8>> {
        decode(&encoded.bits, &encoded.code)
    }

    fn encoded_bits(&self, encoded: &PrefixEncoded) -> usize {
        encoded.bits.len()
    }

    fn average_code_length(
        &self,
        encoded: &PrefixEncoded,
        table: &FrequencyTable,
    ) -> Option<f64> {
        Some(encoded.code.average_length(table))
    }
}
