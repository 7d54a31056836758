//! Prefix codes shared by the Shannon-Fano and Huffman coders.

use std::collections::BTreeMap;
use std::fmt;

use bitvec::prelude::*;

use crate::cs::compression::frequency::FrequencyTable;
use crate::error::{Error, Result};

/// Mapping from byte value to code word.
///
/// Codes built by this crate are prefix-free: no word is a proper prefix of
/// another, so a bit string can be split greedily while reading it left to
/// right. A buffer with a single distinct byte gets the one-bit word `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixCode {
    words: BTreeMap<u8, BitVec>,
}

impl PrefixCode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `word` to `symbol`, replacing any previous word.
    pub fn insert(&mut self, symbol: u8, word: BitVec) {
        self.words.insert(symbol, word);
    }

    pub fn get(&self, symbol: u8) -> Option<&BitSlice> {
        self.words.get(&symbol).map(|word| word.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `(symbol, word)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice)> + '_ {
        self.words
            .iter()
            .map(|(&symbol, word)| (symbol, word.as_bitslice()))
    }

    /// Length of the longest code word, zero for an empty code.
    pub fn max_len(&self) -> usize {
        self.words.values().map(|word| word.len()).max().unwrap_or(0)
    }

    /// Concatenate the code words of `data` in order.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` if `data` contains a byte with no code word.
    pub fn encode(&self, data: &[u8]) -> Result<BitVec> {
        let mut bits = BitVec::new();
        for (position, &byte) in data.iter().enumerate() {
            let word = self.words.get(&byte).ok_or_else(|| {
                Error::invalid_input(format!(
                    "byte 0x{byte:02x} at position {position} has no code word"
                ))
            })?;
            bits.extend_from_bitslice(word);
        }
        Ok(bits)
    }

    /// True if no word is a prefix of another (including duplicates and the
    /// empty word).
    pub fn is_prefix_free(&self) -> bool {
        let words: Vec<&BitVec> = self.words.values().collect();
        for (i, a) in words.iter().enumerate() {
            if a.is_empty() {
                return false;
            }
            for b in &words[i + 1..] {
                if a.starts_with(b.as_bitslice()) || b.starts_with(a.as_bitslice()) {
                    return false;
                }
            }
        }
        true
    }

    /// Kraft sum `Σ 2^-len`; at most 1 for any prefix-free code.
    pub fn kraft_sum(&self) -> f64 {
        self.words
            .values()
            .map(|word| 2f64.powi(-(word.len() as i32)))
            .sum()
    }

    /// Expected code length in bits per symbol under `table`'s distribution.
    ///
    /// Symbols of `table` without a code word are ignored.
    pub fn average_length(&self, table: &FrequencyTable) -> f64 {
        if table.is_empty() {
            return 0.0;
        }
        table
            .iter()
            .filter_map(|(symbol, count)| self.words.get(&symbol).map(|w| (w.len(), count)))
            .map(|(len, count)| len as f64 * count as f64)
            .sum::<f64>()
            / table.total() as f64
    }
}

impl FromIterator<(u8, BitVec)> for PrefixCode {
    fn from_iter<I: IntoIterator<Item = (u8, BitVec)>>(iter: I) -> Self {
        PrefixCode {
            words: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for PrefixCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (symbol, word)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{symbol:02x}:{}", bit_string(word))?;
        }
        Ok(())
    }
}

/// Render bits as a string of `0`/`1` characters.
pub fn bit_string(bits: &BitSlice) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

#[cfg(test)]
pub(crate) fn parse_bits(text: &str) -> BitVec {
    text.chars().map(|c| c == '1').collect()
}
