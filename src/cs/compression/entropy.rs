//! Zero-order Shannon entropy of a byte buffer.
//!
//! The estimate treats every byte as an independent draw from the buffer's own
//! empirical distribution, so it is a lower bound on the average code length of
//! any per-symbol prefix code (Shannon-Fano, Huffman) for that buffer. It says
//! nothing about the dictionary coders, which exploit repetition across symbols.

use crate::cs::compression::frequency::FrequencyTable;
use crate::error::{Error, Result};

/// Entropy in bits per symbol: `-Σ p·log2(p)` with `p = count / n`.
///
/// # Errors
///
/// `Error::InvalidInput` for an empty buffer, where the probabilities are
/// undefined.
///
/// # Example
///
/// ```
/// use infocodec::cs::compression::entropy::entropy;
///
/// assert_eq!(entropy(b"aaaa").unwrap(), 0.0);
/// assert_eq!(entropy(b"ab").unwrap(), 1.0);
/// ```
pub fn entropy(data: &[u8]) -> Result<f64> {
    entropy_of(&FrequencyTable::new(data))
}

/// Entropy of an already counted buffer.
pub fn entropy_of(table: &FrequencyTable) -> Result<f64> {
    if table.is_empty() {
        return Err(Error::invalid_input(
            "entropy is undefined for an empty buffer",
        ));
    }

    let n = table.total() as f64;
    let h = table
        .iter()
        .map(|(_, count)| {
            let p = count as f64 / n;
            -p * p.log2()
        })
        .sum::<f64>();

    // A single symbol sums to -0.0.
    Ok(h.max(0.0))
}

/// Upper bound of [`entropy`] for a buffer with `distinct` byte values.
pub fn max_entropy(distinct: usize) -> f64 {
    if distinct <= 1 {
        0.0
    } else {
        (distinct as f64).log2()
    }
}
