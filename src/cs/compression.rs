//! Compression algorithms implementation.
//!
//! This module provides an entropy estimator and four classic lossless coders:
//! - Entropy-optimal prefix coding (Shannon-Fano, Huffman)
//! - Dictionary-substitution coding (LZ77, LZW)
//!
//! Every coder works on a materialized byte buffer and pairs its encoder with an
//! exact inverse, so `decode(encode(data)) == data` for any input.
//!
//! # Examples
//!
//! ```rust
//! use infocodec::cs::compression::{Codec, Huffman, Lz77, Lzw, ShannonFano};
//!
//! let data = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let encoded = Huffman.encode(data).unwrap();
//! assert_eq!(Huffman.decode(&encoded).unwrap(), data);
//!
//! let encoded = ShannonFano.encode(data).unwrap();
//! assert_eq!(ShannonFano.decode(&encoded).unwrap(), data);
//!
//! let encoded = Lz77::default().encode(data).unwrap();
//! assert_eq!(Lz77::default().decode(&encoded).unwrap(), data);
//!
//! let codes = Lzw.encode(data).unwrap();
//! assert!(codes.len() < data.len());
//! assert_eq!(Lzw.decode(&codes).unwrap(), data);
//! ```

pub use crate::error::{Error, Result};

/// An encode/decode pair over byte buffers.
///
/// `Encoded` carries everything the decoder needs: the bit string together
/// with its code table or tree for the prefix coders, the bare token or code
/// sequence for the dictionary coders.
pub trait Codec {
    /// Encoded representation plus side information.
    type Encoded;

    /// Short human-readable name of the scheme.
    fn name(&self) -> &'static str;

    /// Encode `data`.
    fn encode(&self, data: &[u8]) -> Result<Self::Encoded>;

    /// Reconstruct the buffer `encoded` was produced from.
    fn decode(&self, encoded: &Self::Encoded) -> Result<Vec<u8>>;

    /// Size of the payload in bits, excluding side information.
    fn encoded_bits(&self, encoded: &Self::Encoded) -> usize;

    /// Expected code word length in bits per symbol under `table`, for
    /// coders that assign one code word per byte value.
    fn average_code_length(
        &self,
        _encoded: &Self::Encoded,
        _table: &FrequencyTable,
    ) -> Option<f64> {
        None
    }
}

/// Bits needed to store `value` in a fixed-width field.
pub(crate) fn bit_width(value: usize) -> usize {
    (usize::BITS - value.leading_zeros()) as usize
}

pub mod entropy;
pub mod frequency;
pub mod huffman;
pub mod lz77;
pub mod lzw;
pub mod prefix;
pub mod report;
pub mod shannon_fano;

pub use entropy::{entropy, entropy_of, max_entropy};
pub use frequency::FrequencyTable;
pub use huffman::{Huffman, HuffmanEncoded, HuffmanNode, HuffmanTree};
pub use lz77::{Lz77, Lz77Config, Token};
pub use lzw::{Lzw, LzwDictionary};
pub use prefix::PrefixCode;
pub use report::{analyze, AnalysisConfig, CodecReport, Report};
pub use shannon_fano::{PrefixEncoded, ShannonFano};
