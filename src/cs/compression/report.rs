//! Side-by-side comparison of all coders on one buffer.
//!
//! The report is the structured form of what a driver would print: the
//! buffer's entropy next to each coder's payload size and whether the coder
//! reproduced the buffer exactly.

use log::{debug, warn};

use crate::cs::compression::entropy::{entropy_of, max_entropy};
use crate::cs::compression::frequency::FrequencyTable;
use crate::cs::compression::huffman::Huffman;
use crate::cs::compression::lz77::{Lz77, Lz77Config};
use crate::cs::compression::lzw::Lzw;
use crate::cs::compression::shannon_fano::ShannonFano;
use crate::cs::compression::{Codec, Result};

/// Parameters for [`analyze`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub lz77: Lz77Config,
}

/// Outcome of one coder on the analysed buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct CodecReport {
    pub name: &'static str,
    /// Payload size as reported by [`Codec::encoded_bits`].
    pub encoded_bits: usize,
    /// `encoded_bits` divided by the input length.
    pub bits_per_symbol: f64,
    /// Whether decoding the encoded form gave back the input exactly.
    pub round_trip_ok: bool,
    /// Expected code word length; `None` for the dictionary coders.
    pub average_code_length: Option<f64>,
}

impl CodecReport {
    /// Average code length above the entropy, for the prefix coders.
    pub fn redundancy(&self, entropy: f64) -> Option<f64> {
        self.average_code_length.map(|length| length - entropy)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub input_len: usize,
    pub distinct_symbols: usize,
    /// Zero-order entropy in bits per symbol.
    pub entropy: f64,
    /// `log2(distinct_symbols)`.
    pub max_entropy: f64,
    /// Shannon-Fano, Huffman, LZ77, LZW in that order.
    pub codecs: Vec<CodecReport>,
}

impl Report {
    pub fn codec(&self, name: &str) -> Option<&CodecReport> {
        self.codecs.iter().find(|report| report.name == name)
    }

    pub fn all_round_trips_ok(&self) -> bool {
        self.codecs.iter().all(|report| report.round_trip_ok)
    }
}

fn check<C: Codec>(codec: &C, data: &[u8], table: &FrequencyTable) -> Result<CodecReport> {
    let encoded = codec.encode(data)?;
    let encoded_bits = codec.encoded_bits(&encoded);
    let round_trip_ok = matches!(codec.decode(&encoded), Ok(decoded) if decoded == data);
    if !round_trip_ok {
        warn!("{} failed to reproduce a {} byte buffer", codec.name(), data.len());
    }
    Ok(CodecReport {
        name: codec.name(),
        encoded_bits,
        bits_per_symbol: encoded_bits as f64 / data.len() as f64,
        round_trip_ok,
        average_code_length: codec.average_code_length(&encoded, table),
    })
}

#[cfg(feature = "parallel")]
fn run_all(data: &[u8], table: &FrequencyTable, lz77: &Lz77) -> [Result<CodecReport>; 4] {
    let ((shannon_fano, huffman), (sliding_window, lzw)) = rayon::join(
        || {
            rayon::join(
                || check(&ShannonFano, data, table),
                || check(&Huffman, data, table),
            )
        },
        || rayon::join(|| check(lz77, data, table), || check(&Lzw, data, table)),
    );
    [shannon_fano, huffman, sliding_window, lzw]
}

#[cfg(not(feature = "parallel"))]
fn run_all(data: &[u8], table: &FrequencyTable, lz77: &Lz77) -> [Result<CodecReport>; 4] {
    [
        check(&ShannonFano, data, table),
        check(&Huffman, data, table),
        check(lz77, data, table),
        check(&Lzw, data, table),
    ]
}

/// Measure `data`'s entropy and run every coder over it.
///
/// # Errors
///
/// `Error::InvalidInput` for an empty buffer, plus any error a coder reports
/// while encoding.
///
/// # Example
///
/// ```
/// use infocodec::cs::compression::report::{analyze, AnalysisConfig};
///
/// let report = analyze(b"AAAABBBCCD", &AnalysisConfig::default()).unwrap();
/// assert!(report.all_round_trips_ok());
/// assert!(report.codec("Huffman").unwrap().bits_per_symbol >= report.entropy);
/// ```
pub fn analyze(data: &[u8], config: &AnalysisConfig) -> Result<Report> {
    let table = FrequencyTable::new(data);
    let entropy = entropy_of(&table)?;
    let lz77 = Lz77::new(config.lz77);

    let codecs = run_all(data, &table, &lz77)
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    for report in &codecs {
        debug!(
            "{}: {} bits ({:.3} bits/symbol, entropy {:.3})",
            report.name, report.encoded_bits, report.bits_per_symbol, entropy
        );
    }

    Ok(Report {
        input_len: data.len(),
        distinct_symbols: table.distinct(),
        entropy,
        max_entropy: max_entropy(table.distinct()),
        codecs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_empty_input_is_invalid() {
        assert!(matches!(
            analyze(b"", &AnalysisConfig::default()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_reports_every_codec() {
        let report = analyze(b"TOBEORNOTTOBEORTOBEORNOT", &AnalysisConfig::default()).unwrap();
        let names: Vec<&str> = report.codecs.iter().map(|c| c.name).collect();
        assert_eq!(names, ["Shannon-Fano", "Huffman", "LZ77", "LZW"]);
        assert!(report.all_round_trips_ok());
        assert_eq!(report.input_len, 24);
        assert_eq!(report.distinct_symbols, 6);
        assert!(report.entropy <= report.max_entropy);
    }

    #[test]
    fn test_prefix_coders_respect_entropy_bound() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let report = analyze(data, &AnalysisConfig::default()).unwrap();
        for name in ["Shannon-Fano", "Huffman"] {
            let codec = report.codec(name).unwrap();
            assert!(codec.bits_per_symbol + 1e-9 >= report.entropy, "{name}");
        }
        let huffman = report.codec("Huffman").unwrap();
        assert!(huffman.bits_per_symbol < report.entropy + 1.0);
        let shannon_fano = report.codec("Shannon-Fano").unwrap();
        assert!(huffman.encoded_bits <= shannon_fano.encoded_bits);
    }

    #[test]
    fn test_average_code_length_for_prefix_coders() {
        let report = analyze(b"AAAABBBCCD", &AnalysisConfig::default()).unwrap();
        // A=0 B=10 D=110 C=111: (4 + 6 + 3 + 6) / 10.
        let huffman = report.codec("Huffman").unwrap();
        assert_eq!(huffman.average_code_length, Some(1.9));
        assert_eq!(huffman.bits_per_symbol, 1.9);
        assert!(huffman.redundancy(report.entropy).unwrap() >= 0.0);
        // Two bits for each of the four symbols.
        let shannon_fano = report.codec("Shannon-Fano").unwrap();
        assert_eq!(shannon_fano.average_code_length, Some(2.0));
        assert_eq!(report.codec("LZ77").unwrap().average_code_length, None);
        assert_eq!(report.codec("LZW").unwrap().redundancy(report.entropy), None);
    }

    #[test]
    fn test_lz77_window_is_used() {
        let data = b"abcdefghij_abcdefghij";
        let narrow = AnalysisConfig {
            lz77: Lz77Config { window: 4 },
        };
        let wide = analyze(data, &AnalysisConfig::default()).unwrap();
        let narrow = analyze(data, &narrow).unwrap();
        assert!(wide.codec("LZ77").unwrap().round_trip_ok);
        assert!(narrow.codec("LZ77").unwrap().round_trip_ok);
        assert_ne!(
            wide.codec("LZ77").unwrap().encoded_bits,
            narrow.codec("LZ77").unwrap().encoded_bits
        );
    }
}
