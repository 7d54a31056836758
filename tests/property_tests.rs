use infocodec::cs::compression::huffman::{huffman_decode, huffman_encode, HuffmanTree};
use infocodec::cs::compression::{
    entropy, lz77, lzw, shannon_fano, Codec, Error, FrequencyTable, Huffman, Lz77, Lzw,
    ShannonFano,
};
use proptest::prelude::*;

/// Buffers over a small alphabet so repeats (and dictionary hits) are common.
fn repetitive_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"ABCD".to_vec()), 0..200)
}

proptest! {
    #[test]
    fn test_shannon_fano_roundtrip(data in prop::collection::vec(any::<u8>(), 0..300)) {
        let (bits, code) = shannon_fano::encode(&data);
        prop_assert_eq!(shannon_fano::decode(&bits, &code).unwrap(), data);
    }

    #[test]
    fn test_huffman_roundtrip(data in prop::collection::vec(any::<u8>(), 0..300)) {
        let (bits, tree) = huffman_encode(&data);
        prop_assert_eq!(huffman_decode(&bits, &tree).unwrap(), data);
    }

    #[test]
    fn test_lz77_roundtrip(data in repetitive_bytes(), window in 0..40usize) {
        let tokens = lz77::compress(&data, window);
        prop_assert_eq!(lz77::decompress(&tokens).unwrap(), data);
    }

    #[test]
    fn test_lzw_roundtrip(data in prop::collection::vec(any::<u8>(), 0..300)) {
        let codes = lzw::compress(&data).unwrap();
        prop_assert_eq!(lzw::decompress(&codes).unwrap(), data);
    }

    #[test]
    fn test_lzw_roundtrip_repetitive(data in repetitive_bytes()) {
        let codes = lzw::compress(&data).unwrap();
        prop_assert_eq!(lzw::decompress(&codes).unwrap(), data);
    }

    #[test]
    fn test_constant_buffers_roundtrip(byte in any::<u8>(), len in 1..100usize) {
        let data = vec![byte; len];
        prop_assert_eq!(ShannonFano.decode(&ShannonFano.encode(&data).unwrap()).unwrap(), data.clone());
        prop_assert_eq!(Huffman.decode(&Huffman.encode(&data).unwrap()).unwrap(), data.clone());
        let lz77 = Lz77::default();
        prop_assert_eq!(lz77.decode(&lz77.encode(&data).unwrap()).unwrap(), data.clone());
        prop_assert_eq!(Lzw.decode(&Lzw.encode(&data).unwrap()).unwrap(), data);
    }

    #[test]
    fn test_codes_are_prefix_free(data in prop::collection::vec(any::<u8>(), 1..300)) {
        let table = FrequencyTable::new(&data);
        let shannon_fano = shannon_fano::build_code(&table);
        let huffman = HuffmanTree::from_frequencies(&table).code();
        prop_assert!(shannon_fano.is_prefix_free());
        prop_assert!(huffman.is_prefix_free());
        prop_assert!(shannon_fano.kraft_sum() <= 1.0 + 1e-9);
        prop_assert!(huffman.kraft_sum() <= 1.0 + 1e-9);
        prop_assert_eq!(huffman.len(), table.distinct());
        prop_assert_eq!(shannon_fano.len(), table.distinct());
    }

    #[test]
    fn test_huffman_never_worse_than_shannon_fano(data in prop::collection::vec(any::<u8>(), 1..300)) {
        let (huffman_bits, _) = huffman_encode(&data);
        let (shannon_fano_bits, _) = shannon_fano::encode(&data);
        prop_assert!(huffman_bits.len() <= shannon_fano_bits.len());
    }

    #[test]
    fn test_entropy_bounds(data in prop::collection::vec(any::<u8>(), 1..300)) {
        let h = entropy(&data).unwrap();
        prop_assert!(h >= 0.0);
        prop_assert!(h <= 8.0 + 1e-9);
        let distinct = FrequencyTable::new(&data).distinct();
        prop_assert_eq!(h == 0.0, distinct == 1);
    }

    #[test]
    fn test_lz77_is_deterministic(data in repetitive_bytes(), window in 1..40usize) {
        prop_assert_eq!(lz77::compress(&data, window), lz77::compress(&data, window));
    }

    #[test]
    fn test_lz77_tokens_reference_decoded_bytes(data in repetitive_bytes()) {
        let mut produced = 0;
        for token in lz77::compress(&data, 20) {
            prop_assert!(token.distance <= 20);
            prop_assert!(token.distance <= produced);
            produced += token.expanded_len();
        }
        prop_assert_eq!(produced, data.len());
    }

    #[test]
    fn test_lzw_dictionary_growth(data in repetitive_bytes()) {
        let (codes, dictionary) = lzw::compress_with_dictionary(&data).unwrap();
        prop_assert!(dictionary.len() <= 256 + data.len());
        if !data.is_empty() {
            prop_assert_eq!(dictionary.len(), 256 + codes.len() - 1);
        }
        // Every code refers to a phrase that existed when it was emitted.
        for (i, &code) in codes.iter().enumerate() {
            prop_assert!((code as usize) < 256 + i);
        }
    }
}

#[test]
fn test_scenario_huffman_frequencies() {
    let data = b"AAAABBBCCD";
    let (bits, tree) = huffman_encode(data);
    let code = tree.code();
    let a = code.get(b'A').unwrap().len();
    let d = code.get(b'D').unwrap().len();
    assert!(code.iter().all(|(_, word)| word.len() >= a));
    assert_eq!(d, code.max_len());
    assert_eq!(huffman_decode(&bits, &tree).unwrap(), data);
}

#[test]
fn test_scenario_lz77_alternating() {
    let data = b"ABABABAB";
    let tokens = lz77::compress(data, 20);
    assert!(tokens.len() < data.len());
    assert!(tokens.iter().any(|t| t.distance == 2 && t.length > 0));
    assert_eq!(lz77::decompress(&tokens).unwrap(), data);
}

#[test]
fn test_scenario_lzw_textbook() {
    let data = b"TOBEORNOTTOBEORTOBEORNOT";
    let codes = lzw::compress(data).unwrap();
    assert!(codes.len() < data.len());
    assert_eq!(lzw::decompress(&codes).unwrap(), data);
}

#[test]
fn test_scenario_single_byte() {
    let data = [0x41];
    let (bits, code) = shannon_fano::encode(&data);
    assert_eq!(code.get(0x41).unwrap().len(), 1);
    assert!(!code.get(0x41).unwrap()[0]);
    assert_eq!(shannon_fano::decode(&bits, &code).unwrap(), data);

    let (bits, tree) = huffman_encode(&data);
    let code = tree.code();
    assert_eq!(code.get(0x41).unwrap().len(), 1);
    assert!(!code.get(0x41).unwrap()[0]);
    assert_eq!(huffman_decode(&bits, &tree).unwrap(), data);
}

#[test]
fn test_errors_surface_to_caller() {
    assert!(matches!(entropy(b""), Err(Error::InvalidInput(_))));
    assert!(matches!(lzw::decompress(&[300]), Err(Error::InvalidInput(_))));
    assert!(matches!(
        lz77::decompress(&[lz77::Token {
            distance: 1,
            length: 1,
            literal: 0
        }]),
        Err(Error::MalformedInput(_))
    ));
}
