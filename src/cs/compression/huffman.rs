use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bitvec::prelude::*;
use log::{debug, trace};

use crate::cs::compression::frequency::FrequencyTable;
use crate::cs::compression::prefix::PrefixCode;
use crate::cs::compression::{Codec, Result};
use crate::error::Error;

/// Represents a node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A leaf node contains a byte value and its frequency.
    Leaf { symbol: u8, freq: usize },
    /// An internal node with left and right children and combined frequency.
    Internal {
        freq: usize,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Returns the frequency of the node.
    pub fn freq(&self) -> usize {
        match self {
            HuffmanNode::Leaf { freq, .. } => *freq,
            HuffmanNode::Internal { freq, .. } => *freq,
        }
    }
}

/// A heap entry for HuffmanNode.
///
/// The lowest frequency has the highest priority; among equal frequencies the
/// node inserted first wins. Leaves are inserted in first-occurrence order and
/// each merged node takes the next sequence number, so the same input always
/// yields the same tree shape.
#[derive(Debug)]
struct QueueEntry {
    freq: usize,
    seq: usize,
    node: Box<HuffmanNode>,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: lower frequency, then earlier insertion, should come first.
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Huffman tree built for one buffer. Empty when the buffer was empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HuffmanTree {
    root: Option<HuffmanNode>,
}

impl HuffmanTree {
    /// Build the tree by repeatedly merging the two lowest-frequency nodes.
    ///
    /// The first node popped becomes the left child.
    pub fn from_frequencies(table: &FrequencyTable) -> Self {
        let mut heap = BinaryHeap::new();
        let mut seq = 0;
        // Create a leaf node for each symbol and push it into the heap.
        for (symbol, freq) in table.iter() {
            heap.push(QueueEntry {
                freq,
                seq,
                node: Box::new(HuffmanNode::Leaf { symbol, freq }),
            });
            seq += 1;
        }

        // Combine nodes until only one tree remains.
        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            let freq = left.freq + right.freq;
            trace!(
                "merge {} (#{}) + {} (#{}) -> {} (#{})",
                left.freq,
                left.seq,
                right.freq,
                right.seq,
                freq,
                seq
            );
            heap.push(QueueEntry {
                freq,
                seq,
                node: Box::new(HuffmanNode::Internal {
                    freq,
                    left: left.node,
                    right: right.node,
                }),
            });
            seq += 1;
        }

        HuffmanTree {
            root: heap.pop().map(|entry| *entry.node),
        }
    }

    /// Count `data` and build its tree.
    pub fn from_data(data: &[u8]) -> Self {
        Self::from_frequencies(&FrequencyTable::new(data))
    }

    pub fn root(&self) -> Option<&HuffmanNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Derive the code table: `0` for a left edge, `1` for a right edge.
    ///
    /// If the tree consists of a single leaf (i.e. one unique symbol), the
    /// code "0" is assigned.
    pub fn code(&self) -> PrefixCode {
        let mut code = PrefixCode::new();
        if let Some(root) = &self.root {
            build_code_table_helper(root, BitVec::new(), &mut code);
        }
        code
    }

    /// Decode `bits` by walking from the root, emitting at each leaf.
    ///
    /// # Errors
    ///
    /// `Error::MalformedInput` if the bits end part way down the tree, if a
    /// single-leaf tree sees a `1`, or if the tree is empty but bits remain.
    pub fn decode(&self, bits: &BitSlice) -> Result<Vec<u8>> {
        let Some(root) = &self.root else {
            if bits.is_empty() {
                return Ok(Vec::new());
            }
            return Err(Error::malformed(format!(
                "{} bits left for an empty Huffman tree",
                bits.len()
            )));
        };

        // Special case: if tree is a leaf, each '0' represents one occurrence.
        if let HuffmanNode::Leaf { symbol, .. } = root {
            if let Some(position) = bits.first_one() {
                return Err(Error::malformed(format!(
                    "unexpected 1 at bit {position} for a single-symbol code"
                )));
            }
            return Ok(vec![*symbol; bits.len()]);
        }

        let mut output = Vec::new();
        let mut current = root;
        for bit in bits.iter().by_vals() {
            if let HuffmanNode::Internal { left, right, .. } = current {
                current = if bit { &**right } else { &**left };
            }
            if let HuffmanNode::Leaf { symbol, .. } = current {
                output.push(*symbol);
                current = root;
            }
        }

        if !std::ptr::eq(current, root) {
            return Err(Error::malformed(
                "bit string ends part way down the Huffman tree",
            ));
        }
        Ok(output)
    }
}

fn build_code_table_helper(node: &HuffmanNode, prefix: BitVec, code: &mut PrefixCode) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            let word = if prefix.is_empty() {
                bitvec![0]
            } else {
                prefix
            };
            code.insert(*symbol, word);
        }
        HuffmanNode::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push(false);
            build_code_table_helper(left, left_prefix, code);
            let mut right_prefix = prefix;
            right_prefix.push(true);
            build_code_table_helper(right, right_prefix, code);
        }
    }
}

/// Convenience function: builds the Huffman tree from input, encodes the input,
/// and returns (encoded bit string, Huffman tree).
///
/// # Example
///
/// ```
/// use infocodec::cs::compression::huffman::{huffman_decode, huffman_encode};
///
/// let (bits, tree) = huffman_encode(b"AAAABBBCCD");
/// assert_eq!(bits.len(), 19);
/// assert_eq!(huffman_decode(&bits, &tree).unwrap(), b"AAAABBBCCD");
/// ```
pub fn huffman_encode(data: &[u8]) -> (BitVec, HuffmanTree) {
    let tree = HuffmanTree::from_data(data);
    let code = tree.code();
    let mut bits = BitVec::new();
    for &byte in data {
        // The tree was built from `data`, so every byte has a word.
        if let Some(word) = code.get(byte) {
            bits.extend_from_bitslice(word);
        }
    }
    debug!(
        "Huffman: {} bytes, {} symbols, {} bits",
        data.len(),
        code.len(),
        bits.len()
    );
    (bits, tree)
}

/// Convenience function: decodes an encoded bit string using the provided Huffman tree.
pub fn huffman_decode(bits: &BitSlice, tree: &HuffmanTree) -> Result<Vec<u8>> {
    tree.decode(bits)
}

/// Bit string produced by the Huffman coder together with its tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanEncoded {
    pub bits: BitVec,
    pub tree: HuffmanTree,
}

/// Huffman coding as a [`Codec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Huffman;

impl Codec for Huffman {
    type Encoded = HuffmanEncoded;

    fn name(&self) -> &'static str {
        "Huffman"
    }

    fn encode(&self, data: &[u8]) -> Result<HuffmanEncoded> {
        let (bits, tree) = huffman_encode(data);
        Ok(HuffmanEncoded { bits, tree })
    }

    fn decode(&self, encoded: &HuffmanEncoded) -> Result<Vec<u8>> {
        encoded.tree.decode(&encoded.bits)
    }

    fn encoded_bits(&self, encoded: &HuffmanEncoded) -> usize {
        encoded.bits.len()
    }

    fn average_code_length(
        &self,
        encoded: &HuffmanEncoded,
        table: &FrequencyTable,
    ) -> Option<f64> {
        Some(encoded.tree.code().average_length(table))
    }
}
