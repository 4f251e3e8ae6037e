use serde::Serialize;

use crate::engine::bitstream::Bitstream;
use crate::engine::codes::CodeTable;
use crate::engine::error::CodecError;
use crate::engine::tree::{CodeTree, Node};

/// Concatenate the code of each input symbol, in input order.
pub fn encode(input: &[u8], table: &CodeTable) -> Result<Bitstream, CodecError> {
    let mut stream = Bitstream::new();
    for &symbol in input {
        let code = table
            .code(symbol)
            .ok_or(CodecError::UnknownSymbol(symbol))?;
        stream.extend(code);
    }
    Ok(stream)
}

/// Walk the tree bit by bit, emitting a symbol at each leaf and resetting to
/// the root. A lone-leaf root emits its symbol once per consumed bit, the
/// mirror of the one-bit code the encoder assigns it.
pub fn decode(bits: &Bitstream, tree: &CodeTree) -> Result<Vec<u8>, CodecError> {
    if let Node::Leaf { symbol, .. } = tree.root() {
        return Ok(vec![*symbol; bits.bit_len()]);
    }

    let mut output = Vec::new();
    let mut node = tree.root();

    for bit in bits.iter() {
        node = match node {
            Node::Internal { left, right, .. } => {
                if bit {
                    right.as_ref()
                } else {
                    left.as_ref()
                }
            }
            // Unreachable: leaves reset to the root below
            Node::Leaf { .. } => node,
        };

        if let Node::Leaf { symbol, .. } = node {
            output.push(*symbol);
            node = tree.root();
        }
    }

    if !std::ptr::eq(node, tree.root()) {
        return Err(CodecError::TruncatedStream);
    }
    Ok(output)
}

/// Achieved size against a fixed-width baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeStats {
    pub original_bits: u64,
    pub compressed_bits: u64,
}

impl SizeStats {
    pub fn ratio(&self) -> f64 {
        if self.original_bits == 0 {
            return 0.0;
        }
        self.compressed_bits as f64 / self.original_bits as f64
    }
}

/// Purely derived metrics; no failure modes. The symbol count can come from
/// an untrusted archive header, so the baseline saturates instead of
/// overflowing.
pub fn size_stats(symbol_count: u64, bits: &Bitstream, symbol_bit_width: u32) -> SizeStats {
    SizeStats {
        original_bits: symbol_count.saturating_mul(symbol_bit_width as u64),
        compressed_bits: bits.bit_len() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::frequency::FrequencyTable;

    fn build(input: &[u8]) -> (CodeTree, CodeTable) {
        let freqs = FrequencyTable::scan(input);
        let tree = CodeTree::build(&freqs).unwrap();
        let table = CodeTable::from_tree(&tree).unwrap();
        (tree, table)
    }

    #[test]
    fn round_trip() {
        let input = b"the quick brown fox jumps over the lazy dog";
        let (tree, table) = build(input);
        let stream = encode(input, &table).unwrap();
        assert_eq!(decode(&stream, &tree).unwrap(), input);
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let (_, table) = build(b"aabb");
        let err = encode(b"abc", &table).unwrap_err();
        assert_eq!(err, CodecError::UnknownSymbol(b'c'));
    }

    #[test]
    fn truncated_stream_is_rejected() {
        // Four equal frequencies force every code to two bits.
        let (tree, table) = build(b"abcd");
        let stream = encode(b"abcd", &table).unwrap();
        assert_eq!(stream.bit_len(), 8);

        // Chop the last bit off; the final traversal cannot reach a leaf.
        let mut clipped = Bitstream::new();
        for bit in stream.iter().take(stream.bit_len() - 1) {
            clipped.push(bit);
        }
        assert_eq!(decode(&clipped, &tree).unwrap_err(), CodecError::TruncatedStream);
    }

    #[test]
    fn empty_stream_decodes_to_nothing() {
        let (tree, _) = build(b"abab");
        assert_eq!(decode(&Bitstream::new(), &tree).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn single_symbol_alphabet_uses_one_bit_per_symbol() {
        let (tree, table) = build(b"aaaaa");
        let stream = encode(b"aaaaa", &table).unwrap();
        assert_eq!(stream.bit_len(), 5);
        assert_eq!(decode(&stream, &tree).unwrap(), b"aaaaa");
    }

    #[test]
    fn stats_against_eight_bit_baseline() {
        let (_, table) = build(b"aaaa");
        let stream = encode(b"aaaa", &table).unwrap();
        let stats = size_stats(4, &stream, 8);
        assert_eq!(stats.original_bits, 32);
        assert_eq!(stats.compressed_bits, 4);
        assert!((stats.ratio() - 0.125).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_saturate_on_huge_symbol_counts() {
        let stats = size_stats(u64::MAX, &Bitstream::new(), 8);
        assert_eq!(stats.original_bits, u64::MAX);
        assert_eq!(stats.compressed_bits, 0);
    }

    #[test]
    fn compressed_size_matches_code_lengths() {
        let input = b"aabbbcccc";
        let (_, table) = build(input);
        let stream = encode(input, &table).unwrap();
        let expected: usize = input.iter().map(|&s| table.code(s).unwrap().len()).sum();
        assert_eq!(stream.bit_len(), expected);
    }
}
