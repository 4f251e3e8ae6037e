use std::collections::HashMap;

use crate::engine::error::CodecError;
use crate::engine::tree::{CodeTree, Node};

/// Symbol-to-bit-sequence mapping derived from a merge tree.
///
/// Codes are prefix-free by construction: symbols live only at leaves, so no
/// root-to-leaf path is a prefix of another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: HashMap<u8, Vec<bool>>,
}

impl CodeTable {
    /// Derive codes by recursive traversal, appending `0` when descending
    /// left and `1` when descending right. A lone-leaf root gets the one-bit
    /// code `0`, since a tree without branches cannot distinguish positions.
    pub fn derive(root: Option<&Node>) -> Result<Self, CodecError> {
        let root = root.ok_or(CodecError::DegenerateTree)?;

        let mut codes = HashMap::new();
        collect(root, Vec::new(), &mut codes);
        Ok(Self { codes })
    }

    pub fn from_tree(tree: &CodeTree) -> Result<Self, CodecError> {
        Self::derive(Some(tree.root()))
    }

    pub fn code(&self, symbol: u8) -> Option<&[bool]> {
        self.codes.get(&symbol).map(|c| c.as_slice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn entries(&self) -> Vec<(u8, &[bool])> {
        let mut out: Vec<(u8, &[bool])> = self
            .codes
            .iter()
            .map(|(&s, c)| (s, c.as_slice()))
            .collect();
        out.sort_by_key(|(s, _)| *s);
        out
    }
}

fn collect(node: &Node, prefix: Vec<bool>, codes: &mut HashMap<u8, Vec<bool>>) {
    match node {
        Node::Leaf { symbol, .. } => {
            let code = if prefix.is_empty() {
                vec![false]
            } else {
                prefix
            };
            codes.insert(*symbol, code);
        }
        Node::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push(false);
            collect(left, left_prefix, codes);

            let mut right_prefix = prefix;
            right_prefix.push(true);
            collect(right, right_prefix, codes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::frequency::FrequencyTable;

    fn textbook_table() -> CodeTable {
        let freqs: FrequencyTable = [
            (b'a', 5u64),
            (b'b', 9),
            (b'c', 12),
            (b'd', 13),
            (b'e', 16),
            (b'f', 45),
        ]
        .into_iter()
        .collect();
        let tree = CodeTree::build(&freqs).unwrap();
        CodeTable::from_tree(&tree).unwrap()
    }

    #[test]
    fn absent_root_is_degenerate() {
        assert_eq!(
            CodeTable::derive(None).unwrap_err(),
            CodecError::DegenerateTree
        );
    }

    #[test]
    fn lone_leaf_gets_one_bit_code() {
        let freqs: FrequencyTable = [(b'a', 5u64)].into_iter().collect();
        let tree = CodeTree::build(&freqs).unwrap();
        let table = CodeTable::from_tree(&tree).unwrap();
        assert_eq!(table.code(b'a'), Some([false].as_slice()));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn textbook_code_lengths() {
        let table = textbook_table();
        assert_eq!(table.code(b'f').unwrap().len(), 1);
        for sym in [b'c', b'd', b'e'] {
            assert_eq!(table.code(sym).unwrap().len(), 3, "symbol {}", sym as char);
        }
        // The two rarest symbols sit deepest in the tree.
        assert_eq!(table.code(b'a').unwrap().len(), 4);
        assert_eq!(table.code(b'b').unwrap().len(), 4);
    }

    #[test]
    fn textbook_weighted_average_is_optimal() {
        let table = textbook_table();
        let freqs: [(u8, u64); 6] = [
            (b'a', 5),
            (b'b', 9),
            (b'c', 12),
            (b'd', 13),
            (b'e', 16),
            (b'f', 45),
        ];
        let total: u64 = freqs.iter().map(|(_, f)| f).sum();
        let weighted: u64 = freqs
            .iter()
            .map(|(s, f)| f * table.code(*s).unwrap().len() as u64)
            .sum();
        assert!(weighted as f64 / total as f64 <= 2.25);
    }

    #[test]
    fn codes_are_prefix_free() {
        let table = textbook_table();
        let entries = table.entries();
        for (a, code_a) in &entries {
            for (b, code_b) in &entries {
                if a == b {
                    continue;
                }
                assert!(
                    !code_b.starts_with(code_a),
                    "code of {} is a prefix of {}",
                    *a as char,
                    *b as char
                );
            }
        }
    }
}
