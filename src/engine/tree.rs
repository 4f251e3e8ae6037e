use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::engine::error::CodecError;
use crate::engine::frequency::FrequencyTable;

/// One node of the merge tree. Children are exclusively owned; the tree is
/// immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    Internal {
        left: Box<Node>,
        right: Box<Node>,
        freq: u64,
    },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Min-queue entry. Equal frequencies fall back to the insertion sequence
/// number, so pop order is fully deterministic: leaves enter in ascending
/// symbol order, merged nodes in creation order.
struct QueueEntry {
    freq: u64,
    seq: u32,
    node: Node,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behaviour on BinaryHeap
        (other.freq, other.seq).cmp(&(self.freq, self.seq))
    }
}

/// The frequency-weighted binary merge tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree {
    root: Node,
}

impl CodeTree {
    /// Build the merge tree from a frequency table.
    ///
    /// Every symbol with a positive count becomes a leaf in a min-priority
    /// queue; the two lowest entries are merged (left = first removed,
    /// right = second removed) until one node remains. A table with a single
    /// distinct symbol yields a lone-leaf tree.
    pub fn build(freqs: &FrequencyTable) -> Result<Self, CodecError> {
        let mut queue = BinaryHeap::new();
        let mut seq = 0u32;

        for (symbol, freq) in freqs.present_symbols() {
            queue.push(QueueEntry {
                freq,
                seq,
                node: Node::Leaf { symbol, freq },
            });
            seq += 1;
        }

        if queue.is_empty() {
            return Err(CodecError::EmptyAlphabet);
        }

        while queue.len() > 1 {
            let left = queue.pop().expect("queue has at least two entries").node;
            let right = queue.pop().expect("queue has at least two entries").node;
            let freq = left.freq() + right.freq();

            queue.push(QueueEntry {
                freq,
                seq,
                node: Node::Internal {
                    left: Box::new(left),
                    right: Box::new(right),
                    freq,
                },
            });
            seq += 1;
        }

        let root = queue.pop().expect("one node remains").node;
        Ok(Self { root })
    }

    pub fn from_root(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of leaves, i.e. distinct symbols the tree can decode.
    pub fn leaf_count(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Internal { left, right, .. } => walk(left) + walk(right),
            }
        }
        walk(&self.root)
    }
}
