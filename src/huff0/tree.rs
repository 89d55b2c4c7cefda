use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Reverse;

use super::{Code, CodeTable, CodeWalker, FrequencyTable, Step};

/// Index of a node inside a [`HuffmanTree`]
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
        frequency: u64,
    },
    Internal {
        frequency: u64,
        left: NodeId,
        /// Only ever `None` for the synthetic root of a single symbol tree
        right: Option<NodeId>,
    },
}

impl HuffmanNode {
    pub fn frequency(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { frequency, .. } | HuffmanNode::Internal { frequency, .. } => {
                *frequency
            }
        }
    }
}

/// A Huffman tree stored as an arena. Leaves come first, in ascending symbol order,
/// followed by the internal nodes in the order they were merged. The root is always
/// an internal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
    root: NodeId,
}

impl HuffmanTree {
    /// Grow a tree by repeatedly merging the two least frequent nodes.
    ///
    /// Ties are broken by node index: leaves of smaller symbols win against larger ones,
    /// leaves win against internal nodes, and older internal nodes win against newer ones.
    /// The first node taken from the queue becomes the left (`0`) child.
    ///
    /// Returns `None` for an empty table. A table with a single symbol gets a root with the
    /// only leaf on its left and nothing on its right, so the symbol is coded as `0`.
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let distinct = frequencies.distinct_symbols();
        let mut nodes = Vec::with_capacity(2 * distinct);
        let mut queue = BinaryHeap::with_capacity(distinct);

        for (symbol, frequency) in frequencies.iter() {
            queue.push(Reverse((frequency, nodes.len())));
            nodes.push(HuffmanNode::Leaf { symbol, frequency });
        }

        if nodes.len() == 1 {
            vprintln!("Single symbol input, adding a synthetic root");
            nodes.push(HuffmanNode::Internal {
                frequency: nodes[0].frequency(),
                left: 0,
                right: None,
            });
            return Some(HuffmanTree { nodes, root: 1 });
        }

        while queue.len() > 1 {
            let Reverse((left_frequency, left)) = queue.pop()?;
            let Reverse((right_frequency, right)) = queue.pop()?;
            let frequency = left_frequency + right_frequency;
            queue.push(Reverse((frequency, nodes.len())));
            nodes.push(HuffmanNode::Internal {
                frequency,
                left,
                right: Some(right),
            });
        }

        let Reverse((_, root)) = queue.pop()?;
        vprintln!("Built huffman tree with {} leaves", distinct);
        Some(HuffmanTree { nodes, root })
    }

    /// Convenience for building a tree straight from the input bytes
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        Self::build(&FrequencyTable::count(data))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &HuffmanNode {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[HuffmanNode] {
        &self.nodes
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, HuffmanNode::Leaf { .. }))
            .count()
    }

    /// Call `f` with every symbol and its root to leaf path, visiting left subtrees first.
    ///
    /// Walks with an explicit stack, very skewed trees don't grow the call stack.
    pub fn for_each_path(&self, mut f: impl FnMut(u8, &Code)) {
        let mut stack = Vec::new();
        stack.push((self.root, Code::empty()));
        while let Some((id, code)) = stack.pop() {
            match self.nodes[id] {
                HuffmanNode::Leaf { symbol, .. } => f(symbol, &code),
                HuffmanNode::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        stack.push((right, code.child(true)));
                    }
                    stack.push((left, code.child(false)));
                }
            }
        }
    }

    /// Root to leaf path of `symbol`, `None` if the symbol is not part of the tree
    pub fn path(&self, symbol: u8) -> Option<Code> {
        let mut found = None;
        self.for_each_path(|leaf, code| {
            if leaf == symbol {
                found = Some(*code);
            }
        });
        found
    }

    pub fn code_table(&self) -> CodeTable {
        CodeTable::derive(self)
    }
}

impl CodeWalker for HuffmanTree {
    type Position = NodeId;

    fn start(&self) -> NodeId {
        self.root
    }

    fn step(&self, from: NodeId, bit: bool) -> Step<NodeId> {
        let child = match self.nodes[from] {
            HuffmanNode::Internal { left, right, .. } => {
                if bit {
                    right
                } else {
                    Some(left)
                }
            }
            // walks are restarted at the root after every leaf
            HuffmanNode::Leaf { .. } => None,
        };
        match child.map(|id| (id, self.nodes[id])) {
            Some((_, HuffmanNode::Leaf { symbol, .. })) => Step::Emit(symbol),
            Some((id, HuffmanNode::Internal { .. })) => Step::Continue(id),
            None => Step::Dead,
        }
    }
}
