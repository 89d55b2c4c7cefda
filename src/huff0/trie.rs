use alloc::vec::Vec;

use super::{CodeTable, CodeWalker, Step};

/// A binary trie rebuilt from the `(symbol, code)` pairs of a [`CodeTable`].
///
/// Decoding never relies on the tree the encoder built, only on the codes it persisted.
/// Nodes live in an arena, the root is always node `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeTrie {
    nodes: Vec<TrieNode>,
    symbols: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrieNode {
    Branch { children: [Option<usize>; 2] },
    Leaf { symbol: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TrieError {
    #[error("Symbol {symbol} has an empty code")]
    EmptyCode { symbol: u8 },
    #[error("The codes of symbols {symbol} and {conflicting} are not prefix free, one starts with the other")]
    PrefixConflict { symbol: u8, conflicting: u8 },
}

const ROOT: usize = 0;

impl DecodeTrie {
    /// Insert every code of `table`. Fails if the codes are not prefix free.
    ///
    /// A table that is prefix free but not complete is accepted, bit paths that lead
    /// nowhere are reported while decoding.
    pub fn from_code_table(table: &CodeTable) -> Result<Self, TrieError> {
        let mut trie = DecodeTrie {
            nodes: Vec::with_capacity(2 * table.len().max(1)),
            symbols: 0,
        };
        trie.nodes.push(TrieNode::Branch {
            children: [None, None],
        });

        for (symbol, code) in table.iter() {
            if code.is_empty() {
                return Err(TrieError::EmptyCode { symbol });
            }
            let mut cursor = ROOT;
            let last = code.len() - 1;
            for (depth, bit) in code.bits().enumerate() {
                let child = match trie.nodes[cursor] {
                    TrieNode::Branch { children } => children[usize::from(bit)],
                    TrieNode::Leaf {
                        symbol: conflicting,
                    } => return Err(TrieError::PrefixConflict { symbol, conflicting }),
                };
                cursor = match child {
                    Some(child) if depth == last => {
                        return Err(TrieError::PrefixConflict {
                            symbol,
                            conflicting: trie.any_symbol_below(child),
                        })
                    }
                    Some(child) => child,
                    None => {
                        let node = if depth == last {
                            TrieNode::Leaf { symbol }
                        } else {
                            TrieNode::Branch {
                                children: [None, None],
                            }
                        };
                        trie.push_child(cursor, bit, node)
                    }
                };
            }
            trie.symbols += 1;
        }

        vprintln!(
            "Built decode trie with {} symbols and {} nodes",
            trie.symbols,
            trie.nodes.len()
        );
        Ok(trie)
    }

    /// Number of symbols that can be decoded
    pub fn symbol_count(&self) -> usize {
        self.symbols
    }

    pub fn is_empty(&self) -> bool {
        self.symbols == 0
    }

    fn push_child(&mut self, parent: usize, bit: bool, node: TrieNode) -> usize {
        let id = self.nodes.len();
        self.nodes.push(node);
        if let TrieNode::Branch { children } = &mut self.nodes[parent] {
            children[usize::from(bit)] = Some(id);
        }
        id
    }

    /// Some symbol in the subtree of `id`. Branches other than the root always lead to a leaf.
    fn any_symbol_below(&self, mut id: usize) -> u8 {
        loop {
            match self.nodes[id] {
                TrieNode::Leaf { symbol } => return symbol,
                TrieNode::Branch { children } => match children {
                    [Some(child), _] | [None, Some(child)] => id = child,
                    [None, None] => panic!("Dangling branch in decode trie. This is an internal error"),
                },
            }
        }
    }
}

impl CodeWalker for DecodeTrie {
    type Position = usize;

    fn start(&self) -> usize {
        ROOT
    }

    fn step(&self, from: usize, bit: bool) -> Step<usize> {
        let child = match self.nodes[from] {
            TrieNode::Branch { children } => children[usize::from(bit)],
            TrieNode::Leaf { .. } => None,
        };
        match child.map(|id| (id, self.nodes[id])) {
            Some((_, TrieNode::Leaf { symbol })) => Step::Emit(symbol),
            Some((id, TrieNode::Branch { .. })) => Step::Continue(id),
            None => Step::Dead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DecodeTrie, TrieError};
    use crate::huff0::{Code, CodeTable, CodeWalker, HuffmanTree, Step};

    fn table(entries: &[(u8, &str)]) -> CodeTable {
        entries
            .iter()
            .map(|(symbol, bits)| (*symbol, bits.parse::<Code>().unwrap()))
            .collect()
    }

    /// Follow `bits` from the root, collecting what the walker says at every step
    fn walk(trie: &impl CodeWalker<Position = usize>, bits: &str) -> Step<usize> {
        let mut position = trie.start();
        let mut last = Step::Dead;
        for bit in bits.chars() {
            last = trie.step(position, bit == '1');
            if let Step::Continue(next) = last {
                position = next;
            }
        }
        last
    }

    #[test]
    fn walks_like_the_tree() {
        let tree = HuffmanTree::from_bytes(b"abracadabra").unwrap();
        let trie = DecodeTrie::from_code_table(&tree.code_table()).unwrap();
        assert_eq!(trie.symbol_count(), 5);
        for (symbol, code) in tree.code_table().iter() {
            let bits = alloc::format!("{code}");
            assert_eq!(walk(&trie, &bits), Step::Emit(symbol));
            assert_eq!(walk(&tree, &bits), Step::Emit(symbol));
        }
    }

    #[test]
    fn incomplete_codes_have_dead_ends() {
        let trie = DecodeTrie::from_code_table(&table(&[(1, "0"), (2, "10")])).unwrap();
        assert_eq!(walk(&trie, "0"), Step::Emit(1));
        assert_eq!(walk(&trie, "10"), Step::Emit(2));
        assert!(matches!(walk(&trie, "1"), Step::Continue(_)));
        assert_eq!(walk(&trie, "11"), Step::Dead);
    }

    #[test]
    fn rejects_prefix_conflicts() {
        // shorter code inserted first
        assert_eq!(
            DecodeTrie::from_code_table(&table(&[(1, "0"), (2, "01")])),
            Err(TrieError::PrefixConflict {
                symbol: 2,
                conflicting: 1
            })
        );
        // longer code inserted first
        assert_eq!(
            DecodeTrie::from_code_table(&table(&[(1, "01"), (2, "0")])),
            Err(TrieError::PrefixConflict {
                symbol: 2,
                conflicting: 1
            })
        );
        // identical codes
        assert_eq!(
            DecodeTrie::from_code_table(&table(&[(1, "110"), (2, "110")])),
            Err(TrieError::PrefixConflict {
                symbol: 2,
                conflicting: 1
            })
        );
    }

    #[test]
    fn empty_table_gives_empty_trie() {
        let trie = DecodeTrie::from_code_table(&CodeTable::new()).unwrap();
        assert!(trie.is_empty());
        assert_eq!(trie.step(trie.start(), false), Step::Dead);
        assert_eq!(trie.step(trie.start(), true), Step::Dead);
    }
}
