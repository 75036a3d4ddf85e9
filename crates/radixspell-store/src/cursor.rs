// Resumable depth-first enumeration of stored words
//
// The cursor is plain data: a node stack and a slot-position stack. It can be
// parked between calls and picked up again against the same trie.

use radixspell_core::CharIdx;

use crate::radix::{CounterId, NodeId, RadixEntry, RadixTrie};

/// A stored word reached by a [`TrieCursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    pub counter: CounterId,
    /// Word length in characters.
    pub len: usize,
}

/// Walks every terminal of a trie exactly once, in slot order.
///
/// Slot order puts a word before its extensions and otherwise follows
/// character indices, so the enumeration is repeatable for a given trie.
#[derive(Debug, Clone, Default)]
pub struct TrieCursor {
    nodes: Vec<NodeId>,
    positions: Vec<usize>,
    started: bool,
}

impl TrieCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once every terminal has been returned.
    pub fn is_finished(&self) -> bool {
        self.started && self.nodes.is_empty()
    }

    /// Nodes from the root down to the holder of the last returned terminal.
    pub fn node_stack(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Advance to the next stored word.
    pub fn next(&mut self, trie: &RadixTrie) -> Option<Terminal> {
        if !self.started {
            self.started = true;
            self.nodes.push(NodeId::ROOT);
            self.positions.push(0);
        }
        let width = trie.width();
        loop {
            let (&node, &pos) = (self.nodes.last()?, self.positions.last()?);
            if pos == width {
                self.nodes.pop();
                self.positions.pop();
                continue;
            }
            let depth = self.positions.len() - 1;
            self.positions[depth] += 1;
            match trie.entry_at(node, pos) {
                RadixEntry::Empty => {}
                RadixEntry::Counter(counter) => {
                    let len = depth + usize::from(pos > 0);
                    return Some(Terminal { counter, len });
                }
                RadixEntry::Node(child) => {
                    self.nodes.push(child);
                    self.positions.push(0);
                }
            }
        }
    }

    /// Characters of the last returned terminal.
    pub fn word_into(&self, trie: &RadixTrie, terminal: Terminal, out: &mut Vec<CharIdx>) {
        trie.path_into(&self.nodes, RadixEntry::Counter(terminal.counter), out);
    }
}
