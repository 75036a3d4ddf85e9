// Radix trie of word forms over a dense character alphabet
//
// Nodes live in one flat arena. Node `n` owns the slot range
// `[n * width, (n + 1) * width)` where `width = char_count + 1`: slot 0 is the
// word ending at the node itself, slot `c + 1` continues with character `c`.
// Nodes carry no parent link; anything that needs to walk upwards keeps the
// node stack of the traversal that got it there.

use radixspell_core::CharIdx;

use crate::{StoreError, try_grow};

/// Arena index of a [`RadixTrie`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Arena index of a [`Counter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CounterId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl CounterId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One child slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadixEntry {
    #[default]
    Empty,
    /// A stored word ends here and no longer word shares this prefix.
    Counter(CounterId),
    Node(NodeId),
}

/// Usage restrictions of a stored form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WordAttrs(u8);

impl WordAttrs {
    pub const NONE: WordAttrs = WordAttrs(0);
    /// Valid, but never offered as a suggestion.
    pub const NO_SUGGEST: WordAttrs = WordAttrs(1);
    /// Valid only as a part of a compound word.
    pub const ONLY_IN_COMPOUND: WordAttrs = WordAttrs(1 << 1);
    /// Explicitly rejected, also as a compound part.
    pub const FORBIDDEN: WordAttrs = WordAttrs(1 << 2);

    #[inline]
    pub fn contains(self, other: WordAttrs) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: WordAttrs) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn union(self, other: WordAttrs) -> WordAttrs {
        WordAttrs(self.0 | other.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine the attributes of two productions of the same form.
    ///
    /// `FORBIDDEN` sticks once set. The other restrictions survive only when
    /// both productions carry them.
    pub fn merge(self, other: WordAttrs) -> WordAttrs {
        let forbidden = (self.0 | other.0) & Self::FORBIDDEN.0;
        let restricted = self.0 & other.0 & !Self::FORBIDDEN.0;
        WordAttrs(forbidden | restricted)
    }

    /// True when the form may appear in a suggestion list.
    #[inline]
    pub fn suggestible(self) -> bool {
        self.is_empty()
    }
}

/// Per-word leaf data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counter {
    /// Number of times the form was inserted since the last reset.
    pub count: u32,
    pub attrs: WordAttrs,
    /// Interned id of the form's compound flag set, 0 when it has none.
    pub compound_flags: u32,
}

/// Outcome of [`RadixTrie::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inserted {
    pub counter: CounterId,
    /// True when the path had no terminal before this insert.
    pub fresh: bool,
}

/// Compressed prefix tree of index sequences.
#[derive(Debug, Clone)]
pub struct RadixTrie {
    char_count: usize,
    width: usize,
    slots: Vec<RadixEntry>,
    counters: Vec<Counter>,
    longest: usize,
}

impl RadixTrie {
    /// Empty trie (root node only) over an alphabet of `char_count` characters.
    pub fn new(char_count: usize) -> Result<Self, StoreError> {
        let width = char_count + 1;
        let mut slots = Vec::new();
        try_grow(&mut slots, width, "radix node")?;
        slots.resize(width, RadixEntry::Empty);
        Ok(Self {
            char_count,
            width,
            slots,
            counters: Vec::new(),
            longest: 0,
        })
    }

    #[inline]
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Slots per node: the self terminal plus one per character.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn node_count(&self) -> usize {
        self.slots.len() / self.width
    }

    /// Number of distinct stored forms.
    pub fn counter_count(&self) -> usize {
        self.counters.len()
    }

    /// Length of the longest stored form.
    pub fn longest_word(&self) -> usize {
        self.longest
    }

    /// All slots of `node`, self terminal first.
    #[inline]
    pub fn node(&self, node: NodeId) -> &[RadixEntry] {
        let base = node.index() * self.width;
        &self.slots[base..base + self.width]
    }

    /// Slot `pos` of `node` (0 is the self terminal).
    #[inline]
    pub fn entry_at(&self, node: NodeId, pos: usize) -> RadixEntry {
        self.slots[node.index() * self.width + pos]
    }

    #[inline]
    fn child_slot(&self, node: NodeId, c: CharIdx) -> Option<usize> {
        let c = c as usize;
        (c < self.char_count).then(|| node.index() * self.width + c + 1)
    }

    #[inline]
    pub fn counter(&self, id: CounterId) -> &Counter {
        &self.counters[id.index()]
    }

    #[inline]
    pub fn counter_mut(&mut self, id: CounterId) -> &mut Counter {
        &mut self.counters[id.index()]
    }

    fn alloc_node(&mut self) -> Result<NodeId, StoreError> {
        let id = u32::try_from(self.node_count())
            .map_err(|_| StoreError::OutOfMemory { what: "radix node" })?;
        try_grow(&mut self.slots, self.width, "radix node")?;
        self.slots
            .resize(self.slots.len() + self.width, RadixEntry::Empty);
        Ok(NodeId(id))
    }

    fn alloc_counter(&mut self) -> Result<CounterId, StoreError> {
        let id = u32::try_from(self.counters.len())
            .map_err(|_| StoreError::OutOfMemory { what: "radix counter" })?;
        try_grow(&mut self.counters, 1, "radix counter")?;
        self.counters.push(Counter {
            count: 1,
            ..Counter::default()
        });
        Ok(CounterId(id))
    }

    /// Count another insert into the terminal at `slot`, creating it if empty.
    fn touch_terminal(&mut self, slot: usize) -> Result<Inserted, StoreError> {
        if let RadixEntry::Counter(id) = self.slots[slot] {
            let c = &mut self.counters[id.index()];
            c.count = c.count.saturating_add(1);
            return Ok(Inserted {
                counter: id,
                fresh: false,
            });
        }
        let id = self.alloc_counter()?;
        self.slots[slot] = RadixEntry::Counter(id);
        Ok(Inserted {
            counter: id,
            fresh: true,
        })
    }

    /// Store `word`, creating or extending its path.
    ///
    /// Re-inserting a stored word only bumps its counter. A word that extends
    /// a leaf turns that leaf into a node whose self terminal keeps the old
    /// counter.
    pub fn insert(&mut self, word: &[CharIdx]) -> Result<Inserted, StoreError> {
        let mut node = NodeId::ROOT;
        for (i, &c) in word.iter().enumerate() {
            let slot = self
                .child_slot(node, c)
                .ok_or(StoreError::CharOutOfRange {
                    index: c,
                    char_count: self.char_count,
                })?;
            let last = i + 1 == word.len();
            match self.slots[slot] {
                RadixEntry::Node(child) => node = child,
                RadixEntry::Empty | RadixEntry::Counter(_) if last => {
                    self.longest = self.longest.max(word.len());
                    return self.touch_terminal(slot);
                }
                RadixEntry::Empty => {
                    let child = self.alloc_node()?;
                    self.slots[slot] = RadixEntry::Node(child);
                    node = child;
                }
                RadixEntry::Counter(id) => {
                    let child = self.alloc_node()?;
                    self.slots[child.index() * self.width] = RadixEntry::Counter(id);
                    self.slots[slot] = RadixEntry::Node(child);
                    node = child;
                }
            }
        }
        self.longest = self.longest.max(word.len());
        self.touch_terminal(node.index() * self.width)
    }

    /// Counter of `word` if it is stored.
    pub fn find(&self, word: &[CharIdx]) -> Option<CounterId> {
        let mut node = NodeId::ROOT;
        for (i, &c) in word.iter().enumerate() {
            match self.slots[self.child_slot(node, c)?] {
                RadixEntry::Empty => return None,
                RadixEntry::Counter(id) => return (i + 1 == word.len()).then_some(id),
                RadixEntry::Node(child) => node = child,
            }
        }
        match self.entry_at(node, 0) {
            RadixEntry::Counter(id) => Some(id),
            _ => None,
        }
    }

    #[inline]
    pub fn lookup(&self, word: &[CharIdx]) -> bool {
        self.find(word).is_some()
    }

    /// Append `(length, counter)` for every stored word that is a prefix of
    /// `word`, shortest first. The empty prefix is not reported.
    pub fn common_prefixes(&self, word: &[CharIdx], out: &mut Vec<(usize, CounterId)>) {
        let mut node = NodeId::ROOT;
        for (i, &c) in word.iter().enumerate() {
            let Some(slot) = self.child_slot(node, c) else {
                return;
            };
            match self.slots[slot] {
                RadixEntry::Empty => return,
                RadixEntry::Counter(id) => {
                    out.push((i + 1, id));
                    return;
                }
                RadixEntry::Node(child) => {
                    if let RadixEntry::Counter(id) = self.entry_at(child, 0) {
                        out.push((i + 1, id));
                    }
                    node = child;
                }
            }
        }
    }

    /// Reset every reachable counter to zero. Stored words stay stored.
    pub fn clear_counters(&mut self) {
        let mut stack: Vec<(NodeId, usize)> = vec![(NodeId::ROOT, 0)];
        while let Some(&(node, pos)) = stack.last() {
            if pos == self.width {
                stack.pop();
                continue;
            }
            let depth = stack.len() - 1;
            stack[depth].1 += 1;
            match self.slots[node.index() * self.width + pos] {
                RadixEntry::Empty => {}
                RadixEntry::Counter(id) => self.counters[id.index()].count = 0,
                RadixEntry::Node(child) => stack.push((child, 0)),
            }
        }
    }

    /// Slot position of `entry` within `node`, by linear scan.
    pub fn index_of(&self, node: NodeId, entry: RadixEntry) -> Option<usize> {
        if entry == RadixEntry::Empty {
            return None;
        }
        self.node(node).iter().position(|&e| e == entry)
    }

    /// Rebuild the word ending at `terminal`.
    ///
    /// `node_stack` is the chain of nodes from the root to the node holding
    /// `terminal`, as recorded by the traversal that found it.
    pub fn path_of(&self, node_stack: &[NodeId], terminal: RadixEntry) -> Vec<CharIdx> {
        let mut word = Vec::with_capacity(node_stack.len());
        self.path_into(node_stack, terminal, &mut word);
        word
    }

    /// [`path_of`](Self::path_of) writing into a reusable buffer.
    pub fn path_into(&self, node_stack: &[NodeId], terminal: RadixEntry, out: &mut Vec<CharIdx>) {
        out.clear();
        for pair in node_stack.windows(2) {
            if let Some(pos) = self.index_of(pair[0], RadixEntry::Node(pair[1])) {
                out.push((pos - 1) as CharIdx);
            }
        }
        if let Some(&holder) = node_stack.last() {
            match self.index_of(holder, terminal) {
                Some(pos) if pos > 0 => out.push((pos - 1) as CharIdx),
                _ => {}
            }
        }
    }

    /// Heap bytes held by nodes and counters.
    pub fn memory_size(&self) -> usize {
        self.slots.len() * std::mem::size_of::<RadixEntry>()
            + self.counters.len() * std::mem::size_of::<Counter>()
    }
}
