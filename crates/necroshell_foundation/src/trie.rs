//! Prefix tree over strings.
//!
//! Children are kept in a `BTreeMap`, so prefix queries return words in
//! lexicographic order without a separate sort.

use std::collections::BTreeMap;

/// A node in the prefix tree.
#[derive(Clone, Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    terminal: bool,
}

impl TrieNode {
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first collection of every word below this node.
    fn collect(&self, buffer: &mut String, out: &mut Vec<String>) {
        if self.terminal {
            out.push(buffer.clone());
        }
        for (ch, child) in &self.children {
            buffer.push(*ch);
            child.collect(buffer, out);
            buffer.pop();
        }
    }

    /// Removes `word` below this node, pruning branches that no longer lead
    /// to a terminal. Returns whether the word was present.
    fn remove(&mut self, mut chars: std::str::Chars<'_>) -> bool {
        match chars.next() {
            None => {
                let was_terminal = self.terminal;
                self.terminal = false;
                was_terminal
            }
            Some(ch) => {
                let Some(child) = self.children.get_mut(&ch) else {
                    return false;
                };
                let removed = child.remove(chars);
                if removed && !child.terminal && child.is_leaf() {
                    self.children.remove(&ch);
                }
                removed
            }
        }
    }
}

/// A set of strings supporting "all words with this prefix" queries.
///
/// Used by autocompletion: one trie holds registered command names and a
/// second holds caller-supplied words such as entity names.
#[derive(Clone, Debug, Default)]
pub struct Trie {
    root: TrieNode,
    len: usize,
}

impl Trie {
    /// Creates an empty trie.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a word.
    ///
    /// Returns `true` if the word was not already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        if node.terminal {
            return false;
        }
        node.terminal = true;
        self.len += 1;
        true
    }

    /// Returns true if the exact word is stored.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_some_and(|node| node.terminal)
    }

    /// Removes a word.
    ///
    /// Returns `false` if the word was not present.
    pub fn remove(&mut self, word: &str) -> bool {
        let removed = self.root.remove(word.chars());
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Returns every stored word that starts with `prefix`, in lexicographic
    /// order. An empty prefix returns every word.
    #[must_use]
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(node) = self.find(prefix) {
            let mut buffer = prefix.to_string();
            node.collect(&mut buffer, &mut out);
        }
        out
    }

    /// Returns the number of stored words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no words are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every word.
    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.len = 0;
    }

    /// Returns every stored word in lexicographic order.
    #[must_use]
    pub fn words(&self) -> Vec<String> {
        self.words_with_prefix("")
    }

    fn find(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in prefix.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}

impl<S: AsRef<str>> Extend<S> for Trie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for Trie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}
