use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::dictionary::{AutoComplete, Dictionary};
use crate::node::TrieNode;

/// A trie implementing both [`Dictionary`] and [`AutoComplete`].
///
/// Words are lowercased before they are stored or compared, so `"Cat"` and `"cat"`
/// name the same entry.
#[derive(Debug, Default)]
pub struct DictionaryTrie {
    root: TrieNode,
    size: usize,
}

impl DictionaryTrie {
    /// Creates a new, empty trie
    pub fn new() -> Self {
        DictionaryTrie {
            root: TrieNode::default(),
            size: 0,
        }
    }

    /// Inserts a word, creating nodes only for the characters not already on a
    /// shared prefix. Adding "now" after "no" creates exactly one node.
    ///
    /// Returns `false` for the empty string or a word that is already stored.
    pub fn add_word(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        let lower = word.to_lowercase();
        let mut current_node = &mut self.root;
        for c in lower.chars() {
            current_node = current_node.insert(c);
        }

        if current_node.ends_word() {
            return false;
        }
        current_node.set_ends_word(true);
        self.size += 1;
        true
    }

    pub fn is_word(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        self.find(&word.to_lowercase())
            .is_some_and(TrieNode::ends_word)
    }

    /// Returns up to `max_results` stored words that start with `prefix`, in
    /// non-decreasing length.
    ///
    /// Each length tier is returned whole before any word of the next tier, except
    /// the last tier which may be cut short to stop at exactly `max_results`. A
    /// prefix that is not in the trie, even partially matched, yields nothing.
    pub fn predict_completions(&self, prefix: &str, max_results: usize) -> Vec<String> {
        let mut completions = Vec::new();
        if max_results == 0 {
            return completions;
        }

        let lower = prefix.to_lowercase();
        let Some(stem) = self.find(&lower) else {
            debug!("Prefix {:?} is not in the trie", lower);
            return completions;
        };

        let mut queue: VecDeque<&TrieNode> = VecDeque::new();
        if lower.is_empty() {
            // The root is never a word itself.
            queue.extend(stem.children());
        } else {
            queue.push_back(stem);
        }

        let mut visited = 0usize;
        while let Some(node) = queue.pop_front() {
            visited += 1;
            if node.ends_word() {
                completions.push(node.text().to_string());
                if completions.len() == max_results {
                    break;
                }
            }
            queue.extend(node.children());
        }

        debug!(
            "Found {} completions for {:?} after visiting {} nodes",
            completions.len(),
            lower,
            visited
        );
        completions
    }

    /// Number of distinct words stored. This is not the number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of nodes in the trie, root included.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Renders every node's text in pre-order, one per line, for debugging.
    /// The root is the first, empty, line. Nodes that end a word are followed by
    /// an `ends word` line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            out.push_str(node.text());
            out.push('\n');
            if node.ends_word() {
                out.push_str("ends word\n");
            }
            let mut children: Vec<&TrieNode> = node.children().collect();
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// Follows `word` exactly from the root. `word` must already be lowercased.
    fn find(&self, word: &str) -> Option<&TrieNode> {
        let mut current_node = &self.root;
        for c in word.chars() {
            match current_node.get_child(c) {
                Some(next_node) => current_node = next_node,
                None => {
                    trace!("No edge for {:?} below {:?}", c, current_node.text());
                    return None;
                }
            }
        }
        Some(current_node)
    }
}

impl Dictionary for DictionaryTrie {
    fn add_word(&mut self, word: &str) -> bool {
        DictionaryTrie::add_word(self, word)
    }

    fn is_word(&self, word: &str) -> bool {
        DictionaryTrie::is_word(self, word)
    }

    fn size(&self) -> usize {
        DictionaryTrie::size(self)
    }
}

impl AutoComplete for DictionaryTrie {
    fn predict_completions(&self, prefix: &str, max_results: usize) -> Vec<String> {
        DictionaryTrie::predict_completions(self, prefix, max_results)
    }
}

impl<S: AsRef<str>> Extend<S> for DictionaryTrie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.add_word(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for DictionaryTrie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = DictionaryTrie::new();
        trie.extend(iter);
        trie
    }
}
