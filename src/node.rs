use std::collections::BTreeMap;
use std::fmt;

/// A node in the trie.
///
/// Every node stores the text spelled by the path from the root down to it, so a
/// completion can be read straight off the node without walking back up.
#[derive(Default)]
pub struct TrieNode {
    // Whether this node represents the end of a stored word
    ends_word: bool,
    // The children of this node, keyed by the character on the edge
    children: BTreeMap<char, TrieNode>,
    text: String,
}

impl TrieNode {
    /// Creates a node for the given path text. The root uses the empty string.
    pub fn new(text: String) -> Self {
        TrieNode {
            ends_word: false,
            children: BTreeMap::new(),
            text,
        }
    }

    pub fn get_child(&self, c: char) -> Option<&TrieNode> {
        self.children.get(&c)
    }

    /// Adds an edge for `c` if one does not exist yet, and returns the child at
    /// the end of that edge.
    pub fn insert(&mut self, c: char) -> &mut TrieNode {
        let text = &self.text;
        self.children.entry(c).or_insert_with(|| {
            let mut child_text = String::with_capacity(text.len() + c.len_utf8());
            child_text.push_str(text);
            child_text.push(c);
            TrieNode::new(child_text)
        })
    }

    /// Characters with an outgoing edge, in sorted order.
    pub fn valid_next_characters(&self) -> impl Iterator<Item = char> + '_ {
        self.children.keys().copied()
    }

    /// Child nodes in the same order as [`TrieNode::valid_next_characters`].
    pub fn children(&self) -> impl Iterator<Item = &TrieNode> + '_ {
        self.children.values()
    }

    pub fn ends_word(&self) -> bool {
        self.ends_word
    }

    pub fn set_ends_word(&mut self, ends_word: bool) {
        self.ends_word = ends_word;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of nodes in the subtree rooted here, this node included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }
}

// Children are detached and dropped from a heap stack, never recursively.
impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut stack: Vec<TrieNode> =
            std::mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(std::mem::take(&mut node.children).into_values());
        }
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieNode")
            .field("text", &self.text)
            .field("ends_word", &self.ends_word)
            .field("next", &self.valid_next_characters().collect::<String>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_builds_child_text() {
        let mut root = TrieNode::default();
        let child = root.insert('a');
        assert_eq!(child.text(), "a");
        let grandchild = child.insert('b');
        assert_eq!(grandchild.text(), "ab");
        assert!(!grandchild.ends_word());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut root = TrieNode::default();
        root.insert('x').set_ends_word(true);
        // A second insert must not replace the existing child.
        let again = root.insert('x');
        assert!(again.ends_word());
        assert_eq!(root.node_count(), 2);
    }

    #[test]
    fn test_get_child_missing() {
        let root = TrieNode::default();
        assert!(root.get_child('q').is_none());
    }

    #[test]
    fn test_valid_next_characters_sorted_and_restartable() {
        let mut root = TrieNode::default();
        for c in ['m', 'c', 'x', 'a'] {
            root.insert(c);
        }
        let first: Vec<char> = root.valid_next_characters().collect();
        let second: Vec<char> = root.valid_next_characters().collect();
        assert_eq!(first, vec!['a', 'c', 'm', 'x']);
        assert_eq!(first, second);

        let texts: Vec<&str> = root.children().map(TrieNode::text).collect();
        assert_eq!(texts, vec!["a", "c", "m", "x"]);
    }

    #[test]
    fn test_deep_chain_count_and_drop() {
        let mut root = TrieNode::default();
        let mut node = &mut root;
        for _ in 0..10_000 {
            node = node.insert('z');
        }
        node.set_ends_word(true);

        assert_eq!(root.node_count(), 10_001);
        drop(root);
    }

    #[test]
    fn test_debug_lists_next_characters() {
        let mut root = TrieNode::default();
        root.insert('b').insert('c');
        root.insert('a');
        let debug = format!("{:?}", root.get_child('b').unwrap());
        assert_eq!(debug, r#"TrieNode { text: "b", ends_word: false, next: "c" }"#);
    }
}
