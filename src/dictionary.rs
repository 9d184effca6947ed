use std::collections::HashSet;

/// A set of words with case-insensitive membership.
pub trait Dictionary {
    /// Adds a word, returning `false` if it is empty or already present.
    fn add_word(&mut self, word: &str) -> bool;

    fn is_word(&self, word: &str) -> bool;

    /// Number of distinct words stored.
    fn size(&self) -> usize;
}

/// Prefix completion over a set of words.
pub trait AutoComplete {
    /// Returns up to `max_results` stored words starting with `prefix`, shortest first.
    fn predict_completions(&self, prefix: &str, max_results: usize) -> Vec<String>;
}

/// Dictionary backed by a plain hash set. Has no completion support.
#[derive(Debug, Default, Clone)]
pub struct HashSetDictionary {
    words: HashSet<String>,
}

impl HashSetDictionary {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Dictionary for HashSetDictionary {
    fn add_word(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        self.words.insert(word.to_lowercase())
    }

    fn is_word(&self, word: &str) -> bool {
        !word.is_empty() && self.words.contains(&word.to_lowercase())
    }

    fn size(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_set_add_and_lookup() {
        let mut dict = HashSetDictionary::new();
        assert!(dict.add_word("Hello"));
        assert!(!dict.add_word("hello"));
        assert_eq!(dict.size(), 1);
        assert!(dict.is_word("HELLO"));
        assert!(!dict.is_word("hell"));
    }

    #[test]
    fn test_hash_set_rejects_empty() {
        let mut dict = HashSetDictionary::new();
        assert!(!dict.add_word(""));
        assert!(!dict.is_word(""));
        assert_eq!(dict.size(), 0);
    }
}
