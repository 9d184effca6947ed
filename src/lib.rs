//! A case-insensitive word dictionary stored in a trie, with shortest-first
//! prefix completion.

pub mod dictionary;
pub mod loader;
pub mod node;
pub mod trie;

pub use dictionary::{AutoComplete, Dictionary, HashSetDictionary};
pub use loader::{
    load_into, FileSource, LoadError, LoadReport, ReaderSource, StdinSource, WordSource,
};
pub use node::TrieNode;
pub use trie::DictionaryTrie;
