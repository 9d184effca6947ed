use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, info};

use crate::dictionary::Dictionary;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {}", .origin, .source)]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {} of {} is not valid UTF-8", .line, .origin)]
    InvalidUtf8 { origin: String, line: usize },
}

/// Somewhere words can be read from, one word per line.
#[async_trait::async_trait]
pub trait WordSource {
    /// Human readable name used in logs and errors.
    fn origin(&self) -> String;

    /// Reads every word. Lines are trimmed and blank lines are skipped.
    async fn read_words(&mut self) -> Result<Vec<String>, LoadError>;
}

/// Reads words from any async reader.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    origin: String,
}

impl<R> ReaderSource<R> {
    pub fn new(reader: R, origin: impl Into<String>) -> Self {
        Self {
            reader,
            origin: origin.into(),
        }
    }
}

#[async_trait::async_trait]
impl<R> WordSource for ReaderSource<R>
where
    R: AsyncRead + Unpin + Send,
{
    fn origin(&self) -> String {
        self.origin.clone()
    }

    async fn read_words(&mut self) -> Result<Vec<String>, LoadError> {
        let mut reader = BufReader::new(&mut self.reader);
        let mut words = Vec::new();
        let mut buf = Vec::with_capacity(64);
        let mut line = 0;

        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|source| LoadError::Io {
                    origin: self.origin.clone(),
                    source,
                })?;
            if n == 0 {
                break;
            }
            line += 1;

            let text = std::str::from_utf8(&buf).map_err(|_| LoadError::InvalidUtf8 {
                origin: self.origin.clone(),
                line,
            })?;
            let word = text.trim();
            if !word.is_empty() {
                words.push(word.to_string());
            }
        }

        debug!("Read {} words from {} lines of {}", words.len(), line, self.origin);
        Ok(words)
    }
}

/// Reads words from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl WordSource for FileSource {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_words(&mut self) -> Result<Vec<String>, LoadError> {
        let file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                origin: self.origin(),
                source,
            })?;
        ReaderSource::new(file, self.origin()).read_words().await
    }
}

/// Reads words piped in on stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinSource;

#[async_trait::async_trait]
impl WordSource for StdinSource {
    fn origin(&self) -> String {
        "<stdin>".to_string()
    }

    async fn read_words(&mut self) -> Result<Vec<String>, LoadError> {
        ReaderSource::new(tokio::io::stdin(), self.origin())
            .read_words()
            .await
    }
}

/// Outcome of loading a word source into a dictionary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Non-blank lines read.
    pub read: usize,
    /// Words that were new to the dictionary.
    pub added: usize,
    /// Words already present, including case-only variants.
    pub duplicates: usize,
}

/// Reads every word from `source` and adds it to `dict`.
pub async fn load_into<D, S>(dict: &mut D, source: &mut S) -> Result<LoadReport, LoadError>
where
    D: Dictionary + ?Sized,
    S: WordSource + ?Sized,
{
    let words = source.read_words().await?;

    let mut report = LoadReport {
        read: words.len(),
        ..Default::default()
    };
    for word in &words {
        if dict.add_word(word) {
            report.added += 1;
        } else {
            report.duplicates += 1;
        }
    }

    info!(
        origin = %source.origin(),
        read = report.read,
        added = report.added,
        duplicates = report.duplicates,
        "loaded word list"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::HashSetDictionary;
    use crate::trie::DictionaryTrie;

    #[tokio::test]
    async fn test_reader_source_trims_and_skips_blank_lines() {
        let input: &[u8] = b"  apple\n\nBanana  \r\n\t\ncherry";
        let mut source = ReaderSource::new(input, "test");
        let words = source.read_words().await.unwrap();
        assert_eq!(words, vec!["apple", "Banana", "cherry"]);
    }

    #[tokio::test]
    async fn test_reader_source_invalid_utf8() {
        let input: &[u8] = b"ok\n\xff\xfe\n";
        let mut source = ReaderSource::new(input, "bad");
        let err = source.read_words().await.unwrap_err();
        assert!(matches!(err, LoadError::InvalidUtf8 { line: 2, .. }));
    }

    #[tokio::test]
    async fn test_load_into_trie_counts_duplicates() {
        let _ = tracing_subscriber::fmt::try_init();

        let input: &[u8] = b"no\nnow\nNo\nnot\n\nnow\n";
        let mut trie = DictionaryTrie::new();
        let report = load_into(&mut trie, &mut ReaderSource::new(input, "words"))
            .await
            .unwrap();

        assert_eq!(
            report,
            LoadReport {
                read: 5,
                added: 3,
                duplicates: 2,
            }
        );
        assert_eq!(trie.size(), 3);
        assert_eq!(trie.predict_completions("no", 5), vec!["no", "not", "now"]);
    }

    #[tokio::test]
    async fn test_load_into_dyn_dictionary() {
        let input: &[u8] = b"alpha\nbeta\n";
        let mut dict = HashSetDictionary::new();
        let dyn_dict: &mut dyn Dictionary = &mut dict;
        let report = load_into(dyn_dict, &mut ReaderSource::new(input, "words"))
            .await
            .unwrap();
        assert_eq!(report.added, 2);
        assert!(dict.is_word("Alpha"));
    }

    #[tokio::test]
    async fn test_file_source() {
        let path = std::env::temp_dir().join(format!("wordtrie-{}.txt", std::process::id()));
        tokio::fs::write(&path, "step\nstem\nsteer\n").await.unwrap();

        let mut trie = DictionaryTrie::new();
        let report = load_into(&mut trie, &mut FileSource::new(&path))
            .await
            .unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(report.added, 3);
        assert!(trie.is_word("steer"));
    }

    #[tokio::test]
    async fn test_file_source_missing() {
        let mut source = FileSource::new("/definitely/not/here/words.txt");
        let err = source.read_words().await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here/words.txt"));
    }
}
