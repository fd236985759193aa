#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! wordlist decouples the seed phrase codec from where its words come from. The codec only needs
//! to move between words and 11 bit indices, which is captured by the WordlistSource trait. The
//! embedded BIP-39 English list is the default; a list can also be loaded from a file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::dictionary::DICTIONARY;
use crate::{Error, Result};

/// WORDLIST_LEN is the number of words in a wordlist. Each word carries 11 bits.
pub const WORDLIST_LEN: usize = 2048;

/// WordlistSource is a fixed, ordered table of 2048 distinct words.
pub trait WordlistSource {
    /// lookup_index returns the position of `word` in the list, if present.
    fn lookup_index(&self, word: &str) -> Option<u16>;

    /// word_at returns the word at `index`. Only the low 11 bits of the index are used.
    fn word_at(&self, index: u16) -> &str;
}

/// English is the BIP-39 English wordlist compiled into the binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct English;

impl WordlistSource for English {
    fn lookup_index(&self, word: &str) -> Option<u16> {
        // The English list is sorted.
        DICTIONARY
            .binary_search_by(|probe| (*probe).cmp(word))
            .ok()
            .map(|i| i as u16)
    }

    fn word_at(&self, index: u16) -> &str {
        DICTIONARY[index as usize % WORDLIST_LEN]
    }
}

/// Wordlist is a wordlist loaded at runtime, indexed by a hash map for lookups.
#[derive(Debug, Clone)]
pub struct Wordlist {
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl Wordlist {
    /// from_text builds a wordlist from whitespace separated words. The text must contain exactly
    /// 2048 distinct words.
    pub fn from_text(text: &str) -> Result<Wordlist> {
        let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        if words.len() != WORDLIST_LEN {
            return Err(Error::WordlistUnavailable(format!(
                "expected {} words, found {}",
                WORDLIST_LEN,
                words.len()
            )));
        }

        let mut index = HashMap::with_capacity(WORDLIST_LEN);
        for (i, word) in words.iter().enumerate() {
            if index.insert(word.clone(), i as u16).is_some() {
                return Err(Error::WordlistUnavailable(format!(
                    "word '{}' appears more than once",
                    word
                )));
            }
        }
        Ok(Wordlist { words, index })
    }

    /// load reads a wordlist file with one word per line.
    pub fn load(path: &Path) -> Result<Wordlist> {
        debug!(path = %path.display(), "loading wordlist");
        let text = fs::read_to_string(path).map_err(|e| {
            Error::WordlistUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        Wordlist::from_text(&text)
    }
}

impl From<English> for Wordlist {
    fn from(_: English) -> Wordlist {
        let words: Vec<String> = DICTIONARY.iter().map(|w| w.to_string()).collect();
        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i as u16))
            .collect();
        Wordlist { words, index }
    }
}

impl WordlistSource for Wordlist {
    fn lookup_index(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    fn word_at(&self, index: u16) -> &str {
        &self.words[index as usize % WORDLIST_LEN]
    }
}
