use std::collections::HashSet;
use std::io::{self, BufRead};

static BUILTIN_WORDS: &str = include_str!("wordlists/id.txt");

/// An immutable list of unique, lowercase words for passphrases.
///
/// Construction normalizes its input: words are trimmed and lowercased, and anything that is not
/// purely alphabetic (empty entries, multi-word phrases, words containing digits or separator
/// characters) is dropped, as are duplicates. `len()` is therefore always the number of distinct
/// usable words.
#[derive(Clone, Debug)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    pub fn new<I, W>(words: I) -> Dictionary
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut dropped = 0usize;
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() || !word.chars().all(char::is_alphabetic) {
                dropped += 1;
                continue;
            }
            if seen.insert(word.clone()) {
                kept.push(word);
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, "ignored entries that are not single alphabetic words");
        }
        Dictionary { words: kept }
    }

    /// The bundled Indonesian word list.
    pub fn builtin() -> Dictionary {
        Dictionary::new(word_lines(BUILTIN_WORDS.lines()))
    }

    /// Read a newline-separated word list. Blank lines and lines starting with `#` are skipped.
    pub fn from_reader(rdr: impl BufRead) -> io::Result<Dictionary> {
        let lines = rdr.lines().collect::<io::Result<Vec<_>>>()?;
        Ok(Dictionary::new(word_lines(lines.iter().map(String::as_str))))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Whether `word` is in the list, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.words.iter().any(|w| *w == word)
    }
}

fn word_lines<'a>(lines: impl Iterator<Item = &'a str>) -> impl Iterator<Item = &'a str> {
    lines.filter(|line| !line.trim_start().starts_with('#'))
}
