use std::fmt;

use serde::{Deserialize, Serialize};

static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
static DIGITS: &str = "0123456789";
static SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?`~";

/// A category of characters a password can be required to contain.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digits,
    Symbols,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Digits,
        CharacterClass::Symbols,
    ];

    /// The candidate characters of this class, in a fixed order.
    pub fn characters(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Digits => DIGITS,
            CharacterClass::Symbols => SYMBOLS,
        }
    }

    pub fn contains(self, c: char) -> bool {
        self.characters().contains(c)
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharacterClass::Uppercase => "uppercase",
            CharacterClass::Lowercase => "lowercase",
            CharacterClass::Digits => "digits",
            CharacterClass::Symbols => "symbols",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn classes_are_non_empty_and_disjoint() {
        let mut seen = HashSet::new();
        for class in CharacterClass::ALL {
            assert!(!class.characters().is_empty());
            for c in class.characters().chars() {
                assert!(seen.insert(c), "{c:?} appears in more than one class");
            }
        }
        assert_eq!(seen.len(), 26 + 26 + 10 + 32);
    }

    #[test]
    fn symbols_are_printable_ascii() {
        assert!(SYMBOLS
            .chars()
            .all(|c| c.is_ascii_punctuation()));
    }
}
