//! Word-based passphrases.

use crate::sampler::{choose, sample, sample_index};
use crate::{Dictionary, EntropySource, Error, Result, Secret, Separator};

/// Largest number [`generate_passphrase`] may insert; numbers are drawn from `0..=9999`.
pub const PASSPHRASE_NUMBER_MAX: u64 = 9999;

/// Limits a [`PassphraseConfig`] is validated against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PassphrasePolicy {
    pub min_word_count: usize,
    pub max_word_count: usize,
    /// Word lists with fewer unique words than this are refused outright.
    pub min_dictionary_size: usize,
}

/// A validated request for a passphrase.
#[derive(Clone, Debug)]
pub struct PassphraseConfig {
    word_count: usize,
    separator: Separator,
    capitalize: bool,
    add_number: bool,
    min_dictionary_size: usize,
}

impl PassphraseConfig {
    /// Fails with [`Error::WordCountOutOfBounds`] unless `word_count` lies inside the policy's
    /// window. A word count of zero is never accepted.
    pub fn new(
        word_count: usize,
        separator: Separator,
        policy: &PassphrasePolicy,
    ) -> Result<PassphraseConfig> {
        let min = policy.min_word_count.max(1);
        if word_count < min || word_count > policy.max_word_count {
            return Err(Error::WordCountOutOfBounds {
                count: word_count,
                min,
                max: policy.max_word_count,
            });
        }
        Ok(PassphraseConfig {
            word_count,
            separator,
            capitalize: false,
            add_number: false,
            min_dictionary_size: policy.min_dictionary_size,
        })
    }

    /// Capitalize the first letter of every word.
    pub fn capitalize(mut self, capitalize: bool) -> PassphraseConfig {
        self.capitalize = capitalize;
        self
    }

    /// Insert one random number, between any two words or at either end.
    pub fn add_number(mut self, add_number: bool) -> PassphraseConfig {
        self.add_number = add_number;
        self
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    pub fn capitalizes(&self) -> bool {
        self.capitalize
    }

    pub fn adds_number(&self) -> bool {
        self.add_number
    }

    pub fn min_dictionary_size(&self) -> usize {
        self.min_dictionary_size
    }
}

/// Generate a passphrase of `config.word_count()` words drawn from `dictionary`.
///
/// Words are drawn independently, so the same word may appear more than once. With
/// `capitalize` set every word gets an uppercase first letter; with `add_number` set a number
/// from `0..=9999` is inserted at a uniformly random position among the words.
///
/// Fails with [`Error::DictionaryTooSmall`] rather than produce a passphrase from a list smaller
/// than the configured minimum.
pub fn generate_passphrase<S>(
    source: &mut S,
    config: &PassphraseConfig,
    dictionary: &Dictionary,
) -> Result<Secret>
where
    S: EntropySource + ?Sized,
{
    let minimum = config.min_dictionary_size.max(1);
    if dictionary.len() < minimum {
        return Err(Error::DictionaryTooSmall {
            size: dictionary.len(),
            minimum,
        });
    }

    let mut tokens = Vec::with_capacity(config.word_count + 1);
    for _ in 0..config.word_count {
        let word = choose(source, dictionary.words())?.to_lowercase();
        tokens.push(if config.capitalize {
            capitalize_first(&word)
        } else {
            word
        });
    }

    if config.add_number {
        let number = sample(source, 0, PASSPHRASE_NUMBER_MAX)?;
        // `len() + 1` slots: before the first word through after the last.
        let at = sample_index(source, tokens.len() + 1)?;
        tokens.insert(at, number.to_string());
    }

    Ok(Secret(tokens.join(config.separator.as_str())))
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::ScriptedEntropy;
    use rand::rngs::OsRng;

    const POLICY: PassphrasePolicy = PassphrasePolicy {
        min_word_count: 5,
        max_word_count: 20,
        min_dictionary_size: 100,
    };

    fn dictionary(size: usize) -> Dictionary {
        let words = (0..size).map(word_for).collect::<Vec<_>>();
        let dict = Dictionary::new(&words);
        assert_eq!(dict.len(), size);
        dict
    }

    /// Distinct alphabetic word for every index: base-26 digits spelled with letters.
    fn word_for(mut i: usize) -> String {
        let mut word = String::from("kata");
        loop {
            word.push((b'a' + (i % 26) as u8) as char);
            i /= 26;
            if i == 0 {
                break word;
            }
        }
    }

    #[test]
    fn word_count_must_fit_policy() {
        for count in [0, 4, 21] {
            assert!(matches!(
                PassphraseConfig::new(count, Separator::Hyphen, &POLICY),
                Err(Error::WordCountOutOfBounds { .. })
            ));
        }
        let lenient = PassphrasePolicy {
            min_word_count: 0,
            ..POLICY
        };
        assert!(matches!(
            PassphraseConfig::new(0, Separator::Hyphen, &lenient),
            Err(Error::WordCountOutOfBounds { min: 1, .. })
        ));
    }

    #[test]
    fn plain_passphrase_structure() {
        let dict = dictionary(150);
        let config = PassphraseConfig::new(5, Separator::Hyphen, &POLICY).unwrap();
        for _ in 0..200 {
            let phrase = generate_passphrase(&mut OsRng, &config, &dict).unwrap();
            let tokens = phrase.as_str().split('-').collect::<Vec<_>>();
            assert_eq!(tokens.len(), 5);
            assert_eq!(phrase.as_str().matches('-').count(), 4);
            assert!(tokens.iter().all(|t| !t.is_empty() && dict.contains(t)));
            assert!(tokens.iter().all(|t| t.chars().all(char::is_lowercase)));
        }
    }

    #[test]
    fn every_word_is_capitalized() {
        let dict = dictionary(120);
        let config = PassphraseConfig::new(6, Separator::Space, &POLICY)
            .unwrap()
            .capitalize(true);
        for _ in 0..100 {
            let phrase = generate_passphrase(&mut OsRng, &config, &dict).unwrap();
            for token in phrase.as_str().split(' ') {
                let mut chars = token.chars();
                assert!(chars.next().unwrap().is_uppercase(), "{token}");
                assert!(chars.all(char::is_lowercase), "{token}");
                assert!(dict.contains(token));
            }
        }
    }

    #[test]
    fn number_is_inserted_once() {
        let dict = dictionary(100);
        let config = PassphraseConfig::new(5, Separator::Period, &POLICY)
            .unwrap()
            .add_number(true);
        for _ in 0..200 {
            let phrase = generate_passphrase(&mut OsRng, &config, &dict).unwrap();
            let tokens = phrase.as_str().split('.').collect::<Vec<_>>();
            assert_eq!(tokens.len(), 6);
            let numbers = tokens
                .iter()
                .filter_map(|t| t.parse::<u64>().ok())
                .collect::<Vec<_>>();
            assert_eq!(numbers.len(), 1);
            assert!(numbers[0] <= PASSPHRASE_NUMBER_MAX);
        }
    }

    #[test]
    fn number_position_follows_the_draw() {
        let dict = Dictionary::new(["alpha", "beta"]);
        let policy = PassphrasePolicy {
            min_word_count: 1,
            max_word_count: 4,
            min_dictionary_size: 2,
        };
        let config = PassphraseConfig::new(2, Separator::Underscore, &policy)
            .unwrap()
            .capitalize(true)
            .add_number(true);
        // Words: 1 -> beta, 0 -> alpha. Number: 0x00 0x2a -> 42. Slot 0 of 3.
        let mut source = ScriptedEntropy::new(&[1, 0, 0x00, 0x2a, 0]);
        let phrase = generate_passphrase(&mut source, &config, &dict).unwrap();
        assert_eq!(phrase.as_str(), "42_Beta_Alpha");
    }

    #[test]
    fn small_dictionary_is_refused() {
        let dict = dictionary(50);
        let config = PassphraseConfig::new(5, Separator::Hyphen, &POLICY).unwrap();
        assert!(matches!(
            generate_passphrase(&mut OsRng, &config, &dict),
            Err(Error::DictionaryTooSmall {
                size: 50,
                minimum: 100
            })
        ));
    }

    #[test]
    fn empty_dictionary_is_refused_even_without_a_minimum() {
        let policy = PassphrasePolicy {
            min_dictionary_size: 0,
            ..POLICY
        };
        let config = PassphraseConfig::new(5, Separator::Hyphen, &policy).unwrap();
        assert!(matches!(
            generate_passphrase(&mut OsRng, &config, &Dictionary::new(Vec::<String>::new())),
            Err(Error::DictionaryTooSmall { size: 0, minimum: 1 })
        ));
    }

    #[test]
    fn capitalizes_non_ascii() {
        assert_eq!(capitalize_first("ñandu"), "Ñandu");
        assert_eq!(capitalize_first(""), "");
    }
}
