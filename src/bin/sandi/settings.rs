//! Generator defaults, optionally read from a YAML file.
//!
//! Every field has a recommended value, so a settings file only needs the keys it changes:
//!
//! ```yaml
//! password:
//!   length: 24
//!   symbols: false
//! passphrase:
//!   words: 6
//!   separator: space
//!   wordlist: /usr/share/dict/kata.txt
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use sandi::{CharacterClass, LengthPolicy, PassphrasePolicy, Separator};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    pub password: PasswordSettings,
    pub passphrase: PassphraseSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct PasswordSettings {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
    pub length_policy: LengthPolicy,
}

impl Default for PasswordSettings {
    fn default() -> PasswordSettings {
        PasswordSettings {
            length: 16,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
            length_policy: LengthPolicy::Raise,
        }
    }
}

impl PasswordSettings {
    pub fn classes(&self) -> Vec<CharacterClass> {
        [
            (self.uppercase, CharacterClass::Uppercase),
            (self.lowercase, CharacterClass::Lowercase),
            (self.digits, CharacterClass::Digits),
            (self.symbols, CharacterClass::Symbols),
        ]
        .into_iter()
        .filter_map(|(enabled, class)| enabled.then_some(class))
        .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct PassphraseSettings {
    pub words: usize,
    pub min_words: usize,
    pub max_words: usize,
    pub min_dictionary_size: usize,
    pub separator: Separator,
    pub capitalize: bool,
    pub add_number: bool,
    /// Word list to use instead of the bundled one.
    pub wordlist: Option<PathBuf>,
}

impl Default for PassphraseSettings {
    fn default() -> PassphraseSettings {
        PassphraseSettings {
            words: 5,
            min_words: 5,
            max_words: 20,
            min_dictionary_size: 100,
            separator: Separator::Hyphen,
            capitalize: false,
            add_number: false,
            wordlist: None,
        }
    }
}

impl PassphraseSettings {
    pub fn policy(&self) -> PassphrasePolicy {
        PassphrasePolicy {
            min_word_count: self.min_words,
            max_word_count: self.max_words,
            min_dictionary_size: self.min_dictionary_size,
        }
    }
}

impl Settings {
    /// Read settings from `path`, or use the recommended defaults when there is no file.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Settings> {
        let path = match path {
            Some(p) => p,
            None => return Ok(Settings::default()),
        };
        let file = File::open(path)
            .with_context(|| format!("failed to open settings file {}", path.display()))?;
        let settings = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse settings file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }
}
