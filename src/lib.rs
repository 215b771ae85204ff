//! Unbiased, cryptographically secure password and passphrase generation.
//!
//! Every generator draws from an [`EntropySource`] through the rejection sampler in [`sampler`],
//! so no output is skewed by modulo bias. The generators are plain functions: they take an
//! explicit entropy source and a validated configuration, and hand back a [`Secret`] that the
//! library keeps no copy of.

mod charset;
mod dictionary;
pub mod entropy;
pub mod passphrase_generation;
pub mod password_generation;
pub mod sampler;
mod secret;
mod separator;
pub mod shuffle;

pub use charset::CharacterClass;
pub use dictionary::Dictionary;
pub use entropy::EntropySource;
pub use passphrase_generation::{generate_passphrase, PassphraseConfig, PassphrasePolicy};
pub use password_generation::{generate_password, GeneratedPassword, LengthPolicy, PasswordConfig};
pub use secret::Secret;
pub use separator::Separator;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid range: the minimum ({min}) is greater than the maximum ({max})")]
    InvalidRange { min: u64, max: u64 },
    #[error("cannot choose an element from an empty sequence")]
    EmptySequence,
    #[error("the secure entropy source is unavailable: {0}")]
    EntropyUnavailable(#[source] rand::Error),
    #[error("no character class selected; select at least one")]
    NoCharacterClassSelected,
    #[error(
        "a password of length {length} cannot include all {required} selected character classes"
    )]
    LengthBelowRequiredMinimum { length: usize, required: usize },
    #[error("password length {length} is outside the allowed range 1..={max}")]
    LengthOutOfBounds { length: usize, max: usize },
    #[error("word count {count} is outside the allowed range {min}..={max}")]
    WordCountOutOfBounds { count: usize, min: usize, max: usize },
    #[error("the word list has {size} unique words, but at least {minimum} are required")]
    DictionaryTooSmall { size: usize, minimum: usize },
    #[error("{0:?} is not an allowed separator")]
    UnknownSeparator(String),
}
