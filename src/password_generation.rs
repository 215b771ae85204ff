//! Utilities for generating passwords.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::sampler::choose;
use crate::shuffle::shuffle;
use crate::{CharacterClass, EntropySource, Error, Result, Secret};

/// Longest password [`PasswordConfig`] accepts.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// What to do when the requested length is shorter than the number of selected classes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthPolicy {
    /// Generate at the smallest length that fits every class, and report the change through
    /// [`GeneratedPassword::adjusted_from`].
    #[default]
    Raise,
    /// Fail with [`Error::LengthBelowRequiredMinimum`].
    Reject,
}

/// A validated request for a symbol password.
#[derive(Clone, Debug)]
pub struct PasswordConfig {
    length: usize,
    classes: BTreeSet<CharacterClass>,
    length_policy: LengthPolicy,
}

impl PasswordConfig {
    /// Fails if no class is given, or if `length` is zero or above [`MAX_PASSWORD_LENGTH`].
    pub fn new(
        length: usize,
        classes: impl IntoIterator<Item = CharacterClass>,
    ) -> Result<PasswordConfig> {
        if length == 0 || length > MAX_PASSWORD_LENGTH {
            return Err(Error::LengthOutOfBounds {
                length,
                max: MAX_PASSWORD_LENGTH,
            });
        }
        let classes = classes.into_iter().collect::<BTreeSet<_>>();
        if classes.is_empty() {
            return Err(Error::NoCharacterClassSelected);
        }
        Ok(PasswordConfig {
            length,
            classes,
            length_policy: LengthPolicy::default(),
        })
    }

    pub fn with_length_policy(mut self, policy: LengthPolicy) -> PasswordConfig {
        self.length_policy = policy;
        self
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn classes(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        self.classes.iter().copied()
    }

    pub fn length_policy(&self) -> LengthPolicy {
        self.length_policy
    }

    /// The shortest password that can hold one character of every selected class.
    pub fn required_length(&self) -> usize {
        self.classes.len()
    }

    /// The length a password generated from this config will actually have.
    pub fn effective_length(&self) -> usize {
        self.length.max(self.required_length())
    }
}

/// A generated password, along with how its length relates to the one requested.
pub struct GeneratedPassword {
    secret: Secret,
    length: usize,
    requested_length: usize,
}

impl GeneratedPassword {
    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn into_secret(self) -> Secret {
        self.secret
    }

    /// Length of the password, in characters.
    pub fn length(&self) -> usize {
        self.length
    }

    /// The requested length, if the password had to be made longer than that.
    pub fn adjusted_from(&self) -> Option<usize> {
        if self.length != self.requested_length {
            Some(self.requested_length)
        } else {
            None
        }
    }
}

/// Generate a password containing at least one character of every class in `config`.
///
/// One character is drawn from each selected class, the remaining positions are drawn from the
/// union of all selected classes, and the whole sequence is then shuffled so the guaranteed
/// characters sit at random positions.
///
/// The result is uniform per class and then shuffled. It is not uniform over the set of all
/// strings that satisfy the class constraints, since small classes get a guaranteed slot in
/// proportion to their count rather than their size.
pub fn generate_password<S>(source: &mut S, config: &PasswordConfig) -> Result<GeneratedPassword>
where
    S: EntropySource + ?Sized,
{
    let required = config.required_length();
    if config.length < required {
        match config.length_policy {
            LengthPolicy::Reject => {
                return Err(Error::LengthBelowRequiredMinimum {
                    length: config.length,
                    required,
                })
            }
            LengthPolicy::Raise => tracing::warn!(
                requested = config.length,
                effective = required,
                "raised password length so every selected character class fits"
            ),
        }
    }
    let length = config.effective_length();

    let mut chars = Vec::with_capacity(length);
    let mut pool = Vec::new();
    for class in config.classes() {
        let candidates = class.characters().chars().collect::<Vec<_>>();
        chars.push(*choose(source, &candidates)?);
        pool.extend(candidates);
    }
    while chars.len() < length {
        chars.push(*choose(source, &pool)?);
    }

    let chars = shuffle(source, &chars)?;
    Ok(GeneratedPassword {
        secret: Secret(chars.into_iter().collect()),
        length,
        requested_length: config.length,
    })
}
