use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The characters allowed between passphrase words.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Separator {
    Space,
    Hyphen,
    Underscore,
    Period,
    Comma,
    Slash,
    Plus,
    Equals,
    Exclamation,
    At,
    Hash,
    Dollar,
    Percent,
    Ampersand,
    Asterisk,
}

impl Separator {
    pub const ALL: [Separator; 15] = [
        Separator::Space,
        Separator::Hyphen,
        Separator::Underscore,
        Separator::Period,
        Separator::Comma,
        Separator::Slash,
        Separator::Plus,
        Separator::Equals,
        Separator::Exclamation,
        Separator::At,
        Separator::Hash,
        Separator::Dollar,
        Separator::Percent,
        Separator::Ampersand,
        Separator::Asterisk,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Space => " ",
            Separator::Hyphen => "-",
            Separator::Underscore => "_",
            Separator::Period => ".",
            Separator::Comma => ",",
            Separator::Slash => "/",
            Separator::Plus => "+",
            Separator::Equals => "=",
            Separator::Exclamation => "!",
            Separator::At => "@",
            Separator::Hash => "#",
            Separator::Dollar => "$",
            Separator::Percent => "%",
            Separator::Ampersand => "&",
            Separator::Asterisk => "*",
        }
    }

    /// Human-readable name, also accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Separator::Space => "space",
            Separator::Hyphen => "hyphen",
            Separator::Underscore => "underscore",
            Separator::Period => "period",
            Separator::Comma => "comma",
            Separator::Slash => "slash",
            Separator::Plus => "plus",
            Separator::Equals => "equals",
            Separator::Exclamation => "exclamation",
            Separator::At => "at",
            Separator::Hash => "hash",
            Separator::Dollar => "dollar",
            Separator::Percent => "percent",
            Separator::Ampersand => "ampersand",
            Separator::Asterisk => "asterisk",
        }
    }
}

impl FromStr for Separator {
    type Err = crate::Error;

    /// Accepts either the separator itself (`"-"`) or its name (`"hyphen"`, any case).
    fn from_str(s: &str) -> Result<Separator, crate::Error> {
        Separator::ALL
            .into_iter()
            .find(|sep| sep.as_str() == s || sep.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::Error::UnknownSeparator(s.to_owned()))
    }
}

impl TryFrom<String> for Separator {
    type Error = crate::Error;

    fn try_from(s: String) -> Result<Separator, crate::Error> {
        s.parse()
    }
}

impl From<Separator> for String {
    fn from(sep: Separator) -> String {
        sep.as_str().to_owned()
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
