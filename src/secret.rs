use serde::{Deserialize, Serialize};

/// A generated password or passphrase.
///
/// `Debug` output never shows the contents.
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(pub(crate) String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
