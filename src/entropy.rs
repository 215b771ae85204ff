//! Where the randomness comes from.

use rand::{CryptoRng, RngCore};

/// A source of cryptographically secure random bytes.
///
/// Any `rand` generator that is both [`RngCore`] and [`CryptoRng`] qualifies, for example
/// [`rand::rngs::OsRng`]. Generators without the [`CryptoRng`] marker are not entropy sources.
pub trait EntropySource {
    /// Fill `buf` entirely with random bytes, or fail with [`crate::Error::EntropyUnavailable`].
    fn fill(&mut self, buf: &mut [u8]) -> crate::Result<()>;
}

impl<R> EntropySource for R
where
    R: RngCore + CryptoRng,
{
    fn fill(&mut self, buf: &mut [u8]) -> crate::Result<()> {
        self.try_fill_bytes(buf)
            .map_err(crate::Error::EntropyUnavailable)
    }
}

/// Replays a fixed byte script; used to drive the sampler through exact draws.
#[cfg(test)]
pub(crate) struct ScriptedEntropy {
    bytes: std::collections::VecDeque<u8>,
    pub(crate) consumed: usize,
}

#[cfg(test)]
impl ScriptedEntropy {
    pub(crate) fn new(bytes: &[u8]) -> ScriptedEntropy {
        ScriptedEntropy {
            bytes: bytes.iter().copied().collect(),
            consumed: 0,
        }
    }
}

#[cfg(test)]
impl EntropySource for ScriptedEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> crate::Result<()> {
        for b in buf.iter_mut() {
            *b = self.bytes.pop_front().ok_or_else(|| {
                crate::Error::EntropyUnavailable(rand::Error::new("script exhausted"))
            })?;
            self.consumed += 1;
        }
        Ok(())
    }
}
