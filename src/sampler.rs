//! Uniform integers from raw entropy.
//!
//! Reducing a random byte string modulo a range that does not evenly divide the byte space
//! favours the low values of the range. [`sample`] avoids that by rejection: draws that land in
//! the incomplete top window are thrown away and redrawn, so every accepted draw maps onto the
//! range the same number of ways.

use crate::{EntropySource, Error, Result};

/// The widest draw, in bytes, the sampler ever makes; enough for the full `u64` span.
const MAX_DRAW_BYTES: usize = 8;

/// Draw an integer uniformly from the inclusive range `[min, max]`.
///
/// When `min == max` no entropy is consumed. Each draw accepts with probability above one half,
/// so the expected number of draws is below two for every range.
pub fn sample<S>(source: &mut S, min: u64, max: u64) -> Result<u64>
where
    S: EntropySource + ?Sized,
{
    if min > max {
        return Err(Error::InvalidRange { min, max });
    }
    if min == max {
        return Ok(min);
    }

    let range = u128::from(max - min) + 1;
    let width = draw_width(range);
    let space = 1u128 << (8 * width);
    // Largest multiple of `range` that fits in `width` bytes; draws at or above it are biased.
    let limit = space - space % range;

    let mut buf = [0u8; MAX_DRAW_BYTES];
    let draw = &mut buf[..width];
    let mut rejected = 0u32;
    loop {
        source.fill(draw)?;
        let value = draw
            .iter()
            .fold(0u128, |acc, &byte| (acc << 8) | u128::from(byte));
        if value < limit {
            if rejected > 0 {
                tracing::trace!(range = %range, rejected, "redrew out-of-window samples");
            }
            // `value % range < range`, so this fits and cannot pass `max`.
            return Ok(min + (value % range) as u64);
        }
        rejected += 1;
    }
}

/// Draw an index uniformly from `[0, len)`.
pub fn sample_index<S>(source: &mut S, len: usize) -> Result<usize>
where
    S: EntropySource + ?Sized,
{
    let max = len.checked_sub(1).ok_or(Error::EmptySequence)?;
    Ok(sample(source, 0, max as u64)? as usize)
}

/// Pick one element of `items` uniformly.
pub fn choose<'a, T, S>(source: &mut S, items: &'a [T]) -> Result<&'a T>
where
    S: EntropySource + ?Sized,
{
    let index = sample_index(source, items.len())?;
    Ok(&items[index])
}

/// Fewest bytes whose value space covers `range`, never less than one.
fn draw_width(range: u128) -> usize {
    let mut width = 1;
    while width < MAX_DRAW_BYTES && (1u128 << (8 * width)) < range {
        width += 1;
    }
    width
}
