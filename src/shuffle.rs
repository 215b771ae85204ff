use crate::sampler::sample;
use crate::{EntropySource, Result};

/// Return a uniformly random permutation of `items`, leaving `items` untouched.
///
/// Fisher-Yates: walk from the last position down to 1, swapping each position with one drawn
/// uniformly from the positions at or before it. Uniformity rests on [`sample`] being unbiased.
pub fn shuffle<T, S>(source: &mut S, items: &[T]) -> Result<Vec<T>>
where
    T: Clone,
    S: EntropySource + ?Sized,
{
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = sample(source, 0, i as u64)? as usize;
        shuffled.swap(i, j);
    }
    Ok(shuffled)
}
