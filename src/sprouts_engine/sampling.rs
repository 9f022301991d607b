use crate::sprouts_engine::rng::SproutRng;

/// Return a shuffled copy of `items` (Fisher-Yates, last index down to 1).
///
/// One draw per swap position; slices of length 0 or 1 consume no draws.
pub fn shuffle<T: Clone>(rng: &mut SproutRng, items: &[T]) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.below(i as i64 + 1) as usize;
        shuffled.swap(i, j);
    }
    shuffled
}

/// Pick one element, or `None` for an empty slice (no draw is consumed then).
pub fn pick<'a, T>(rng: &mut SproutRng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let idx = rng.below(items.len() as i64) as usize;
    items.get(idx)
}
