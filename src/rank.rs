use std::collections::HashMap;
use std::hash::BuildHasher;

/// Top `n` entries by count, highest first. Equal counts are ordered by key so
/// repeated runs agree; `None` keys come first among equals.
pub fn top_by_count<K: Ord, S: BuildHasher>(
    counts: HashMap<K, usize, S>,
    n: usize,
) -> Vec<(K, usize)> {
    let mut ranked: Vec<(K, usize)> = counts.into_iter().collect();
    ranked.sort_unstable_by(|(ka, ca), (kb, cb)| cb.cmp(ca).then_with(|| ka.cmp(kb)));
    ranked.truncate(n);
    ranked
}
