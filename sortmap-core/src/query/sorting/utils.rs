//! Utility functions for sorting operations

use std::cmp::Ordering;

/// Reorder items in place based on the given indices
///
/// Each entry of `indices` names the element of the original slice that
/// should end up at that position. The permutation is applied cycle by
/// cycle with swaps, so items never need to be cloned.
pub fn reorder_by_indices<T>(items: &mut [T], mut indices: Vec<usize>) {
    debug_assert_eq!(
        items.len(),
        indices.len(),
        "Indices length must match items length"
    );

    for start in 0..items.len() {
        if indices[start] == start {
            continue;
        }

        let mut current = start;
        loop {
            let next = indices[current];
            debug_assert!(next < items.len(), "Index out of bounds");
            indices[current] = current;
            if next == start {
                break;
            }
            items.swap(current, next);
            current = next;
        }
    }
}

/// Stable sort permutation of `keys` under `compare`
pub fn sorted_indices<K, F>(keys: &[K], mut compare: F) -> Vec<usize>
where
    F: FnMut(&K, &K) -> Ordering,
{
    let mut indices: Vec<usize> = (0..keys.len()).collect();
    indices.sort_by(|&a, &b| compare(&keys[a], &keys[b]));
    indices
}

/// Whether `keys` is already in `compare` order, so a stable sort would
/// leave it untouched
pub fn is_sorted_by<K, F>(keys: &[K], mut compare: F) -> bool
where
    F: FnMut(&K, &K) -> Ordering,
{
    keys.windows(2)
        .all(|pair| compare(&pair[0], &pair[1]).is_le())
}
