//! Weight normalization and permutation bookkeeping

/// Range substituted when every value is equal
const FLAT_RANGE: f64 = 0.0001;

/// Linearly rescale `values` into `[min, max]`.
///
/// A single value maps to `max`.
pub fn normalize(values: &[f64], min: f64, max: f64) -> Vec<f64> {
    if values.len() == 1 {
        return vec![max];
    }

    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut range = hi - lo;
    if range == 0.0 {
        range = FLAT_RANGE;
    }

    values
        .iter()
        .map(|v| (v - lo) / range * (max - min) + min)
        .collect()
}

/// Stable sort of `target` by ascending `keys`.
///
/// Returns the sorted items together with the permutation: `permutation[k]`
/// is the original index of sorted item `k`. Mismatched or empty inputs
/// yield empty output.
pub fn unwind<K, T>(keys: &[K], target: &[T]) -> (Vec<T>, Vec<usize>)
where
    K: PartialOrd,
    T: Clone,
{
    if keys.is_empty() || keys.len() != target.len() {
        return (Vec::new(), Vec::new());
    }

    let mut permutation: Vec<usize> = (0..keys.len()).collect();
    permutation.sort_by(|&a, &b| {
        keys[a]
            .partial_cmp(&keys[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let sorted = permutation.iter().map(|&i| target[i].clone()).collect();
    (sorted, permutation)
}

/// Undo [`unwind`]: place sorted item `k` back at `permutation[k]`
pub fn rewind<T>(sorted: Vec<T>, permutation: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(sorted.len()).collect();
    for (item, &original) in sorted.into_iter().zip(permutation) {
        slots[original] = Some(item);
    }
    slots.into_iter().flatten().collect()
}
