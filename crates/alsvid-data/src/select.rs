//! Row-selection pipeline: filter → split → cap.
//!
//! Each stage is a pure function over index vectors into the raw pool, so
//! split membership and cap behavior can be tested without any pixel data.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::warn;

/// Indices of rows whose label is in `digits`, in pool order.
pub(crate) fn filter_by_digits(labels: &[u8], digits: &[u8]) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter(|(_, label)| digits.contains(label))
        .map(|(idx, _)| idx)
        .collect()
}

/// Deterministically partition a pool into (train, valid) segments.
///
/// The pool is shuffled with a generator seeded from `seed`, then cut at
/// `trunc(ratio[0] · n)`: train takes the front segment, valid the back.
/// Same seed and pool size give the same partition on every run.
pub(crate) fn split_train_valid(
    mut pool: Vec<usize>,
    ratio: [f64; 2],
    seed: u64,
) -> (Vec<usize>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    pool.shuffle(&mut rng);
    let boundary = (ratio[0] * pool.len() as f64) as usize;
    let valid = pool.split_off(boundary);
    (pool, valid)
}

/// Truncate to the first `cap` rows.
pub(crate) fn cap_front(mut selected: Vec<usize>, cap: usize, split: &str) -> Vec<usize> {
    if selected.len() > cap {
        warn!(split, cap, full = selected.len(), "using only the front images of this split");
        selected.truncate(cap);
    }
    selected
}

/// Select up to `cap` rows with equal per-class quotas.
///
/// Each digit gets `cap / n_digits` slots; the last digit in `digits`
/// absorbs the remainder so the quotas sum to `cap` exactly. Candidates are
/// scanned in their current order, skipping digits whose quota is filled.
pub(crate) fn cap_balanced(
    selected: &[usize],
    labels: &[u8],
    digits: &[u8],
    cap: usize,
    split: &str,
) -> Vec<usize> {
    let n_digits = digits.len();
    let base_quota = cap / n_digits;
    let quota_for = |digit: u8| -> usize {
        if digits.last() == Some(&digit) {
            cap - (n_digits - 1) * base_quota
        } else {
            base_quota
        }
    };

    let mut counts = vec![0_usize; n_digits];
    let mut kept = Vec::with_capacity(cap);
    for &row in selected {
        let label = labels[row];
        let Some(pos) = digits.iter().position(|&d| d == label) else {
            continue;
        };
        if counts[pos] < quota_for(label) {
            kept.push(row);
            counts[pos] += 1;
        }
    }
    if kept.len() < selected.len() {
        warn!(split, cap, full = selected.len(), "using a class-balanced subset of this split");
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_keeps_pool_order() {
        let labels = [5, 1, 9, 1, 3, 5];
        assert_eq!(filter_by_digits(&labels, &[1, 5]), vec![0, 1, 3, 5]);
        assert!(filter_by_digits(&labels, &[7]).is_empty());
    }

    #[test]
    fn split_is_deterministic_per_seed() {
        let pool: Vec<usize> = (0..100).collect();
        let (t1, v1) = split_train_valid(pool.clone(), [0.9, 0.1], 42);
        let (t2, v2) = split_train_valid(pool.clone(), [0.9, 0.1], 42);
        assert_eq!(t1, t2);
        assert_eq!(v1, v2);

        let (t3, _) = split_train_valid(pool, [0.9, 0.1], 43);
        assert_ne!(t1, t3);
    }

    #[test]
    fn split_partitions_the_pool() {
        let pool: Vec<usize> = (0..50).collect();
        let (train, valid) = split_train_valid(pool, [0.8, 0.2], 7);
        assert_eq!(train.len(), 40);
        assert_eq!(valid.len(), 10);
        let mut all: Vec<usize> = train.iter().chain(&valid).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn split_boundary_truncates() {
        let pool: Vec<usize> = (0..7).collect();
        let (train, valid) = split_train_valid(pool, [0.95, 0.05], 1);
        // trunc(0.95 · 7) = 6
        assert_eq!(train.len(), 6);
        assert_eq!(valid.len(), 1);
    }

    #[test]
    fn cap_front_truncates() {
        let selected = vec![4, 2, 9, 1];
        assert_eq!(cap_front(selected.clone(), 2, "train"), vec![4, 2]);
        assert_eq!(cap_front(selected.clone(), 10, "train"), selected);
    }

    #[test]
    fn balanced_cap_gives_last_digit_the_remainder() {
        // cap 10 over 3 digits: quotas 3 / 3 / 4.
        let labels: Vec<u8> = [1, 5, 9].iter().copied().cycle().take(30).collect();
        let selected: Vec<usize> = (0..30).collect();
        let kept = cap_balanced(&selected, &labels, &[1, 5, 9], 10, "train");
        assert_eq!(kept.len(), 10);
        let count = |d: u8| kept.iter().filter(|&&r| labels[r] == d).count();
        assert_eq!(count(1), 3);
        assert_eq!(count(5), 3);
        assert_eq!(count(9), 4);
    }

    #[test]
    fn balanced_cap_scans_in_order_and_skips_full_classes() {
        let labels = [1_u8, 1, 1, 5, 1, 5];
        let selected: Vec<usize> = (0..6).collect();
        let kept = cap_balanced(&selected, &labels, &[1, 5], 4, "valid");
        // Quota 2 each: rows 0, 1 fill digit 1, then 3, 5 fill digit 5.
        assert_eq!(kept, vec![0, 1, 3, 5]);
    }

    #[test]
    fn balanced_cap_short_class_undershoots() {
        // Only one row of digit 5: its quota cannot be filled.
        let labels = [1_u8, 1, 1, 5];
        let selected: Vec<usize> = (0..4).collect();
        let kept = cap_balanced(&selected, &labels, &[1, 5], 4, "test");
        assert_eq!(kept, vec![0, 1, 3]);
    }
}
