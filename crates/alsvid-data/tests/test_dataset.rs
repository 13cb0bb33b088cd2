//! End-to-end tests for split construction and item access.

use ndarray::Array3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use alsvid_data::{
    DataError, DatasetConfig, DigitSource, InMemorySource, NoiseModel, NoisyDigits, RawDigits,
    Split, SplitBundle,
};

/// A pool of 4×4 images whose top-left pixel encodes the row index and
/// whose labels cycle through `digits`.
fn synthetic_pool(n: usize, digits: &[u8]) -> RawDigits {
    let labels: Vec<u8> = (0..n).map(|i| digits[i % digits.len()]).collect();
    let images = Array3::from_shape_fn((n, 4, 4), |(row, r, c)| {
        if (r, c) == (0, 0) { row as u8 } else { 0 }
    });
    RawDigits { images, labels }
}

fn synthetic_source(n_train: usize, n_test: usize, digits: &[u8]) -> InMemorySource {
    InMemorySource::new(synthetic_pool(n_train, digits), synthetic_pool(n_test, digits))
}

fn plain_config(digits: Vec<u8>) -> DatasetConfig {
    DatasetConfig::default().with_digits(digits)
}

// ---------------------------------------------------------------------------
// Filtering and label re-indexing
// ---------------------------------------------------------------------------

#[test]
fn labels_are_reindexed_to_digit_positions() {
    let source = synthetic_source(60, 30, &[1, 5, 9, 2]);
    let config = plain_config(vec![1, 5, 9]);
    let test = NoisyDigits::load(&source, Split::Test, &config).unwrap();

    assert!(!test.is_empty());
    let mut rng = StdRng::seed_from_u64(0);
    for item in test.iter_with_rng(&mut rng) {
        let item = item.unwrap();
        assert!(item.digit < 3, "digit {} not re-indexed", item.digit);
    }
}

#[test]
fn test_split_keeps_all_filtered_rows() {
    let source = synthetic_source(40, 24, &[0, 1, 2]);
    let config = plain_config(vec![0, 2]);
    let test = NoisyDigits::load(&source, Split::Test, &config).unwrap();
    // 24 rows cycling 0/1/2 → 16 rows with label 0 or 2.
    assert_eq!(test.len(), 16);
}

// ---------------------------------------------------------------------------
// Train/valid partition
// ---------------------------------------------------------------------------

#[test]
fn train_valid_partition_is_seed_deterministic() {
    let source = synthetic_source(100, 10, &[0, 1]);
    let config = plain_config(vec![0, 1]).with_seed(11);

    let train_a = NoisyDigits::load(&source, Split::Train, &config).unwrap();
    let train_b = NoisyDigits::load(&source, Split::Train, &config).unwrap();
    let valid = NoisyDigits::load(&source, Split::Valid, &config).unwrap();

    assert_eq!(train_a.len(), train_b.len());
    assert_eq!(train_a.len() + valid.len(), 100);
    assert_eq!(train_a.len(), 90);

    // The row-index pixel identifies each item, so identical partitions
    // yield identical images at every position.
    let mut rng = StdRng::seed_from_u64(0);
    for i in 0..train_a.len() {
        let a = train_a.item_with_rng(i, &mut rng).unwrap();
        let b = train_b.item_with_rng(i, &mut rng).unwrap();
        assert_eq!(a.image[(0, 0)], b.image[(0, 0)]);
    }
}

#[test]
fn train_and_valid_are_disjoint() {
    let source = synthetic_source(50, 10, &[0, 1]);
    let config = plain_config(vec![0, 1]).with_split_ratio([0.8, 0.2]);

    let train = NoisyDigits::load(&source, Split::Train, &config).unwrap();
    let valid = NoisyDigits::load(&source, Split::Valid, &config).unwrap();

    let ids = |ds: &NoisyDigits| -> Vec<u8> {
        let mut rng2 = StdRng::seed_from_u64(0);
        (0..ds.len())
            .map(|i| ds.item_with_rng(i, &mut rng2).unwrap().image[(0, 0)])
            .map(|p| {
                // Invert the normalization to recover the row-index pixel.
                ((p * 0.3081 + 0.1307) * 255.0).round() as u8
            })
            .collect()
    };
    let train_ids = ids(&train);
    let valid_ids = ids(&valid);
    for id in &valid_ids {
        assert!(!train_ids.contains(id), "row {id} in both splits");
    }
    assert_eq!(train_ids.len() + valid_ids.len(), 50);
}

// ---------------------------------------------------------------------------
// Caps
// ---------------------------------------------------------------------------

#[test]
fn front_cap_truncates_split() {
    let source = synthetic_source(60, 30, &[0, 1]);
    let config = plain_config(vec![0, 1]).with_cap(Split::Test, 5);
    let test = NoisyDigits::load(&source, Split::Test, &config).unwrap();
    assert_eq!(test.len(), 5);
}

#[test]
fn balanced_cap_sums_exactly_with_last_digit_remainder() {
    let source = synthetic_source(90, 90, &[1, 5, 9]);
    let config = plain_config(vec![1, 5, 9])
        .with_cap(Split::Test, 10)
        .with_balanced_caps();
    let test = NoisyDigits::load(&source, Split::Test, &config).unwrap();

    assert_eq!(test.len(), 10);
    assert_eq!(test.class_counts(), vec![3, 3, 4]);
}

// ---------------------------------------------------------------------------
// Item access
// ---------------------------------------------------------------------------

#[test]
fn out_of_range_index_is_rejected() {
    let source = synthetic_source(20, 10, &[0]);
    let test = NoisyDigits::load(&source, Split::Test, &plain_config(vec![0])).unwrap();
    let err = test.item(test.len()).unwrap_err();
    assert!(matches!(
        err,
        DataError::IndexOutOfRange { index, len } if index == len
    ));
}

#[test]
fn noiseless_reads_are_bit_identical() {
    let source = synthetic_source(20, 10, &[0, 1]);
    let test = NoisyDigits::load(&source, Split::Test, &plain_config(vec![0, 1])).unwrap();

    let a = test.item(3).unwrap();
    let b = test.item(3).unwrap();
    assert_eq!(a.image, b.image);
    assert_eq!(a.digit, b.digit);
}

#[test]
fn noisy_reads_differ_but_seeded_reads_match() {
    let source = synthetic_source(20, 10, &[0, 1]);
    let config = plain_config(vec![0, 1]).with_noise(NoiseModel::Gaussian { std_dev: 0.5 });
    let test = NoisyDigits::load(&source, Split::Test, &config).unwrap();

    let mut rng = StdRng::seed_from_u64(5);
    let a = test.item_with_rng(0, &mut rng).unwrap();
    let b = test.item_with_rng(0, &mut rng).unwrap();
    assert_ne!(a.image, b.image);

    let c = test.item_with_rng(0, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(a.image, c.image);
}

#[test]
fn invalid_noise_strength_fails_at_construction() {
    let source = synthetic_source(20, 10, &[0]);
    let config =
        plain_config(vec![0]).with_noise(NoiseModel::SaltAndPepper { amount: 1.5 });
    let err = NoisyDigits::load(&source, Split::Test, &config).unwrap_err();
    assert!(matches!(err, DataError::InvalidNoiseStrength { .. }));
}

#[test]
fn binarize_maps_pixels_to_plus_minus_one() {
    let source = synthetic_source(20, 10, &[0]);
    let config = plain_config(vec![0]).with_binarize(0.0);
    let test = NoisyDigits::load(&source, Split::Test, &config).unwrap();

    let item = test.item(0).unwrap();
    assert!(item.image.iter().all(|&p| p == 1.0 || p == -1.0));
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

#[test]
fn bundle_builds_all_three_splits_with_one_config() {
    let source = synthetic_source(40, 12, &[0, 1]);
    let config = plain_config(vec![0, 1]).with_noise(NoiseModel::Speckle { std_dev: 0.1 });
    let bundle = SplitBundle::load(&source, &config).unwrap();

    assert_eq!(bundle.train.split(), Split::Train);
    assert_eq!(bundle.valid.split(), Split::Valid);
    assert_eq!(bundle.test.split(), Split::Test);
    assert_eq!(bundle.train.len() + bundle.valid.len(), 40);
    assert_eq!(bundle.test.len(), 12);
    // The configured noise model is carried into every split.
    assert_eq!(bundle.valid.config().noise, config.noise);
}

#[test]
fn source_name_is_exposed() {
    let source = synthetic_source(4, 2, &[0]);
    assert_eq!(source.name(), "in-memory");
}
