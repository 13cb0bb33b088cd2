//! The per-split noisy digit dataset.

use ndarray::{Array2, Axis};
use rand::Rng;
use tracing::debug;

use crate::config::{DatasetConfig, Split};
use crate::error::{DataError, DataResult};
use crate::select::{cap_balanced, cap_front, filter_by_digits, split_train_valid};
use crate::source::{DigitSource, RawDigits};

/// One dataset item: a preprocessed (and possibly noisy) image with its
/// re-indexed class label.
#[derive(Debug, Clone)]
pub struct Item {
    /// The image after transform, binarization, and noise.
    pub image: Array2<f32>,
    /// Position of the raw label within `digits_of_interest`.
    pub digit: usize,
}

/// A filtered, split, and optionally capped view of one digit pool.
///
/// Construction is eager: the pool is loaded, filtered to the digits of
/// interest, partitioned with the config seed, and capped once. Items are
/// produced lazily on access — preprocessing and noise run per call, and
/// noise entropy comes from the RNG the caller passes in, so reproducibility
/// is the caller's composition:
///
/// ```rust,ignore
/// use rand::SeedableRng;
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let item = dataset.item_with_rng(0, &mut rng)?;
/// ```
#[derive(Debug)]
pub struct NoisyDigits {
    pool: RawDigits,
    /// Rows of `pool` belonging to this split, in selection order.
    selected: Vec<usize>,
    /// Re-indexed label per selected row.
    digits: Vec<usize>,
    split: Split,
    config: DatasetConfig,
}

impl NoisyDigits {
    /// Load and select one split from a source.
    pub fn load(
        source: &dyn DigitSource,
        split: Split,
        config: &DatasetConfig,
    ) -> DataResult<Self> {
        config.validate()?;

        let pool = source.load(split.uses_train_pool())?;
        let filtered = filter_by_digits(&pool.labels, &config.digits_of_interest);
        let selected = if split.uses_train_pool() {
            let (train, valid) =
                split_train_valid(filtered, config.train_valid_split_ratio, config.seed);
            match split {
                Split::Train => train,
                _ => valid,
            }
        } else {
            filtered
        };

        let selected = match config.cap_for(split) {
            Some(cap) if config.balanced_caps => cap_balanced(
                &selected,
                &pool.labels,
                &config.digits_of_interest,
                cap,
                split.name(),
            ),
            Some(cap) => cap_front(selected, cap, split.name()),
            None => selected,
        };

        let digits = selected
            .iter()
            .map(|&row| {
                config
                    .digits_of_interest
                    .iter()
                    .position(|&d| d == pool.labels[row])
                    .unwrap_or_default()
            })
            .collect();

        debug!(
            source = source.name(),
            split = %split,
            n_items = selected.len(),
            noise = %config.noise,
            "constructed dataset split"
        );

        Ok(Self {
            pool,
            selected,
            digits,
            split,
            config: config.clone(),
        })
    }

    /// Number of items in this split.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// True if the split has no items.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// This dataset's split.
    pub fn split(&self) -> Split {
        self.split
    }

    /// The configuration this split was built with.
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Items per digit of interest, indexed by re-indexed label.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0_usize; self.config.digits_of_interest.len()];
        for &digit in &self.digits {
            counts[digit] += 1;
        }
        counts
    }

    /// Produce the item at `index`, drawing noise entropy from `rng`.
    ///
    /// Pipeline per access: raw pixels → transform → optional binarize →
    /// noise (iff the configured model is active). The label is the raw
    /// label's position within `digits_of_interest`.
    pub fn item_with_rng<R: Rng>(&self, index: usize, rng: &mut R) -> DataResult<Item> {
        let Some(&row) = self.selected.get(index) else {
            return Err(DataError::IndexOutOfRange {
                index,
                len: self.selected.len(),
            });
        };

        let raw = self.pool.images.index_axis(Axis(0), row);
        let mut image = self.config.transform.apply(raw);
        if self.config.binarize {
            let threshold = self.config.binarize_threshold;
            image = image.mapv_into(|p| if p > threshold { 1.0 } else { -1.0 });
        }
        if self.config.noise.is_active() {
            image = self.config.noise.apply(image, rng)?;
        }

        Ok(Item {
            image,
            digit: self.digits[index],
        })
    }

    /// [`item_with_rng`](Self::item_with_rng) with the thread-local RNG.
    /// Convenient, but not reproducible.
    pub fn item(&self, index: usize) -> DataResult<Item> {
        self.item_with_rng(index, &mut rand::thread_rng())
    }

    /// Iterate all items in order, sharing one RNG across the pass.
    pub fn iter_with_rng<'a, R: Rng>(
        &'a self,
        rng: &'a mut R,
    ) -> impl Iterator<Item = DataResult<Item>> + 'a {
        (0..self.len()).map(move |index| self.item_with_rng(index, rng))
    }
}

/// All three splits built from one source and config.
#[derive(Debug)]
pub struct SplitBundle {
    /// The train split.
    pub train: NoisyDigits,
    /// The valid split.
    pub valid: NoisyDigits,
    /// The test split.
    pub test: NoisyDigits,
}

impl SplitBundle {
    /// Build train, valid, and test from one configuration.
    pub fn load(source: &dyn DigitSource, config: &DatasetConfig) -> DataResult<Self> {
        Ok(Self {
            train: NoisyDigits::load(source, Split::Train, config)?,
            valid: NoisyDigits::load(source, Split::Valid, config)?,
            test: NoisyDigits::load(source, Split::Test, config)?,
        })
    }
}
