//! Dataset configuration: splits, digit subsets, caps, and noise.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};
use crate::noise::NoiseModel;
use crate::transform::ImageTransform;

/// The three dataset partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// Front segment of the seeded train-pool partition.
    Train,
    /// Back segment of the seeded train-pool partition.
    Valid,
    /// The provider's designated test rows, used directly.
    Test,
}

impl Split {
    /// The split's lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Valid => "valid",
            Split::Test => "test",
        }
    }

    /// True if this split draws from the provider's training pool.
    pub fn uses_train_pool(self) -> bool {
        matches!(self, Split::Train | Split::Valid)
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Split {
    type Err = DataError;

    fn from_str(s: &str) -> DataResult<Self> {
        match s {
            "train" => Ok(Split::Train),
            "valid" => Ok(Split::Valid),
            "test" => Ok(Split::Test),
            other => Err(DataError::UnknownSplit {
                name: other.to_string(),
            }),
        }
    }
}

/// Immutable dataset configuration shared by all three splits.
///
/// Construct with [`DatasetConfig::default`] and refine with the `with_*`
/// builders:
///
/// ```rust
/// use alsvid_data::{DatasetConfig, NoiseModel};
///
/// let config = DatasetConfig::default()
///     .with_digits(vec![3, 6])
///     .with_noise(NoiseModel::Gaussian { std_dev: 0.3 })
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Class labels retained and re-indexed, in listed order.
    pub digits_of_interest: Vec<u8>,
    /// Fractions of the filtered train pool going to train and valid.
    pub train_valid_split_ratio: [f64; 2],
    /// Noise model applied on every item access.
    pub noise: NoiseModel,
    /// Map pixels to ±1.0 around `binarize_threshold`.
    pub binarize: bool,
    /// Threshold for binarization (defaults to the normalization mean).
    pub binarize_threshold: f32,
    /// Optional cap on train items.
    pub n_train_samples: Option<usize>,
    /// Optional cap on valid items.
    pub n_valid_samples: Option<usize>,
    /// Optional cap on test items.
    pub n_test_samples: Option<usize>,
    /// Fill caps with equal per-class quotas instead of truncating.
    pub balanced_caps: bool,
    /// Pixel preprocessing applied before binarization and noise.
    pub transform: ImageTransform,
    /// Seed for the deterministic train/valid partition.
    pub seed: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            digits_of_interest: (0..10).collect(),
            train_valid_split_ratio: [0.9, 0.1],
            noise: NoiseModel::None,
            binarize: false,
            binarize_threshold: 0.1307,
            n_train_samples: None,
            n_valid_samples: None,
            n_test_samples: None,
            balanced_caps: false,
            transform: ImageTransform::default(),
            seed: 42,
        }
    }
}

impl DatasetConfig {
    /// Set the digit subset, kept in listed order for label re-indexing.
    #[must_use]
    pub fn with_digits(mut self, digits: Vec<u8>) -> Self {
        self.digits_of_interest = digits;
        self
    }

    /// Set the train/valid split fractions.
    #[must_use]
    pub fn with_split_ratio(mut self, ratio: [f64; 2]) -> Self {
        self.train_valid_split_ratio = ratio;
        self
    }

    /// Set the noise model.
    #[must_use]
    pub fn with_noise(mut self, noise: NoiseModel) -> Self {
        self.noise = noise;
        self
    }

    /// Enable binarization around the given threshold.
    #[must_use]
    pub fn with_binarize(mut self, threshold: f32) -> Self {
        self.binarize = true;
        self.binarize_threshold = threshold;
        self
    }

    /// Cap the number of items in one split.
    #[must_use]
    pub fn with_cap(mut self, split: Split, n: usize) -> Self {
        match split {
            Split::Train => self.n_train_samples = Some(n),
            Split::Valid => self.n_valid_samples = Some(n),
            Split::Test => self.n_test_samples = Some(n),
        }
        self
    }

    /// Fill caps with equal per-class quotas.
    #[must_use]
    pub fn with_balanced_caps(mut self) -> Self {
        self.balanced_caps = true;
        self
    }

    /// Set the pixel preprocessing chain.
    #[must_use]
    pub fn with_transform(mut self, transform: ImageTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the partition seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The cap configured for one split, if any.
    pub fn cap_for(&self, split: Split) -> Option<usize> {
        match split {
            Split::Train => self.n_train_samples,
            Split::Valid => self.n_valid_samples,
            Split::Test => self.n_test_samples,
        }
    }

    /// Check digit set, split ratio, and noise strength.
    pub fn validate(&self) -> DataResult<()> {
        if self.digits_of_interest.is_empty() {
            return Err(DataError::EmptyDigitSet);
        }
        for (i, &digit) in self.digits_of_interest.iter().enumerate() {
            if self.digits_of_interest[..i].contains(&digit) {
                return Err(DataError::DuplicateDigit { digit });
            }
        }
        let ratio = self.train_valid_split_ratio;
        let in_range = ratio.iter().all(|r| (0.0..=1.0).contains(r));
        if !in_range || (ratio[0] + ratio[1] - 1.0).abs() > 1e-9 {
            return Err(DataError::InvalidSplitRatio { ratio });
        }
        self.noise.validate()
    }
}
