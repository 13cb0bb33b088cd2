//! `alsvid-data` — noisy digit-image dataset pipeline.
//!
//! Wraps a base digit-classification pool behind the [`DigitSource`] seam
//! and turns it into per-split datasets through a fixed pipeline:
//!
//!   load → filter-by-digits → deterministic train/valid split → optional cap
//!
//! Items are produced lazily; preprocessing, binarization, and one of four
//! noise models run on every access, with noise entropy drawn from a
//! caller-supplied RNG.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use alsvid_data::{DatasetConfig, IdxSource, NoiseModel, NoisyDigits, Split};
//!
//! let source = IdxSource::new("data/mnist");
//! let config = DatasetConfig::default()
//!     .with_digits(vec![3, 6])
//!     .with_noise(NoiseModel::Gaussian { std_dev: 0.3 });
//! let train = NoisyDigits::load(&source, Split::Train, &config)?;
//! let item = train.item(0)?;
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod noise;
mod select;
pub mod source;
pub mod transform;

pub use config::{DatasetConfig, Split};
pub use dataset::{Item, NoisyDigits, SplitBundle};
pub use error::{DataError, DataResult};
pub use noise::NoiseModel;
pub use source::{DigitSource, IdxSource, InMemorySource, RawDigits};
pub use transform::{ImageTransform, ResizeMode};
