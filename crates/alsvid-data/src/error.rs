//! Error types for the data crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by dataset configuration, loading, and access.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DataError {
    /// The digit-of-interest set is empty.
    #[error("digits_of_interest must not be empty")]
    EmptyDigitSet,

    /// A digit appears more than once in the digit-of-interest set.
    #[error("digit {digit} listed more than once in digits_of_interest")]
    DuplicateDigit {
        /// The repeated digit.
        digit: u8,
    },

    /// The train/valid split fractions do not sum to 1.
    #[error("train/valid split ratio [{}, {}] must sum to 1", ratio[0], ratio[1])]
    InvalidSplitRatio {
        /// The offending fractions.
        ratio: [f64; 2],
    },

    /// A noise strength is outside its valid range.
    #[error("{model} noise strength {strength} out of range (must be between 0 and 1)")]
    InvalidNoiseStrength {
        /// Noise model name.
        model: &'static str,
        /// The offending strength.
        strength: f64,
    },

    /// An item index is out of bounds for this split.
    #[error("index {index} out of range for dataset of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of items in the split.
        len: usize,
    },

    /// An unrecognised split name.
    #[error("unknown split {name:?} (expected train, valid, or test)")]
    UnknownSplit {
        /// The offending name.
        name: String,
    },

    /// An unrecognised noise-model name.
    #[error("unknown noise model {name:?} (expected none, gaussian, saltandpepper, poisson, or speckle)")]
    UnknownNoiseModel {
        /// The offending name.
        name: String,
    },

    /// A dataset file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An IDX file has a bad magic number or inconsistent header.
    #[error("malformed IDX file {path}: {message}")]
    MalformedIdx {
        /// The offending file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },
}

/// Result type for dataset operations.
pub type DataResult<T> = Result<T, DataError>;
