//! Per-access image noise models.
//!
//! Noise is regenerated on every application from the caller's RNG — never
//! cached — so two reads of the same item differ unless the caller reseeds.
//!
//! Strength semantics per model:
//! - Gaussian: standard deviation of additive noise
//! - SaltAndPepper: fraction of pixels driven to an extreme (half salt, half pepper)
//! - Poisson: percentage factor scaling the shot-noise rate, in [0, 1]
//! - Speckle: standard deviation of multiplicative noise

use std::fmt;

use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, Poisson, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// A closed set of noise models with their strength parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NoiseModel {
    /// No noise; images pass through untouched.
    None,
    /// Additive Gaussian noise: `p + std_dev · N(0,1)`.
    Gaussian {
        /// Standard deviation of the additive noise.
        std_dev: f64,
    },
    /// Salt-and-pepper noise: pixels driven to 1.0 or 0.0 at random.
    SaltAndPepper {
        /// Fraction of pixels affected, in [0, 1]; half salt, half pepper.
        amount: f64,
    },
    /// Poisson (shot) noise with a percentage strength factor.
    Poisson {
        /// Strength in [0, 1]; 1.0 degenerates to pure noise.
        strength: f64,
    },
    /// Multiplicative speckle noise: `p + p · std_dev · N(0,1)`.
    Speckle {
        /// Standard deviation of the multiplicative noise.
        std_dev: f64,
    },
}

impl NoiseModel {
    /// Parse a model from its lowercase name plus a shared strength value,
    /// mirroring the `(noise, std_dev)` pair of research configs.
    pub fn from_name(name: &str, std_dev: f64) -> DataResult<Self> {
        match name {
            "none" => Ok(NoiseModel::None),
            "gaussian" => Ok(NoiseModel::Gaussian { std_dev }),
            "saltandpepper" => Ok(NoiseModel::SaltAndPepper { amount: std_dev }),
            "poisson" => Ok(NoiseModel::Poisson { strength: std_dev }),
            "speckle" => Ok(NoiseModel::Speckle { std_dev }),
            other => Err(DataError::UnknownNoiseModel {
                name: other.to_string(),
            }),
        }
    }

    /// The model's name.
    pub fn name(&self) -> &'static str {
        match self {
            NoiseModel::None => "none",
            NoiseModel::Gaussian { .. } => "gaussian",
            NoiseModel::SaltAndPepper { .. } => "saltandpepper",
            NoiseModel::Poisson { .. } => "poisson",
            NoiseModel::Speckle { .. } => "speckle",
        }
    }

    /// The strength parameter, 0.0 for `None`.
    pub fn strength(&self) -> f64 {
        match *self {
            NoiseModel::None => 0.0,
            NoiseModel::Gaussian { std_dev } | NoiseModel::Speckle { std_dev } => std_dev,
            NoiseModel::SaltAndPepper { amount } => amount,
            NoiseModel::Poisson { strength } => strength,
        }
    }

    /// True if applying this model changes the image.
    pub fn is_active(&self) -> bool {
        self.strength() > 0.0
    }

    /// Check the strength is in range for this model.
    ///
    /// Salt-and-pepper and Poisson strengths are percentages and must lie in
    /// [0, 1]; Gaussian and speckle accept any non-negative deviation.
    pub fn validate(&self) -> DataResult<()> {
        match *self {
            NoiseModel::SaltAndPepper { amount } if !(0.0..=1.0).contains(&amount) => {
                Err(DataError::InvalidNoiseStrength {
                    model: "saltandpepper",
                    strength: amount,
                })
            }
            NoiseModel::Poisson { strength } if !(0.0..=1.0).contains(&strength) => {
                Err(DataError::InvalidNoiseStrength {
                    model: "poisson",
                    strength,
                })
            }
            NoiseModel::Gaussian { std_dev } | NoiseModel::Speckle { std_dev }
                if std_dev < 0.0 =>
            {
                Err(DataError::InvalidNoiseStrength {
                    model: self.name(),
                    strength: std_dev,
                })
            }
            _ => Ok(()),
        }
    }

    /// Apply this model to an image, drawing fresh entropy from `rng`.
    pub fn apply<R: Rng>(&self, image: Array2<f32>, rng: &mut R) -> DataResult<Array2<f32>> {
        self.validate()?;
        match *self {
            NoiseModel::None => Ok(image),
            NoiseModel::Gaussian { std_dev } => {
                let std = std_dev as f32;
                Ok(image.mapv_into(|p| {
                    let n: f32 = rng.sample(StandardNormal);
                    p + std * n
                }))
            }
            NoiseModel::SaltAndPepper { amount } => {
                // Independent salt and pepper masks per pixel; when both hit,
                // pepper is applied last and wins.
                let half = amount / 2.0;
                Ok(image.mapv_into(|p| {
                    let salt = rng.r#gen::<f64>() < half;
                    let pepper = rng.r#gen::<f64>() < half;
                    if pepper {
                        0.0
                    } else if salt {
                        1.0
                    } else {
                        p
                    }
                }))
            }
            NoiseModel::Poisson { strength } => Ok(apply_poisson(image, strength, rng)),
            NoiseModel::Speckle { std_dev } => {
                let std = std_dev as f32;
                Ok(image.mapv_into(|p| {
                    let n: f32 = rng.sample(StandardNormal);
                    p + p * std * n
                }))
            }
        }
    }
}

impl fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.strength())
    }
}

/// Poisson shot noise at a percentage strength in (0, 1].
///
/// The image is scaled by `(100 - pct) / pct`, shifted above zero, used as
/// the per-pixel Poisson rate, then shifted and scaled back. At strength 1
/// the scale is 0 and the signal term vanishes: the image degenerates to
/// zeros rather than dividing by zero.
fn apply_poisson<R: Rng>(image: Array2<f32>, strength: f64, rng: &mut R) -> Array2<f32> {
    let pct = 100.0 * strength;
    let scale = ((100.0 - pct) / pct) as f32;
    if scale == 0.0 {
        return Array2::zeros(image.dim());
    }

    let scaled = image.mapv_into(|p| p * scale);
    let floor = scaled.iter().fold(0.0_f32, |m, &v| m.min(v));
    let noisy = scaled.mapv_into(|p| {
        let rate = f64::from(p - floor);
        let draw = if rate > 0.0 {
            Poisson::new(rate).map(|d| d.sample(rng)).unwrap_or(0.0)
        } else {
            0.0
        };
        draw as f32 + floor
    });
    noisy.mapv_into(|p| p / scale)
}
