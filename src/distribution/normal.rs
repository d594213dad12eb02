//! Diagonal multivariate Normal distribution.
//!
//! Each element of the parameter arrays is an independent univariate Normal,
//! so densities are products (log-densities are sums) over all elements.
//!
//! # Parameterizations
//!
//! ```text
//! Explicit:   N(μ, σ)                 μ, σ given directly
//! Softplus:   N(μ, softplus(ρ))       [ρ ; μ] stacked in one block
//! ```
//!
//! The softplus form is what a network's final layer emits in a VAE decoder:
//! the upper half of the rows is the raw pre-activation ρ, the lower half is
//! the mean. [`NormalDistribution::log_prob_backward`] returns its gradient
//! in that same stacked layout.
//!
//! # References
//!
//! - Kingma, D. P., & Welling, M. (2014). Auto-Encoding Variational Bayes.
//!   ICLR.

use crate::error::{NormError, Result};
use crate::traits::DenseArray;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// ln(2π)
const LOG_2PI: f64 = 1.837_877_066_409_345_5;

/// Inputs above this threshold make softplus return its argument unchanged.
///
/// `ln(1 + e^x) - x = ln(1 + e^-x) < 1e-15` past this point, below f64
/// resolution at that magnitude.
pub const SOFTPLUS_LINEAR_THRESHOLD: f64 = 35.0;

/// Saturating softplus: `ln(1 + e^x)`.
///
/// Sentinel handling:
/// - `x >= f64::MAX` (including `+inf`) and NaN map to exactly `1.0`
/// - `x <= -f64::MAX` (including `-inf`) maps to `0.0`
///
/// Large finite inputs are linear (`softplus(x) = x`) instead of overflowing.
///
/// # Example
///
/// ```
/// use normrecon::distribution::softplus;
///
/// assert!((softplus(0.0) - std::f64::consts::LN_2).abs() < 1e-12);
/// assert_eq!(softplus(f64::MAX), 1.0);
/// assert_eq!(softplus(f64::NEG_INFINITY), 0.0);
/// ```
#[must_use]
pub fn softplus(x: f64) -> f64 {
    if is_upper_sentinel(x) {
        1.0
    } else if x <= -f64::MAX {
        0.0
    } else if x > SOFTPLUS_LINEAR_THRESHOLD {
        x
    } else {
        x.exp().ln_1p()
    }
}

/// Derivative of softplus, the logistic sigmoid `1 / (1 + e^-x)`.
#[must_use]
pub fn softplus_derivative(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn is_upper_sentinel(x: f64) -> bool {
    x.is_nan() || x >= f64::MAX
}

fn is_sentinel(x: f64) -> bool {
    is_upper_sentinel(x) || x <= -f64::MAX
}

/// How a [`NormalDistribution`] obtained its standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Parameterization<A> {
    /// Mean and standard deviation were supplied directly.
    Explicit,
    /// Standard deviation is `softplus(pre_std_dev)` from a combined block.
    Softplus {
        /// Raw pre-activation values, same shape as the mean.
        pre_std_dev: A,
    },
}

/// Diagonal multivariate Normal distribution over a dense array.
///
/// # Example
///
/// ```
/// use normrecon::distribution::NormalDistribution;
/// use normrecon::primitives::Vector;
///
/// let dist = NormalDistribution::new(
///     Vector::from_slice(&[0.0, 0.0]),
///     Vector::from_slice(&[1.0, 1.0]),
/// ).expect("shapes match");
///
/// let lp = dist.log_probability(&Vector::from_slice(&[0.0, 0.0])).expect("shapes match");
/// assert!((lp + (2.0 * std::f64::consts::PI).ln()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalDistribution<A> {
    mean: A,
    std_deviation: A,
    parameterization: Parameterization<A>,
}

impl<A: DenseArray> NormalDistribution<A> {
    /// Creates a distribution from explicit mean and standard deviation.
    ///
    /// Standard deviations are expected to be strictly positive; this is not
    /// checked.
    ///
    /// # Errors
    ///
    /// Returns [`NormError::DimensionMismatch`] if the shapes differ.
    pub fn new(mean: A, std_deviation: A) -> Result<Self> {
        if mean.shape() != std_deviation.shape() {
            return Err(NormError::shape_mismatch(
                "mean",
                mean.shape(),
                std_deviation.shape(),
            ));
        }

        Ok(Self {
            mean,
            std_deviation,
            parameterization: Parameterization::Explicit,
        })
    }

    /// Creates a distribution from a combined `[pre_std_dev ; mean]` block.
    ///
    /// The first half of the rows is passed through [`softplus`] to give the
    /// standard deviation, the second half is the mean verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`NormError::InvalidParameterBlock`] if the row count is odd.
    pub fn from_combined(params: &A) -> Result<Self> {
        let (rows, cols) = params.shape();
        if rows % 2 != 0 {
            return Err(NormError::InvalidParameterBlock { rows });
        }

        let (pre_std_dev, mean) = params.split_rows(rows / 2)?;

        let mut saturated = 0usize;
        let std_deviation = pre_std_dev.map_elems(|x| {
            if is_sentinel(x) {
                saturated += 1;
            }
            softplus(x)
        });
        if saturated > 0 {
            warn!(
                saturated,
                "softplus hit sentinel pre-std-dev values; using fixed fallbacks"
            );
        }
        debug!(rows, cols, "normal distribution built from combined block");

        Ok(Self {
            mean,
            std_deviation,
            parameterization: Parameterization::Softplus { pre_std_dev },
        })
    }

    /// Per-element means.
    #[must_use]
    pub fn mean(&self) -> &A {
        &self.mean
    }

    /// Per-element standard deviations.
    #[must_use]
    pub fn std_deviation(&self) -> &A {
        &self.std_deviation
    }

    /// Raw pre-activation standard deviations, if built from a combined block.
    #[must_use]
    pub fn pre_std_dev(&self) -> Option<&A> {
        match &self.parameterization {
            Parameterization::Explicit => None,
            Parameterization::Softplus { pre_std_dev } => Some(pre_std_dev),
        }
    }

    /// Which construction path produced this distribution.
    #[must_use]
    pub fn parameterization(&self) -> &Parameterization<A> {
        &self.parameterization
    }

    /// Shape of a single observation.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.mean.shape()
    }

    /// Draws one observation: `σ ⊙ z + μ` with `z ~ N(0, I)`.
    ///
    /// # Errors
    ///
    /// Only fails if mean and standard deviation disagree in shape, which a
    /// constructor never produces (a hand-edited deserialized value can).
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<A> {
        let noise = self.mean.randn_like(rng);
        self.std_deviation
            .zip_elems(&noise, |s, z| s * z)?
            .zip_elems(&self.mean, |scaled, m| scaled + m)
    }

    /// Joint log-density of `observation`.
    ///
    /// ```text
    /// log p(x) = Σ -0.5 * (2 ln σ + ((μ - x) / σ)² + ln 2π)
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`NormError::DimensionMismatch`] if `observation` is not
    /// shaped like the mean.
    pub fn log_probability(&self, observation: &A) -> Result<f64> {
        let diff = self.centered(observation)?;
        let terms = diff.zip_elems(&self.std_deviation, |d, s| {
            2.0 * s.ln() + (d / s).powi(2) + LOG_2PI
        })?;
        Ok(-0.5 * terms.total())
    }

    /// Joint density of `observation`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::log_probability`].
    pub fn probability(&self, observation: &A) -> Result<f64> {
        Ok(self.log_probability(observation)?.exp())
    }

    /// Gradient of [`Self::log_probability`] w.r.t. the parameters.
    ///
    /// Returned as `[∂/∂σ ; ∂/∂μ]` stacked by rows, twice the rows of the
    /// mean:
    ///
    /// ```text
    /// ∂/∂σ = -0.5 * (2/σ - 2(μ - x)²/σ³)
    /// ∂/∂μ = -0.5 * (2(μ - x)/σ²)
    /// ```
    ///
    /// For the softplus parameterization the upper block is multiplied by
    /// `sigmoid(pre_std_dev)`, giving the gradient w.r.t. the raw combined
    /// block this distribution was built from.
    ///
    /// # Errors
    ///
    /// Returns [`NormError::DimensionMismatch`] if `observation` is not
    /// shaped like the mean.
    pub fn log_prob_backward(&self, observation: &A) -> Result<A> {
        let diff = self.centered(observation)?;

        let grad_std = diff.zip_elems(&self.std_deviation, |d, s| {
            -0.5 * (2.0 / s - 2.0 * d * d / s.powi(3))
        })?;
        let grad_mean = diff.zip_elems(&self.std_deviation, |d, s| -0.5 * (2.0 * d / (s * s)))?;

        let grad_std = match &self.parameterization {
            Parameterization::Explicit => grad_std,
            Parameterization::Softplus { pre_std_dev } => {
                grad_std.zip_elems(pre_std_dev, |g, p| g * softplus_derivative(p))?
            }
        };

        A::stack_rows(&grad_std, &grad_mean)
    }

    /// `μ - x`, shape-checked against the mean.
    fn centered(&self, observation: &A) -> Result<A> {
        if observation.shape() != self.mean.shape() {
            return Err(NormError::shape_mismatch(
                "observation",
                self.mean.shape(),
                observation.shape(),
            ));
        }
        self.mean.zip_elems(observation, |m, x| m - x)
    }
}

#[cfg(test)]
#[path = "normal_tests.rs"]
mod tests;
