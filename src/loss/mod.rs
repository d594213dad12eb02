//! Loss functions for training machine learning models.
//!
//! A [`LossFunction`] maps a network output and a target to a scalar (lower
//! is better) and back to a gradient shaped like the network output, which
//! an optimizer then consumes.
//!
//! # Usage
//!
//! ```
//! use normrecon::loss::{LossFunction, ReconstructionLoss};
//! use normrecon::primitives::Matrix;
//!
//! // Network output: [pre-std-dev ; mean] for two observed values
//! let output = Matrix::from_vec(4, 1, vec![0.0, 0.0, 1.0, -1.0]).expect("4x1");
//! let target = Matrix::from_vec(2, 1, vec![1.2, -0.8]).expect("2x1");
//!
//! let mut criterion = ReconstructionLoss::new();
//! let loss = criterion.forward(&output, &target).expect("even rows");
//! let grad = criterion.backward(&output, &target).expect("even rows");
//!
//! assert!(loss.is_finite());
//! assert_eq!(grad.shape(), output.shape());
//! ```

mod reconstruction;

pub use reconstruction::ReconstructionLoss;

use crate::error::Result;
use crate::traits::DenseArray;

/// Trait for differentiable loss functions.
///
/// Implement this trait to create custom loss functions compatible with
/// gradient-based training loops.
pub trait LossFunction<A: DenseArray> {
    /// Computes the loss of `input` (network output) against `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if `input` or `target` are malformed for this loss.
    fn forward(&mut self, input: &A, target: &A) -> Result<f64>;

    /// Computes the gradient of [`Self::forward`] w.r.t. `input`.
    ///
    /// The returned array has the shape of `input`.
    ///
    /// # Errors
    ///
    /// Returns an error if `input` or `target` are malformed for this loss.
    fn backward(&mut self, input: &A, target: &A) -> Result<A>;

    /// Returns the name of the loss function.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests;
