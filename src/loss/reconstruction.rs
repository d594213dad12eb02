//! Reconstruction loss for variational autoencoders.
//!
//! The decoder emits a combined `[pre_std_dev ; mean]` block; the loss is the
//! negative log-likelihood of the target under the Normal distribution that
//! block describes.
//!
//! ```text
//! L(θ, x) = -log N(x; μ, softplus(ρ)),   θ = [ρ ; μ]
//! ∂L/∂θ   = -∇θ log N(x; μ, softplus(ρ))
//! ```

use super::LossFunction;
use crate::distribution::NormalDistribution;
use crate::error::Result;
use crate::traits::DenseArray;
use tracing::debug;

/// Negative log-likelihood of the target under a Normal decoder output.
///
/// A fresh [`NormalDistribution`] is built from `input` on every
/// [`forward`](LossFunction::forward) and [`backward`](LossFunction::backward)
/// call; the last one built is kept for inspection.
#[derive(Debug, Clone)]
pub struct ReconstructionLoss<A> {
    delta: Option<A>,
    normal_dist: Option<NormalDistribution<A>>,
    output_parameter: Option<A>,
    last_loss: Option<f64>,
}

impl<A> ReconstructionLoss<A> {
    /// Creates a reconstruction loss with no stored state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delta: None,
            normal_dist: None,
            output_parameter: None,
            last_loss: None,
        }
    }

    /// Gradient computed by the last `backward` call.
    #[must_use]
    pub fn delta(&self) -> Option<&A> {
        self.delta.as_ref()
    }

    /// Combined parameter block consumed by the last `forward` call.
    #[must_use]
    pub fn output_parameter(&self) -> Option<&A> {
        self.output_parameter.as_ref()
    }

    /// Loss value returned by the last `forward` call.
    #[must_use]
    pub fn last_loss(&self) -> Option<f64> {
        self.last_loss
    }

    /// Distribution built by the most recent `forward` or `backward` call.
    #[must_use]
    pub fn normal_dist(&self) -> Option<&NormalDistribution<A>> {
        self.normal_dist.as_ref()
    }
}

impl<A> Default for ReconstructionLoss<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: DenseArray> LossFunction<A> for ReconstructionLoss<A> {
    fn forward(&mut self, input: &A, target: &A) -> Result<f64> {
        let dist = NormalDistribution::from_combined(input)?;
        let loss = -dist.log_probability(target)?;
        debug!(loss, "reconstruction loss forward");

        self.normal_dist = Some(dist);
        self.output_parameter = Some(input.clone());
        self.last_loss = Some(loss);
        Ok(loss)
    }

    fn backward(&mut self, input: &A, target: &A) -> Result<A> {
        let dist = NormalDistribution::from_combined(input)?;
        let grad = dist.log_prob_backward(target)?.map_elems(|g| -g);

        self.normal_dist = Some(dist);
        self.delta = Some(grad.clone());
        Ok(grad)
    }

    fn name(&self) -> &'static str {
        "Reconstruction"
    }
}
