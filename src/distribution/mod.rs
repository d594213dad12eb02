//! Parametric probability distributions.
//!
//! - [`NormalDistribution`]: diagonal multivariate Normal with sampling,
//!   log-density and analytic log-density gradient

mod normal;

pub use normal::{
    softplus, softplus_derivative, NormalDistribution, Parameterization,
    SOFTPLUS_LINEAR_THRESHOLD,
};
