//! Normrecon: Normal distributions and reconstruction loss in pure Rust.
//!
//! Normrecon provides a diagonal multivariate Normal distribution with
//! analytic log-density gradients, the VAE reconstruction loss built on top
//! of it, and split-dimension selection policies for decision trees.
//!
//! # Quick Start
//!
//! ```
//! use normrecon::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! // Decoder output: [pre-std-dev ; mean], one column per sample
//! let output = Matrix::from_vec(4, 1, vec![0.0, 0.0, 1.0, -1.0]).unwrap();
//! let dist = NormalDistribution::from_combined(&output).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let sample = dist.random(&mut rng).unwrap();
//! let log_p = dist.log_probability(&sample).unwrap();
//! assert!(log_p.is_finite());
//!
//! // Same block as a loss against a target
//! let mut criterion = ReconstructionLoss::new();
//! let loss = criterion.forward(&output, &sample).unwrap();
//! assert!((loss + log_p).abs() < 1e-12);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`traits`]: The `DenseArray` capability shared by the numeric code
//! - [`distribution`]: Normal distribution (sampling, log-density, gradient)
//! - [`loss`]: Loss functions for training (reconstruction loss)
//! - [`tree`]: Split-dimension selection for decision trees

pub mod distribution;
pub mod error;
pub mod loss;
pub mod prelude;
pub mod primitives;
pub mod traits;
pub mod tree;

pub use error::{NormError, Result};
pub use primitives::{Matrix, Vector};
pub use traits::DenseArray;
