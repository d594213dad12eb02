//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use normrecon::prelude::*;
//! ```

pub use crate::distribution::{NormalDistribution, Parameterization};
pub use crate::error::NormError;
pub use crate::loss::{LossFunction, ReconstructionLoss};
pub use crate::primitives::{Matrix, Vector};
pub use crate::traits::DenseArray;
pub use crate::tree::{
    AllDimensionSelect, DimensionSelect, DimensionSubset, MultipleRandomDimensionSelect,
    RandomDimensionSelect,
};
