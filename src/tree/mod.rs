//! Decision tree support.
//!
//! Split-dimension selection policies a tree builder queries once per split
//! decision:
//!
//! - [`RandomDimensionSelect`]: one uniformly random dimension (random forests)
//! - [`MultipleRandomDimensionSelect`]: `k` distinct random dimensions, drawn
//!   per split as a [`DimensionSubset`]
//! - [`AllDimensionSelect`]: every dimension, in order (classic CART)

mod dimension_select;

pub use dimension_select::{
    AllDimensionSelect, DimensionIter, DimensionSelect, DimensionSubset,
    MultipleRandomDimensionSelect, RandomDimensionSelect,
};
