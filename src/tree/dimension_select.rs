//! Dimension selection policies for decision-tree splitting.
//!
//! A tree builder asks a policy which feature dimensions to evaluate when
//! searching for a split, using a begin/next/end protocol:
//!
//! ```text
//! let mut d = policy.begin();
//! while d != policy.end() {
//!     evaluate_split(d);
//!     d = policy.next(d);
//! }
//! ```
//!
//! [`DimensionSelect::iter`] wraps that loop in an [`Iterator`].

use crate::error::{NormError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use tracing::trace;

/// Policy choosing which dimensions a split search visits.
pub trait DimensionSelect {
    /// First dimension to visit.
    fn begin(&self) -> usize;

    /// Past-the-end sentinel; iteration stops when this value is returned.
    fn end(&self) -> usize;

    /// Dimension to visit after `current`.
    fn next(&self, current: usize) -> usize;

    /// Iterates `begin()`, `next(..)`, ... until `end()` is reached.
    fn iter(&self) -> DimensionIter<'_, Self>
    where
        Self: Sized,
    {
        DimensionIter {
            policy: self,
            current: None,
            done: false,
        }
    }
}

/// Iterator over the dimensions chosen by a [`DimensionSelect`] policy.
#[derive(Debug)]
pub struct DimensionIter<'a, S> {
    policy: &'a S,
    current: Option<usize>,
    done: bool,
}

impl<S: DimensionSelect> Iterator for DimensionIter<'_, S> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        let candidate = match self.current {
            None => self.policy.begin(),
            Some(prev) => self.policy.next(prev),
        };
        if candidate == self.policy.end() {
            self.done = true;
            return None;
        }
        self.current = Some(candidate);
        Some(candidate)
    }
}

fn check_dimensions(dimensions: usize) -> Result<()> {
    if dimensions == 0 {
        return Err(NormError::InvalidHyperparameter {
            param: "dimensions".to_string(),
            value: "0".to_string(),
            constraint: ">0".to_string(),
        });
    }
    Ok(())
}

/// Selects exactly one dimension, uniformly at random, per split.
///
/// # Example
///
/// ```
/// use normrecon::tree::{DimensionSelect, RandomDimensionSelect};
///
/// let policy = RandomDimensionSelect::new(5).expect("dimensions > 0").with_random_state(42);
/// let visited: Vec<usize> = policy.iter().collect();
/// assert_eq!(visited.len(), 1);
/// assert!(visited[0] < 5);
/// assert_eq!(policy.end(), 5);
/// ```
#[derive(Debug)]
pub struct RandomDimensionSelect {
    dimensions: usize,
    rng: Mutex<StdRng>,
}

impl RandomDimensionSelect {
    /// Creates a policy over `dimensions` features, seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`NormError::InvalidHyperparameter`] if `dimensions` is zero.
    pub fn new(dimensions: usize) -> Result<Self> {
        check_dimensions(dimensions)?;
        Ok(Self {
            dimensions,
            rng: Mutex::new(StdRng::from_entropy()),
        })
    }

    /// Sets the random seed for reproducibility.
    #[must_use]
    pub fn with_random_state(self, random_state: u64) -> Self {
        Self {
            dimensions: self.dimensions,
            rng: Mutex::new(StdRng::seed_from_u64(random_state)),
        }
    }

    /// Number of dimensions to select from.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

impl DimensionSelect for RandomDimensionSelect {
    fn begin(&self) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let dim = rng.gen_range(0..self.dimensions);
        trace!(dim, dimensions = self.dimensions, "random dimension selected");
        dim
    }

    fn end(&self) -> usize {
        self.dimensions
    }

    // Only one dimension is ever visited.
    fn next(&self, _current: usize) -> usize {
        self.dimensions
    }
}

/// Visits every dimension in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllDimensionSelect {
    dimensions: usize,
}

impl AllDimensionSelect {
    /// Creates a policy over `dimensions` features.
    #[must_use]
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl DimensionSelect for AllDimensionSelect {
    fn begin(&self) -> usize {
        0
    }

    fn end(&self) -> usize {
        self.dimensions
    }

    fn next(&self, current: usize) -> usize {
        (current + 1).min(self.dimensions)
    }
}

/// Draws `k` distinct random dimensions per split.
///
/// The policy itself holds only the RNG. Each [`select`](Self::select) call
/// returns an owned [`DimensionSubset`], so split searches running side by
/// side never see each other's draws.
#[derive(Debug)]
pub struct MultipleRandomDimensionSelect {
    dimensions: usize,
    k: usize,
    rng: Mutex<StdRng>,
}

impl MultipleRandomDimensionSelect {
    /// Creates a policy choosing `k` of `dimensions` features per split.
    ///
    /// # Errors
    ///
    /// Returns [`NormError::InvalidHyperparameter`] unless
    /// `1 <= k <= dimensions`.
    pub fn new(dimensions: usize, k: usize) -> Result<Self> {
        check_dimensions(dimensions)?;
        if k == 0 || k > dimensions {
            return Err(NormError::InvalidHyperparameter {
                param: "k".to_string(),
                value: k.to_string(),
                constraint: format!("in [1, {dimensions}]"),
            });
        }
        Ok(Self {
            dimensions,
            k,
            rng: Mutex::new(StdRng::from_entropy()),
        })
    }

    /// Sets the random seed for reproducibility.
    #[must_use]
    pub fn with_random_state(self, random_state: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(random_state)),
            ..self
        }
    }

    /// Number of dimensions chosen per split.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Total number of dimensions.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Draws a fresh subset of `k` distinct dimensions for one split.
    pub fn select(&self) -> DimensionSubset {
        let mut chosen = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            rand::seq::index::sample(&mut *rng, self.dimensions, self.k).into_vec()
        };
        chosen.sort_unstable();
        trace!(?chosen, "random dimension subset selected");

        DimensionSubset {
            dimensions: self.dimensions,
            chosen,
        }
    }
}

/// A fixed set of dimensions drawn for a single split, visited in ascending
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionSubset {
    dimensions: usize,
    chosen: Vec<usize>,
}

impl DimensionSubset {
    /// The chosen dimensions, sorted ascending.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.chosen
    }
}

impl DimensionSelect for DimensionSubset {
    fn begin(&self) -> usize {
        self.chosen.first().copied().unwrap_or(self.dimensions)
    }

    fn end(&self) -> usize {
        self.dimensions
    }

    fn next(&self, current: usize) -> usize {
        match self.chosen.binary_search(&current) {
            Ok(pos) => self.chosen.get(pos + 1).copied().unwrap_or(self.dimensions),
            Err(_) => self.dimensions,
        }
    }
}

#[cfg(test)]
#[path = "dimension_select_tests.rs"]
mod tests;
