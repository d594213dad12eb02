//! Core traits for normrecon.
//!
//! [`DenseArray`] is the capability the distribution and loss code is generic
//! over: a row-major block of `f64` values with a `(rows, cols)` shape.

use crate::error::{NormError, Result};
use crate::primitives::{Matrix, Vector};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Dense, shape-aware array of `f64` values.
///
/// Implementors must keep element order stable across `map_elems`, `zip_elems`,
/// `split_rows` and `stack_rows`, so that splitting a block and stacking the
/// halves again reproduces the original array.
///
/// # Examples
///
/// ```
/// use normrecon::primitives::Matrix;
/// use normrecon::traits::DenseArray;
///
/// let block = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).expect("4x1");
/// let (upper, lower) = block.split_rows(2).expect("even split");
/// assert_eq!(upper.shape(), (2, 1));
/// assert_eq!(Matrix::stack_rows(&upper, &lower).expect("same cols"), block);
/// ```
pub trait DenseArray: Clone + Sized {
    /// Shape as `(rows, cols)`.
    fn shape(&self) -> (usize, usize);

    /// Total number of elements.
    fn len(&self) -> usize {
        let (rows, cols) = self.shape();
        rows * cols
    }

    /// Returns true if the array holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applies `f` to every element.
    fn map_elems<F: FnMut(f64) -> f64>(&self, f: F) -> Self;

    /// Combines two arrays element-wise.
    ///
    /// # Errors
    ///
    /// Returns [`NormError::DimensionMismatch`] if shapes differ.
    fn zip_elems<F: FnMut(f64, f64) -> f64>(&self, other: &Self, f: F) -> Result<Self>;

    /// Sum of all elements.
    fn total(&self) -> f64;

    /// Splits into rows `[0, at)` and `[at, rows)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `at` exceeds the row count.
    fn split_rows(&self, at: usize) -> Result<(Self, Self)>;

    /// Row concatenation: `top` above `bottom`.
    ///
    /// # Errors
    ///
    /// Returns an error if the column counts differ.
    fn stack_rows(top: &Self, bottom: &Self) -> Result<Self>;

    /// Array shaped like `self` filled with independent N(0, 1) draws.
    fn randn_like<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        self.map_elems(|_| StandardNormal.sample(&mut *rng))
    }
}

impl DenseArray for Matrix<f64> {
    fn shape(&self) -> (usize, usize) {
        Matrix::shape(self)
    }

    fn map_elems<F: FnMut(f64) -> f64>(&self, f: F) -> Self {
        self.map(f)
    }

    fn zip_elems<F: FnMut(f64, f64) -> f64>(&self, other: &Self, f: F) -> Result<Self> {
        if self.shape() != other.shape() {
            return Err(NormError::shape_mismatch(
                "matrix",
                self.shape(),
                other.shape(),
            ));
        }
        Ok(self.zip_map(other, f)?)
    }

    fn total(&self) -> f64 {
        self.sum()
    }

    fn split_rows(&self, at: usize) -> Result<(Self, Self)> {
        let upper = self.rows_range(0, at)?;
        let lower = self.rows_range(at, self.n_rows())?;
        Ok((upper, lower))
    }

    fn stack_rows(top: &Self, bottom: &Self) -> Result<Self> {
        if top.n_cols() != bottom.n_cols() {
            return Err(NormError::shape_mismatch(
                "stacked columns",
                top.shape(),
                bottom.shape(),
            ));
        }
        Ok(top.vstack(bottom)?)
    }
}

impl DenseArray for Vector<f64> {
    fn shape(&self) -> (usize, usize) {
        (Vector::len(self), 1)
    }

    fn map_elems<F: FnMut(f64) -> f64>(&self, f: F) -> Self {
        self.map(f)
    }

    fn zip_elems<F: FnMut(f64, f64) -> f64>(&self, other: &Self, f: F) -> Result<Self> {
        if Vector::len(self) != Vector::len(other) {
            return Err(NormError::shape_mismatch(
                "vector",
                DenseArray::shape(self),
                DenseArray::shape(other),
            ));
        }
        Ok(self.zip_map(other, f)?)
    }

    fn total(&self) -> f64 {
        self.sum()
    }

    fn split_rows(&self, at: usize) -> Result<(Self, Self)> {
        let data = self.as_slice();
        if at > data.len() {
            return Err(NormError::Other(format!(
                "split index {at} out of bounds (len={})",
                data.len()
            )));
        }
        let (upper, lower) = data.split_at(at);
        Ok((Vector::from_slice(upper), Vector::from_slice(lower)))
    }

    fn stack_rows(top: &Self, bottom: &Self) -> Result<Self> {
        let mut data = Vec::with_capacity(Vector::len(top) + Vector::len(bottom));
        data.extend_from_slice(top.as_slice());
        data.extend_from_slice(bottom.as_slice());
        Ok(Vector::from_vec(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_matrix_shape_and_len() {
        let m = Matrix::zeros(3, 4);
        assert_eq!(DenseArray::shape(&m), (3, 4));
        assert_eq!(DenseArray::len(&m), 12);
        assert!(!DenseArray::is_empty(&m));
        assert!(DenseArray::is_empty(&Matrix::zeros(0, 4)));
    }

    #[test]
    fn test_vector_is_column() {
        let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(DenseArray::shape(&v), (3, 1));
    }

    #[test]
    fn test_matrix_zip_elems_mismatch() {
        let a = Matrix::zeros(2, 2);
        let b = Matrix::zeros(2, 3);
        let err = a.zip_elems(&b, |x, y| x + y).unwrap_err();
        assert!(matches!(err, NormError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_vector_zip_elems_mismatch() {
        let a = Vector::zeros(2);
        let b = Vector::zeros(3);
        assert!(a.zip_elems(&b, |x, y| x + y).is_err());
    }

    #[test]
    fn test_matrix_split_out_of_bounds() {
        let m = Matrix::zeros(2, 2);
        assert!(m.split_rows(3).is_err());
    }

    #[test]
    fn test_matrix_stack_column_mismatch() {
        let err = Matrix::stack_rows(&Matrix::zeros(1, 2), &Matrix::zeros(1, 3)).unwrap_err();
        assert!(matches!(err, NormError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_vector_split_and_stack() {
        let v = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let (upper, lower) = v.split_rows(2).expect("in bounds");
        assert_eq!(upper.as_slice(), &[1.0, 2.0]);
        assert_eq!(lower.as_slice(), &[3.0, 4.0]);
        assert_eq!(Vector::stack_rows(&upper, &lower).expect("stack"), v);
        assert!(v.split_rows(5).is_err());
    }

    #[test]
    fn test_randn_like_reproducible() {
        let template = Matrix::zeros(4, 3);
        let a = template.randn_like(&mut StdRng::seed_from_u64(42));
        let b = template.randn_like(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(DenseArray::shape(&a), (4, 3));
    }

    #[test]
    fn test_randn_like_moments() {
        let template = Vector::zeros(20_000);
        let z = template.randn_like(&mut StdRng::seed_from_u64(7));
        let n = DenseArray::len(&z) as f64;
        let mean = z.total() / n;
        let var = z.map_elems(|x| (x - mean).powi(2)).total() / n;

        assert!(mean.abs() < 0.05, "Mean {mean} too far from 0");
        assert!((var - 1.0).abs() < 0.05, "Variance {var} too far from 1");
    }
}
