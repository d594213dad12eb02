//! Core compute primitives (Vector, Matrix).
//!
//! These types provide the dense arrays the distribution and loss code is
//! generic over; see [`crate::traits::DenseArray`].

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
