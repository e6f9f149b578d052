//! Core compute primitives (Vector, Matrix).
//!
//! These types back every algorithm in the crate: feature vectors for
//! recipes, design matrices for regression, and the dense linear algebra
//! (transpose, multiply, Gauss-Jordan inverse) used by the normal equations.

mod matrix;
mod vector;

pub use matrix::{Matrix, PIVOT_EPSILON};
pub use vector::Vector;
