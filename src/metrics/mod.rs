//! Evaluation metrics.
//!
//! Includes regression metrics (R², MSE, RMSE) and the silhouette score used
//! to judge recipe clusterings.

use crate::primitives::{Matrix, Vector};
use std::collections::BTreeSet;

/// Computes the coefficient of determination (R²).
///
/// R² = 1 - (`SS_res` / `SS_tot`)
///
/// The value is not clamped: a model worse than predicting the mean yields a
/// negative R², which callers can read as a quality signal. A constant
/// target (`SS_tot` = 0) yields 0.
///
/// # Examples
///
/// ```
/// use cocinar::metrics::r_squared;
/// use cocinar::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[3.0, -0.5, 2.0, 7.0]);
/// let y_pred = Vector::from_slice(&[2.5, 0.0, 2.0, 8.0]);
/// let r2 = r_squared(&y_pred, &y_true);
/// assert!(r2 > 0.9);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths.
#[must_use]
pub fn r_squared(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");

    let y_mean = y_true.mean();

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    let ss_tot: f64 = y_true.iter().map(|t| (t - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return 0.0;
    }

    1.0 - (ss_res / ss_tot)
}

/// Computes the Mean Squared Error (MSE).
///
/// MSE = (1/n) * `Σ(y_true` - `y_pred)²`
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn mse(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let n = y_true.len() as f64;

    let sum_sq_error: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    sum_sq_error / n
}

/// Computes the Root Mean Squared Error (RMSE).
///
/// RMSE = sqrt(MSE)
///
/// # Examples
///
/// ```
/// use cocinar::metrics::rmse;
/// use cocinar::primitives::Vector;
///
/// let y_true = Vector::from_slice(&[1.0, 2.0]);
/// let y_pred = Vector::from_slice(&[1.0, 4.0]);
/// assert!((rmse(&y_pred, &y_true) - 2.0_f64.sqrt()).abs() < 1e-12);
/// ```
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
#[must_use]
pub fn rmse(y_pred: &Vector<f64>, y_true: &Vector<f64>) -> f64 {
    mse(y_pred, y_true).sqrt()
}

/// Mean distance from a point to the other members of its cluster.
fn mean_intra_cluster_distance(
    data: &Matrix<f64>,
    point_idx: usize,
    cluster: usize,
    labels: &[usize],
) -> f64 {
    let point = data.row(point_idx);
    let distances: Vec<f64> = labels
        .iter()
        .enumerate()
        .filter(|&(j, &label)| j != point_idx && label == cluster)
        .map(|(j, _)| point.distance(&data.row(j)))
        .collect();

    if distances.is_empty() {
        0.0
    } else {
        distances.iter().sum::<f64>() / distances.len() as f64
    }
}

/// Smallest mean distance from a point to the members of another cluster.
fn min_inter_cluster_distance(
    data: &Matrix<f64>,
    point_idx: usize,
    cluster: usize,
    labels: &[usize],
    clusters: &BTreeSet<usize>,
) -> f64 {
    let point = data.row(point_idx);
    let mut min_mean = f64::INFINITY;

    for &other_cluster in clusters {
        if other_cluster == cluster {
            continue;
        }

        let distances: Vec<f64> = labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == other_cluster)
            .map(|(j, _)| point.distance(&data.row(j)))
            .collect();

        if !distances.is_empty() {
            let mean_dist = distances.iter().sum::<f64>() / distances.len() as f64;
            min_mean = min_mean.min(mean_dist);
        }
    }

    if min_mean == f64::INFINITY {
        0.0
    } else {
        min_mean
    }
}

fn silhouette_coefficient(a_i: f64, b_i: f64) -> f64 {
    let max_ab = a_i.max(b_i);
    if max_ab == 0.0 {
        0.0
    } else {
        (b_i - a_i) / max_ab
    }
}

/// Computes the silhouette score for clustering quality.
///
/// s(i) = (b(i) - a(i)) / max(a(i), b(i))
///
/// where:
/// - a(i) = mean distance to other points in same cluster (0 for a singleton)
/// - b(i) = smallest mean distance to the points of another cluster
///
/// Returns the mean of s(i) over all points, or 0 when fewer than two
/// clusters are populated.
///
/// # Examples
///
/// ```
/// use cocinar::metrics::silhouette_score;
/// use cocinar::primitives::Matrix;
///
/// let data = Matrix::from_vec(4, 2, vec![
///     0.0, 0.0,
///     0.1, 0.1,
///     5.0, 5.0,
///     5.1, 5.1,
/// ]).expect("Matrix dimensions and data length are valid");
/// let labels = vec![0, 0, 1, 1];
/// let score = silhouette_score(&data, &labels);
/// assert!(score > 0.5);
/// ```
///
/// # Panics
///
/// Panics if `labels` is shorter than the number of rows.
#[must_use]
pub fn silhouette_score(data: &Matrix<f64>, labels: &[usize]) -> f64 {
    let n_samples = data.n_rows();

    if n_samples < 2 {
        return 0.0;
    }

    let clusters: BTreeSet<usize> = labels[..n_samples].iter().copied().collect();

    if clusters.len() < 2 {
        return 0.0;
    }

    let total: f64 = (0..n_samples)
        .map(|i| {
            let cluster = labels[i];
            let a_i = mean_intra_cluster_distance(data, i, cluster, labels);
            let b_i = min_inter_cluster_distance(data, i, cluster, labels, &clusters);
            silhouette_coefficient(a_i, b_i)
        })
        .sum();

    total / n_samples as f64
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
