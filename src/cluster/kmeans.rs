//! K-Means clustering over recipe feature vectors.
//!
//! Uses Lloyd's algorithm with centroids seeded uniformly inside the
//! observed feature ranges.

use super::{Cluster, ClusterCharacteristics, ClusterMetrics, ClusterResult};
use crate::error::{CocinarError, Result};
use crate::metrics::silhouette_score;
use crate::preprocessing::RecipeVectorizer;
use crate::primitives::{Matrix, Vector};
use crate::recipe::Recipe;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// K-Means clustering for recipes.
///
/// # Algorithm
///
/// 1. Sample each centroid coordinate uniformly within the min/max of that
///    feature over the corpus
/// 2. Assign each recipe to the nearest centroid (Euclidean; ties go to the
///    lowest index)
/// 3. Move each centroid to the mean of its members; a centroid that lost
///    all members is re-sampled within the feature ranges
/// 4. Stop once no centroid coordinate moves by more than `tol`, or after
///    `max_iter` iterations
///
/// `n_clusters` may exceed the number of recipes; surplus clusters simply
/// end up empty.
///
/// # Performance
///
/// - Time complexity: O(nkdi) where n=recipes, k=clusters, d=features, i=iterations
/// - Space complexity: O(nk)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecipeKMeans {
    /// Number of clusters.
    n_clusters: usize,
    /// Maximum iterations.
    max_iter: usize,
    /// Convergence tolerance (per coordinate).
    tol: f64,
    /// Feature extraction.
    vectorizer: RecipeVectorizer,
}

impl Default for RecipeKMeans {
    fn default() -> Self {
        Self::new(3)
    }
}

impl RecipeKMeans {
    /// Creates a new K-Means with the specified number of clusters.
    #[must_use]
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            max_iter: 100,
            tol: 1e-4,
            vectorizer: RecipeVectorizer::default(),
        }
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Sets the feature extraction.
    #[must_use]
    pub fn with_vectorizer(mut self, vectorizer: RecipeVectorizer) -> Self {
        self.vectorizer = vectorizer;
        self
    }

    /// Returns the number of clusters.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Returns the iteration cap.
    #[must_use]
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Clusters `recipes`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCorpus` for an empty slice and `InvalidHyperparameter`
    /// when `n_clusters` is 0.
    pub fn fit<R: Rng + ?Sized>(&self, recipes: &[Recipe], rng: &mut R) -> Result<ClusterResult> {
        if recipes.is_empty() {
            return Err(CocinarError::empty_corpus("k-means clustering"));
        }
        if self.n_clusters == 0 {
            return Err(CocinarError::invalid_hyperparameter(
                "n_clusters",
                self.n_clusters,
                "> 0",
            ));
        }

        let start = Instant::now();
        let x = self.vectorizer.transform_corpus(recipes)?;
        let ranges = feature_ranges(&x);

        let mut centroids: Vec<Vector<f64>> = (0..self.n_clusters)
            .map(|_| random_centroid(&ranges, rng))
            .collect();

        let mut n_iter = 0;
        let mut converged = false;

        for iter in 0..self.max_iter {
            let labels = assign_labels(&x, &centroids);
            let new_centroids = self.update_centroids(&x, &labels, &ranges, rng);

            converged = max_shift(&centroids, &new_centroids) <= self.tol;
            centroids = new_centroids;
            n_iter = iter + 1;

            if converged {
                break;
            }
        }

        // Final assignment against the centroids actually returned.
        let labels = assign_labels(&x, &centroids);

        let inertia: f64 = labels
            .iter()
            .enumerate()
            .map(|(i, &label)| (&x.row(i) - &centroids[label]).norm_squared())
            .sum();
        let silhouette = silhouette_score(&x, &labels);

        let clusters: Vec<Cluster> = centroids
            .into_iter()
            .enumerate()
            .map(|(id, centroid)| {
                let members: Vec<&Recipe> = recipes
                    .iter()
                    .zip(&labels)
                    .filter(|&(_, &label)| label == id)
                    .map(|(recipe, _)| recipe)
                    .collect();
                Cluster {
                    id,
                    centroid,
                    members: members.iter().map(|r| r.id.clone()).collect(),
                    characteristics: ClusterCharacteristics::from_members(&members),
                }
            })
            .collect();

        let metrics = ClusterMetrics {
            iterations: n_iter,
            converged,
            convergence_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            silhouette_score: silhouette,
            inertia,
        };

        if converged {
            tracing::debug!(
                n_recipes = recipes.len(),
                n_clusters = self.n_clusters,
                iterations = n_iter,
                silhouette,
                "k-means converged"
            );
        } else {
            tracing::warn!(
                n_recipes = recipes.len(),
                n_clusters = self.n_clusters,
                max_iter = self.max_iter,
                "k-means stopped at the iteration cap without converging"
            );
        }

        Ok(ClusterResult {
            clusters,
            labels,
            metrics,
            vectorizer: self.vectorizer,
        })
    }

    /// Means of assigned samples; empty clusters are re-sampled.
    fn update_centroids<R: Rng + ?Sized>(
        &self,
        x: &Matrix<f64>,
        labels: &[usize],
        ranges: &[(f64, f64)],
        rng: &mut R,
    ) -> Vec<Vector<f64>> {
        let n_features = x.n_cols();
        let mut sums = vec![vec![0.0; n_features]; self.n_clusters];
        let mut counts = vec![0usize; self.n_clusters];

        for (i, &label) in labels.iter().enumerate() {
            counts[label] += 1;
            for (j, sum) in sums[label].iter_mut().enumerate() {
                *sum += x.get(i, j);
            }
        }

        sums.into_iter()
            .zip(counts)
            .map(|(sum, count)| {
                if count == 0 {
                    random_centroid(ranges, rng)
                } else {
                    sum.into_iter().map(|s| s / count as f64).collect()
                }
            })
            .collect()
    }
}

/// (min, max) of each feature column.
fn feature_ranges(x: &Matrix<f64>) -> Vec<(f64, f64)> {
    (0..x.n_cols())
        .map(|j| {
            x.column(j)
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                })
        })
        .collect()
}

fn random_centroid<R: Rng + ?Sized>(ranges: &[(f64, f64)], rng: &mut R) -> Vector<f64> {
    ranges
        .iter()
        .map(|&(lo, hi)| lo + rng.gen::<f64>() * (hi - lo))
        .collect()
}

/// Index of the nearest centroid; ties go to the first one encountered.
pub(super) fn nearest_centroid(point: &Vector<f64>, centroids: &[&Vector<f64>]) -> usize {
    let mut min_dist = f64::INFINITY;
    let mut min_cluster = 0;

    for (k, &centroid) in centroids.iter().enumerate() {
        let dist = (point - centroid).norm_squared();
        if dist < min_dist {
            min_dist = dist;
            min_cluster = k;
        }
    }

    min_cluster
}

fn assign_labels(x: &Matrix<f64>, centroids: &[Vector<f64>]) -> Vec<usize> {
    let refs: Vec<&Vector<f64>> = centroids.iter().collect();
    (0..x.n_rows())
        .map(|i| nearest_centroid(&x.row(i), &refs))
        .collect()
}

/// Largest absolute change of any centroid coordinate.
fn max_shift(old: &[Vector<f64>], new: &[Vector<f64>]) -> f64 {
    old.iter()
        .zip(new)
        .flat_map(|(a, b)| a.iter().zip(b.iter()).map(|(p, q)| (p - q).abs()))
        .fold(0.0, f64::max)
}

#[cfg(test)]
#[path = "kmeans_tests.rs"]
mod tests;
