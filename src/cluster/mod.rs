//! Recipe clustering.
//!
//! Groups recipes by their nutrition feature vectors with k-means, then
//! summarizes each group so a user's constraints can be matched against a
//! whole cluster rather than individual recipes.
//!
//! # Example
//!
//! ```
//! use cocinar::cluster::RecipeKMeans;
//! use cocinar::recipe::{sample_corpus, UserPreferences};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let corpus = sample_corpus();
//! let mut rng = StdRng::seed_from_u64(7);
//! let result = RecipeKMeans::new(3).fit(&corpus, &mut rng).expect("non-empty corpus");
//!
//! let total: usize = result.clusters().iter().map(|c| c.size()).sum();
//! assert_eq!(total, corpus.len());
//!
//! let prefs = UserPreferences::new().with_max_calories(400.0);
//! let pick = result.recommend_for_user(&prefs).expect("at least one populated cluster");
//! assert!(pick.recipe_ids.len() <= 3);
//! ```

mod kmeans;

pub use kmeans::RecipeKMeans;

use crate::preprocessing::RecipeVectorizer;
use crate::primitives::Vector;
use crate::recipe::{Recipe, UserPreferences};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of recipes handed back from the best cluster.
pub const CLUSTER_RECOMMENDATIONS: usize = 3;

/// Aggregate description of a cluster's members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterCharacteristics {
    /// Mean calories
    pub avg_calories: f64,
    /// Mean protein
    pub avg_protein: f64,
    /// Mean carbs
    pub avg_carbs: f64,
    /// Mean fat
    pub avg_fat: f64,
    /// Mean cooking time
    pub avg_cooking_time: f64,
    /// Mean estimated cost
    pub avg_cost: f64,
    /// Mean of the members' own mean ratings (unrated members are skipped)
    pub avg_rating: f64,
    /// Cuisines present
    pub cuisines: BTreeSet<String>,
    /// Tags present
    pub tags: BTreeSet<String>,
}

impl ClusterCharacteristics {
    /// Summarizes a set of member recipes. An empty set yields all zeros.
    #[must_use]
    pub fn from_members(members: &[&Recipe]) -> Self {
        if members.is_empty() {
            return Self::default();
        }

        let n = members.len() as f64;
        let mean = |f: fn(&Recipe) -> f64| members.iter().map(|r| f(r)).sum::<f64>() / n;

        let ratings: Vec<f64> = members.iter().filter_map(|r| r.average_rating()).collect();
        let avg_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<f64>() / ratings.len() as f64
        };

        Self {
            avg_calories: mean(|r| r.calories),
            avg_protein: mean(|r| r.protein),
            avg_carbs: mean(|r| r.carbs),
            avg_fat: mean(|r| r.fat),
            avg_cooking_time: mean(|r| r.cooking_time),
            avg_cost: mean(|r| r.estimated_cost),
            avg_rating,
            cuisines: members.iter().map(|r| r.cuisine.clone()).collect(),
            tags: members.iter().flat_map(|r| r.tags.iter().cloned()).collect(),
        }
    }
}

/// One k-means cluster. Built once per clustering run and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Cluster index (0-based)
    pub id: usize,
    /// Centroid in feature space
    pub centroid: Vector<f64>,
    /// Member recipe ids in corpus order
    pub members: Vec<String>,
    /// Member summary
    pub characteristics: ClusterCharacteristics,
}

impl Cluster {
    /// Number of member recipes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Additive fit score of this cluster for a user, floored at 0.
    ///
    /// - +30 if average calories are within the ceiling, else minus overage/10
    /// - +30 if average protein meets the floor, else minus the shortfall
    /// - +40 if average cooking time is within the ceiling, else minus 2×overage
    /// - plus (average rating − 3)×10
    ///
    /// Unset preference fields fall back to the defaults on
    /// [`UserPreferences`].
    #[must_use]
    pub fn score_for_user(&self, prefs: &UserPreferences) -> f64 {
        let c = &self.characteristics;
        let mut score = 0.0;

        let max_calories = prefs.max_calories_or_default();
        if c.avg_calories <= max_calories {
            score += 30.0;
        } else {
            score -= (c.avg_calories - max_calories) / 10.0;
        }

        let min_protein = prefs.min_protein_or_default();
        if c.avg_protein >= min_protein {
            score += 30.0;
        } else {
            score -= min_protein - c.avg_protein;
        }

        let max_time = prefs.max_cooking_time_or_default();
        if c.avg_cooking_time <= max_time {
            score += 40.0;
        } else {
            score -= 2.0 * (c.avg_cooking_time - max_time);
        }

        score += (c.avg_rating - 3.0) * 10.0;

        score.max(0.0)
    }
}

/// Run statistics for one clustering call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterMetrics {
    /// Lloyd iterations performed
    pub iterations: usize,
    /// Whether the centroid shift fell within tolerance before the cap
    pub converged: bool,
    /// Wall time spent fitting (milliseconds)
    pub convergence_time_ms: f64,
    /// Mean silhouette coefficient over the corpus
    pub silhouette_score: f64,
    /// Within-cluster sum of squared distances
    pub inertia: f64,
}

/// Best cluster for a user and the recipes it contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRecommendation {
    /// Winning cluster
    pub cluster_id: usize,
    /// Its score for the user
    pub score: f64,
    /// Up to three member ids in corpus order
    pub recipe_ids: Vec<String>,
}

/// Output of [`RecipeKMeans::fit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterResult {
    clusters: Vec<Cluster>,
    labels: Vec<usize>,
    metrics: ClusterMetrics,
    vectorizer: RecipeVectorizer,
}

impl ClusterResult {
    /// Clusters ordered by id.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Cluster id of each corpus recipe, in corpus order.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Run statistics.
    #[must_use]
    pub fn metrics(&self) -> &ClusterMetrics {
        &self.metrics
    }

    /// Id of the cluster whose centroid is nearest to `recipe`
    /// (ties go to the lowest id).
    #[must_use]
    pub fn predict(&self, recipe: &Recipe) -> usize {
        let point = self.vectorizer.transform(recipe);
        let centroids: Vec<&Vector<f64>> = self.clusters.iter().map(|c| &c.centroid).collect();
        kmeans::nearest_centroid(&point, &centroids)
    }

    /// Scores every populated cluster for the user and returns the first
    /// three members of the best one. Ties go to the lowest cluster id.
    /// Returns `None` only when no cluster has members.
    #[must_use]
    pub fn recommend_for_user(&self, prefs: &UserPreferences) -> Option<ClusterRecommendation> {
        let mut best: Option<(&Cluster, f64)> = None;
        for cluster in self.clusters.iter().filter(|c| c.size() > 0) {
            let score = cluster.score_for_user(prefs);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((cluster, score));
            }
        }

        best.map(|(cluster, score)| ClusterRecommendation {
            cluster_id: cluster.id,
            score,
            recipe_ids: cluster
                .members
                .iter()
                .take(CLUSTER_RECOMMENDATIONS)
                .cloned()
                .collect(),
        })
    }
}

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod tests;
