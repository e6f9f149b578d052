//! Preference-based collaborative filtering.
//!
//! Users are compared by the cosine similarity of their stated preference
//! vectors `[max calories, min protein, max cooking time]`, not by their
//! rating histories. The ratings of the `k` most similar users are then
//! averaged per recipe, weighted by similarity.

use crate::primitives::Vector;
use crate::recipe::UserPreferences;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// A user known to the recommender: stated preferences plus ratings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User identifier
    pub user_id: String,
    /// Stated preferences
    #[serde(default)]
    pub preferences: UserPreferences,
    /// recipe id -> rating
    #[serde(default)]
    pub ratings: BTreeMap<String, f64>,
}

impl UserProfile {
    /// Creates a profile with no ratings.
    #[must_use]
    pub fn new(user_id: impl Into<String>, preferences: UserPreferences) -> Self {
        Self {
            user_id: user_id.into(),
            preferences,
            ratings: BTreeMap::new(),
        }
    }

    /// Adds one rating.
    #[must_use]
    pub fn with_rating(mut self, recipe_id: impl Into<String>, rating: f64) -> Self {
        self.ratings.insert(recipe_id.into(), rating);
        self
    }
}

/// Read-only snapshot of user id -> {recipe id -> rating}.
///
/// Users keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingMatrix {
    rows: Vec<(String, BTreeMap<String, f64>)>,
}

impl RatingMatrix {
    /// Builds the snapshot from every profile's ratings.
    #[must_use]
    pub fn from_profiles(profiles: &[UserProfile]) -> Self {
        Self {
            rows: profiles
                .iter()
                .map(|p| (p.user_id.clone(), p.ratings.clone()))
                .collect(),
        }
    }

    /// Builds the snapshot from explicit rows.
    #[must_use]
    pub fn from_rows(rows: Vec<(String, BTreeMap<String, f64>)>) -> Self {
        Self { rows }
    }

    /// Ratings of one user, if present.
    #[must_use]
    pub fn ratings_for(&self, user_id: &str) -> Option<&BTreeMap<String, f64>> {
        self.rows
            .iter()
            .find(|(id, _)| id == user_id)
            .map(|(_, ratings)| ratings)
    }

    /// Number of users.
    #[must_use]
    pub fn n_users(&self) -> usize {
        self.rows.len()
    }

    /// Number of (user, recipe) ratings.
    #[must_use]
    pub fn n_ratings(&self) -> usize {
        self.rows.iter().map(|(_, r)| r.len()).sum()
    }
}

fn preference_vector(prefs: &UserPreferences) -> Vector<f64> {
    Vector::from_slice(&[
        prefs.max_calories_or_default(),
        prefs.min_protein_or_default(),
        prefs.max_cooking_time_or_default(),
    ])
}

/// Cosine similarity of two preference records over
/// `[max calories, min protein, max cooking time]`, with unset fields
/// replaced by the [`UserPreferences`] defaults. Symmetric.
///
/// # Examples
///
/// ```
/// use cocinar::recommend::preference_similarity;
/// use cocinar::recipe::UserPreferences;
///
/// let a = UserPreferences::new().with_max_calories(400.0);
/// let b = UserPreferences::new();
/// assert!((preference_similarity(&a, &b) - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn preference_similarity(a: &UserPreferences, b: &UserPreferences) -> f64 {
    preference_vector(a).cosine_similarity(&preference_vector(b))
}

/// A neighbour of the target user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarUser {
    /// User identifier
    pub user_id: String,
    /// Preference similarity to the target
    pub similarity: f64,
}

/// A recipe with its similarity-weighted rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedRating {
    /// Recipe identifier
    pub recipe_id: String,
    /// Σ(rating × similarity) / Σ(similarity)
    pub predicted_rating: f64,
    /// How many neighbours rated it
    pub supporting_users: usize,
}

/// Run statistics for one collaborative call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CollaborativeMetrics {
    /// Users considered
    pub users_considered: usize,
    /// Neighbours kept
    pub similar_users: usize,
    /// Distinct recipes rated by the neighbours
    pub candidate_recipes: usize,
    /// True when the neighbours had rated nothing usable
    pub insufficient_similar_users: bool,
    /// Wall time (milliseconds)
    pub elapsed_ms: f64,
}

/// Output of [`CollaborativeFilter::recommend`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollaborativeResult {
    /// Ranked predictions, best first
    pub recommendations: Vec<PredictedRating>,
    /// Neighbours used, most similar first
    pub neighbours: Vec<SimilarUser>,
    /// Run statistics
    pub metrics: CollaborativeMetrics,
}

/// User-user collaborative filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollaborativeFilter {
    /// Neighbours to keep
    k: usize,
    /// Recommendations to return
    n_recommendations: usize,
}

impl Default for CollaborativeFilter {
    fn default() -> Self {
        Self {
            k: 5,
            n_recommendations: 3,
        }
    }
}

impl CollaborativeFilter {
    /// Creates a filter with k = 5 neighbours and 3 recommendations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the neighbour count.
    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Sets the number of recommendations returned.
    #[must_use]
    pub fn with_n_recommendations(mut self, n: usize) -> Self {
        self.n_recommendations = n;
        self
    }

    /// Returns the neighbour count.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// The `k` users most similar to `target`, most similar first.
    /// Ties keep the order of `profiles`.
    #[must_use]
    pub fn top_k_similar(
        &self,
        target: &UserPreferences,
        profiles: &[UserProfile],
    ) -> Vec<SimilarUser> {
        let mut ranked: Vec<SimilarUser> = profiles
            .iter()
            .map(|p| SimilarUser {
                user_id: p.user_id.clone(),
                similarity: preference_similarity(target, &p.preferences),
            })
            .collect();

        // Stable sort keeps enumeration order among equal similarities.
        ranked.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(self.k);
        ranked
    }

    /// Recommends recipes using the ratings stored on the profiles.
    #[must_use]
    pub fn recommend(&self, target: &UserPreferences, profiles: &[UserProfile]) -> CollaborativeResult {
        let matrix = RatingMatrix::from_profiles(profiles);
        self.recommend_with_matrix(target, profiles, &matrix)
    }

    /// Recommends recipes, reading neighbour ratings from `matrix`.
    ///
    /// Recipes no neighbour rated are left out rather than defaulted. When
    /// nothing is left the result is empty and
    /// `metrics.insufficient_similar_users` is set.
    #[must_use]
    pub fn recommend_with_matrix(
        &self,
        target: &UserPreferences,
        profiles: &[UserProfile],
        matrix: &RatingMatrix,
    ) -> CollaborativeResult {
        let start = Instant::now();
        let neighbours = self.top_k_similar(target, profiles);

        // recipe id -> (Σ rating·sim, Σ sim, count), in first-seen order
        let mut order: Vec<String> = Vec::new();
        let mut sums: HashMap<String, (f64, f64, usize)> = HashMap::new();

        for neighbour in &neighbours {
            let Some(ratings) = matrix.ratings_for(&neighbour.user_id) else {
                continue;
            };
            for (recipe_id, &rating) in ratings {
                let entry = sums.entry(recipe_id.clone()).or_insert_with(|| {
                    order.push(recipe_id.clone());
                    (0.0, 0.0, 0)
                });
                entry.0 += rating * neighbour.similarity;
                entry.1 += neighbour.similarity;
                entry.2 += 1;
            }
        }

        let candidate_recipes = order.len();

        let mut recommendations: Vec<PredictedRating> = order
            .into_iter()
            .filter_map(|recipe_id| {
                let (weighted, total, count) = sums[&recipe_id];
                (total != 0.0).then(|| PredictedRating {
                    recipe_id,
                    predicted_rating: weighted / total,
                    supporting_users: count,
                })
            })
            .collect();

        recommendations.sort_by(|a, b| {
            b.predicted_rating
                .partial_cmp(&a.predicted_rating)
                .unwrap_or(Ordering::Equal)
        });
        recommendations.truncate(self.n_recommendations);

        let metrics = CollaborativeMetrics {
            users_considered: profiles.len(),
            similar_users: neighbours.len(),
            candidate_recipes,
            insufficient_similar_users: recommendations.is_empty(),
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        };

        if metrics.insufficient_similar_users {
            tracing::debug!(
                users = profiles.len(),
                neighbours = neighbours.len(),
                "no rated recipes among similar users"
            );
        }

        CollaborativeResult {
            recommendations,
            neighbours,
            metrics,
        }
    }
}

#[cfg(test)]
#[path = "collaborative_tests.rs"]
mod tests;
