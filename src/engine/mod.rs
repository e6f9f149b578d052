//! Orchestration and the trained-model cache.
//!
//! [`RecipeEngine`] wires the algorithms together:
//!
//! - **train**: clusters the corpus and fits the satisfaction regression,
//!   replacing any cached [`TrainedModel`]
//! - **recommend**: cluster lookup, collaborative filtering and the rule
//!   engine, run independently and returned as one bundle
//! - **plan**: the meal-plan genetic algorithm
//!
//! The cached model is the only state the engine keeps between calls. It
//! changes only through [`RecipeEngine::train`] and
//! [`RecipeEngine::invalidate`].

use crate::cluster::{ClusterMetrics, ClusterResult, RecipeKMeans};
use crate::error::{CocinarError, Result};
use crate::linear_model::{LinearRegression, RegressionModel};
use crate::metaheuristics::{MealPlan, MealPlanOptimizer};
use crate::preprocessing::RecipeVectorizer;
use crate::primitives::{Matrix, Vector};
use crate::recipe::{MealTargets, Recipe, UserPreferences};
use crate::recommend::{
    CollaborativeFilter, CollaborativeMetrics, Exclusion, PredictedRating, RuleEngine,
    RuleMetrics, ScoredRecipe, UserProfile,
};
use crate::traits::Estimator;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Settings for every algorithm the engine runs.
///
/// Missing fields take their defaults when parsed from JSON.
///
/// # Example
///
/// ```
/// use cocinar::engine::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{"n_clusters": 4}"#).expect("valid config");
/// assert_eq!(config.n_clusters, 4);
/// assert_eq!(config.similar_users, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// k for k-means
    pub n_clusters: usize,
    /// k-means iteration cap
    pub max_iter: usize,
    /// k-means centroid shift tolerance
    pub tol: f64,
    /// Neighbours for collaborative filtering
    pub similar_users: usize,
    /// Collaborative recommendations returned
    pub collaborative_results: usize,
    /// Rule-engine recommendations returned
    pub rule_results: usize,
    /// Fit a bias term in the satisfaction regression
    pub fit_intercept: bool,
    /// Genetic algorithm settings
    pub meal_plan: MealPlanOptimizer,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            n_clusters: 3,
            max_iter: 100,
            tol: 1e-4,
            similar_users: 5,
            collaborative_results: 3,
            rule_results: 5,
            fit_intercept: true,
            meal_plan: MealPlanOptimizer::default(),
        }
    }
}

impl EngineConfig {
    /// Parses a JSON document and validates it.
    ///
    /// # Errors
    ///
    /// `Serialization` for malformed JSON, `InvalidHyperparameter` from
    /// [`EngineConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CocinarError::Serialization(format!("Invalid engine config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to JSON.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the cluster count.
    #[must_use]
    pub fn with_n_clusters(mut self, n_clusters: usize) -> Self {
        self.n_clusters = n_clusters;
        self
    }

    /// Sets the genetic algorithm settings.
    #[must_use]
    pub fn with_meal_plan(mut self, meal_plan: MealPlanOptimizer) -> Self {
        self.meal_plan = meal_plan;
        self
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("n_clusters", self.n_clusters),
            ("max_iter", self.max_iter),
            ("similar_users", self.similar_users),
            ("collaborative_results", self.collaborative_results),
            ("rule_results", self.rule_results),
        ];
        if let Some((param, value)) = positive.iter().find(|(_, v)| *v == 0) {
            return Err(CocinarError::invalid_hyperparameter(param, value, "> 0"));
        }
        if !(self.tol.is_finite() && self.tol >= 0.0) {
            return Err(CocinarError::invalid_hyperparameter(
                "tol",
                self.tol,
                "finite and >= 0",
            ));
        }
        self.meal_plan.validate()
    }

    fn kmeans(&self) -> RecipeKMeans {
        RecipeKMeans::new(self.n_clusters)
            .with_max_iter(self.max_iter)
            .with_tol(self.tol)
    }

    fn collaborative(&self) -> CollaborativeFilter {
        CollaborativeFilter::new()
            .with_k(self.similar_users)
            .with_n_recommendations(self.collaborative_results)
    }
}

/// Output of [`RecipeEngine::train`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    /// Clusters of the training corpus
    pub clusters: ClusterResult,
    /// Satisfaction regression; `None` when the data was degenerate
    pub regression: Option<RegressionModel>,
    /// Recipes in the training corpus
    pub n_recipes: usize,
    /// Wall time (milliseconds)
    pub training_time_ms: f64,
    vectorizer: RecipeVectorizer,
}

impl TrainedModel {
    /// Predicted mean rating for `recipe`, if a regression was fitted.
    #[must_use]
    pub fn predict_satisfaction(&self, recipe: &Recipe) -> Option<f64> {
        let features = self.vectorizer.transform_raw(recipe);
        self.regression
            .as_ref()
            .and_then(|model| model.predict_one(&features).ok())
    }
}

/// Per-algorithm statistics of one recommendation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleMetrics {
    /// Clustering run (cached or fresh)
    pub cluster: ClusterMetrics,
    /// True when cached clusters were used
    pub used_cached_clusters: bool,
    /// Collaborative filtering
    pub collaborative: CollaborativeMetrics,
    /// Rule engine
    pub rules: RuleMetrics,
}

/// Three ranked lists plus statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBundle {
    /// Best cluster for the user, if any cluster has members
    pub cluster_id: Option<usize>,
    /// Up to three recipe ids from that cluster
    pub cluster_based: Vec<String>,
    /// Similarity-weighted ratings from similar users
    pub collaborative: Vec<PredictedRating>,
    /// Rule-engine survivors, best first
    pub rule_based: Vec<ScoredRecipe>,
    /// Recipes removed by exclusion rules
    pub exclusions: Vec<Exclusion>,
    /// Per-algorithm statistics
    pub metrics: BundleMetrics,
    /// Wall time of the whole call (milliseconds)
    pub total_time_ms: f64,
}

/// Runs training, recommendation and planning; owns the trained-model
/// cache.
///
/// # Example
///
/// ```
/// use cocinar::engine::RecipeEngine;
/// use cocinar::recipe::{sample_corpus, UserPreferences};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let corpus = sample_corpus();
/// let mut rng = StdRng::seed_from_u64(1);
/// let mut engine = RecipeEngine::default();
///
/// engine.train(&corpus, &mut rng).expect("non-empty corpus");
/// let bundle = engine
///     .recommend(&corpus, &UserPreferences::new(), &[], &mut rng)
///     .expect("recommendation");
/// assert!(bundle.metrics.used_cached_clusters);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecipeEngine {
    config: EngineConfig,
    vectorizer: RecipeVectorizer,
    trained: Option<TrainedModel>,
}

impl RecipeEngine {
    /// Creates an engine with validated settings and an empty cache.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` from [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            vectorizer: RecipeVectorizer::default(),
            trained: None,
        })
    }

    /// Active settings.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The cached model, if any.
    #[must_use]
    pub fn trained(&self) -> Option<&TrainedModel> {
        self.trained.as_ref()
    }

    /// Drops the cached model and returns it.
    pub fn invalidate(&mut self) -> Option<TrainedModel> {
        self.trained.take()
    }

    /// Clusters `recipes` and fits the satisfaction regression, replacing
    /// the cached model.
    ///
    /// A degenerate regression (singular system, or no rated recipes) is
    /// logged and stored as `None`; clustering still succeeds.
    ///
    /// # Errors
    ///
    /// `EmptyCorpus` for an empty slice. The previous cache is kept when
    /// training fails.
    pub fn train<R: Rng + ?Sized>(&mut self, recipes: &[Recipe], rng: &mut R) -> Result<&TrainedModel> {
        let start = Instant::now();
        let clusters = self
            .config
            .kmeans()
            .with_vectorizer(self.vectorizer)
            .fit(recipes, rng)?;
        let regression = self.fit_regression(recipes)?;

        let model = TrainedModel {
            clusters,
            regression,
            n_recipes: recipes.len(),
            training_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            vectorizer: self.vectorizer,
        };

        tracing::info!(
            n_recipes = model.n_recipes,
            n_clusters = self.config.n_clusters,
            regression = model.regression.is_some(),
            elapsed_ms = model.training_time_ms,
            "engine trained"
        );

        Ok(&*self.trained.insert(model))
    }

    /// Mean rating ~ nutrition features, over recipes that have ratings.
    fn fit_regression(&self, recipes: &[Recipe]) -> Result<Option<RegressionModel>> {
        let (rows, targets): (Vec<Vec<f64>>, Vec<f64>) = recipes
            .iter()
            .filter_map(|r| {
                r.average_rating()
                    .map(|rating| (self.vectorizer.transform_raw(r).to_vec(), rating))
            })
            .unzip();

        if rows.is_empty() {
            tracing::warn!("no rated recipes; skipping satisfaction regression");
            return Ok(None);
        }

        let x = Matrix::from_rows(&rows)?;
        let y = Vector::from_vec(targets);
        let estimator = LinearRegression::new().with_intercept(self.config.fit_intercept);

        match estimator.fit(&x, &y) {
            Ok(model) => Ok(Some(model)),
            Err(CocinarError::SingularMatrix { pivot }) => {
                tracing::warn!(
                    n_samples = rows.len(),
                    pivot,
                    "satisfaction regression is singular; keeping clusters only"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Runs the three recommenders for one user.
    ///
    /// Cached clusters are used when present; otherwise `recipes` is
    /// clustered for this call only and the cache is left untouched.
    ///
    /// # Errors
    ///
    /// `EmptyCorpus` when clustering on the fly with no recipes.
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        recipes: &[Recipe],
        prefs: &UserPreferences,
        users: &[UserProfile],
        rng: &mut R,
    ) -> Result<RecommendationBundle> {
        let start = Instant::now();

        let fresh;
        let (clusters, used_cached_clusters) = match &self.trained {
            Some(model) => (&model.clusters, true),
            None => {
                fresh = self
                    .config
                    .kmeans()
                    .with_vectorizer(self.vectorizer)
                    .fit(recipes, rng)?;
                (&fresh, false)
            }
        };

        let cluster_pick = clusters.recommend_for_user(prefs);
        let collaborative = self.config.collaborative().recommend(prefs, users);
        let rules = RuleEngine::new()
            .with_top_n(self.config.rule_results)
            .recommend(recipes, prefs);

        let total_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        tracing::info!(
            cached = used_cached_clusters,
            cluster = ?cluster_pick.as_ref().map(|c| c.cluster_id),
            collaborative = collaborative.recommendations.len(),
            rule_based = rules.recommendations.len(),
            elapsed_ms = total_time_ms,
            "recommendations ready"
        );

        let (cluster_id, cluster_based) = match cluster_pick {
            Some(pick) => (Some(pick.cluster_id), pick.recipe_ids),
            None => (None, Vec::new()),
        };

        Ok(RecommendationBundle {
            cluster_id,
            cluster_based,
            collaborative: collaborative.recommendations,
            rule_based: rules.recommendations,
            exclusions: rules.exclusions,
            metrics: BundleMetrics {
                cluster: *clusters.metrics(),
                used_cached_clusters,
                collaborative: collaborative.metrics,
                rules: rules.metrics,
            },
            total_time_ms,
        })
    }

    /// Evolves a weekly plan with the configured genetic algorithm.
    ///
    /// # Errors
    ///
    /// `EmptyCorpus` for an empty slice.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        recipes: &[Recipe],
        targets: &MealTargets,
        rng: &mut R,
    ) -> Result<MealPlan> {
        let start = Instant::now();
        let plan = self.config.meal_plan.optimize(recipes, targets, rng)?;
        tracing::info!(
            fitness = plan.fitness,
            variety = plan.metrics.variety_score,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "meal plan ready"
        );
        Ok(plan)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
