//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use cocinar::prelude::*;
//! ```

pub use crate::cluster::{Cluster, ClusterResult, RecipeKMeans};
pub use crate::engine::{EngineConfig, RecipeEngine, RecommendationBundle, TrainedModel};
pub use crate::error::CocinarError;
pub use crate::linear_model::{LinearRegression, RegressionModel};
pub use crate::metaheuristics::{MealPlan, MealPlanOptimizer};
pub use crate::metrics::{mse, r_squared, rmse, silhouette_score};
pub use crate::preprocessing::RecipeVectorizer;
pub use crate::primitives::{Matrix, Vector};
pub use crate::recipe::{sample_corpus, MealTargets, Recipe, UserPreferences};
pub use crate::recommend::{CollaborativeFilter, RuleEngine, UserProfile};
pub use crate::traits::{Estimator, Predictor};
