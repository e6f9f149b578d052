//! Recommendation systems.
//!
//! This module provides the two per-user recommenders that run next to
//! cluster lookup:
//!
//! - **Collaborative**: finds users whose stated preferences resemble the
//!   target's and aggregates their ratings, weighted by similarity
//! - **Rule-based**: hard exclusion rules followed by an additive score
//!   over the surviving recipes
//!
//! # Quick Start
//!
//! ```
//! use cocinar::recommend::RuleEngine;
//! use cocinar::recipe::{sample_corpus, UserPreferences};
//!
//! let corpus = sample_corpus();
//! let prefs = UserPreferences::new().with_budget(10.0);
//!
//! let result = RuleEngine::default().recommend(&corpus, &prefs);
//! assert!(result.recommendations.len() <= 5);
//! assert!(result
//!     .recommendations
//!     .iter()
//!     .all(|r| r.reasons.iter().any(|reason| reason == "Within budget")));
//! ```

pub mod collaborative;
pub mod rules;

pub use collaborative::{
    preference_similarity, CollaborativeFilter, CollaborativeMetrics, CollaborativeResult,
    PredictedRating, RatingMatrix, SimilarUser, UserProfile,
};
pub use rules::{
    default_rules, BoostCheck, ExcludeCheck, Exclusion, Rule, RuleEngine, RuleEngineResult,
    RuleKind, RuleMetrics, ScoredRecipe,
};
