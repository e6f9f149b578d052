//! Cocinar: a recipe intelligence engine in pure Rust.
//!
//! Turns a recipe catalog and user profiles into recommendations,
//! satisfaction predictions and optimized weekly meal plans. Every
//! algorithm is implemented from first principles on small dense
//! matrices; there is no I/O inside the engine.
//!
//! # Quick Start
//!
//! ```
//! use cocinar::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let corpus = sample_corpus();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let mut engine = RecipeEngine::default();
//! engine.train(&corpus, &mut rng).expect("non-empty corpus");
//!
//! let prefs = UserPreferences::new()
//!     .with_max_calories(400.0)
//!     .with_min_protein(20.0)
//!     .with_budget(10.0);
//! let bundle = engine
//!     .recommend(&corpus, &prefs, &[], &mut rng)
//!     .expect("recommendation");
//! assert!(bundle.rule_based.len() <= 5);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Dense `Matrix` and `Vector` with Gauss-Jordan inverse
//! - [`recipe`]: Recipe, preferences and meal targets
//! - [`preprocessing`]: Recipe to feature-vector conversion
//! - [`cluster`]: K-Means over recipes and per-user cluster scoring
//! - [`linear_model`]: Closed-form OLS regression
//! - [`metrics`]: Silhouette, R², MSE, RMSE
//! - [`recommend`]: Collaborative filtering and the rule engine
//! - [`metaheuristics`]: Genetic algorithm for weekly meal plans
//! - [`engine`]: Orchestration and the trained-model cache
//!
//! # Randomness
//!
//! Stochastic calls take `rng: &mut R` where `R: rand::Rng`. Runs are
//! reproducible with a seeded `StdRng`; do not share one generator across
//! threads.

pub mod cluster;
pub mod engine;
pub mod error;
pub mod linear_model;
pub mod metaheuristics;
pub mod metrics;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod recipe;
pub mod recommend;
pub mod traits;

pub use error::{CocinarError, Result};
pub use primitives::{Matrix, Vector};
pub use traits::{Estimator, Predictor};
