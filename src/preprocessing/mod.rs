//! Recipe feature extraction.
//!
//! Maps a [`Recipe`] to a fixed-length numeric vector used by the
//! distance-based algorithms (k-means, silhouette) and the regression
//! design matrix.
//!
//! Scaling uses fixed reference magnitudes rather than statistics fitted on
//! a corpus, so the same recipe always yields the same vector regardless of
//! which catalog it appears in.
//!
//! # Example
//!
//! ```
//! use cocinar::preprocessing::RecipeVectorizer;
//! use cocinar::recipe::Recipe;
//!
//! let recipe = Recipe::new("r", "Oats")
//!     .with_nutrition(500.0, 20.0, 60.0, 10.0)
//!     .with_cooking_time(60.0);
//!
//! let v = RecipeVectorizer::default().transform(&recipe);
//! assert_eq!(v.as_slice(), &[0.5, 0.2, 0.6, 0.1, 0.5]);
//! ```

use crate::error::Result;
use crate::primitives::{Matrix, Vector};
use crate::recipe::Recipe;
use serde::{Deserialize, Serialize};

/// Number of features per recipe.
pub const N_FEATURES: usize = 5;

/// Feature names in vector order.
pub const FEATURE_NAMES: [&str; N_FEATURES] =
    ["calories", "protein", "carbs", "fat", "cooking_time"];

/// Reference magnitudes each raw field is divided by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureScale {
    /// kcal
    pub calories: f64,
    /// grams
    pub protein: f64,
    /// grams
    pub carbs: f64,
    /// grams
    pub fat: f64,
    /// minutes
    pub cooking_time: f64,
}

impl Default for FeatureScale {
    fn default() -> Self {
        Self {
            calories: 1000.0,
            protein: 100.0,
            carbs: 100.0,
            fat: 100.0,
            cooking_time: 120.0,
        }
    }
}

/// Turns recipes into scaled feature vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeVectorizer {
    scale: FeatureScale,
}

impl RecipeVectorizer {
    /// Creates a vectorizer with custom reference magnitudes.
    #[must_use]
    pub fn with_scale(scale: FeatureScale) -> Self {
        Self { scale }
    }

    /// Returns the reference magnitudes.
    #[must_use]
    pub fn scale(&self) -> &FeatureScale {
        &self.scale
    }

    /// Feature vector for one recipe.
    #[must_use]
    pub fn transform(&self, recipe: &Recipe) -> Vector<f64> {
        Vector::from_vec(self.transform_raw(recipe).to_vec())
    }

    /// Feature values as a fixed array.
    #[must_use]
    pub fn transform_raw(&self, recipe: &Recipe) -> [f64; N_FEATURES] {
        [
            scaled(recipe.calories, self.scale.calories),
            scaled(recipe.protein, self.scale.protein),
            scaled(recipe.carbs, self.scale.carbs),
            scaled(recipe.fat, self.scale.fat),
            scaled(recipe.cooking_time, self.scale.cooking_time),
        ]
    }

    /// Feature matrix with one row per recipe, in corpus order.
    ///
    /// # Errors
    ///
    /// Never fails for well-formed input; the `Result` carries the matrix
    /// constructor's shape check.
    pub fn transform_corpus(&self, recipes: &[Recipe]) -> Result<Matrix<f64>> {
        let data: Vec<f64> = recipes
            .iter()
            .flat_map(|r| self.transform_raw(r))
            .collect();
        Matrix::from_vec(recipes.len(), N_FEATURES, data)
    }
}

fn scaled(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        value
    } else {
        value / reference
    }
}
