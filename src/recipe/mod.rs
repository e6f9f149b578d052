//! Recipe catalog records and per-request user constraints.
//!
//! Recipes are owned by the caller's catalog and are never mutated by the
//! engine. Field names serialize in camelCase so records coming from a
//! document store deserialize without an adapter layer.
//!
//! # Example
//!
//! ```
//! use cocinar::recipe::{sample_corpus, UserPreferences};
//!
//! let corpus = sample_corpus();
//! assert_eq!(corpus.len(), 10);
//!
//! let prefs = UserPreferences::new()
//!     .with_max_calories(400.0)
//!     .with_budget(10.0);
//! assert_eq!(prefs.max_calories, Some(400.0));
//! ```

mod sample;

pub use sample::sample_corpus;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Preparation difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Little technique required
    #[default]
    Easy,
    /// Some technique required
    Medium,
    /// Advanced technique required
    Hard,
}

/// An immutable recipe record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Catalog identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Energy per serving (kcal)
    pub calories: f64,
    /// Protein per serving (g)
    pub protein: f64,
    /// Carbohydrates per serving (g)
    pub carbs: f64,
    /// Fat per serving (g)
    pub fat: f64,
    /// Total preparation time (minutes)
    pub cooking_time: f64,
    /// Estimated cost per serving
    pub estimated_cost: f64,
    /// Ingredient names
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Cuisine label
    #[serde(default)]
    pub cuisine: String,
    /// Preparation difficulty
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Free-form tags (meal slot, diet, ...)
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Individual user ratings (1-5)
    #[serde(default)]
    pub ratings: Vec<f64>,
}

impl Recipe {
    /// Creates a recipe with the given identity and nutrition, leaving the
    /// descriptive fields empty.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            cooking_time: 0.0,
            estimated_cost: 0.0,
            ingredients: Vec::new(),
            cuisine: String::new(),
            difficulty: Difficulty::Easy,
            tags: BTreeSet::new(),
            ratings: Vec::new(),
        }
    }

    /// Sets calories, protein, carbs and fat.
    #[must_use]
    pub fn with_nutrition(mut self, calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        self.calories = calories;
        self.protein = protein;
        self.carbs = carbs;
        self.fat = fat;
        self
    }

    /// Sets cooking time in minutes.
    #[must_use]
    pub fn with_cooking_time(mut self, minutes: f64) -> Self {
        self.cooking_time = minutes;
        self
    }

    /// Sets estimated cost.
    #[must_use]
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.estimated_cost = cost;
        self
    }

    /// Sets the cuisine label.
    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = cuisine.into();
        self
    }

    /// Sets the difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sets the ingredient list.
    #[must_use]
    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the tag set.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the rating sample.
    #[must_use]
    pub fn with_ratings(mut self, ratings: impl Into<Vec<f64>>) -> Self {
        self.ratings = ratings.into();
        self
    }

    /// Mean of the rating sample, `None` when nobody has rated the recipe.
    #[must_use]
    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            None
        } else {
            Some(self.ratings.iter().sum::<f64>() / self.ratings.len() as f64)
        }
    }

    /// Case-insensitive tag lookup.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Per-request user constraints. Every field is optional; each algorithm
/// documents how it treats an unset field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    /// Upper calorie bound per recipe
    pub max_calories: Option<f64>,
    /// Lower protein bound per recipe
    pub min_protein: Option<f64>,
    /// Upper cooking time bound (minutes)
    pub max_cooking_time: Option<f64>,
    /// Upper cost bound per recipe
    pub budget: Option<f64>,
    /// Dietary restrictions such as `vegetarian`, `vegan`, `gluten-free`
    pub dietary_restrictions: BTreeSet<String>,
    /// Cuisines that earn a boost
    pub preferred_cuisines: BTreeSet<String>,
}

impl UserPreferences {
    /// Calorie ceiling assumed by similarity and cluster scoring when unset.
    pub const DEFAULT_MAX_CALORIES: f64 = 400.0;
    /// Protein floor assumed by similarity and cluster scoring when unset.
    pub const DEFAULT_MIN_PROTEIN: f64 = 15.0;
    /// Cooking time ceiling assumed by similarity and cluster scoring when unset.
    pub const DEFAULT_MAX_COOKING_TIME: f64 = 30.0;

    /// Creates an unconstrained preference record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `max_calories`, or [`Self::DEFAULT_MAX_CALORIES`].
    #[must_use]
    pub fn max_calories_or_default(&self) -> f64 {
        self.max_calories.unwrap_or(Self::DEFAULT_MAX_CALORIES)
    }

    /// `min_protein`, or [`Self::DEFAULT_MIN_PROTEIN`].
    #[must_use]
    pub fn min_protein_or_default(&self) -> f64 {
        self.min_protein.unwrap_or(Self::DEFAULT_MIN_PROTEIN)
    }

    /// `max_cooking_time`, or [`Self::DEFAULT_MAX_COOKING_TIME`].
    #[must_use]
    pub fn max_cooking_time_or_default(&self) -> f64 {
        self.max_cooking_time
            .unwrap_or(Self::DEFAULT_MAX_COOKING_TIME)
    }

    /// Sets the calorie ceiling.
    #[must_use]
    pub fn with_max_calories(mut self, value: f64) -> Self {
        self.max_calories = Some(value);
        self
    }

    /// Sets the protein floor.
    #[must_use]
    pub fn with_min_protein(mut self, value: f64) -> Self {
        self.min_protein = Some(value);
        self
    }

    /// Sets the cooking time ceiling.
    #[must_use]
    pub fn with_max_cooking_time(mut self, value: f64) -> Self {
        self.max_cooking_time = Some(value);
        self
    }

    /// Sets the per-recipe budget.
    #[must_use]
    pub fn with_budget(mut self, value: f64) -> Self {
        self.budget = Some(value);
        self
    }

    /// Adds a dietary restriction.
    #[must_use]
    pub fn with_restriction(mut self, restriction: impl Into<String>) -> Self {
        self.dietary_restrictions.insert(restriction.into());
        self
    }

    /// Adds a preferred cuisine.
    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.preferred_cuisines.insert(cuisine.into());
        self
    }
}

/// Daily nutrition and cost targets for meal planning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTargets {
    /// Calories per day
    pub daily_calories: f64,
    /// Protein per day (g)
    pub daily_protein: f64,
    /// Spend per day
    pub budget: f64,
}

impl Default for MealTargets {
    fn default() -> Self {
        Self {
            daily_calories: 2000.0,
            daily_protein: 150.0,
            budget: 50.0,
        }
    }
}
