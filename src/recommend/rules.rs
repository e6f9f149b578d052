//! Rule-based constraint filtering and scoring.
//!
//! Rules are plain data ([`RuleKind`]) evaluated by one dispatcher,
//! [`Rule::matches`], so the rule set can be listed, reordered, and tested
//! one rule at a time.

use crate::recipe::{Recipe, UserPreferences};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Instant;

/// Ingredient words that make a recipe non-vegetarian. Plurals are
/// matched through [`names_any`].
pub const MEAT_INGREDIENTS: &[&str] = &[
    "meat",
    "meatball",
    "meatloaf",
    "chicken",
    "beef",
    "pork",
    "bacon",
    "ham",
    "lamb",
    "veal",
    "turkey",
    "duck",
    "sausage",
    "salmon",
    "tuna",
    "fish",
    "shrimp",
    "prawn",
    "crab",
    "lobster",
    "anchovy",
    "prosciutto",
    "pepperoni",
    "salami",
    "chorizo",
];

/// Animal products a vegan recipe must also avoid.
pub const ANIMAL_PRODUCTS: &[&str] = &[
    "egg", "milk", "cheese", "yogurt", "butter", "cream", "honey", "gelatin", "whey",
];

/// Points per unit of boost weight.
const BOOST_POINTS: f64 = 20.0;

/// Hard constraints. A recipe matching any of them is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcludeCheck {
    /// Estimated cost above the budget
    OverBudget,
    /// Cooking time above the maximum
    OverTime,
    /// Ingredients or tags conflict with a dietary restriction
    DietaryViolation,
    /// Protein below the minimum
    UnderProtein,
    /// Calories above the maximum
    OverCalories,
}

impl ExcludeCheck {
    /// True when the recipe breaks the constraint. Unset constraints never
    /// exclude anything.
    #[must_use]
    pub fn violated(self, recipe: &Recipe, prefs: &UserPreferences) -> bool {
        match self {
            Self::OverBudget => prefs.budget.is_some_and(|b| recipe.estimated_cost > b),
            Self::OverTime => prefs
                .max_cooking_time
                .is_some_and(|t| recipe.cooking_time > t),
            Self::DietaryViolation => prefs
                .dietary_restrictions
                .iter()
                .any(|r| !satisfies_restriction(recipe, r)),
            Self::UnderProtein => prefs.min_protein.is_some_and(|p| recipe.protein < p),
            Self::OverCalories => prefs.max_calories.is_some_and(|c| recipe.calories > c),
        }
    }
}

/// Soft preferences that add to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostCheck {
    /// Recipe cuisine is one of the preferred cuisines
    CuisineMatch,
}

impl BoostCheck {
    /// True when the recipe earns the boost.
    #[must_use]
    pub fn applies(self, recipe: &Recipe, prefs: &UserPreferences) -> bool {
        match self {
            Self::CuisineMatch => prefs
                .preferred_cuisines
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&recipe.cuisine)),
        }
    }
}

/// What a rule does when it matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RuleKind {
    /// Remove the recipe
    Exclude {
        /// Constraint checked
        check: ExcludeCheck,
    },
    /// Add `weight × 20` to the score
    Boost {
        /// Preference checked
        check: BoostCheck,
        /// Score multiplier
        weight: f64,
    },
}

/// A named rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Short identifier
    pub name: String,
    /// Human-readable explanation shown to the user
    pub reason: String,
    /// Action and predicate
    pub kind: RuleKind,
}

impl Rule {
    /// Creates an exclusion rule.
    #[must_use]
    pub fn exclude(name: &str, reason: &str, check: ExcludeCheck) -> Self {
        Self {
            name: name.to_string(),
            reason: reason.to_string(),
            kind: RuleKind::Exclude { check },
        }
    }

    /// Creates a boost rule.
    #[must_use]
    pub fn boost(name: &str, reason: &str, check: BoostCheck, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            reason: reason.to_string(),
            kind: RuleKind::Boost { check, weight },
        }
    }

    /// Evaluates the rule's predicate.
    #[must_use]
    pub fn matches(&self, recipe: &Recipe, prefs: &UserPreferences) -> bool {
        match self.kind {
            RuleKind::Exclude { check } => check.violated(recipe, prefs),
            RuleKind::Boost { check, .. } => check.applies(recipe, prefs),
        }
    }

    /// True for exclusion rules.
    #[must_use]
    pub fn is_exclude(&self) -> bool {
        matches!(self.kind, RuleKind::Exclude { .. })
    }
}

/// The fixed rule set, exclusions in evaluation order followed by the
/// cuisine boost.
#[must_use]
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::exclude("over_budget", "Exceeds budget", ExcludeCheck::OverBudget),
        Rule::exclude("over_time", "Takes too long to prepare", ExcludeCheck::OverTime),
        Rule::exclude(
            "dietary_violation",
            "Conflicts with dietary restrictions",
            ExcludeCheck::DietaryViolation,
        ),
        Rule::exclude("under_protein", "Not enough protein", ExcludeCheck::UnderProtein),
        Rule::exclude("over_calories", "Too many calories", ExcludeCheck::OverCalories),
        Rule::boost(
            "cuisine_match",
            "Matches preferred cuisine",
            BoostCheck::CuisineMatch,
            1.0,
        ),
    ]
}

fn ingredient_words(recipe: &Recipe) -> impl Iterator<Item = String> + '_ {
    recipe.ingredients.iter().flat_map(|ingredient| {
        ingredient
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
    })
}

/// Whether `word` is one of `terms` or a regular plural of one
/// ("sausages", "anchovies", "shrimps").
fn names_any(word: &str, terms: &[&str]) -> bool {
    let candidates = [
        Some(word.to_string()),
        word.strip_suffix('s').map(str::to_string),
        word.strip_suffix("es").map(str::to_string),
        word.strip_suffix("ies").map(|stem| format!("{stem}y")),
    ];
    candidates
        .into_iter()
        .flatten()
        .any(|candidate| terms.contains(&candidate.as_str()))
}

fn contains_any(recipe: &Recipe, terms: &[&str]) -> bool {
    ingredient_words(recipe).any(|w| names_any(&w, terms))
}

/// Whether `recipe` is compatible with one dietary restriction.
fn satisfies_restriction(recipe: &Recipe, restriction: &str) -> bool {
    match restriction.to_lowercase().as_str() {
        "vegetarian" => !contains_any(recipe, MEAT_INGREDIENTS),
        "vegan" => {
            !contains_any(recipe, MEAT_INGREDIENTS) && !contains_any(recipe, ANIMAL_PRODUCTS)
        }
        other => recipe.has_tag(other),
    }
}

/// A recipe removed by the filter pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    /// Recipe identifier
    pub recipe_id: String,
    /// First matching rule in evaluation order
    pub rule: String,
    /// That rule's reason
    pub reason: String,
}

/// A surviving recipe with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecipe {
    /// Recipe identifier
    pub recipe_id: String,
    /// Recipe title
    pub title: String,
    /// Additive score
    pub score: f64,
    /// Why it scored well
    pub reasons: Vec<String>,
}

/// Run statistics for one rule-engine call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleMetrics {
    /// Recipes evaluated
    pub evaluated: usize,
    /// Recipes removed by exclusion rules
    pub excluded: usize,
    /// Recipes that survived filtering
    pub passed: usize,
    /// Wall time (milliseconds)
    pub elapsed_ms: f64,
}

/// Output of [`RuleEngine::recommend`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleEngineResult {
    /// Best-scoring survivors, best first
    pub recommendations: Vec<ScoredRecipe>,
    /// Every removed recipe
    pub exclusions: Vec<Exclusion>,
    /// Run statistics
    pub metrics: RuleMetrics,
}

/// Hard-exclude then score.
///
/// # Example
///
/// ```
/// use cocinar::recommend::RuleEngine;
/// use cocinar::recipe::{sample_corpus, UserPreferences};
///
/// let corpus = sample_corpus();
/// let prefs = UserPreferences::new().with_restriction("vegan");
/// let (kept, removed) = RuleEngine::default().filter(&corpus, &prefs);
/// assert_eq!(kept.len() + removed.len(), corpus.len());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEngine {
    rules: Vec<Rule>,
    top_n: usize,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            top_n: 5,
        }
    }
}

impl RuleEngine {
    /// Creates an engine with the default rules and top-5 output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the rule set.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// Sets how many recommendations are returned.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// The rules, in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First exclusion rule the recipe matches.
    #[must_use]
    pub fn first_exclusion(&self, recipe: &Recipe, prefs: &UserPreferences) -> Option<&Rule> {
        self.rules
            .iter()
            .filter(|r| r.is_exclude())
            .find(|r| r.matches(recipe, prefs))
    }

    /// Splits `recipes` into survivors (input order) and exclusions.
    #[must_use]
    pub fn filter<'a>(
        &self,
        recipes: &'a [Recipe],
        prefs: &UserPreferences,
    ) -> (Vec<&'a Recipe>, Vec<Exclusion>) {
        let mut kept = Vec::with_capacity(recipes.len());
        let mut removed = Vec::new();

        for recipe in recipes {
            match self.first_exclusion(recipe, prefs) {
                Some(rule) => removed.push(Exclusion {
                    recipe_id: recipe.id.clone(),
                    rule: rule.name.clone(),
                    reason: rule.reason.clone(),
                }),
                None => kept.push(recipe),
            }
        }

        (kept, removed)
    }

    /// Scores one recipe.
    ///
    /// `avg rating × 20`, +25 when a set protein minimum is met,
    /// `max(0, 30 − cooking time)`, `protein per 100 kcal × 8`,
    /// `max(0, (1 − cost / budget) × 15)` when a budget is set, plus
    /// `weight × 20` per matching boost rule.
    #[must_use]
    pub fn score(&self, recipe: &Recipe, prefs: &UserPreferences) -> ScoredRecipe {
        let mut score = 0.0;
        let mut reasons = Vec::new();

        let rating = recipe.average_rating().unwrap_or(0.0);
        score += rating * 20.0;
        if rating >= 4.0 {
            reasons.push("Highly rated".to_string());
        }

        if prefs.min_protein.is_some_and(|min| recipe.protein >= min) {
            score += 25.0;
            reasons.push("High protein content".to_string());
        }

        let quick = (30.0 - recipe.cooking_time).max(0.0);
        score += quick;
        if quick > 0.0 {
            reasons.push("Quick to prepare".to_string());
        }

        let protein_density = if recipe.calories > 0.0 {
            recipe.protein / (recipe.calories / 100.0)
        } else {
            0.0
        };
        score += protein_density * 8.0;
        if protein_density >= 8.0 {
            reasons.push("Good protein-to-calorie ratio".to_string());
        }

        if let Some(budget) = prefs.budget.filter(|&b| b > 0.0) {
            score += ((1.0 - recipe.estimated_cost / budget) * 15.0).max(0.0);
            if recipe.estimated_cost <= budget {
                reasons.push("Within budget".to_string());
            }
        }

        for rule in &self.rules {
            if let RuleKind::Boost { weight, .. } = rule.kind {
                if rule.matches(recipe, prefs) {
                    score += weight * BOOST_POINTS;
                    reasons.push(format!("{}: {}", rule.reason, recipe.cuisine));
                }
            }
        }

        ScoredRecipe {
            recipe_id: recipe.id.clone(),
            title: recipe.title.clone(),
            score,
            reasons,
        }
    }

    /// Filters, scores the survivors, and keeps the best `top_n`.
    /// Equal scores keep input order. May return fewer than `top_n`.
    #[must_use]
    pub fn recommend(&self, recipes: &[Recipe], prefs: &UserPreferences) -> RuleEngineResult {
        let start = Instant::now();
        let (kept, exclusions) = self.filter(recipes, prefs);

        let mut scored: Vec<ScoredRecipe> = kept.iter().map(|r| self.score(r, prefs)).collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(self.top_n);

        let metrics = RuleMetrics {
            evaluated: recipes.len(),
            excluded: exclusions.len(),
            passed: kept.len(),
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        };

        tracing::debug!(
            evaluated = metrics.evaluated,
            excluded = metrics.excluded,
            returned = scored.len(),
            "rule engine pass"
        );

        RuleEngineResult {
            recommendations: scored,
            exclusions,
            metrics,
        }
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
