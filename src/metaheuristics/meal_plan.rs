//! Genetic algorithm for weekly meal plans.
//!
//! A plan is 7 days × 3 meals, each gene an index into the recipe corpus.
//! Every generation is built as a fresh [`Population`]: elites are copied
//! over, the rest come from tournament selection, single-point day
//! crossover and point mutation.
//!
//! # Example
//!
//! ```
//! use cocinar::metaheuristics::MealPlanOptimizer;
//! use cocinar::recipe::{sample_corpus, MealTargets};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let corpus = sample_corpus();
//! let mut rng = StdRng::seed_from_u64(7);
//! let plan = MealPlanOptimizer::default()
//!     .with_generations(20)
//!     .optimize(&corpus, &MealTargets::default(), &mut rng)
//!     .unwrap();
//!
//! assert_eq!(plan.days.len(), 7);
//! assert_eq!(plan.history.len(), 21);
//! ```

use crate::error::{CocinarError, Result};
use crate::recipe::{MealTargets, Recipe};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Days in a plan.
pub const DAYS_PER_WEEK: usize = 7;
/// Meals per day.
pub const MEALS_PER_DAY: usize = 3;
/// Day labels, Monday first.
pub const DAY_LABELS: [&str; DAYS_PER_WEEK] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Meal slot within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    /// First meal
    Breakfast,
    /// Second meal
    Lunch,
    /// Third meal
    Dinner,
}

impl MealSlot {
    /// Slots in day order.
    pub const ALL: [MealSlot; MEALS_PER_DAY] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    /// Tag naming the slot.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

/// One candidate plan: `days[d][m]` is a recipe index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Individual {
    /// Recipe indices per day and slot
    pub days: [[usize; MEALS_PER_DAY]; DAYS_PER_WEEK],
}

impl Individual {
    /// Distinct recipe indices across all 21 slots.
    #[must_use]
    pub fn unique_recipes(&self) -> usize {
        self.days.iter().flatten().collect::<HashSet<_>>().len()
    }

    /// Children take days `..point` from `self` and `point..` from `other`.
    #[must_use]
    pub fn crossover(&self, other: &Self, point: usize) -> Self {
        let mut days = other.days;
        days[..point.min(DAYS_PER_WEEK)].copy_from_slice(&self.days[..point.min(DAYS_PER_WEEK)]);
        Self { days }
    }
}

/// Fitness of one plan (higher is better).
///
/// Per day: `max(0, 100 − |calories − target| / 10)`, 50 for meeting the
/// protein target (else `50 × ratio`), 30 when within budget (else
/// `−2 × overage`), and 10 per distinct recipe that day. The whole plan
/// adds 5 per distinct recipe.
///
/// Panics if an index is out of range for `recipes`.
#[must_use]
pub fn plan_fitness(individual: &Individual, recipes: &[Recipe], targets: &MealTargets) -> f64 {
    let mut fitness = 0.0;

    for day in &individual.days {
        let (calories, protein, cost) = day.iter().fold((0.0, 0.0, 0.0), |(c, p, k), &i| {
            let r = &recipes[i];
            (c + r.calories, p + r.protein, k + r.estimated_cost)
        });

        fitness += (100.0 - (calories - targets.daily_calories).abs() / 10.0).max(0.0);

        fitness += if protein >= targets.daily_protein {
            50.0
        } else {
            50.0 * protein / targets.daily_protein
        };

        fitness += if cost <= targets.budget {
            30.0
        } else {
            -2.0 * (cost - targets.budget)
        };

        let unique_today = day.iter().collect::<HashSet<_>>().len();
        fitness += 10.0 * unique_today as f64;
    }

    fitness + 5.0 * individual.unique_recipes() as f64
}

/// One generation: individuals and their fitness, index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
    fitness: Vec<f64>,
}

impl Population {
    /// Evaluates every individual.
    #[must_use]
    pub fn evaluate(individuals: Vec<Individual>, recipes: &[Recipe], targets: &MealTargets) -> Self {
        let fitness = individuals
            .iter()
            .map(|ind| plan_fitness(ind, recipes, targets))
            .collect();
        Self {
            individuals,
            fitness,
        }
    }

    /// Number of individuals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// True when there are no individuals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Individuals in insertion order.
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Fitness values, aligned with [`Population::individuals`].
    #[must_use]
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Indices sorted by fitness, best first. Ties keep insertion order.
    #[must_use]
    pub fn ranked(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.sort_by(|&a, &b| {
            self.fitness[b]
                .partial_cmp(&self.fitness[a])
                .unwrap_or(Ordering::Equal)
        });
        indices
    }

    /// Fittest individual and its fitness.
    #[must_use]
    pub fn best(&self) -> Option<(&Individual, f64)> {
        self.ranked()
            .first()
            .map(|&i| (&self.individuals[i], self.fitness[i]))
    }

    fn tournament_select<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> &Individual {
        let mut best = rng.gen_range(0..self.len());
        for _ in 1..size {
            let candidate = rng.gen_range(0..self.len());
            if self.fitness[candidate] > self.fitness[best] {
                best = candidate;
            }
        }
        &self.individuals[best]
    }
}

/// A planned meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedMeal {
    /// Slot in the day
    pub slot: MealSlot,
    /// Recipe identifier
    pub recipe_id: String,
    /// Recipe title
    pub title: String,
}

/// One day of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day label ("Monday" ...)
    pub day: String,
    /// Breakfast, lunch, dinner
    pub meals: Vec<PlannedMeal>,
}

/// Nutrition and variety of a finished plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanMetrics {
    /// Weekly calories
    pub total_calories: f64,
    /// Weekly protein (g)
    pub total_protein: f64,
    /// Weekly carbohydrates (g)
    pub total_carbs: f64,
    /// Weekly fat (g)
    pub total_fat: f64,
    /// Weekly cost
    pub total_cost: f64,
    /// Calories per day
    pub avg_daily_calories: f64,
    /// Protein per day
    pub avg_daily_protein: f64,
    /// Cost per day
    pub avg_daily_cost: f64,
    /// Distinct recipes in the plan
    pub unique_recipes: usize,
    /// `unique_recipes / 21`
    pub variety_score: f64,
}

impl PlanMetrics {
    /// Totals and averages of `individual`.
    #[must_use]
    pub fn compute(individual: &Individual, recipes: &[Recipe]) -> Self {
        let mut metrics = Self::default();
        for &i in individual.days.iter().flatten() {
            let r = &recipes[i];
            metrics.total_calories += r.calories;
            metrics.total_protein += r.protein;
            metrics.total_carbs += r.carbs;
            metrics.total_fat += r.fat;
            metrics.total_cost += r.estimated_cost;
        }
        let days = DAYS_PER_WEEK as f64;
        metrics.avg_daily_calories = metrics.total_calories / days;
        metrics.avg_daily_protein = metrics.total_protein / days;
        metrics.avg_daily_cost = metrics.total_cost / days;
        metrics.unique_recipes = individual.unique_recipes();
        metrics.variety_score = metrics.unique_recipes as f64 / (DAYS_PER_WEEK * MEALS_PER_DAY) as f64;
        metrics
    }
}

/// Result of [`MealPlanOptimizer::optimize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    /// Seven days, Monday first
    pub days: Vec<DayPlan>,
    /// The winning genome
    pub individual: Individual,
    /// Its fitness
    pub fitness: f64,
    /// Generations run
    pub generations: usize,
    /// Best fitness of the initial population, then of each generation
    pub history: Vec<f64>,
    /// Nutrition and variety
    pub metrics: PlanMetrics,
}

/// Genetic algorithm over 7 × 3 meal grids.
///
/// Always runs the full generation count; there is no early stopping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealPlanOptimizer {
    /// Individuals per generation
    pub population_size: usize,
    /// Best individuals copied unchanged into the next generation
    pub elite_count: usize,
    /// Individuals drawn per tournament
    pub tournament_size: usize,
    /// Chance that a child gets one point mutation
    pub mutation_rate: f64,
    /// Generations to run
    pub generations: usize,
    /// Draw each slot from recipes tagged with that slot
    pub slot_filtering: bool,
}

impl Default for MealPlanOptimizer {
    fn default() -> Self {
        Self {
            population_size: 50,
            elite_count: 10,
            tournament_size: 3,
            mutation_rate: 0.1,
            generations: 100,
            slot_filtering: false,
        }
    }
}

impl MealPlanOptimizer {
    /// Creates an optimizer with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set population size
    #[must_use]
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set elite count
    #[must_use]
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count;
        self
    }

    /// Set tournament size
    #[must_use]
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Set mutation rate
    #[must_use]
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set generation count
    #[must_use]
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Enable breakfast/lunch/dinner candidate filtering by tag
    #[must_use]
    pub fn with_slot_filtering(mut self, enabled: bool) -> Self {
        self.slot_filtering = enabled;
        self
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// `InvalidHyperparameter` for a zero population or tournament, more
    /// elites than individuals, or a mutation rate outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(CocinarError::invalid_hyperparameter(
                "population_size",
                self.population_size,
                "> 0",
            ));
        }
        if self.elite_count > self.population_size {
            return Err(CocinarError::invalid_hyperparameter(
                "elite_count",
                self.elite_count,
                "<= population_size",
            ));
        }
        if self.tournament_size == 0 {
            return Err(CocinarError::invalid_hyperparameter(
                "tournament_size",
                self.tournament_size,
                "> 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(CocinarError::invalid_hyperparameter(
                "mutation_rate",
                self.mutation_rate,
                "in [0, 1]",
            ));
        }
        Ok(())
    }

    /// Candidate recipe indices per slot. A slot with no tagged recipe, or
    /// any slot when filtering is off, gets the whole corpus.
    fn slot_candidates(&self, recipes: &[Recipe]) -> [Vec<usize>; MEALS_PER_DAY] {
        MealSlot::ALL.map(|slot| {
            let tagged: Vec<usize> = if self.slot_filtering {
                recipes
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.has_tag(slot.tag()))
                    .map(|(i, _)| i)
                    .collect()
            } else {
                Vec::new()
            };
            if tagged.is_empty() {
                (0..recipes.len()).collect()
            } else {
                tagged
            }
        })
    }

    /// Evolves a weekly plan for `recipes`.
    ///
    /// # Errors
    ///
    /// `EmptyCorpus` when `recipes` is empty, `InvalidHyperparameter` from
    /// [`MealPlanOptimizer::validate`].
    pub fn optimize<R: Rng + ?Sized>(
        &self,
        recipes: &[Recipe],
        targets: &MealTargets,
        rng: &mut R,
    ) -> Result<MealPlan> {
        if recipes.is_empty() {
            return Err(CocinarError::empty_corpus("meal planning"));
        }
        self.validate()?;

        let candidates = self.slot_candidates(recipes);
        let random_meal = |slot: usize, rng: &mut R| {
            let pool = &candidates[slot];
            pool[rng.gen_range(0..pool.len())]
        };

        let initial: Vec<Individual> = (0..self.population_size)
            .map(|_| {
                let mut days = [[0; MEALS_PER_DAY]; DAYS_PER_WEEK];
                for day in &mut days {
                    for (slot, meal) in day.iter_mut().enumerate() {
                        *meal = random_meal(slot, rng);
                    }
                }
                Individual { days }
            })
            .collect();

        let mut population = Population::evaluate(initial, recipes, targets);
        let mut history = Vec::with_capacity(self.generations + 1);
        history.push(best_fitness(&population));

        for _ in 0..self.generations {
            let ranked = population.ranked();
            let mut next: Vec<Individual> = ranked
                .iter()
                .take(self.elite_count)
                .map(|&i| population.individuals[i])
                .collect();

            while next.len() < self.population_size {
                let p1 = population.tournament_select(self.tournament_size, rng);
                let p2 = population.tournament_select(self.tournament_size, rng);

                let point = rng.gen_range(0..DAYS_PER_WEEK);
                let mut child = p1.crossover(p2, point);

                if rng.gen::<f64>() < self.mutation_rate {
                    let day = rng.gen_range(0..DAYS_PER_WEEK);
                    let slot = rng.gen_range(0..MEALS_PER_DAY);
                    child.days[day][slot] = random_meal(slot, rng);
                }

                next.push(child);
            }

            population = Population::evaluate(next, recipes, targets);
            history.push(best_fitness(&population));
        }

        let (best, fitness) = population
            .best()
            .map(|(ind, f)| (*ind, f))
            .ok_or_else(|| CocinarError::empty_corpus("meal plan population"))?;

        tracing::debug!(
            generations = self.generations,
            population = self.population_size,
            fitness,
            unique_recipes = best.unique_recipes(),
            "meal plan optimized"
        );

        Ok(MealPlan {
            days: describe(&best, recipes),
            individual: best,
            fitness,
            generations: self.generations,
            history,
            metrics: PlanMetrics::compute(&best, recipes),
        })
    }
}

fn best_fitness(population: &Population) -> f64 {
    population.best().map_or(f64::NEG_INFINITY, |(_, f)| f)
}

fn describe(individual: &Individual, recipes: &[Recipe]) -> Vec<DayPlan> {
    individual
        .days
        .iter()
        .zip(DAY_LABELS)
        .map(|(day, label)| DayPlan {
            day: label.to_string(),
            meals: day
                .iter()
                .zip(MealSlot::ALL)
                .map(|(&i, slot)| PlannedMeal {
                    slot,
                    recipe_id: recipes[i].id.clone(),
                    title: recipes[i].title.clone(),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
#[path = "meal_plan_tests.rs"]
mod tests;
