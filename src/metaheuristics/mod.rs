//! Metaheuristic optimization.
//!
//! - [`MealPlanOptimizer`] - genetic algorithm (tournament selection,
//!   elitism, single-point crossover, point mutation) over weekly
//!   breakfast/lunch/dinner grids
//!
//! Every stochastic call takes the random source as a parameter, so a
//! seeded `StdRng` reproduces a run exactly.

pub mod meal_plan;

pub use meal_plan::{
    plan_fitness, DayPlan, Individual, MealPlan, MealPlanOptimizer, MealSlot, PlanMetrics,
    PlannedMeal, Population, DAYS_PER_WEEK, DAY_LABELS, MEALS_PER_DAY,
};
