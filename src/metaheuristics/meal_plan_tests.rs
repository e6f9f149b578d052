use super::*;
use crate::recipe::sample_corpus;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn uniform(index: usize) -> Individual {
    Individual {
        days: [[index; MEALS_PER_DAY]; DAYS_PER_WEEK],
    }
}

fn targets() -> MealTargets {
    MealTargets {
        daily_calories: 2000.0,
        daily_protein: 150.0,
        budget: 50.0,
    }
}

#[test]
fn test_fitness_on_target() {
    let recipes = vec![Recipe::new("a", "A")
        .with_nutrition(600.0, 50.0, 0.0, 0.0)
        .with_cost(10.0)];
    // Per day: 80 (200 kcal short) + 50 + 30 + 10; plus 5 for one distinct recipe.
    let f = plan_fitness(&uniform(0), &recipes, &targets());
    assert!((f - 1195.0).abs() < 1e-9);
}

#[test]
fn test_fitness_penalties() {
    let recipes = vec![Recipe::new("a", "A")
        .with_nutrition(600.0, 25.0, 0.0, 0.0)
        .with_cost(20.0)];
    // Per day: 80 + 25 (half the protein) − 20 (10 over budget) + 10
    let f = plan_fitness(&uniform(0), &recipes, &targets());
    assert!((f - (95.0 * 7.0 + 5.0)).abs() < 1e-9);
}

#[test]
fn test_fitness_rewards_variety() {
    let recipes: Vec<Recipe> = (0..3)
        .map(|i| {
            Recipe::new(format!("r{i}"), "R")
                .with_nutrition(600.0, 50.0, 0.0, 0.0)
                .with_cost(10.0)
        })
        .collect();
    let varied = Individual {
        days: [[0, 1, 2]; DAYS_PER_WEEK],
    };
    // Each day gains 20 for two extra distinct meals; the plan gains 10.
    let diff = plan_fitness(&varied, &recipes, &targets())
        - plan_fitness(&uniform(0), &recipes, &targets());
    assert!((diff - (20.0 * 7.0 + 10.0)).abs() < 1e-9);
}

#[test]
fn test_crossover_point() {
    let a = uniform(1);
    let b = uniform(2);
    let child = a.crossover(&b, 3);
    assert!(child.days[..3].iter().all(|d| *d == [1; 3]));
    assert!(child.days[3..].iter().all(|d| *d == [2; 3]));
    assert_eq!(a.crossover(&b, 0), b);
}

#[test]
fn test_population_ranked_ties_keep_order() {
    let recipes = vec![
        Recipe::new("a", "A").with_nutrition(600.0, 50.0, 0.0, 0.0),
        Recipe::new("b", "B").with_nutrition(100.0, 5.0, 0.0, 0.0),
    ];
    let population = Population::evaluate(vec![uniform(1), uniform(0), uniform(0)], &recipes, &targets());
    assert_eq!(population.ranked(), vec![1, 2, 0]);
    let (best, _) = population.best().expect("non-empty");
    assert_eq!(*best, uniform(0));
}

#[test]
fn test_empty_corpus() {
    let mut rng = StdRng::seed_from_u64(0);
    let result = MealPlanOptimizer::default().optimize(&[], &targets(), &mut rng);
    assert!(matches!(result, Err(CocinarError::EmptyCorpus { .. })));
}

#[test]
fn test_invalid_settings() {
    let corpus = sample_corpus();
    let mut rng = StdRng::seed_from_u64(0);
    for optimizer in [
        MealPlanOptimizer::default().with_population_size(0),
        MealPlanOptimizer::default().with_elite_count(60),
        MealPlanOptimizer::default().with_tournament_size(0),
        MealPlanOptimizer::default().with_mutation_rate(1.5),
    ] {
        let result = optimizer.optimize(&corpus, &targets(), &mut rng);
        assert!(matches!(
            result,
            Err(CocinarError::InvalidHyperparameter { .. })
        ));
    }
}

#[test]
fn test_plan_shape_and_history() {
    let corpus = sample_corpus();
    let mut rng = StdRng::seed_from_u64(42);
    let plan = MealPlanOptimizer::default()
        .optimize(&corpus, &MealTargets::default(), &mut rng)
        .expect("valid run");

    assert_eq!(plan.days.len(), 7);
    assert_eq!(plan.days[0].day, "Monday");
    assert_eq!(plan.days[6].day, "Sunday");
    for day in &plan.days {
        let slots: Vec<MealSlot> = day.meals.iter().map(|m| m.slot).collect();
        assert_eq!(slots, MealSlot::ALL.to_vec());
    }

    assert_eq!(plan.generations, 100);
    assert_eq!(plan.history.len(), 101);
    assert!((plan.history[100] - plan.fitness).abs() < 1e-9);
    assert!((plan_fitness(&plan.individual, &corpus, &MealTargets::default()) - plan.fitness).abs() < 1e-9);
}

#[test]
fn test_elitism_never_loses_best() {
    let corpus = sample_corpus();
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let plan = MealPlanOptimizer::default()
            .with_generations(30)
            .optimize(&corpus, &MealTargets::default(), &mut rng)
            .expect("valid run");
        for pair in plan.history.windows(2) {
            assert!(pair[1] >= pair[0], "best fitness dropped: {pair:?}");
        }
    }
}

#[test]
fn test_same_seed_same_plan() {
    let corpus = sample_corpus();
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        MealPlanOptimizer::default()
            .with_generations(25)
            .optimize(&corpus, &MealTargets::default(), &mut rng)
            .expect("valid run")
    };
    assert_eq!(run(9), run(9));
}

#[test]
fn test_single_recipe_corpus() {
    let corpus: Vec<Recipe> = sample_corpus().into_iter().take(1).collect();
    let mut rng = StdRng::seed_from_u64(3);
    let plan = MealPlanOptimizer::default()
        .with_generations(5)
        .optimize(&corpus, &MealTargets::default(), &mut rng)
        .expect("valid run");
    assert_eq!(plan.metrics.unique_recipes, 1);
    assert!((plan.metrics.variety_score - 1.0 / 21.0).abs() < 1e-12);
    assert!(plan
        .days
        .iter()
        .flat_map(|d| &d.meals)
        .all(|m| m.recipe_id == "r1"));
}

#[test]
fn test_slot_filtering_uses_tags() {
    let corpus = sample_corpus();
    let mut rng = StdRng::seed_from_u64(11);
    let plan = MealPlanOptimizer::default()
        .with_generations(20)
        .with_slot_filtering(true)
        .optimize(&corpus, &MealTargets::default(), &mut rng)
        .expect("valid run");

    for meal in plan.days.iter().flat_map(|d| &d.meals) {
        let recipe = corpus
            .iter()
            .find(|r| r.id == meal.recipe_id)
            .expect("planned recipe exists");
        assert!(recipe.has_tag(meal.slot.tag()), "{} in {:?}", recipe.id, meal.slot);
    }
}

#[test]
fn test_slot_filtering_falls_back_to_corpus() {
    let corpus: Vec<Recipe> = (0..4)
        .map(|i| Recipe::new(format!("u{i}"), "Untagged").with_nutrition(500.0, 30.0, 0.0, 0.0))
        .collect();
    let mut rng = StdRng::seed_from_u64(2);
    let plan = MealPlanOptimizer::default()
        .with_generations(5)
        .with_slot_filtering(true)
        .optimize(&corpus, &MealTargets::default(), &mut rng)
        .expect("fallback to whole corpus");
    assert_eq!(plan.days.len(), 7);
}

#[test]
fn test_metrics() {
    let recipes = vec![
        Recipe::new("a", "A").with_nutrition(500.0, 30.0, 40.0, 10.0).with_cost(5.0),
        Recipe::new("b", "B").with_nutrition(700.0, 40.0, 60.0, 20.0).with_cost(9.0),
    ];
    let individual = Individual {
        days: [[0, 1, 0]; DAYS_PER_WEEK],
    };
    let m = PlanMetrics::compute(&individual, &recipes);
    assert!((m.total_calories - 1700.0 * 7.0).abs() < 1e-9);
    assert!((m.avg_daily_calories - 1700.0).abs() < 1e-9);
    assert!((m.avg_daily_protein - 100.0).abs() < 1e-9);
    assert!((m.total_carbs - 140.0 * 7.0).abs() < 1e-9);
    assert!((m.avg_daily_cost - 19.0).abs() < 1e-9);
    assert_eq!(m.unique_recipes, 2);
    assert!((m.variety_score - 2.0 / 21.0).abs() < 1e-12);
}

#[test]
fn test_slot_tags() {
    assert_eq!(MealSlot::Breakfast.tag(), "breakfast");
    assert_eq!(MealSlot::Dinner.tag(), "dinner");
}
