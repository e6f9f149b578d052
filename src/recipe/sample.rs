use super::{Difficulty, Recipe};

/// The fixed ten-recipe catalog used by the scenario tests, benches and
/// doc examples.
#[must_use]
pub fn sample_corpus() -> Vec<Recipe> {
    vec![
        Recipe::new("r1", "Greek Yogurt Parfait")
            .with_nutrition(280.0, 22.0, 35.0, 6.0)
            .with_cooking_time(5.0)
            .with_cost(4.5)
            .with_cuisine("Greek")
            .with_difficulty(Difficulty::Easy)
            .with_ingredients(["greek yogurt", "granola", "blueberries", "honey"])
            .with_tags(["breakfast", "vegetarian", "high-protein", "quick"])
            .with_ratings([5.0, 4.0, 5.0, 5.0]),
        Recipe::new("r2", "Grilled Chicken Salad")
            .with_nutrition(350.0, 35.0, 12.0, 15.0)
            .with_cooking_time(20.0)
            .with_cost(9.0)
            .with_cuisine("American")
            .with_difficulty(Difficulty::Easy)
            .with_ingredients([
                "chicken breast",
                "romaine lettuce",
                "cherry tomatoes",
                "cucumber",
                "olive oil",
            ])
            .with_tags(["lunch", "high-protein", "low-carb", "gluten-free"])
            .with_ratings([4.0, 5.0, 4.0, 4.0]),
        Recipe::new("r3", "Salmon with Roasted Vegetables")
            .with_nutrition(520.0, 38.0, 25.0, 28.0)
            .with_cooking_time(35.0)
            .with_cost(18.0)
            .with_cuisine("Mediterranean")
            .with_difficulty(Difficulty::Medium)
            .with_ingredients(["salmon fillet", "broccoli", "bell pepper", "zucchini", "olive oil"])
            .with_tags(["dinner", "high-protein", "omega-3", "gluten-free"])
            .with_ratings([5.0, 5.0, 4.0, 5.0]),
        Recipe::new("r4", "Vegetable Stir Fry")
            .with_nutrition(320.0, 12.0, 45.0, 10.0)
            .with_cooking_time(15.0)
            .with_cost(6.5)
            .with_cuisine("Asian")
            .with_difficulty(Difficulty::Easy)
            .with_ingredients(["broccoli", "carrots", "snap peas", "soy sauce", "rice"])
            .with_tags(["dinner", "vegetarian", "vegan", "quick"])
            .with_ratings([4.0, 3.0, 4.0]),
        Recipe::new("r5", "Quinoa Buddha Bowl")
            .with_nutrition(450.0, 18.0, 60.0, 14.0)
            .with_cooking_time(25.0)
            .with_cost(8.0)
            .with_cuisine("Mediterranean")
            .with_difficulty(Difficulty::Easy)
            .with_ingredients(["quinoa", "chickpeas", "sweet potato", "kale", "tahini"])
            .with_tags(["lunch", "vegetarian", "vegan", "gluten-free"])
            .with_ratings([4.0, 4.0, 5.0]),
        Recipe::new("r6", "Turkey Chili")
            .with_nutrition(380.0, 32.0, 30.0, 12.0)
            .with_cooking_time(45.0)
            .with_cost(10.0)
            .with_cuisine("Mexican")
            .with_difficulty(Difficulty::Medium)
            .with_ingredients(["ground turkey", "kidney beans", "tomatoes", "onion", "chili powder"])
            .with_tags(["dinner", "high-protein"])
            .with_ratings([4.0, 5.0, 4.0]),
        Recipe::new("r7", "Egg White Omelette")
            .with_nutrition(220.0, 24.0, 6.0, 8.0)
            .with_cooking_time(10.0)
            .with_cost(3.5)
            .with_cuisine("French")
            .with_difficulty(Difficulty::Easy)
            .with_ingredients(["egg whites", "spinach", "mushrooms", "feta cheese"])
            .with_tags(["breakfast", "vegetarian", "high-protein", "low-carb", "quick"])
            .with_ratings([4.0, 4.0, 3.0, 4.0]),
        Recipe::new("r8", "Beef Tacos")
            .with_nutrition(560.0, 30.0, 40.0, 28.0)
            .with_cooking_time(25.0)
            .with_cost(12.0)
            .with_cuisine("Mexican")
            .with_difficulty(Difficulty::Easy)
            .with_ingredients(["ground beef", "corn tortillas", "cheddar cheese", "salsa", "lettuce"])
            .with_tags(["dinner"])
            .with_ratings([5.0, 4.0, 4.0]),
        Recipe::new("r9", "Lentil Soup")
            .with_nutrition(310.0, 18.0, 48.0, 4.0)
            .with_cooking_time(40.0)
            .with_cost(5.0)
            .with_cuisine("Middle Eastern")
            .with_difficulty(Difficulty::Easy)
            .with_ingredients(["red lentils", "carrots", "onion", "cumin", "vegetable broth"])
            .with_tags(["lunch", "vegetarian", "vegan", "high-fiber"])
            .with_ratings([4.0, 4.0, 4.0]),
        Recipe::new("r10", "Tuna Poke Bowl")
            .with_nutrition(390.0, 28.0, 42.0, 9.0)
            .with_cooking_time(15.0)
            .with_cost(9.5)
            .with_cuisine("Japanese")
            .with_difficulty(Difficulty::Medium)
            .with_ingredients(["ahi tuna", "sushi rice", "avocado", "edamame", "soy sauce"])
            .with_tags(["lunch", "high-protein", "omega-3"])
            .with_ratings([5.0, 4.0, 5.0]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_corpus_shape() {
        let corpus = sample_corpus();
        assert_eq!(corpus.len(), 10);
        let ids: HashSet<&str> = corpus.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), 10, "ids must be unique");
        assert!(corpus.iter().all(|r| r.average_rating().is_some()));
    }

    #[test]
    fn test_sample_corpus_has_scenario_recipes() {
        let corpus = sample_corpus();
        let salmon = corpus
            .iter()
            .find(|r| r.title == "Salmon with Roasted Vegetables")
            .expect("salmon recipe present");
        assert_eq!(salmon.estimated_cost, 18.0);
        assert!(corpus.iter().any(|r| r.title == "Greek Yogurt Parfait"));
    }
}
