use super::*;

fn prefs(cal: f64, protein: f64, time: f64) -> UserPreferences {
    UserPreferences::new()
        .with_max_calories(cal)
        .with_min_protein(protein)
        .with_max_cooking_time(time)
}

#[test]
fn test_similarity_identical_is_one() {
    let a = prefs(500.0, 25.0, 40.0);
    assert!((preference_similarity(&a, &a) - 1.0).abs() < 1e-12);
}

#[test]
fn test_similarity_is_scale_invariant() {
    let a = prefs(400.0, 15.0, 30.0);
    let b = prefs(800.0, 30.0, 60.0);
    assert!((preference_similarity(&a, &b) - 1.0).abs() < 1e-12);
}

#[test]
fn test_similarity_symmetric() {
    let a = prefs(350.0, 40.0, 15.0);
    let b = UserPreferences::new().with_min_protein(5.0);
    assert_eq!(preference_similarity(&a, &b), preference_similarity(&b, &a));
}

#[test]
fn test_similarity_zero_vector() {
    let zero = prefs(0.0, 0.0, 0.0);
    assert_eq!(preference_similarity(&zero, &UserPreferences::new()), 0.0);
}

#[test]
fn test_top_k_orders_and_truncates() {
    let target = prefs(400.0, 15.0, 30.0);
    let profiles = vec![
        UserProfile::new("far", prefs(100.0, 100.0, 5.0)),
        UserProfile::new("same", prefs(400.0, 15.0, 30.0)),
        UserProfile::new("near", prefs(420.0, 18.0, 30.0)),
    ];
    let top = CollaborativeFilter::new().with_k(2).top_k_similar(&target, &profiles);
    let ids: Vec<&str> = top.iter().map(|u| u.user_id.as_str()).collect();
    assert_eq!(ids, vec!["same", "near"]);
    assert!(top[0].similarity >= top[1].similarity);
}

#[test]
fn test_top_k_ties_keep_enumeration_order() {
    let target = UserPreferences::new();
    let profiles = vec![
        UserProfile::new("b", UserPreferences::new()),
        UserProfile::new("a", UserPreferences::new()),
        UserProfile::new("c", UserPreferences::new()),
    ];
    let top = CollaborativeFilter::new().top_k_similar(&target, &profiles);
    let ids: Vec<&str> = top.iter().map(|u| u.user_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[test]
fn test_weighted_average() {
    let target = prefs(400.0, 15.0, 30.0);
    let p1 = prefs(400.0, 15.0, 30.0);
    let p2 = prefs(300.0, 40.0, 20.0);
    let s1 = preference_similarity(&target, &p1);
    let s2 = preference_similarity(&target, &p2);

    let profiles = vec![
        UserProfile::new("u1", p1).with_rating("r1", 5.0).with_rating("r2", 2.0),
        UserProfile::new("u2", p2).with_rating("r1", 3.0),
    ];
    let result = CollaborativeFilter::new().recommend(&target, &profiles);

    let r1 = result
        .recommendations
        .iter()
        .find(|r| r.recipe_id == "r1")
        .expect("r1 rated by both");
    let expected = (5.0 * s1 + 3.0 * s2) / (s1 + s2);
    assert!((r1.predicted_rating - expected).abs() < 1e-12);
    assert_eq!(r1.supporting_users, 2);

    let r2 = &result.recommendations[1];
    assert_eq!(r2.recipe_id, "r2");
    assert!((r2.predicted_rating - 2.0).abs() < 1e-12);

    assert_eq!(result.metrics.similar_users, 2);
    assert_eq!(result.metrics.candidate_recipes, 2);
    assert!(!result.metrics.insufficient_similar_users);
}

#[test]
fn test_ranking_and_top_n() {
    let target = UserPreferences::new();
    let profiles = vec![UserProfile::new("u", UserPreferences::new())
        .with_rating("a", 3.0)
        .with_rating("b", 5.0)
        .with_rating("c", 4.0)
        .with_rating("d", 1.0)];
    let result = CollaborativeFilter::new().recommend(&target, &profiles);
    let ids: Vec<&str> = result
        .recommendations
        .iter()
        .map(|r| r.recipe_id.as_str())
        .collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
}

#[test]
fn test_zero_similarity_sum_skipped() {
    let target = UserPreferences::new();
    let profiles = vec![
        UserProfile::new("zero", prefs(0.0, 0.0, 0.0)).with_rating("only-zero", 5.0),
        UserProfile::new("u", UserPreferences::new()).with_rating("shared", 4.0),
    ];
    let result = CollaborativeFilter::new().recommend(&target, &profiles);
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(result.recommendations[0].recipe_id, "shared");
    assert_eq!(result.metrics.candidate_recipes, 2);
}

#[test]
fn test_no_users_is_insufficient() {
    let result = CollaborativeFilter::new().recommend(&UserPreferences::new(), &[]);
    assert!(result.recommendations.is_empty());
    assert!(result.metrics.insufficient_similar_users);
    assert_eq!(result.metrics.similar_users, 0);
}

#[test]
fn test_neighbours_without_ratings_is_insufficient() {
    let profiles = vec![UserProfile::new("u", UserPreferences::new())];
    let result = CollaborativeFilter::new().recommend(&UserPreferences::new(), &profiles);
    assert!(result.recommendations.is_empty());
    assert!(result.metrics.insufficient_similar_users);
    assert_eq!(result.metrics.similar_users, 1);
}

#[test]
fn test_external_matrix_snapshot() {
    let profiles = vec![UserProfile::new("u", UserPreferences::new()).with_rating("ignored", 5.0)];
    let mut row = BTreeMap::new();
    row.insert("from-matrix".to_string(), 4.0);
    let matrix = RatingMatrix::from_rows(vec![("u".to_string(), row)]);

    let result =
        CollaborativeFilter::new().recommend_with_matrix(&UserPreferences::new(), &profiles, &matrix);
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(result.recommendations[0].recipe_id, "from-matrix");
}

#[test]
fn test_rating_matrix_counts() {
    let profiles = vec![
        UserProfile::new("a", UserPreferences::new()).with_rating("r1", 4.0),
        UserProfile::new("b", UserPreferences::new())
            .with_rating("r1", 5.0)
            .with_rating("r2", 3.0),
    ];
    let matrix = RatingMatrix::from_profiles(&profiles);
    assert_eq!(matrix.n_users(), 2);
    assert_eq!(matrix.n_ratings(), 3);
    assert_eq!(matrix.ratings_for("b").map(BTreeMap::len), Some(2));
    assert!(matrix.ratings_for("missing").is_none());
}
