use super::*;

fn synthetic_plane() -> (Matrix<f64>, Vector<f64>) {
    // y = 2 + 3*x1 - x2
    let rows: Vec<(f64, f64)> = vec![
        (0.0, 0.0),
        (1.0, 0.0),
        (0.0, 1.0),
        (2.0, 3.0),
        (4.0, 1.0),
        (-1.0, 2.0),
        (3.5, -2.0),
    ];
    let x = Matrix::from_vec(
        rows.len(),
        2,
        rows.iter().flat_map(|&(a, b)| [a, b]).collect(),
    )
    .expect("nx2");
    let y: Vector<f64> = rows.iter().map(|&(a, b)| 2.0 + 3.0 * a - b).collect();
    (x, y)
}

#[test]
fn test_recovers_noise_free_plane() {
    let (x, y) = synthetic_plane();
    let model = LinearRegression::new().fit(&x, &y).expect("well-posed system");

    let coef = model.coefficients();
    assert_eq!(coef.len(), 3);
    assert!((coef[0] - 2.0).abs() < 1e-6);
    assert!((coef[1] - 3.0).abs() < 1e-6);
    assert!((coef[2] + 1.0).abs() < 1e-6);
    assert!((model.r_squared() - 1.0).abs() < 1e-9);
    assert!(model.rmse() < 1e-9);
    assert_eq!(model.n_samples(), 7);
}

#[test]
fn test_simple_regression() {
    // y = 2x + 1
    let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).expect("4x1");
    let y = Vector::from_slice(&[3.0, 5.0, 7.0, 9.0]);

    let model = LinearRegression::new().fit(&x, &y).expect("well-posed system");
    assert!((model.weights()[0] - 2.0).abs() < 1e-9);
    assert!((model.intercept() - 1.0).abs() < 1e-9);

    let predictions = model.predict(&x).expect("same width");
    for i in 0..4 {
        assert!((predictions[i] - y[i]).abs() < 1e-9);
    }
}

#[test]
fn test_predict_one() {
    let (x, y) = synthetic_plane();
    let model = LinearRegression::new().fit(&x, &y).expect("well-posed system");
    let p = model.predict_one(&[10.0, 4.0]).expect("two features");
    assert!((p - 28.0).abs() < 1e-6);
}

#[test]
fn test_predict_one_wrong_width() {
    let (x, y) = synthetic_plane();
    let model = LinearRegression::new().fit(&x, &y).expect("well-posed system");
    assert!(matches!(
        model.predict_one(&[1.0]),
        Err(CocinarError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_no_intercept() {
    // y = 2x
    let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).expect("4x1");
    let y = Vector::from_slice(&[2.0, 4.0, 6.0, 8.0]);

    let model = LinearRegression::new()
        .with_intercept(false)
        .fit(&x, &y)
        .expect("well-posed system");
    assert_eq!(model.intercept(), 0.0);
    assert!((model.weights()[0] - 2.0).abs() < 1e-9);
}

#[test]
fn test_with_noise_r2_below_one() {
    let x = Matrix::from_vec(5, 1, vec![1.0, 2.0, 3.0, 4.0, 5.0]).expect("5x1");
    let y = Vector::from_slice(&[3.1, 4.9, 7.2, 8.8, 11.1]);

    let model = LinearRegression::new().fit(&x, &y).expect("well-posed system");
    assert!((model.weights()[0] - 2.0).abs() < 0.2);
    assert!(model.r_squared() > 0.95);
    assert!(model.r_squared() < 1.0);
    assert!(model.rmse() > 0.0);
}

#[test]
fn test_dimension_mismatch_error() {
    let x = Matrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("3x2");
    let y = Vector::from_slice(&[1.0, 2.0]);

    let result = LinearRegression::new().fit(&x, &y);
    assert!(matches!(result, Err(CocinarError::DimensionMismatch { .. })));
}

#[test]
fn test_empty_data_is_singular() {
    let x = Matrix::from_vec(0, 2, vec![]).expect("0x2");
    let y = Vector::from_vec(vec![]);

    let result = LinearRegression::new().fit(&x, &y);
    assert!(matches!(result, Err(CocinarError::SingularMatrix { .. })));
}

#[test]
fn test_empty_data_without_intercept_is_singular() {
    let x = Matrix::from_vec(0, 0, vec![]).expect("0x0");
    let y = Vector::from_vec(vec![]);

    let result = LinearRegression::new().with_intercept(false).fit(&x, &y);
    assert!(matches!(result, Err(CocinarError::SingularMatrix { .. })));
}

#[test]
fn test_underdetermined_is_singular() {
    // 3 samples, 5 features + bias = 6 parameters
    let x = Matrix::from_vec(
        3,
        5,
        vec![
            1.0, 2.0, 3.0, 4.0, 5.0, 2.0, 3.0, 4.0, 5.0, 6.0, 3.0, 4.0, 5.0, 6.0, 7.0,
        ],
    )
    .expect("3x5");
    let y = Vector::from_vec(vec![10.0, 20.0, 30.0]);

    let result = LinearRegression::new().fit(&x, &y);
    assert!(matches!(result, Err(CocinarError::SingularMatrix { .. })));
}

#[test]
fn test_collinear_features_are_singular() {
    // Second column is exactly twice the first.
    let x = Matrix::from_vec(4, 2, vec![1.0, 2.0, 2.0, 4.0, 3.0, 6.0, 4.0, 8.0]).expect("4x2");
    let y = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);

    let result = LinearRegression::new().fit(&x, &y);
    assert!(matches!(result, Err(CocinarError::SingularMatrix { .. })));
}

#[test]
fn test_exactly_determined_system() {
    let x = Matrix::from_vec(
        4,
        3,
        vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
    )
    .expect("4x3");
    let y = Vector::from_vec(vec![1.0, 2.0, 3.0, 6.0]);

    let result = LinearRegression::new().fit(&x, &y);
    assert!(result.is_ok(), "Exactly determined system should work");
}

#[test]
fn test_constant_target() {
    let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).expect("3x1");
    let y = Vector::from_slice(&[5.0, 5.0, 5.0]);

    let model = LinearRegression::new().fit(&x, &y).expect("well-posed system");
    assert!(model.weights()[0].abs() < 1e-9);
    assert!((model.intercept() - 5.0).abs() < 1e-9);
}

#[test]
fn test_predict_wrong_width() {
    let (x, y) = synthetic_plane();
    let model = LinearRegression::new().fit(&x, &y).expect("well-posed system");
    let other = Matrix::from_vec(1, 3, vec![1.0, 2.0, 3.0]).expect("1x3");
    assert!(model.predict(&other).is_err());
}

#[test]
fn test_model_serde_roundtrip() {
    let (x, y) = synthetic_plane();
    let model = LinearRegression::new().fit(&x, &y).expect("well-posed system");
    let json = serde_json::to_string(&model).expect("serializable");
    let back: RegressionModel = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(back.coefficients().len(), 3);
    assert_eq!(back.n_samples(), model.n_samples());
}

#[test]
fn test_deserialize_rejects_missing_bias() {
    let json = r#"{"coefficients":[],"r_squared":0.0,"rmse":0.0,"n_samples":0}"#;
    let result: std::result::Result<RegressionModel, _> = serde_json::from_str(json);
    let err = result.expect_err("empty coefficients must be rejected");
    assert!(err.to_string().contains("bias coefficient"));
}
