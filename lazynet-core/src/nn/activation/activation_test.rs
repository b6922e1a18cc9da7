use super::*;
use crate::utils::testing::check_tensor_near;
use approx::assert_relative_eq;

fn row(values: Vec<f32>) -> Tensor {
    Tensor::row_vector(values).expect("Failed to create test tensor")
}

#[test]
fn test_sigmoid_scalar_helper() {
    assert_relative_eq!(sigmoid(0.0f32), 0.5);
    assert_relative_eq!(sigmoid(1.0f64), 0.7310585786300049, epsilon = 1e-12);
}

#[test]
fn test_silu_compute() {
    let output = SiLU.compute(&row(vec![0.0, 1.0, -1.0]));
    check_tensor_near(&output, &[1, 3], &[0.0, 0.7310586, -0.2689414], 1e-6);
}

#[test]
fn test_silu_differentiate_from_cached_output() -> Result<(), LazyNetError> {
    let input = Tensor::new(vec![1.0], vec![1, 1])?;
    let output = Tensor::new(vec![0.7310586], vec![1, 1])?;
    let derivative = SiLU.differentiate(&input, &output)?;
    check_tensor_near(&derivative, &[1, 1], &[0.9276705], 1e-6);
    Ok(())
}

#[test]
fn test_silu_differentiate_matches_analytic_derivative() -> Result<(), LazyNetError> {
    let input = row(vec![-3.0, -0.5, 0.25, 2.0]);
    let output = SiLU.compute(&input);
    let derivative = SiLU.differentiate(&input, &output)?;
    for (&z, &d) in input.data().iter().zip(derivative.data()) {
        let s = sigmoid(z);
        assert_relative_eq!(d, s + z * s * (1.0 - s), epsilon = 1e-5);
    }
    Ok(())
}

#[test]
fn test_silu_derivative_is_singular_at_zero() -> Result<(), LazyNetError> {
    let input = row(vec![0.0, 1.0]);
    let output = SiLU.compute(&input);
    let derivative = SiLU.differentiate(&input, &output)?;
    assert!(!derivative.data()[0].is_finite());
    assert!(derivative.data()[1].is_finite());
    Ok(())
}

#[test]
fn test_differentiate_rejects_shape_mismatch() {
    let err = Sigmoid
        .differentiate(&row(vec![1.0, 2.0]), &row(vec![0.5]))
        .unwrap_err();
    assert!(matches!(err, LazyNetError::ShapeMismatch { .. }));
}

#[test]
fn test_sigmoid_and_tanh() -> Result<(), LazyNetError> {
    let input = row(vec![0.0, 2.0]);

    let a = Sigmoid.compute(&input);
    check_tensor_near(&a, &[1, 2], &[0.5, 0.8807971], 1e-6);
    check_tensor_near(&Sigmoid.differentiate(&input, &a)?, &[1, 2], &[0.25, 0.1049936], 1e-6);

    let t = HyperbolicTangent.compute(&input);
    check_tensor_near(&t, &[1, 2], &[0.0, 0.9640276], 1e-6);
    check_tensor_near(&HyperbolicTangent.differentiate(&input, &t)?, &[1, 2], &[1.0, 0.0706508], 1e-6);
    Ok(())
}

#[test]
fn test_relu_family() -> Result<(), LazyNetError> {
    let input = row(vec![-2.0, 0.0, 3.0]);

    let r = ReLU.compute(&input);
    assert_eq!(r.data(), &[0.0, 0.0, 3.0]);
    assert_eq!(ReLU.differentiate(&input, &r)?.data(), &[0.0, 0.0, 1.0]);

    let leaky = LeakyReLU::new(0.1)?;
    let l = leaky.compute(&input);
    check_tensor_near(&l, &[1, 3], &[-0.2, 0.0, 3.0], 1e-6);
    check_tensor_near(&leaky.differentiate(&input, &l)?, &[1, 3], &[0.1, 0.1, 1.0], 1e-6);

    let elu = ELU::new(1.0)?;
    let e = elu.compute(&input);
    check_tensor_near(&e, &[1, 3], &[-0.8646647, 0.0, 3.0], 1e-6);
    check_tensor_near(&elu.differentiate(&input, &e)?, &[1, 3], &[0.1353353, 1.0, 1.0], 1e-6);
    Ok(())
}

#[test]
fn test_softplus() -> Result<(), LazyNetError> {
    let input = row(vec![0.0, 1.0]);
    let a = SoftPlus.compute(&input);
    check_tensor_near(&a, &[1, 2], &[std::f32::consts::LN_2, 1.3132616], 1e-6);
    check_tensor_near(&SoftPlus.differentiate(&input, &a)?, &[1, 2], &[0.5, 0.7310586], 1e-6);

    let extreme = row(vec![100.0, 89.0, 20.0, -100.0]);
    let a = SoftPlus.compute(&extreme);
    assert!(a.all_finite());
    check_tensor_near(&a, &[1, 4], &[100.0, 89.0, 20.0, 0.0], 1e-4);
    Ok(())
}

#[test]
fn test_invalid_hyperparameters_fail_at_construction() {
    assert!(matches!(LeakyReLU::new(0.0), Err(LazyNetError::ConfigurationError(_))));
    assert!(matches!(LeakyReLU::new(1.5), Err(LazyNetError::ConfigurationError(_))));
    assert!(matches!(ELU::new(-1.0), Err(LazyNetError::ConfigurationError(_))));
    assert!(matches!(ELU::new(f32::NAN), Err(LazyNetError::ConfigurationError(_))));
}

#[test]
fn test_display_names() {
    assert_eq!(SiLU.to_string(), "SiLU");
    assert_eq!(LeakyReLU::default().to_string(), "Leaky ReLU (leakage: 0.1)");
    assert_eq!(ELU::default().to_string(), "ELU (alpha: 1)");
}
