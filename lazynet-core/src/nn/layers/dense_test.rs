use super::*;
use crate::optim::SgdOptimizer;
use crate::tensor::zeros_like;
use crate::utils::testing::check_tensor_near;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Records every gradient it is asked to step on and never moves anything.
#[derive(Debug, Default)]
struct RecordingOptimizer {
    gradients: Vec<Tensor>,
}

impl Optimizer for RecordingOptimizer {
    fn step(&mut self, _param: &Parameter, gradient: &Tensor) -> Result<Tensor, LazyNetError> {
        self.gradients.push(gradient.clone());
        Ok(zeros_like(gradient))
    }
}

/// Dense layer 3 -> 2 with weights `[[1, 2, 3], [0, -1, 1]]` and biases `[0.5, -0.5]`.
fn known_layer() -> Result<Dense, LazyNetError> {
    let mut layer = Dense::new(2)?;
    layer.initialize(3, &mut StdRng::seed_from_u64(0))?;
    layer.restore(vec![
        (
            "weights".to_string(),
            Parameter::new(Tensor::new(vec![1.0, 2.0, 3.0, 0.0, -1.0, 1.0], vec![2, 3])?),
        ),
        ("biases".to_string(), Parameter::new(Tensor::row_vector(vec![0.5, -0.5])?)),
    ])?;
    Ok(layer)
}

#[test]
fn test_configuration_errors() {
    assert!(matches!(Dense::new(0), Err(LazyNetError::ConfigurationError(_))));
    let layer = Dense::new(2).unwrap();
    assert!(matches!(layer.with_l2_penalty(-0.1), Err(LazyNetError::ConfigurationError(_))));
}

#[test]
fn test_initialize_shapes() -> Result<(), LazyNetError> {
    let mut layer = Dense::new(4)?;
    assert!(matches!(layer.width(), Err(LazyNetError::NotInitialized { .. })));
    assert_eq!(layer.initialize(3, &mut StdRng::seed_from_u64(3))?, 4);
    assert_eq!(layer.width()?, 4);
    assert_eq!(layer.weights().map(|w| w.shape().to_vec()), Some(vec![4, 3]));
    assert_eq!(layer.biases().map(|b| b.data().to_vec()), Some(vec![0.0; 4]));

    let names: Vec<String> = layer.parameters()?.into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["weights", "biases"]);
    Ok(())
}

#[test]
fn test_seeded_initialization_is_reproducible() -> Result<(), LazyNetError> {
    let mut a = Dense::new(3)?;
    let mut b = Dense::new(3)?;
    a.initialize(5, &mut StdRng::seed_from_u64(42))?;
    b.initialize(5, &mut StdRng::seed_from_u64(42))?;
    assert_eq!(a.weights().map(|w| w.value()), b.weights().map(|w| w.value()));
    assert_ne!(a.weights().map(|w| w.id()), b.weights().map(|w| w.id()));
    Ok(())
}

#[test]
fn test_forward_affine() -> Result<(), LazyNetError> {
    let mut layer = known_layer()?;
    let x = Tensor::new(vec![1.0, 1.0, 1.0, 2.0, 0.0, -1.0], vec![2, 3])?;
    let output = layer.forward(&x)?;
    check_tensor_near(&output, &[2, 2], &[6.5, -0.5, -0.5, -1.5], 1e-6);
    assert_eq!(output, layer.infer(&x)?);
    Ok(())
}

#[test]
fn test_forward_rejects_wrong_width() -> Result<(), LazyNetError> {
    let mut layer = known_layer()?;
    let err = layer.forward(&Tensor::new(vec![1.0, 1.0], vec![1, 2])?).unwrap_err();
    assert!(matches!(err, LazyNetError::ShapeMismatch { .. }));
    Ok(())
}

#[test]
fn test_back_gradients() -> Result<(), LazyNetError> {
    let mut layer = known_layer()?;
    let mut optimizer = RecordingOptimizer::default();
    let x = Tensor::new(vec![1.0, 1.0, 1.0, 2.0, 0.0, -1.0], vec![2, 3])?;
    layer.forward(&x)?;

    let d_out = Tensor::new(vec![1.0, 0.0, 0.5, 2.0], vec![2, 2])?;
    let upstream = layer.back(Deferred::ready(d_out), &mut optimizer)?;

    assert_eq!(optimizer.gradients.len(), 2);
    // dW = dOutᵀ · x
    check_tensor_near(&optimizer.gradients[0], &[2, 3], &[2.0, 1.0, 0.5, 4.0, 0.0, -2.0], 1e-6);
    // db = Σ_batch dOut
    check_tensor_near(&optimizer.gradients[1], &[1, 2], &[1.5, 2.0], 1e-6);
    // dX = dOut · W
    check_tensor_near(&upstream.into_tensor()?, &[2, 3], &[1.0, 2.0, 3.0, 0.5, -1.0, 3.5], 1e-6);
    Ok(())
}

#[test]
fn test_l2_penalty_adds_to_weight_gradient_only() -> Result<(), LazyNetError> {
    let mut layer = known_layer()?.with_l2_penalty(0.5)?;
    let mut optimizer = RecordingOptimizer::default();
    layer.forward(&Tensor::new(vec![0.0, 0.0, 0.0], vec![1, 3])?)?;
    layer.back(Deferred::ready(Tensor::row_vector(vec![1.0, 1.0])?), &mut optimizer)?;

    check_tensor_near(&optimizer.gradients[0], &[2, 3], &[0.5, 1.0, 1.5, 0.0, -0.5, 0.5], 1e-6);
    check_tensor_near(&optimizer.gradients[1], &[1, 2], &[1.0, 1.0], 1e-6);
    Ok(())
}

#[test]
fn test_upstream_uses_weights_from_forward() -> Result<(), LazyNetError> {
    let mut layer = known_layer()?.without_bias();
    let mut optimizer = SgdOptimizer::stochastic(1.0)?;
    layer.forward(&Tensor::new(vec![1.0, 0.0, 0.0], vec![1, 3])?)?;
    let upstream = layer.back(Deferred::ready(Tensor::row_vector(vec![1.0, 0.0])?), &mut optimizer)?;

    // W ← W − [[1, 0, 0], [0, 0, 0]]
    let weights = layer.weights().expect("initialized");
    check_tensor_near(weights.value(), &[2, 3], &[0.0, 2.0, 3.0, 0.0, -1.0, 1.0], 1e-6);
    check_tensor_near(&upstream.into_tensor()?, &[1, 3], &[1.0, 2.0, 3.0], 1e-6);
    Ok(())
}

#[test]
fn test_without_bias() -> Result<(), LazyNetError> {
    let mut layer = Dense::new(2)?.without_bias();
    layer.initialize(2, &mut StdRng::seed_from_u64(9))?;
    assert!(layer.biases().is_none());
    assert_eq!(layer.parameters()?.len(), 1);

    let mut optimizer = RecordingOptimizer::default();
    layer.forward(&Tensor::new(vec![1.0, 2.0], vec![1, 2])?)?;
    layer.back(Deferred::ready(Tensor::row_vector(vec![1.0, 1.0])?), &mut optimizer)?;
    assert_eq!(optimizer.gradients.len(), 1);
    Ok(())
}

#[test]
fn test_back_lifecycle() -> Result<(), LazyNetError> {
    let mut layer = known_layer()?;
    let mut optimizer = RecordingOptimizer::default();
    let d_out = || Tensor::row_vector(vec![1.0, 1.0]).map(Deferred::ready);

    assert!(matches!(
        layer.back(d_out()?, &mut optimizer),
        Err(LazyNetError::ForwardNotRun { .. })
    ));
    layer.forward(&Tensor::row_vector(vec![1.0, 1.0, 1.0])?)?;
    layer.back(d_out()?, &mut optimizer)?;
    assert!(matches!(
        layer.back(d_out()?, &mut optimizer),
        Err(LazyNetError::ForwardNotRun { .. })
    ));
    Ok(())
}

#[test]
fn test_restore_requires_biases() -> Result<(), LazyNetError> {
    let mut layer = known_layer()?;
    let weights = layer.weights().cloned().expect("initialized");
    let err = layer.restore(vec![("weights".to_string(), weights)]).unwrap_err();
    assert_eq!(
        err,
        LazyNetError::MissingParameter {
            layer: "Dense".to_string(),
            name: "biases".to_string()
        }
    );
    Ok(())
}

#[test]
fn test_display() -> Result<(), LazyNetError> {
    assert_eq!(
        Dense::new(8)?.to_string(),
        "Dense (neurons: 8, l2 penalty: 0, bias: true, weight initializer: He, bias initializer: Constant (value: 0))"
    );
    Ok(())
}
