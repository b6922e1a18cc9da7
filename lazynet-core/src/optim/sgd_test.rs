#[cfg(test)]
mod tests {
    use crate::{
        error::LazyNetError,
        nn::parameter::Parameter,
        optim::optimizer_trait::Optimizer,
        optim::sgd::SgdOptimizer,
        tensor::Tensor,
    };

    // Helper to create a simple parameter
    fn create_param(data: Vec<f32>, shape: Vec<usize>) -> Result<Parameter, LazyNetError> {
        Ok(Parameter::new(Tensor::new(data, shape)?))
    }

    fn assert_vec_f32_eq(a: &[f32], b: &[f32], epsilon: f32) {
        assert_eq!(a.len(), b.len(), "Vector lengths differ: A has {}, B has {}", a.len(), b.len());
        for (i, (val_a, val_b)) in a.iter().zip(b.iter()).enumerate() {
            if (val_a - val_b).abs() > epsilon {
                panic!(
                    "Mismatch at index {}: left = {}, right = {}, diff = {}, epsilon = {}",
                    i, val_a, val_b, (val_a - val_b).abs(), epsilon
                );
            }
        }
    }

    #[test]
    fn test_sgd_basic_step() -> Result<(), LazyNetError> {
        let param = create_param(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?;
        let grad = Tensor::new(vec![0.1, 0.2, 0.3, 0.4], vec![2, 2])?;
        let mut optimizer = SgdOptimizer::stochastic(0.1)?;

        let step = optimizer.step(&param, &grad)?;
        assert_vec_f32_eq(step.data(), &[0.01, 0.02, 0.03, 0.04], 1e-6);
        Ok(())
    }

    #[test]
    fn test_sgd_stateless_is_repeatable() -> Result<(), LazyNetError> {
        let param = create_param(vec![1.0, 1.0], vec![1, 2])?;
        let grad = Tensor::new(vec![0.5, -0.5], vec![1, 2])?;
        let mut optimizer = SgdOptimizer::stochastic(0.1)?;

        let first = optimizer.step(&param, &grad)?;
        let second = optimizer.step(&param, &grad)?;
        assert_eq!(first, second);
        assert_eq!(optimizer.state_len(), 0, "plain SGD keeps no state");
        Ok(())
    }

    #[test]
    fn test_sgd_momentum_changes_second_update() -> Result<(), LazyNetError> {
        let param = create_param(vec![1.0, 2.0], vec![1, 2])?;
        let grad = Tensor::new(vec![1.0, -2.0], vec![1, 2])?;
        let lr = 0.1;
        let momentum = 0.9;
        let mut optimizer = SgdOptimizer::new(lr, momentum, false)?;

        let first = optimizer.step(&param, &grad)?;
        let second = optimizer.step(&param, &grad)?;

        // buf1 = g, buf2 = 0.9 g + g
        assert_vec_f32_eq(first.data(), &[0.1, -0.2], 1e-6);
        assert_vec_f32_eq(second.data(), &[0.19, -0.38], 1e-6);
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn test_sgd_nesterov() -> Result<(), LazyNetError> {
        let param = create_param(vec![0.0], vec![1, 1])?;
        let grad = Tensor::new(vec![1.0], vec![1, 1])?;
        let mut optimizer = SgdOptimizer::new(0.1, 0.5, true)?;

        // buf = 1, step = 0.1 * (1 + 0.5 * 1)
        let step = optimizer.step(&param, &grad)?;
        assert_vec_f32_eq(step.data(), &[0.15], 1e-6);
        Ok(())
    }

    #[test]
    fn test_sgd_state_is_per_parameter() -> Result<(), LazyNetError> {
        let a = create_param(vec![1.0], vec![1, 1])?;
        let b = create_param(vec![1.0], vec![1, 1])?;
        let grad = Tensor::new(vec![1.0], vec![1, 1])?;
        let mut optimizer = SgdOptimizer::new(0.1, 0.9, false)?;

        let step_a = optimizer.step(&a, &grad)?;
        let step_b = optimizer.step(&b, &grad)?;
        assert_eq!(step_a, step_b, "b must not inherit a's velocity");
        assert_eq!(optimizer.state_len(), 2);
        Ok(())
    }

    #[test]
    fn test_sgd_warm_allocates_buffers_only_with_momentum() -> Result<(), LazyNetError> {
        let param = create_param(vec![1.0, 2.0], vec![1, 2])?;

        let mut plain = SgdOptimizer::stochastic(0.1)?;
        plain.warm(&param)?;
        assert_eq!(plain.state_len(), 0);

        let mut heavy = SgdOptimizer::new(0.1, 0.9, false)?;
        heavy.warm(&param)?;
        assert_eq!(heavy.state_len(), 1);
        Ok(())
    }

    #[test]
    fn test_sgd_rejects_mismatched_gradient() -> Result<(), LazyNetError> {
        let param = create_param(vec![1.0, 2.0], vec![1, 2])?;
        let grad = Tensor::new(vec![1.0, 2.0], vec![2, 1])?;
        let mut optimizer = SgdOptimizer::stochastic(0.1)?;
        assert!(matches!(
            optimizer.step(&param, &grad),
            Err(LazyNetError::ShapeMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_sgd_invalid_configuration() {
        assert!(matches!(SgdOptimizer::new(-0.1, 0.0, false), Err(LazyNetError::ConfigurationError(_))));
        assert!(matches!(SgdOptimizer::new(0.1, 1.0, false), Err(LazyNetError::ConfigurationError(_))));
        assert!(matches!(SgdOptimizer::new(0.1, 0.0, true), Err(LazyNetError::ConfigurationError(_))));
    }
}
