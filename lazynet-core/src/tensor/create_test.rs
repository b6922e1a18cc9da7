// Test file for src/tensor/create.rs and the Tensor constructors

use super::*;
use crate::error::LazyNetError;

#[test]
fn test_zeros_like() {
    let tensor = Tensor::new(vec![1.0f32, 2.0, 3.0], vec![1, 3]).unwrap();
    let zeros_t = zeros_like(&tensor);
    assert_eq!(zeros_t.shape(), tensor.shape());
    assert_eq!(zeros_t.numel(), tensor.numel());
    assert!(zeros_t.data().iter().all(|&x| x == 0.0));
}

#[test]
fn test_zeros() {
    let t = zeros(&[2, 3]).unwrap();
    assert_eq!(t.shape(), &[2, 3]);
    assert_eq!(t.numel(), 6);
    assert!(t.data().iter().all(|&x| x == 0.0));
}

#[test]
fn test_ones_and_full() {
    let t = ones(&[1, 4]).unwrap();
    assert!(t.data().iter().all(|&x| x == 1.0));

    let f = full(&[3, 1], 2.5).unwrap();
    assert_eq!(f.shape(), &[3, 1]);
    assert_eq!(f.data(), &[2.5, 2.5, 2.5]);
}

#[test]
fn test_new_rejects_length_mismatch() {
    let result = Tensor::new(vec![1.0, 2.0, 3.0], vec![2, 2]);
    assert_eq!(
        result,
        Err(LazyNetError::TensorCreationError {
            data_len: 3,
            shape: vec![2, 2]
        })
    );
}

#[test]
fn test_new_rejects_scalar_shape() {
    assert!(Tensor::new(vec![1.0], vec![]).is_err());
}

#[test]
fn test_from_rows() {
    let t = Tensor::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
    assert_eq!(t.shape(), &[3, 2]);
    assert_eq!(t.get(2, 1).unwrap(), 6.0);
    assert_eq!(
        t.get(3, 0).unwrap_err(),
        LazyNetError::IndexOutOfBounds {
            index: vec![3, 0],
            shape: vec![3, 2]
        }
    );

    let ragged = Tensor::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
    assert!(matches!(ragged, Err(LazyNetError::ShapeMismatch { .. })));
}

#[test]
fn test_row_vector_and_dims2() {
    let r = Tensor::row_vector(vec![1.0, 2.0, 3.0]).unwrap();
    assert_eq!(r.dims2().unwrap(), (1, 3));

    let flat = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    assert!(matches!(
        flat.dims2(),
        Err(LazyNetError::RankMismatch { expected: 2, actual: 1, .. })
    ));
}

#[test]
fn test_all_finite() {
    let ok = Tensor::row_vector(vec![0.0, -1.0, 1e30]).unwrap();
    assert!(ok.all_finite());
    let nan = Tensor::row_vector(vec![0.0, f32::NAN]).unwrap();
    assert!(!nan.all_finite());
}
