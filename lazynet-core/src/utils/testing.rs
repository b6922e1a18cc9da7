use crate::tensor::Tensor;

/// Checks if two tensors are approximately equal (shape and data within tolerance).
/// Panics if shapes differ or data differs significantly.
pub fn check_tensor_near(
    actual: &Tensor,
    expected_shape: &[usize],
    expected_data: &[f32],
    tolerance: f32,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(
        actual.numel(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual.data().iter().zip(expected_data.iter()).enumerate() {
        let diff = (*a - *e).abs();
        // NaN never compares, so test for it explicitly.
        if diff.is_nan() || diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

