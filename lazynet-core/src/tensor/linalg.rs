// src/tensor/linalg.rs
//
// Matrix operations on 2-D tensors shaped [rows, cols].

use crate::error::LazyNetError;
use crate::tensor::Tensor;

impl Tensor {
    /// Matrix product `self · other` for `[m, k] · [k, n] -> [m, n]`.
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, LazyNetError> {
        let (m, k) = self.dims2()?;
        let (k2, n) = other.dims2()?;
        if k != k2 {
            return Err(LazyNetError::shape_mismatch(&[k, n], &[k2, n], "matmul"));
        }
        let mut out = vec![0.0f32; m * n];
        for i in 0..m {
            let lhs_row = &self.data[i * k..(i + 1) * k];
            let out_row = &mut out[i * n..(i + 1) * n];
            for (p, &a) in lhs_row.iter().enumerate() {
                if a == 0.0 {
                    continue;
                }
                let rhs_row = &other.data[p * n..(p + 1) * n];
                for (o, &b) in out_row.iter_mut().zip(rhs_row.iter()) {
                    *o += a * b;
                }
            }
        }
        Tensor::new(out, vec![m, n])
    }

    /// Transpose of a 2-D tensor.
    pub fn transpose(&self) -> Result<Tensor, LazyNetError> {
        let (rows, cols) = self.dims2()?;
        let mut out = vec![0.0f32; rows * cols];
        for r in 0..rows {
            for c in 0..cols {
                out[c * rows + r] = self.data[r * cols + c];
            }
        }
        Tensor::new(out, vec![cols, rows])
    }

    /// Sums over the batch axis: `[batch, n] -> [1, n]`.
    pub fn sum_rows(&self) -> Result<Tensor, LazyNetError> {
        let (rows, cols) = self.dims2()?;
        let mut out = vec![0.0f32; cols];
        for r in 0..rows {
            for (o, &x) in out.iter_mut().zip(self.data[r * cols..(r + 1) * cols].iter()) {
                *o += x;
            }
        }
        Tensor::new(out, vec![1, cols])
    }

    /// Multiplies every row of a `[batch, n]` matrix by a `[1, n]` row vector.
    pub fn mul_row(&self, row: &Tensor) -> Result<Tensor, LazyNetError> {
        self.zip_row(row, "mul_row", |a, b| a * b)
    }

    /// Adds a `[1, n]` row vector to every row of a `[batch, n]` matrix.
    pub fn add_row(&self, row: &Tensor) -> Result<Tensor, LazyNetError> {
        self.zip_row(row, "add_row", |a, b| a + b)
    }

    fn zip_row<F>(&self, row: &Tensor, operation: &str, f: F) -> Result<Tensor, LazyNetError>
    where
        F: Fn(f32, f32) -> f32,
    {
        let (_, cols) = self.dims2()?;
        if row.shape.as_slice() != [1, cols] {
            return Err(LazyNetError::shape_mismatch(&[1, cols], &row.shape, operation));
        }
        if cols == 0 {
            return Ok(self.clone());
        }
        let data = self
            .data
            .chunks(cols)
            .flat_map(|r| r.iter().zip(row.data.iter()).map(|(&a, &b)| f(a, b)))
            .collect();
        Tensor::new(data, self.shape.clone())
    }
}
