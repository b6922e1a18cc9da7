// src/tensor/debug.rs
use crate::tensor::Tensor;
use std::fmt;

const PREVIEW_LEN: usize = 8;

// Manual implementation of Debug trait
impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview = &self.data[..self.data.len().min(PREVIEW_LEN)];
        write!(f, "Tensor(shape={:?}, data={:?}", self.shape, preview)?;
        if self.data.len() > PREVIEW_LEN {
            write!(f, " … {} more", self.data.len() - PREVIEW_LEN)?;
        }
        write!(f, ")")
    }
}
