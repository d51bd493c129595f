// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor shape descriptors and row-major offset arithmetic.

use std::fmt;

use crate::config::BoundsCheck;
use crate::error::{Mismatch, OutOfRange};
use crate::TensorError;

/// Describes the dimensionality of a [`crate::Tensor`].
///
/// Dimensions are stored outermost first. Shapes are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Creates a new shape from the given dimensions.
    ///
    /// # Examples
    /// ```
    /// use nd_tensor::Shape;
    /// let s = Shape::new(vec![2, 3, 4]);
    /// assert_eq!(s.rank(), 3);
    /// assert_eq!(s.num_elements(), 24);
    /// ```
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// Creates the empty (rank 0) shape.
    pub fn empty() -> Self {
        Self { dims: vec![] }
    }

    /// Creates a 1-D shape.
    pub fn vector(len: usize) -> Self {
        Self { dims: vec![len] }
    }

    /// Returns the number of dimensions (rank).
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns the total number of elements.
    ///
    /// A rank 0 shape describes no storage and returns 0. Saturates at
    /// `usize::MAX`; use [`checked_num_elements`](Shape::checked_num_elements)
    /// where overflow must be told apart.
    pub fn num_elements(&self) -> usize {
        self.checked_num_elements().unwrap_or(usize::MAX)
    }

    /// Returns the total number of elements, or `None` if the product
    /// overflows `usize`.
    ///
    /// # Examples
    /// ```
    /// use nd_tensor::Shape;
    /// assert_eq!(Shape::new(vec![3, 2]).checked_num_elements(), Some(6));
    /// assert_eq!(Shape::new(vec![2; 64]).checked_num_elements(), None);
    /// assert_eq!(Shape::new(vec![usize::MAX, 2, 0]).checked_num_elements(), Some(0));
    /// ```
    pub fn checked_num_elements(&self) -> Option<usize> {
        if self.dims.is_empty() || self.dims.contains(&0) {
            return Some(0);
        }
        self.dims
            .iter()
            .try_fold(1usize, |count, &size| count.checked_mul(size))
    }

    /// Returns the dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the size of a specific dimension, or `None` if out of bounds.
    pub fn dim(&self, index: usize) -> Option<usize> {
        self.dims.get(index).copied()
    }

    /// Computes row-major (C-order) strides for this shape.
    ///
    /// The stride for dimension `i` is the product of all dimensions after
    /// `i`, so the last dimension always has stride 1.
    pub fn strides(&self) -> Vec<usize> {
        let rank = self.dims.len();
        if rank == 0 {
            return vec![];
        }
        let mut strides = vec![0usize; rank];
        strides[rank - 1] = 1;
        for i in (0..rank - 1).rev() {
            strides[i] = strides[i + 1].saturating_mul(self.dims[i + 1]);
        }
        strides
    }

    /// Maps a coordinate tuple onto a linear row-major offset.
    ///
    /// `coords` must have exactly [`rank`](Shape::rank) components. With
    /// [`BoundsCheck::PerDimension`] every coordinate is checked against its
    /// dimension. With [`BoundsCheck::FlatOnly`] coordinates are not checked
    /// here and the caller is expected to check the resulting offset against
    /// the buffer length.
    ///
    /// When several coordinates are out of range, the outermost one is
    /// reported.
    pub fn offset(&self, coords: &[usize], bounds: BoundsCheck) -> Result<usize, TensorError> {
        if coords.len() != self.rank() {
            return Err(TensorError::ShapeMismatch(Mismatch::Arity {
                given: coords.len(),
                shape: self.clone(),
            }));
        }

        if bounds == BoundsCheck::PerDimension {
            let outside = coords
                .iter()
                .zip(&self.dims)
                .enumerate()
                .find(|&(_, (&index, &size))| index >= size);
            if let Some((dim, (&index, &size))) = outside {
                return Err(TensorError::IndexOutOfBounds(OutOfRange::Dimension {
                    dim,
                    index,
                    size,
                }));
            }
        }

        let mut offset = 0usize;
        let mut stride = 1usize;
        for (&index, &size) in coords.iter().zip(&self.dims).rev() {
            offset = index
                .checked_mul(stride)
                .and_then(|step| step.checked_add(offset))
                .ok_or_else(|| {
                    TensorError::IndexOutOfBounds(OutOfRange::Offset {
                        offset: usize::MAX,
                        len: self.num_elements(),
                    })
                })?;
            stride = stride.saturating_mul(size);
        }
        Ok(offset)
    }
}

/// Formats as a tuple: `(3, 2)`, `(4,)`, `()`.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        if self.dims.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

/// Convenience: `Shape::from(vec![2, 3])`.
impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

/// Convenience: `Shape::from(&[2, 3][..])`.
impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }
}
