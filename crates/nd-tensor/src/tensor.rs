// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core tensor type: construction, indexing, slicing.

use std::fmt;
use std::marker::PhantomData;

use numeric_buffer::{HeapBuffer, NumericBuffer};
use serde::de::DeserializeOwned;

use crate::config::{BoundsCheck, EmptyInputPolicy, TensorConfig};
use crate::error::OutOfRange;
use crate::index::{Indexed, SliceSpec, TensorIndex};
use crate::{flatten_rectangular, shape_of, DType, Element, Nested, Shape, TensorError};

/// An owned, n-dimensional tensor stored in a single linear buffer.
///
/// # Memory Layout
/// Elements are stored in row-major (C) order: the last dimension varies
/// fastest. The coordinate `(i_0, …, i_{n-1})` lives at offset
/// `Σ i_d * stride(d)` where `stride(d)` is the product of the dimensions
/// after `d`.
///
/// # Invariants
/// `len() == shape().num_elements()` always holds. The shape never changes
/// after construction and the buffer is never resized; indexed writes go
/// straight to the buffer at the computed offset.
pub struct Tensor<T: Element, B: NumericBuffer<T> = HeapBuffer<T>> {
    shape: Shape,
    buffer: B,
    bounds: BoundsCheck,
    _elem: PhantomData<T>,
}

impl<T: Element, B: NumericBuffer<T>> Tensor<T, B> {
    /// Builds a tensor from a nested literal with the default configuration.
    ///
    /// # Examples
    /// ```
    /// use nd_tensor::{nested, Tensor};
    /// let t: Tensor<i64> = Tensor::from_nested(&nested![[1, 2], [3, 4], [5, 6]]).unwrap();
    /// assert_eq!(t.shape().dims(), &[3, 2]);
    /// assert_eq!(t.get_at(&[2, 0]).unwrap(), 5);
    /// assert_eq!(t.len(), 6);
    /// ```
    pub fn from_nested(nested: &Nested<T>) -> Result<Self, TensorError> {
        Self::from_nested_with(nested, &TensorConfig::default())
    }

    /// Builds a tensor from a nested literal.
    ///
    /// The shape is read along the first element of each level, then the
    /// whole input is flattened and checked against it. Fails with
    /// [`TensorError::ShapeMismatch`] on ragged input, with
    /// [`TensorError::ScalarInput`] for a bare scalar, and with
    /// [`TensorError::EmptyInput`] when `config` rejects empty sequences.
    pub fn from_nested_with(
        nested: &Nested<T>,
        config: &TensorConfig,
    ) -> Result<Self, TensorError> {
        if nested.is_scalar() {
            return Err(TensorError::ScalarInput);
        }

        let shape = shape_of(nested);
        if config.empty_input == EmptyInputPolicy::Reject {
            if let Some(depth) = shape.dims().iter().position(|&d| d == 0) {
                return Err(TensorError::EmptyInput { depth });
            }
        }

        let values = flatten_rectangular(nested, &shape)?;
        tracing::debug!(
            shape = %shape,
            elements = values.len(),
            dtype = %T::DTYPE,
            "tensor built from nested input"
        );
        Ok(Self {
            shape,
            buffer: B::from_values(values),
            bounds: config.bounds_check,
            _elem: PhantomData,
        })
    }

    /// Creates a 1-D tensor of `len` copies of `value`.
    ///
    /// # Examples
    /// ```
    /// use nd_tensor::Tensor;
    /// let t: Tensor<i32> = Tensor::filled(4, 0);
    /// assert_eq!(t.shape().dims(), &[4]);
    /// assert!(t.iter().all(|&x| x == 0));
    /// ```
    pub fn filled(len: usize, value: T) -> Self {
        Self::from_buffer(B::filled(len, value))
    }

    /// Creates a 1-D tensor holding `values` in order.
    pub fn from_vec(values: Vec<T>) -> Self {
        Self::from_buffer(B::from_values(values))
    }

    /// Wraps an existing buffer as a 1-D tensor of shape `(buffer.len(),)`.
    pub fn from_buffer(buffer: B) -> Self {
        Self {
            shape: Shape::vector(buffer.len()),
            buffer,
            bounds: BoundsCheck::default(),
            _elem: PhantomData,
        }
    }

    /// Replaces the multi-index validation mode.
    pub fn with_bounds_check(mut self, bounds: BoundsCheck) -> Self {
        self.bounds = bounds;
        self
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Returns the row-major strides of the shape.
    pub fn strides(&self) -> Vec<usize> {
        self.shape.strides()
    }

    /// Returns the element data type.
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Returns the multi-index validation mode.
    pub fn bounds_check(&self) -> BoundsCheck {
        self.bounds
    }

    /// Total number of elements, the product of all dimensions.
    ///
    /// This is not the size of the first dimension.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the tensor holds no elements.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Borrows the flat buffer in row-major order.
    pub fn as_slice(&self) -> &[T] {
        self.buffer.as_slice()
    }

    /// Iterates the elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Copies the flat buffer into a `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    /// Returns the backing buffer.
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Reads the element at flat `offset`, ignoring the shape.
    pub fn get(&self, offset: usize) -> Result<T, TensorError> {
        Ok(self.buffer.get(offset)?)
    }

    /// Writes the element at flat `offset`, ignoring the shape.
    pub fn set(&mut self, offset: usize, value: T) -> Result<(), TensorError> {
        Ok(self.buffer.set(offset, value)?)
    }

    /// Maps a coordinate tuple onto its flat offset.
    ///
    /// `coords` must have one component per dimension. Under
    /// [`BoundsCheck::PerDimension`] each component is checked against its
    /// dimension; under [`BoundsCheck::FlatOnly`] only the final offset is
    /// checked against the buffer length.
    pub fn offset_of(&self, coords: &[usize]) -> Result<usize, TensorError> {
        let offset = self.shape.offset(coords, self.bounds)?;
        if offset >= self.len() {
            return Err(TensorError::IndexOutOfBounds(OutOfRange::Offset {
                offset,
                len: self.len(),
            }));
        }
        Ok(offset)
    }

    /// Reads the element at a coordinate tuple.
    pub fn get_at(&self, coords: &[usize]) -> Result<T, TensorError> {
        let offset = self.offset_of(coords)?;
        self.get(offset)
    }

    /// Writes the element at a coordinate tuple.
    pub fn set_at(&mut self, coords: &[usize], value: T) -> Result<(), TensorError> {
        let offset = self.offset_of(coords)?;
        self.set(offset, value)
    }

    /// Copies the elements selected by `spec` into a new 1-D tensor.
    ///
    /// **The slice is taken over the flat buffer, not along a dimension.**
    /// A `(3, 2)` tensor sliced with `1..3` yields a `(2,)` tensor holding
    /// flat elements 1 and 2; the source's dimensionality is discarded.
    /// Bounds are clamped, negative bounds count from the end, and a zero
    /// step fails with [`TensorError::ZeroSliceStep`].
    ///
    /// # Examples
    /// ```
    /// use nd_tensor::{nested, Tensor};
    /// let t: Tensor<i32> = Tensor::from_nested(&nested![[1, 2], [3, 4], [5, 6]]).unwrap();
    /// let s = t.slice(1usize..3).unwrap();
    /// assert_eq!(s.shape().dims(), &[2]);
    /// assert_eq!(s.to_vec(), vec![2, 3]);
    /// ```
    pub fn slice(&self, spec: impl Into<SliceSpec>) -> Result<Self, TensorError> {
        let resolved = spec.into().resolve(self.len())?;
        let source = self.as_slice();
        let mut values = Vec::with_capacity(resolved.count);
        values.extend(resolved.offsets().map(|offset| source[offset]));
        tracing::debug!(
            source_shape = %self.shape,
            selected = values.len(),
            "tensor sliced"
        );
        Ok(Self::from_vec(values).with_bounds_check(self.bounds))
    }

    /// Subscripts the tensor with any [`TensorIndex`].
    ///
    /// A slice yields a new tensor (see [`slice`](Tensor::slice)); a
    /// coordinate tuple and a flat offset yield a scalar.
    pub fn index(&self, index: impl Into<TensorIndex>) -> Result<Indexed<T, B>, TensorError> {
        match index.into() {
            TensorIndex::Slice(spec) => Ok(Indexed::Tensor(self.slice(spec)?)),
            TensorIndex::Coords(coords) => Ok(Indexed::Scalar(self.get_at(&coords)?)),
            TensorIndex::Flat(offset) => Ok(Indexed::Scalar(self.get(offset)?)),
        }
    }

    /// Writes `value` through a flat offset or a coordinate tuple.
    ///
    /// Slice indices fail with [`TensorError::UnsupportedAssignment`].
    pub fn assign(&mut self, index: impl Into<TensorIndex>, value: T) -> Result<(), TensorError> {
        match index.into() {
            TensorIndex::Slice(_) => Err(TensorError::UnsupportedAssignment),
            TensorIndex::Coords(coords) => self.set_at(&coords, value),
            TensorIndex::Flat(offset) => self.set(offset, value),
        }
    }

    /// Rebuilds the nested literal this tensor describes.
    ///
    /// For rectangular input `x` of rank 1 or more,
    /// `Tensor::from_nested(&x)?.to_nested() == x`.
    pub fn to_nested(&self) -> Nested<T> {
        build_nested(self.as_slice(), self.shape.dims())
    }
}

impl<T: Element + DeserializeOwned, B: NumericBuffer<T>> Tensor<T, B> {
    /// Parses a JSON nested array literal and builds a tensor from it.
    pub fn from_json(json: &str) -> Result<Self, TensorError> {
        Self::from_nested(&Nested::from_json(json)?)
    }
}

fn build_nested<T: Copy>(values: &[T], dims: &[usize]) -> Nested<T> {
    match dims {
        [] => Nested::List(Vec::new()),
        [_] => Nested::from_flat(values.iter().copied()),
        [outer, inner @ ..] => {
            let chunk: usize = inner.iter().product();
            Nested::List(
                (0..*outer)
                    .map(|i| build_nested(&values[i * chunk..(i + 1) * chunk], inner))
                    .collect(),
            )
        }
    }
}

impl<T: Element, B: NumericBuffer<T> + Clone> Clone for Tensor<T, B> {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            buffer: self.buffer.clone(),
            bounds: self.bounds,
            _elem: PhantomData,
        }
    }
}

/// Tensors are equal when their shapes and elements are equal; the bounds
/// mode and buffer type are not compared.
impl<T: Element, B: NumericBuffer<T>> PartialEq for Tensor<T, B> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.as_slice() == other.as_slice()
    }
}

impl<T: Element, B: NumericBuffer<T>> fmt::Debug for Tensor<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("dtype", &T::DTYPE)
            .field("bounds", &self.bounds)
            .field("values", &self.as_slice())
            .finish()
    }
}

/// Renders as `tensor([1, 2, 3, 4], shape=(2, 2))`.
impl<T: Element, B: NumericBuffer<T>> fmt::Display for Tensor<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tensor([")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "], shape={})", self.shape)
    }
}

impl<'a, T: Element, B: NumericBuffer<T>> IntoIterator for &'a Tensor<T, B> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Element> From<Vec<T>> for Tensor<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Mismatch;
    use crate::nested;

    fn sample() -> Tensor<i64> {
        Tensor::from_nested(&nested![[1, 2], [3, 4], [5, 6]]).unwrap()
    }

    #[test]
    fn test_from_nested() {
        let t = sample();
        assert_eq!(t.shape(), &Shape::new(vec![3, 2]));
        assert_eq!(t.rank(), 2);
        assert_eq!(t.len(), 6);
        assert_eq!(t.dtype(), DType::I64);
        assert_eq!(t.to_vec(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_multi_index() {
        let t = sample();
        assert_eq!(t.get_at(&[0, 1]).unwrap(), 2);
        assert_eq!(t.get_at(&[2, 0]).unwrap(), 5);
        assert_eq!(t.get_at(&[2, 1]).unwrap(), 6);
    }

    #[test]
    fn test_flat_index_ignores_shape() {
        let t = sample();
        assert_eq!(t.get(5).unwrap(), 6);
        assert!(matches!(
            t.get(6),
            Err(TensorError::IndexOutOfBounds(OutOfRange::Offset {
                offset: 6,
                len: 6
            }))
        ));
    }

    #[test]
    fn test_wrong_arity() {
        let t = sample();
        let err = t.get_at(&[1]).unwrap_err();
        assert!(matches!(
            err,
            TensorError::ShapeMismatch(Mismatch::Arity { given: 1, .. })
        ));
        assert!(t.get_at(&[0, 0, 0]).is_err());
    }

    #[test]
    fn test_per_dimension_bounds() {
        let t = sample();
        let err = t.get_at(&[0, 2]).unwrap_err();
        assert!(matches!(
            err,
            TensorError::IndexOutOfBounds(OutOfRange::Dimension {
                dim: 1,
                index: 2,
                size: 2
            })
        ));
        let err = t.get_at(&[5, 5]).unwrap_err();
        assert!(matches!(
            err,
            TensorError::IndexOutOfBounds(OutOfRange::Dimension {
                dim: 0,
                index: 5,
                size: 3
            })
        ));
    }

    #[test]
    fn test_flat_only_bounds() {
        let t = sample().with_bounds_check(BoundsCheck::FlatOnly);
        // (0, 2) addresses flat offset 2, the first element of row 1.
        assert_eq!(t.get_at(&[0, 2]).unwrap(), 3);
        assert!(matches!(
            t.get_at(&[3, 0]),
            Err(TensorError::IndexOutOfBounds(OutOfRange::Offset {
                offset: 6,
                len: 6
            }))
        ));
    }

    #[test]
    fn test_set_and_set_at() {
        let mut t = sample();
        t.set(0, 10).unwrap();
        t.set_at(&[1, 1], 40).unwrap();
        assert_eq!(t.to_vec(), vec![10, 2, 3, 40, 5, 6]);
        assert!(t.set_at(&[3, 0], 0).is_err());
        assert!(t.set(6, 0).is_err());
        assert_eq!(t.shape().dims(), &[3, 2]);
    }

    #[test]
    fn test_filled() {
        let t: Tensor<f64> = Tensor::filled(4, 0.0);
        assert_eq!(t.shape().dims(), &[4]);
        assert_eq!(t.len(), 4);
        assert!(t.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_filled_empty() {
        let t: Tensor<f32> = Tensor::filled(0, 1.0);
        assert!(t.is_empty());
        assert_eq!(t.shape().dims(), &[0]);
    }

    #[test]
    fn test_slice_flattens() {
        let t = sample();
        let s = t.slice(1usize..3).unwrap();
        assert_eq!(s.shape().dims(), &[2]);
        assert_eq!(s.to_vec(), vec![2, 3]);
        // The source is untouched.
        assert_eq!(t.len(), 6);
    }

    #[test]
    fn test_slice_step_and_negative() {
        let t = sample();
        let every_other = t.slice(SliceSpec::full().with_step(2)).unwrap();
        assert_eq!(every_other.to_vec(), vec![1, 3, 5]);
        let reversed = t.slice(SliceSpec::full().with_step(-1)).unwrap();
        assert_eq!(reversed.to_vec(), vec![6, 5, 4, 3, 2, 1]);
        assert_eq!(t.slice(SliceSpec::new(-2, 100)).unwrap().to_vec(), vec![5, 6]);
        assert!(t.slice(4usize..2).unwrap().is_empty());
        assert!(matches!(
            t.slice(SliceSpec::full().with_step(0)),
            Err(TensorError::ZeroSliceStep)
        ));
    }

    #[test]
    fn test_slice_most_negative_step() {
        let t: Tensor<i32> = Tensor::from_vec((0..10).collect());
        let s = t.slice(SliceSpec::full().with_step(isize::MIN)).unwrap();
        assert_eq!(s.to_vec(), vec![9]);
    }

    #[test]
    fn test_slice_keeps_bounds_mode() {
        let t = sample().with_bounds_check(BoundsCheck::FlatOnly);
        assert_eq!(t.slice(..).unwrap().bounds_check(), BoundsCheck::FlatOnly);
    }

    #[test]
    fn test_index_dispatch() {
        let t = sample();
        assert_eq!(t.index(5usize).unwrap().scalar(), Some(6));
        assert_eq!(t.index([0, 1]).unwrap().scalar(), Some(2));
        let sliced = t.index(1usize..3).unwrap().into_tensor().unwrap();
        assert_eq!(sliced.to_vec(), vec![2, 3]);
        assert!(t.index([1]).is_err());
    }

    #[test]
    fn test_assign() {
        let mut t = sample();
        t.assign(0usize, -1).unwrap();
        t.assign([2, 1], -6).unwrap();
        assert_eq!(t.to_vec(), vec![-1, 2, 3, 4, 5, -6]);
        assert!(matches!(
            t.assign(0usize..2, 0),
            Err(TensorError::UnsupportedAssignment)
        ));
    }

    #[test]
    fn test_ragged_rejected() {
        let n = Nested::List(vec![Nested::from_flat([1, 2]), Nested::from_flat([3])]);
        let err = Tensor::<i32>::from_nested(&n).unwrap_err();
        assert!(matches!(err, TensorError::ShapeMismatch(Mismatch::Ragged { .. })));
    }

    #[test]
    fn test_scalar_rejected() {
        let err = Tensor::<i32>::from_nested(&Nested::Scalar(1)).unwrap_err();
        assert!(matches!(err, TensorError::ScalarInput));
    }

    #[test]
    fn test_empty_input_policy() {
        let t = Tensor::<f64>::from_nested(&nested![]).unwrap();
        assert_eq!(t.shape().dims(), &[0]);
        assert!(t.is_empty());

        let reject = TensorConfig {
            empty_input: EmptyInputPolicy::Reject,
            ..TensorConfig::default()
        };
        let err = Tensor::<f64>::from_nested_with(&nested![], &reject).unwrap_err();
        assert!(matches!(err, TensorError::EmptyInput { depth: 0 }));
        let err = Tensor::<f64>::from_nested_with(&nested![[], []], &reject).unwrap_err();
        assert!(matches!(err, TensorError::EmptyInput { depth: 1 }));
    }

    #[test]
    fn test_config_bounds_applied() {
        let config = TensorConfig {
            bounds_check: BoundsCheck::FlatOnly,
            ..TensorConfig::default()
        };
        let t = Tensor::<i32>::from_nested_with(&nested![[1, 2], [3, 4]], &config).unwrap();
        assert_eq!(t.bounds_check(), BoundsCheck::FlatOnly);
    }

    #[test]
    fn test_from_json() {
        let t: Tensor<f64> = Tensor::from_json("[[1, 2], [3, 4], [5, 6]]").unwrap();
        assert_eq!(t.shape().dims(), &[3, 2]);
        assert_eq!(t.get_at(&[1, 0]).unwrap(), 3.0);
        assert!(matches!(
            Tensor::<f64>::from_json("[[1, 2], [3]]"),
            Err(TensorError::ShapeMismatch(_))
        ));
        assert!(matches!(
            Tensor::<f64>::from_json("not json"),
            Err(TensorError::Parse(_))
        ));
    }

    #[test]
    fn test_to_nested_roundtrip() {
        let n: Nested<i32> = nested![[[1, 2, 3], [4, 5, 6]], [[7, 8, 9], [10, 11, 12]]];
        let t = Tensor::<i32>::from_nested(&n).unwrap();
        assert_eq!(t.to_nested(), n);

        let empty_rows: Nested<i32> = nested![[], []];
        let t = Tensor::<i32>::from_nested(&empty_rows).unwrap();
        assert_eq!(t.to_nested(), empty_rows);
    }

    #[test]
    fn test_display() {
        let t: Tensor<i32> = Tensor::from_nested(&nested![[1, 2], [3, 4]]).unwrap();
        assert_eq!(t.to_string(), "tensor([1, 2, 3, 4], shape=(2, 2))");
        let v: Tensor<i32> = Tensor::filled(2, 7);
        assert_eq!(v.to_string(), "tensor([7, 7], shape=(2,))");
    }

    #[test]
    fn test_clone_is_independent() {
        let t = sample();
        let mut c = t.clone();
        c.set(0, 100).unwrap();
        assert_eq!(t.get(0).unwrap(), 1);
        assert_eq!(c.get(0).unwrap(), 100);
        assert_ne!(t, c);
    }

    #[test]
    fn test_strides() {
        let t: Tensor<f32> = Tensor::from_nested(&nested![
            [[0.0, 0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0]],
            [[0.0, 0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0]]
        ])
        .unwrap();
        assert_eq!(t.strides(), vec![12, 4, 1]);
    }
}
