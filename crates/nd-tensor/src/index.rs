// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Index descriptors: flat offsets, coordinate tuples and slices.

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use numeric_buffer::{HeapBuffer, NumericBuffer};

use crate::{Element, Tensor, TensorError};

/// A `start:stop:step` slice over a tensor's flat buffer.
///
/// Bounds follow Python slice semantics: negative values count from the
/// end, out-of-range values are clamped, and `None` takes the default for
/// the direction of `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceSpec {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

/// A [`SliceSpec`] resolved against a concrete length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSlice {
    pub start: isize,
    pub step: isize,
    pub count: usize,
}

impl SliceSpec {
    /// A slice covering `start..stop` with step 1.
    pub fn new(start: isize, stop: isize) -> Self {
        Self {
            start: Some(start),
            stop: Some(stop),
            step: None,
        }
    }

    /// A slice covering everything (`[:]`).
    pub fn full() -> Self {
        Self::default()
    }

    /// Replaces the step.
    pub fn with_step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    /// Resolves the bounds against a sequence of length `len`.
    ///
    /// # Examples
    /// ```
    /// use nd_tensor::SliceSpec;
    /// let r = SliceSpec::new(-3, 100).resolve(6).unwrap();
    /// assert_eq!(r.offsets().collect::<Vec<_>>(), vec![3, 4, 5]);
    /// ```
    pub fn resolve(&self, len: usize) -> Result<ResolvedSlice, TensorError> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(TensorError::ZeroSliceStep);
        }
        let len = isize::try_from(len).unwrap_or(isize::MAX);

        let clamp = |bound: isize| -> isize {
            if bound < 0 {
                let shifted = bound + len;
                if shifted >= 0 {
                    shifted
                } else if step < 0 {
                    -1
                } else {
                    0
                }
            } else if bound >= len {
                if step < 0 {
                    len - 1
                } else {
                    len
                }
            } else {
                bound
            }
        };

        let (start, stop) = if step > 0 {
            (
                self.start.map_or(0, clamp),
                self.stop.map_or(len, clamp),
            )
        } else {
            (
                self.start.map_or(len - 1, clamp),
                self.stop.map_or(-1, clamp),
            )
        };

        // Both bounds lie in [-1, len]. The step magnitude is unsigned since
        // `isize::MIN` has no positive counterpart.
        let span = if step > 0 { stop - start } else { start - stop };
        let count = if span > 0 {
            (span.unsigned_abs() - 1) / step.unsigned_abs() + 1
        } else {
            0
        };

        Ok(ResolvedSlice { start, step, count })
    }
}

impl ResolvedSlice {
    /// Iterates the selected flat offsets in slice order.
    pub fn offsets(&self) -> impl Iterator<Item = usize> {
        let Self { start, step, count } = *self;
        (0..count).map(move |i| (start + i as isize * step) as usize)
    }
}

impl From<Range<usize>> for SliceSpec {
    fn from(r: Range<usize>) -> Self {
        Self {
            start: Some(saturating_isize(r.start)),
            stop: Some(saturating_isize(r.end)),
            step: None,
        }
    }
}

impl From<RangeFrom<usize>> for SliceSpec {
    fn from(r: RangeFrom<usize>) -> Self {
        Self {
            start: Some(saturating_isize(r.start)),
            ..Self::default()
        }
    }
}

impl From<RangeTo<usize>> for SliceSpec {
    fn from(r: RangeTo<usize>) -> Self {
        Self {
            stop: Some(saturating_isize(r.end)),
            ..Self::default()
        }
    }
}

impl From<RangeFull> for SliceSpec {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

fn saturating_isize(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

/// Any of the ways a tensor can be subscripted.
///
/// [`Tensor::index`] dispatches on the variant: a slice yields a new
/// tensor, a coordinate tuple and a flat offset yield a scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TensorIndex {
    /// A linear offset into the flat buffer, ignoring shape.
    Flat(usize),
    /// One coordinate per dimension.
    Coords(Vec<usize>),
    /// A slice over the flat buffer.
    Slice(SliceSpec),
}

impl From<usize> for TensorIndex {
    fn from(offset: usize) -> Self {
        TensorIndex::Flat(offset)
    }
}

impl From<Vec<usize>> for TensorIndex {
    fn from(coords: Vec<usize>) -> Self {
        TensorIndex::Coords(coords)
    }
}

impl From<&[usize]> for TensorIndex {
    fn from(coords: &[usize]) -> Self {
        TensorIndex::Coords(coords.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for TensorIndex {
    fn from(coords: [usize; N]) -> Self {
        TensorIndex::Coords(coords.to_vec())
    }
}

impl From<SliceSpec> for TensorIndex {
    fn from(spec: SliceSpec) -> Self {
        TensorIndex::Slice(spec)
    }
}

impl From<Range<usize>> for TensorIndex {
    fn from(r: Range<usize>) -> Self {
        TensorIndex::Slice(r.into())
    }
}

impl From<RangeFull> for TensorIndex {
    fn from(r: RangeFull) -> Self {
        TensorIndex::Slice(r.into())
    }
}

/// The result of [`Tensor::index`].
#[derive(Debug, Clone, PartialEq)]
pub enum Indexed<T: Element, B: NumericBuffer<T> = HeapBuffer<T>> {
    Scalar(T),
    Tensor(Tensor<T, B>),
}

impl<T: Element, B: NumericBuffer<T>> Indexed<T, B> {
    /// Returns the scalar, or `None` if a tensor was produced.
    pub fn scalar(&self) -> Option<T> {
        match self {
            Indexed::Scalar(value) => Some(*value),
            Indexed::Tensor(_) => None,
        }
    }

    /// Returns the tensor, or `None` if a scalar was produced.
    pub fn into_tensor(self) -> Option<Tensor<T, B>> {
        match self {
            Indexed::Scalar(_) => None,
            Indexed::Tensor(t) => Some(t),
        }
    }
}
