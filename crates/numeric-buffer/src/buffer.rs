// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`NumericBuffer`] trait and its heap-backed implementation.

use crate::BufferError;

/// Fixed-length linear storage addressed by flat offset.
///
/// Implementors own their elements exclusively. Every accessor is
/// bounds-checked against [`len`](NumericBuffer::len) and reports
/// [`BufferError::OutOfBounds`] instead of panicking.
pub trait NumericBuffer<T: Copy>: Sized {
    /// Takes ownership of `values` as the buffer contents, in order.
    fn from_values(values: Vec<T>) -> Self;

    /// Allocates `len` elements, each set to `value`.
    fn filled(len: usize, value: T) -> Self;

    /// Reads the element at `offset`.
    fn get(&self, offset: usize) -> Result<T, BufferError>;

    /// Overwrites the element at `offset`.
    fn set(&mut self, offset: usize, value: T) -> Result<(), BufferError>;

    /// Number of elements held.
    fn len(&self) -> usize;

    /// Returns `true` if the buffer holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows the contents as a contiguous slice.
    fn as_slice(&self) -> &[T];
}

/// A [`NumericBuffer`] backed by a boxed slice on the heap.
///
/// The boxed slice has no spare capacity, so the buffer cannot grow after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct HeapBuffer<T> {
    values: Box<[T]>,
}

impl<T: Copy> HeapBuffer<T> {
    fn check(&self, offset: usize) -> Result<(), BufferError> {
        if offset >= self.values.len() {
            return Err(BufferError::OutOfBounds {
                offset,
                len: self.values.len(),
            });
        }
        Ok(())
    }

    /// Borrows the contents mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Consumes the buffer, returning its contents.
    pub fn into_vec(self) -> Vec<T> {
        self.values.into_vec()
    }
}

impl<T: Copy> NumericBuffer<T> for HeapBuffer<T> {
    fn from_values(values: Vec<T>) -> Self {
        tracing::trace!(len = values.len(), "heap buffer allocated from values");
        Self {
            values: values.into_boxed_slice(),
        }
    }

    fn filled(len: usize, value: T) -> Self {
        tracing::trace!(len, "heap buffer allocated with fill value");
        Self {
            values: vec![value; len].into_boxed_slice(),
        }
    }

    fn get(&self, offset: usize) -> Result<T, BufferError> {
        self.check(offset)?;
        Ok(self.values[offset])
    }

    fn set(&mut self, offset: usize, value: T) -> Result<(), BufferError> {
        self.check(offset)?;
        self.values[offset] = value;
        Ok(())
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn as_slice(&self) -> &[T] {
        &self.values
    }
}

impl<T: Copy> From<Vec<T>> for HeapBuffer<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_values(values)
    }
}
