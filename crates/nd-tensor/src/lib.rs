// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # nd-tensor
//!
//! Minimal n-dimensional tensors built from nested sequence literals.
//!
//! This crate provides:
//! - [`Nested`] — an arbitrarily nested sequence of scalars, written with the
//!   [`nested!`] macro or parsed from a JSON array literal.
//! - [`shape_of`] — shape inference along the first element of each level.
//! - [`flatten`] / [`flatten_rectangular`] — depth-first flattening into one
//!   exactly sized buffer, the latter rejecting non-rectangular input.
//! - [`Tensor`] — a shape paired with a [`numeric_buffer::NumericBuffer`],
//!   indexed by flat offset, by coordinate tuple (row-major strides) or by
//!   slice.
//! - [`TensorConfig`] — bounds-checking and empty-input policy, loadable
//!   from TOML.
//!
//! # Example
//! ```
//! use nd_tensor::{nested, Tensor};
//!
//! let mut t: Tensor<f64> = Tensor::from_nested(&nested![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]])?;
//! assert_eq!(t.get_at(&[0, 1])?, 2.0);
//! assert_eq!(t.get(5)?, 6.0);
//!
//! t.set_at(&[2, 0], 50.0)?;
//! assert_eq!(t.to_string(), "tensor([1, 2, 3, 4, 50, 6], shape=(3, 2))");
//!
//! // Slicing works on the flat buffer and always yields a 1-D tensor.
//! let s = t.slice(1usize..3)?;
//! assert_eq!(s.shape().dims(), &[2]);
//! # Ok::<(), nd_tensor::TensorError>(())
//! ```

mod config;
mod dtype;
mod error;
mod flatten;
mod index;
mod nested;
mod resolve;
mod shape;
mod tensor;

pub use config::{BoundsCheck, EmptyInputPolicy, TensorConfig};
pub use dtype::{DType, Element};
pub use error::{Mismatch, NodeKind, OutOfRange, TensorError};
pub use flatten::{flatten, flatten_rectangular};
pub use index::{Indexed, ResolvedSlice, SliceSpec, TensorIndex};
pub use nested::Nested;
pub use resolve::shape_of;
pub use shape::Shape;
pub use tensor::Tensor;

pub use numeric_buffer::{HeapBuffer, NumericBuffer};
