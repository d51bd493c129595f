// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shape inference for nested input.

use crate::{Nested, Shape};

/// Infers the shape of a nested sequence.
///
/// Walks down the first element of every level, recording each sequence
/// length, until a scalar or an empty sequence is reached. Only the first
/// path is inspected, so ragged input is not detected here; see
/// [`crate::flatten_rectangular`].
///
/// A bare scalar has the empty shape `()`.
///
/// # Examples
/// ```
/// use nd_tensor::{nested, shape_of, Nested, Shape};
/// let n: Nested<i32> = nested![[1, 2], [3, 4], [5, 6]];
/// assert_eq!(shape_of(&n), Shape::new(vec![3, 2]));
/// ```
pub fn shape_of<T>(nested: &Nested<T>) -> Shape {
    let mut dims = Vec::new();
    let mut node = nested;
    while let Nested::List(items) = node {
        dims.push(items.len());
        match items.first() {
            Some(first) => node = first,
            None => break,
        }
    }
    Shape::new(dims)
}
