// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Depth-first flattening of nested input into a flat value sequence.
//!
//! Both entry points share one iterative walk that keeps an explicit stack
//! of child iterators, so deep input cannot overflow the call stack. The
//! output `Vec` is sized from a counting pass over the input itself, never
//! from a shape guess.

use std::convert::Infallible;

use crate::error::{Mismatch, NodeKind};
use crate::{Nested, Shape, TensorError};

/// Visits every node in depth-first, left-to-right order with its depth.
///
/// The root is at depth 0. Stops at the first error returned by `visit`.
fn walk<'a, T, E>(
    root: &'a Nested<T>,
    mut visit: impl FnMut(usize, &'a Nested<T>) -> Result<(), E>,
) -> Result<(), E> {
    visit(0, root)?;
    let mut stack = match root {
        Nested::List(items) => vec![items.iter()],
        Nested::Scalar(_) => return Ok(()),
    };
    loop {
        let Some(children) = stack.last_mut() else {
            return Ok(());
        };
        match children.next() {
            Some(node) => {
                visit(stack.len(), node)?;
                if let Nested::List(items) = node {
                    stack.push(items.iter());
                }
            }
            None => {
                stack.pop();
            }
        }
    }
}

fn infallible(result: Result<(), Infallible>) {
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

fn collect_leaves<T: Copy>(nested: &Nested<T>, capacity: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(capacity);
    infallible(walk(nested, |_, node| {
        if let Nested::Scalar(value) = node {
            out.push(*value);
        }
        Ok(())
    }));
    out
}

/// Collects every scalar leaf in depth-first, left-to-right order.
///
/// No structural validation is performed; ragged input is flattened as-is.
///
/// # Examples
/// ```
/// use nd_tensor::{flatten, nested, Nested};
/// let n: Nested<i32> = nested![[1, 2], [3, 4]];
/// assert_eq!(flatten(&n), vec![1, 2, 3, 4]);
/// ```
pub fn flatten<T: Copy>(nested: &Nested<T>) -> Vec<T> {
    let mut leaves = 0usize;
    infallible(walk(nested, |_, node| {
        if node.is_scalar() {
            leaves += 1;
        }
        Ok(())
    }));
    collect_leaves(nested, leaves)
}

/// Flattens `nested`, checking that it matches `shape` exactly.
///
/// Every node at depth `d < shape.rank()` must be a sequence of length
/// `shape.dims()[d]`, and every node at depth `shape.rank()` must be a
/// scalar. The first violation fails with [`TensorError::ShapeMismatch`].
///
/// The structure is checked in full before any output is reserved, so a
/// shape whose element count is huge or overflows fails on the first node
/// that contradicts it.
pub fn flatten_rectangular<T: Copy>(
    nested: &Nested<T>,
    shape: &Shape,
) -> Result<Vec<T>, TensorError> {
    let dims = shape.dims();
    let mut leaves = 0usize;
    walk(nested, |depth, node| {
        let expected = match dims.get(depth) {
            Some(&len) => NodeKind::List(len),
            None => NodeKind::Scalar,
        };
        let found = node.kind();
        if found != expected {
            return Err(TensorError::ShapeMismatch(Mismatch::Ragged {
                depth,
                expected,
                found,
            }));
        }
        if found == NodeKind::Scalar {
            leaves += 1;
        }
        Ok(())
    })?;
    Ok(collect_leaves(nested, leaves))
}
