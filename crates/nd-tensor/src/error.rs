// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor construction and indexing.

use std::fmt;

use numeric_buffer::BufferError;

use crate::Shape;

/// Errors that can occur while building or indexing a tensor.
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// Nested input is not rectangular, or an index has the wrong arity.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(Mismatch),

    /// A flat offset or a per-dimension index is out of range.
    #[error("index out of bounds: {0}")]
    IndexOutOfBounds(OutOfRange),

    /// An empty sequence was found while empty input is rejected.
    #[error("empty sequence at depth {depth}: inner dimensions cannot be inferred")]
    EmptyInput { depth: usize },

    /// A bare scalar was given where a nested sequence is required.
    #[error("expected a nested sequence, found a scalar")]
    ScalarInput,

    /// A slice was given a step of zero.
    #[error("slice step cannot be zero")]
    ZeroSliceStep,

    /// Assignment through a slice index.
    #[error("slice assignment is not supported")]
    UnsupportedAssignment,

    /// A nested JSON literal could not be parsed.
    #[error("failed to parse nested literal: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Detail for [`TensorError::ShapeMismatch`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Mismatch {
    /// A node in the nested input disagrees with the inferred shape.
    #[error("non-rectangular input at depth {depth}: expected {expected}, found {found}")]
    Ragged {
        depth: usize,
        expected: NodeKind,
        found: NodeKind,
    },

    /// A multi-index has a different number of components than the tensor's rank.
    #[error("index has {given} components but tensor has shape {shape}")]
    Arity { given: usize, shape: Shape },
}

/// Detail for [`TensorError::IndexOutOfBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OutOfRange {
    /// A linear offset past the end of the flat buffer.
    #[error("index {offset} is out of bounds of tensor with length {len}")]
    Offset { offset: usize, len: usize },

    /// A coordinate past the end of its dimension.
    #[error("index {index} is out of bounds for dimension {dim} with size {size}")]
    Dimension { dim: usize, index: usize, size: usize },
}

/// What a nested node is, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    List(usize),
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Scalar => f.write_str("a scalar"),
            NodeKind::List(len) => write!(f, "a sequence of length {len}"),
        }
    }
}

impl From<BufferError> for TensorError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::OutOfBounds { offset, len } => {
                TensorError::IndexOutOfBounds(OutOfRange::Offset { offset, len })
            }
        }
    }
}
