// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for buffer access.

/// Errors that can occur when reading or writing a buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// The requested offset lies outside `0..len`.
    #[error("index {offset} is out of bounds of buffer with length {len}")]
    OutOfBounds { offset: usize, len: usize },
}
