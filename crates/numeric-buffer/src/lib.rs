// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # numeric-buffer
//!
//! Linear storage for tensor elements, addressed purely by flat offset.
//!
//! # Key Components
//!
//! - [`NumericBuffer`] — the capability surface a tensor needs from its
//!   storage: construct from a value sequence, construct filled, bounds-checked
//!   `get`/`set` by offset, and a length.
//! - [`HeapBuffer`] — the default implementation, a fixed-length boxed slice.
//! - [`BufferError`] — the single failure mode (offset out of range).
//!
//! # Ownership Model
//!
//! ```text
//! Vec<T> ──from_values()──► HeapBuffer<T>  ◄─── owned by exactly one tensor
//!                                │
//!                      get/set(offset)
//! ```
//!
//! A buffer never grows or shrinks after construction. Mutation requires
//! `&mut self`, so two owners can never alias the same storage.
//!
//! # Example
//! ```
//! use numeric_buffer::{HeapBuffer, NumericBuffer};
//!
//! let mut buf = HeapBuffer::filled(4, 0.0f64);
//! buf.set(2, 1.5).unwrap();
//! assert_eq!(buf.get(2).unwrap(), 1.5);
//! assert_eq!(buf.len(), 4);
//! assert!(buf.get(4).is_err());
//! ```

mod buffer;
mod error;

pub use buffer::{HeapBuffer, NumericBuffer};
pub use error::BufferError;
