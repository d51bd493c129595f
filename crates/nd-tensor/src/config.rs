// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor construction and indexing policy, loaded from TOML files or
//! constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! bounds_check = "per-dimension"
//! empty_input = "allow"
//! ```

use std::path::Path;

use crate::TensorError;

/// How multi-index coordinates are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundsCheck {
    /// Every coordinate must satisfy `0 <= i_d < shape[d]`.
    #[default]
    PerDimension,
    /// Only the resulting flat offset is checked against the buffer length.
    ///
    /// An out-of-range coordinate can silently address an element in a
    /// neighbouring row.
    FlatOnly,
}

/// What to do when shape inference meets an empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyInputPolicy {
    /// An empty sequence contributes a dimension of size 0; `[]` has shape `(0,)`.
    #[default]
    Allow,
    /// Any zero-sized dimension fails with [`TensorError::EmptyInput`].
    Reject,
}

/// Policy applied when building tensors from nested input.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TensorConfig {
    /// Multi-index validation mode.
    #[serde(default)]
    pub bounds_check: BoundsCheck,
    /// Handling of empty sequences.
    #[serde(default)]
    pub empty_input: EmptyInputPolicy,
}

impl TensorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, TensorError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TensorError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, TensorError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| TensorError::Config(format!("TOML parse error: {e}")))?;
        if config.bounds_check == BoundsCheck::FlatOnly {
            tracing::warn!("per-dimension bounds checks disabled by configuration");
        }
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, TensorError> {
        toml::to_string_pretty(self)
            .map_err(|e| TensorError::Config(format!("TOML serialise error: {e}")))
    }
}
