// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Nested sequence literals, the input form for [`crate::Tensor::from_nested`].

use serde::de::DeserializeOwned;

use crate::error::NodeKind;
use crate::TensorError;

/// An arbitrarily nested sequence of scalars.
///
/// Nothing about this type guarantees rectangularity; a `Nested` value may
/// be ragged or mix scalars and sequences at the same depth. Validation
/// happens when a tensor is built from it.
///
/// The serde representation is untagged, so a JSON array literal such as
/// `[[1, 2], [3, 4]]` deserializes directly.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Nested<T> {
    /// A leaf value.
    Scalar(T),
    /// A sequence of nested values.
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Wraps a flat sequence of scalars as a one-level list.
    pub fn from_flat(values: impl IntoIterator<Item = T>) -> Self {
        Nested::List(values.into_iter().map(Nested::Scalar).collect())
    }

    /// Returns `true` for [`Nested::Scalar`].
    pub fn is_scalar(&self) -> bool {
        matches!(self, Nested::Scalar(_))
    }

    /// Returns the child nodes, or `None` for a scalar.
    pub fn as_list(&self) -> Option<&[Nested<T>]> {
        match self {
            Nested::List(items) => Some(items),
            Nested::Scalar(_) => None,
        }
    }

    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            Nested::Scalar(_) => NodeKind::Scalar,
            Nested::List(items) => NodeKind::List(items.len()),
        }
    }
}

impl<T: DeserializeOwned> Nested<T> {
    /// Parses a JSON nested array literal.
    ///
    /// # Examples
    /// ```
    /// use nd_tensor::Nested;
    /// let n: Nested<i64> = Nested::from_json("[[1, 2], [3, 4]]").unwrap();
    /// assert_eq!(n.as_list().unwrap().len(), 2);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, TensorError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Builds a [`Nested`] list from bracketed literals.
///
/// Inner levels are written as bracket groups; the innermost level is a
/// comma-separated list of scalar expressions.
///
/// ```
/// use nd_tensor::{nested, Nested};
/// let n: Nested<f64> = nested![[1.0, 2.0], [3.0, 4.0]];
/// assert_eq!(
///     n,
///     Nested::List(vec![Nested::from_flat([1.0, 2.0]), Nested::from_flat([3.0, 4.0])])
/// );
/// ```
#[macro_export]
macro_rules! nested {
    ($([$($inner:tt)*]),+ $(,)?) => {
        $crate::Nested::List(vec![$($crate::nested![$($inner)*]),+])
    };
    ($($value:expr),* $(,)?) => {
        $crate::Nested::List(vec![$($crate::Nested::Scalar($value)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_builds_levels() {
        let n: Nested<i32> = nested![[[1, 2]], [[3, 4]]];
        let expected = Nested::List(vec![
            Nested::List(vec![Nested::from_flat([1, 2])]),
            Nested::List(vec![Nested::from_flat([3, 4])]),
        ]);
        assert_eq!(n, expected);
    }

    #[test]
    fn test_macro_empty() {
        let n: Nested<f32> = nested![];
        assert_eq!(n, Nested::List(vec![]));

        let n: Nested<f32> = nested![[], []];
        assert_eq!(n, Nested::List(vec![Nested::List(vec![]), Nested::List(vec![])]));
    }

    #[test]
    fn test_from_json() {
        let n: Nested<f64> = Nested::from_json("[[1, 2.5], [3, 4]]").unwrap();
        assert_eq!(n, nested![[1.0, 2.5], [3.0, 4.0]]);
    }

    #[test]
    fn test_from_json_scalar() {
        let n: Nested<i64> = Nested::from_json("7").unwrap();
        assert_eq!(n, Nested::Scalar(7));
        assert!(n.is_scalar());
        assert!(n.as_list().is_none());
    }

    #[test]
    fn test_from_json_invalid() {
        let err = Nested::<i32>::from_json("[[1, \"two\"]]").unwrap_err();
        assert!(matches!(err, TensorError::Parse(_)));

        let err = Nested::<i32>::from_json("[[1, 2]").unwrap_err();
        assert!(matches!(err, TensorError::Parse(_)));
    }

    #[test]
    fn test_serialize_json() {
        let n: Nested<i32> = nested![[1, 2], [3, 4]];
        assert_eq!(serde_json::to_string(&n).unwrap(), "[[1,2],[3,4]]");
    }

    #[test]
    fn test_kind() {
        assert_eq!(Nested::Scalar(1.0f32).kind(), NodeKind::Scalar);
        assert_eq!(Nested::from_flat([1, 2, 3]).kind(), NodeKind::List(3));
    }
}
