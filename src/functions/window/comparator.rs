// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Order key comparison for rank advancement

use std::cmp::Ordering;

use crate::core::{Error, Result, TypeDescriptor, Value};

/// Outcome of comparing two order key tuples
///
/// Rows reach an evaluator already sorted, so only tie detection matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrdering {
    Equal,
    NotEqual,
}

/// Compares the order key tuples of two rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyComparator {
    /// One ordering argument
    Single,
    /// An ordered list of ordering arguments (multi-column ORDER BY)
    Multi(usize),
}

impl KeyComparator {
    /// Comparator for the given number of ordering arguments
    pub fn for_arity(arity: usize) -> Self {
        if arity == 1 {
            KeyComparator::Single
        } else {
            KeyComparator::Multi(arity)
        }
    }

    /// Number of key values compared
    #[inline]
    pub fn arity(&self) -> usize {
        match self {
            KeyComparator::Single => 1,
            KeyComparator::Multi(n) => *n,
        }
    }

    /// Compare a retained key tuple with the current row's key tuple
    ///
    /// A tuple shorter than the arity, such as the empty tuple held before
    /// the first row of a partition, never compares equal.
    #[inline]
    pub fn compare(&self, prev: &[Value], curr: &[Value]) -> KeyOrdering {
        let equal = match self {
            KeyComparator::Single => match (prev.first(), curr.first()) {
                (Some(a), Some(b)) => values_equal(a, b),
                _ => false,
            },
            KeyComparator::Multi(n) => {
                prev.len() >= *n
                    && curr.len() >= *n
                    && prev[..*n]
                        .iter()
                        .zip(&curr[..*n])
                        .all(|(a, b)| values_equal(a, b))
            }
        };
        if equal {
            KeyOrdering::Equal
        } else {
            KeyOrdering::NotEqual
        }
    }
}

/// Two key values tie when the value comparison reports `Equal`
///
/// NULL ties with NULL. A failed comparison (NULL against a value, or
/// mismatched types) starts a new group.
#[inline]
fn values_equal(a: &Value, b: &Value) -> bool {
    matches!(a.compare(b), Ok(Ordering::Equal))
}

/// Reject argument types that do not support ordering comparison
pub fn validate_comparable(function: &str, args: &[TypeDescriptor]) -> Result<()> {
    for (position, ty) in args.iter().enumerate() {
        if !ty.supports_comparison() {
            return Err(Error::binding(
                function,
                position,
                format!(
                    "cannot support comparison of map type or complex type containing map, got {}",
                    ty
                ),
            ));
        }
    }
    Ok(())
}
