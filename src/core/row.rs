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

//! Row type - a collection of column values

use std::fmt;
use std::ops::Index;

use super::error::{Error, Result};
use super::value::Value;

/// A row of column values for one input record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Create a row from values
    pub fn from_values(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Number of columns
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row has no columns
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the value at a column index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get the value at a column index, failing if out of bounds
    pub fn column(&self, index: usize) -> Result<&Value> {
        self.values
            .get(index)
            .ok_or(Error::ColumnIndexOutOfBounds { index })
    }

    /// Append a value
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Iterate over values
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Borrow all values
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Consume the row, returning its values
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl Index<usize> for Row {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl FromIterator<Value> for Row {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}
