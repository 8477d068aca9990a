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

//! Error types for window function binding and evaluation

use thiserror::Error;

use crate::functions::AggregateMode;

/// Result type alias for window function operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for window function resolution and evaluation
///
/// Binding and mode errors are raised while a function is resolved, before
/// any row is processed. The remaining variants cover contract violations
/// by the caller and value-level comparison failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // =========================================================================
    // Resolution errors
    // =========================================================================
    /// Wrong argument count or argument type for a function
    #[error("{function}: argument {position}: {message}")]
    Binding {
        function: String,
        position: usize,
        message: String,
    },

    /// Partial or merge evaluation requested for a non-decomposable function
    #[error("{function}: only COMPLETE mode is supported, got {mode}")]
    UnsupportedMode {
        function: String,
        mode: AggregateMode,
    },

    /// No window function registered under this name
    #[error("window function '{0}' not found")]
    FunctionNotFound(String),

    // =========================================================================
    // Evaluation errors
    // =========================================================================
    /// A consumed row carried fewer argument values than were bound
    #[error("{function}: expected {expected} argument values per row, got {got}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        got: usize,
    },

    /// Column index out of bounds
    #[error("column index {index} out of bounds")]
    ColumnIndexOutOfBounds { index: usize },

    // =========================================================================
    // Comparison errors
    // =========================================================================
    /// Cannot compare NULL with non-NULL value
    #[error("cannot compare NULL with non-NULL value")]
    NullComparison,

    /// Cannot compare incompatible types
    #[error("cannot compare incompatible types")]
    IncomparableTypes,
}

impl Error {
    /// Create a new Binding error
    pub fn binding(
        function: impl Into<String>,
        position: usize,
        message: impl Into<String>,
    ) -> Self {
        Error::Binding {
            function: function.into(),
            position,
            message: message.into(),
        }
    }

    /// Create a new UnsupportedMode error
    pub fn unsupported_mode(function: impl Into<String>, mode: AggregateMode) -> Self {
        Error::UnsupportedMode {
            function: function.into(),
            mode,
        }
    }

    /// Create a new ArgumentCountMismatch error
    pub fn argument_count_mismatch(function: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArgumentCountMismatch {
            function: function.into(),
            expected,
            got,
        }
    }

    /// Returns true if this error was raised while binding arguments
    pub fn is_binding_error(&self) -> bool {
        matches!(self, Error::Binding { .. })
    }

    /// Returns true if this error rejects a distributed evaluation mode
    pub fn is_unsupported_mode(&self) -> bool {
        matches!(self, Error::UnsupportedMode { .. })
    }

    /// Returns true if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::FunctionNotFound(_))
    }
}
