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

//! Window Function System
//!
//! - [`WindowFunctionResolver`] - validates argument types and builds evaluators
//! - [`WindowEvaluator`] - per-partition streaming state machine
//! - [`FunctionRegistry`] - name lookup for resolvers
//!
//! The per-partition protocol is `reset()` once at the partition start,
//! `consume()` once per row in partition order, and `finish()` once at the
//! partition end. Evaluators only ever run in [`AggregateMode::Complete`]:
//! there is no way to produce or merge partial state.

pub mod config;
pub mod registry;
pub mod window;

use std::fmt;

use crate::core::{Error, Result, TypeDescriptor, Value};

pub use config::WindowConfig;

/// Evaluation mode requested by the planner
///
/// Mirrors the phases of a decomposable aggregate. Window functions here
/// are not decomposable, so every mode other than `Complete` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AggregateMode {
    /// Raw rows in, partial state out
    Partial,
    /// Partial state in, partial state out
    PartialMerge,
    /// Partial state in, final result out
    Final,
    /// Raw rows in, final result out, single pass
    #[default]
    Complete,
}

impl AggregateMode {
    /// Returns true if this mode produces or consumes partial state
    pub fn is_decomposed(&self) -> bool {
        !matches!(self, AggregateMode::Complete)
    }
}

impl fmt::Display for AggregateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateMode::Partial => write!(f, "PARTIAL"),
            AggregateMode::PartialMerge => write!(f, "PARTIAL_MERGE"),
            AggregateMode::Final => write!(f, "FINAL"),
            AggregateMode::Complete => write!(f, "COMPLETE"),
        }
    }
}

/// Data type for function signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionDataType {
    /// Any type
    Any,
    /// Any type that supports ordering comparison
    Orderable,
    /// Integer type
    Integer,
    /// Boolean type
    Boolean,
}

/// Function signature information
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    /// Return type
    pub return_type: FunctionDataType,
    /// Argument types
    pub argument_types: Vec<FunctionDataType>,
    /// Minimum number of arguments
    pub min_args: usize,
    /// Maximum number of arguments
    pub max_args: usize,
    /// Whether the function is variadic
    pub is_variadic: bool,
}

impl FunctionSignature {
    /// Create a new function signature
    pub fn new(
        return_type: FunctionDataType,
        argument_types: Vec<FunctionDataType>,
        min_args: usize,
        max_args: usize,
    ) -> Self {
        Self {
            return_type,
            argument_types,
            min_args,
            max_args,
            is_variadic: false,
        }
    }

    /// Create a variadic function signature
    pub fn variadic(return_type: FunctionDataType, arg_type: FunctionDataType) -> Self {
        Self {
            return_type,
            argument_types: vec![arg_type],
            min_args: 1,
            max_args: usize::MAX,
            is_variadic: true,
        }
    }

    /// Validate argument count, reporting a binding error against `function`
    pub fn validate_arg_count(&self, function: &str, count: usize) -> Result<()> {
        if count < self.min_args {
            return Err(Error::binding(
                function,
                count,
                format!(
                    "expected at least {} arguments, got {}",
                    self.min_args, count
                ),
            ));
        }
        if count > self.max_args {
            let message = if self.max_args == 0 {
                "no argument is expected".to_string()
            } else {
                format!("expected at most {} arguments, got {}", self.max_args, count)
            };
            return Err(Error::binding(function, self.max_args, message));
        }
        Ok(())
    }
}

/// Function information
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    /// Function name
    pub name: String,
    /// Description
    pub description: String,
    /// Signature
    pub signature: FunctionSignature,
    /// One result per row (true) or one result per partition (false)
    pub pivot_result: bool,
    /// Whether the function accepts a window frame clause
    pub supports_window: bool,
}

impl FunctionInfo {
    /// Create a new function info for a pivoted, frameless function
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        signature: FunctionSignature,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            signature,
            pivot_result: true,
            supports_window: false,
        }
    }

    /// Builder method to set whether the result is pivoted
    pub fn with_pivot_result(mut self, pivot_result: bool) -> Self {
        self.pivot_result = pivot_result;
        self
    }

    /// Builder method to set whether window frames are accepted
    pub fn with_supports_window(mut self, supports_window: bool) -> Self {
        self.supports_window = supports_window;
        self
    }

    /// Get the function name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the signature
    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }
}

/// Result of evaluating one partition
#[derive(Debug, Clone, PartialEq)]
pub enum WindowOutput {
    /// One value per consumed row, in consumption order
    Pivoted(Vec<i64>),
    /// One value standing for every row of the partition
    Partition(Value),
}

impl WindowOutput {
    /// Returns true for per-row results
    pub fn is_pivoted(&self) -> bool {
        matches!(self, WindowOutput::Pivoted(_))
    }

    /// Per-row results, if pivoted
    pub fn as_pivoted(&self) -> Option<&[i64]> {
        match self {
            WindowOutput::Pivoted(values) => Some(values),
            WindowOutput::Partition(_) => None,
        }
    }

    /// Partition-wide result, if not pivoted
    pub fn as_partition_value(&self) -> Option<&Value> {
        match self {
            WindowOutput::Pivoted(_) => None,
            WindowOutput::Partition(value) => Some(value),
        }
    }

    /// The value belonging to the row at `index` within the partition
    ///
    /// Partition-wide results answer for every index; the caller knows how
    /// many rows the partition had.
    pub fn value_for_row(&self, index: usize) -> Option<Value> {
        match self {
            WindowOutput::Pivoted(values) => values.get(index).map(|v| Value::Integer(*v)),
            WindowOutput::Partition(value) => Some(value.clone()),
        }
    }
}

/// Per-partition streaming evaluator for one window function call
///
/// An evaluator is owned by one thread of control for the duration of a
/// partition. It may be reused across partitions by calling `reset()`.
pub trait WindowEvaluator: Send {
    /// Get the function name
    fn name(&self) -> &str;

    /// Type of the values this evaluator produces
    fn return_type(&self) -> TypeDescriptor;

    /// Reinitialize state for a new partition
    fn reset(&mut self);

    /// Consume the argument values of the next row of the partition
    fn consume(&mut self, args: &[Value]) -> Result<()>;

    /// Number of rows consumed since the last reset
    fn rows_consumed(&self) -> usize;

    /// Produce the partition result
    ///
    /// The accumulated results are moved out; call `reset()` before the
    /// next partition.
    fn finish(&mut self) -> WindowOutput;
}

/// Bind-time resolver for one window function
pub trait WindowFunctionResolver: Send + Sync {
    /// Get the canonical function name
    fn name(&self) -> &str;

    /// Additional names the function is registered under
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Get function information
    fn info(&self) -> FunctionInfo;

    /// Validate argument types and build an evaluator
    fn resolve(
        &self,
        args: &[TypeDescriptor],
        config: &WindowConfig,
    ) -> Result<Box<dyn WindowEvaluator>>;
}

pub use registry::{global_registry, FunctionRegistry};
pub use window::{
    DenseRankFunction, KeyComparator, KeyOrdering, LastValueFunction, RankFunction, RankType,
    RowNumberFunction,
};
