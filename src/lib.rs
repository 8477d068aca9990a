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

//! # Stoolap Window - streaming window function evaluators
//!
//! Per-partition evaluators for the ranking and value window functions
//! ROW_NUMBER, RANK, DENSE_RANK and LAST_VALUE. Rows arrive already
//! partitioned and sorted; an evaluator sees each row of a partition once
//! and produces either one result per row or one result for the whole
//! partition.
//!
//! ## Quick Start
//!
//! ```rust
//! use stoolap_window::{global_registry, TypeDescriptor, Value, WindowOutput};
//!
//! // Bind RANK over one INTEGER order key
//! let mut rank = global_registry()
//!     .resolve("RANK", &[TypeDescriptor::integer()])
//!     .unwrap();
//!
//! rank.reset();
//! for salary in [100, 100, 200] {
//!     rank.consume(&[Value::integer(salary)]).unwrap();
//! }
//! assert_eq!(rank.finish(), WindowOutput::Pivoted(vec![1, 1, 3]));
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Core types ([`DataType`], [`TypeDescriptor`], [`Value`], [`Row`], [`Error`])
//! - [`functions`] - Resolvers, evaluators and the [`FunctionRegistry`]
//! - [`executor`] - [`PartitionRunner`] for driving evaluators over rows

pub mod core;
pub mod executor;
pub mod functions;

// Re-export main types for convenience
pub use crate::core::{DataType, Error, Result, Row, TypeDescriptor, Value};

// Re-export function types
pub use functions::{
    global_registry, AggregateMode, FunctionDataType, FunctionInfo, FunctionRegistry,
    FunctionSignature, WindowConfig, WindowEvaluator, WindowFunctionResolver, WindowOutput,
};

// Re-export specific function implementations
pub use functions::{
    DenseRankFunction, KeyComparator, KeyOrdering, LastValueFunction, RankFunction, RankType,
    RowNumberFunction,
};

// Re-export executor types
pub use executor::PartitionRunner;
