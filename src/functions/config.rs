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

//! Window evaluator configuration
//!

/// Default number of result slots reserved per partition
pub const DEFAULT_INITIAL_RESULT_CAPACITY: usize = 64;

/// Default row count above which a pivoted partition logs a warning
pub const DEFAULT_LARGE_PARTITION_ROWS: usize = 1_000_000;

/// Configuration shared by every evaluator a registry resolves
///
/// Pivoted functions (ROW_NUMBER, RANK, DENSE_RANK) keep one result per
/// consumed row until the partition finishes, so a whole partition must fit
/// in memory. These settings tune that buffer; they never change results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Result slots reserved when an evaluator is created
    /// Default: 64
    pub initial_result_capacity: usize,

    /// Rows after which a pivoted partition emits one warning
    /// Default: 1000000 (0 disables the warning)
    pub large_partition_rows: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            initial_result_capacity: DEFAULT_INITIAL_RESULT_CAPACITY,
            large_partition_rows: DEFAULT_LARGE_PARTITION_ROWS,
        }
    }
}

impl WindowConfig {
    /// Creates a WindowConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a WindowConfig for many small partitions
    pub fn small_partitions() -> Self {
        Self {
            initial_result_capacity: 8,
            large_partition_rows: 100_000,
        }
    }

    /// Creates a WindowConfig for few large partitions
    pub fn large_partitions() -> Self {
        Self {
            initial_result_capacity: 4096,
            large_partition_rows: 0,
        }
    }

    /// Builder method to set the initial result capacity
    pub fn with_initial_result_capacity(mut self, capacity: usize) -> Self {
        self.initial_result_capacity = capacity;
        self
    }

    /// Builder method to set the large partition warning threshold
    pub fn with_large_partition_rows(mut self, rows: usize) -> Self {
        self.large_partition_rows = rows;
        self
    }

    /// Returns true if `rows` just crossed the warning threshold
    #[inline]
    pub(crate) fn crosses_large_partition(&self, rows: usize) -> bool {
        self.large_partition_rows != 0 && self.large_partition_rows.checked_add(1) == Some(rows)
    }
}
