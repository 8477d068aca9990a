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

//! Window Functions
//!
//! This module provides streaming window function evaluators:
//!
//! - [`RowNumberFunction`] - ROW_NUMBER()
//! - [`RankFunction`] - RANK(key, ...)
//! - [`DenseRankFunction`] - DENSE_RANK(key, ...)
//! - [`LastValueFunction`] - LAST_VALUE(value [, skip_nulls])

mod comparator;
mod rank;
mod row_number;
mod value;

pub use comparator::{validate_comparable, KeyComparator, KeyOrdering};
pub use rank::{DenseRankFunction, RankEvaluator, RankFunction, RankType};
pub use row_number::{RowNumberEvaluator, RowNumberFunction};
pub use value::{LastValueEvaluator, LastValueFunction};

use crate::functions::WindowConfig;

/// Per-row result buffer for pivoted functions
///
/// Grows by one entry per consumed row and warns once when a partition
/// crosses the configured size.
#[derive(Debug)]
pub(crate) struct PivotBuffer {
    function: &'static str,
    values: Vec<i64>,
    config: WindowConfig,
}

impl PivotBuffer {
    pub(crate) fn new(function: &'static str, config: &WindowConfig) -> Self {
        Self {
            function,
            values: Vec::with_capacity(config.initial_result_capacity),
            config: config.clone(),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, value: i64) {
        self.values.push(value);
        if self.config.crosses_large_partition(self.values.len()) {
            log::warn!(
                "{}: partition exceeds {} rows; all per-row results are held in memory",
                self.function,
                self.config.large_partition_rows
            );
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
        self.values.reserve(self.config.initial_result_capacity);
    }

    pub(crate) fn take(&mut self) -> Vec<i64> {
        std::mem::take(&mut self.values)
    }
}
