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

//! RANK and DENSE_RANK window functions
//!
//! Both share one state machine. Each consumed row is compared with the
//! retained key of the previous tie group; on a change the rank advances
//! according to the [`RankType`].

use smallvec::SmallVec;

use crate::core::{Error, Result, TypeDescriptor, Value};
use crate::functions::{
    FunctionDataType, FunctionInfo, FunctionSignature, WindowConfig, WindowEvaluator,
    WindowFunctionResolver, WindowOutput,
};

use super::comparator::{validate_comparable, KeyComparator, KeyOrdering};
use super::PivotBuffer;

/// Captured order key, stack-allocated for up to 4 columns
type KeyTuple = SmallVec<[Value; 4]>;

/// How the rank advances when a new tie group starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankType {
    /// RANK: jump to the 1-based position of the group's first row (gaps)
    Basic,
    /// DENSE_RANK: increase by one (no gaps)
    Dense,
}

impl RankType {
    /// SQL name of the function
    pub fn name(&self) -> &'static str {
        match self {
            RankType::Basic => "RANK",
            RankType::Dense => "DENSE_RANK",
        }
    }

    /// Rank for the first row of a new tie group
    #[inline]
    pub fn advance(&self, row_count: usize, current_rank: i64) -> i64 {
        match self {
            RankType::Basic => row_count as i64,
            RankType::Dense => current_rank + 1,
        }
    }
}

fn rank_signature() -> FunctionSignature {
    FunctionSignature::variadic(FunctionDataType::Integer, FunctionDataType::Orderable)
}

fn resolve_rank(
    rank_type: RankType,
    args: &[TypeDescriptor],
    config: &WindowConfig,
) -> Result<Box<dyn WindowEvaluator>> {
    let name = rank_type.name();
    rank_signature().validate_arg_count(name, args.len())?;
    validate_comparable(name, args)?;
    Ok(Box::new(RankEvaluator::new(
        rank_type,
        KeyComparator::for_arity(args.len()),
        config,
    )))
}

/// RANK window function
///
/// Rows with equal order keys receive the same rank, and the next group
/// starts at its row number, leaving gaps.
///
/// Example: if two rows tie for rank 1, the next row gets rank 3 (not 2).
#[derive(Default)]
pub struct RankFunction;

impl WindowFunctionResolver for RankFunction {
    fn name(&self) -> &str {
        "RANK"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "RANK",
            "Returns the rank of the current row within the partition, with gaps for ties",
            rank_signature(),
        )
    }

    fn resolve(
        &self,
        args: &[TypeDescriptor],
        config: &WindowConfig,
    ) -> Result<Box<dyn WindowEvaluator>> {
        resolve_rank(RankType::Basic, args, config)
    }
}

/// DENSE_RANK window function
///
/// Like RANK, but the rank increases by exactly one per new tie group.
/// If three rows tie for second place, the next row is third.
#[derive(Default)]
pub struct DenseRankFunction;

impl WindowFunctionResolver for DenseRankFunction {
    fn name(&self) -> &str {
        "DENSE_RANK"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["DENSERANK"]
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "DENSE_RANK",
            "Returns the rank of the current row within the partition, without gaps for ties",
            rank_signature(),
        )
    }

    fn resolve(
        &self,
        args: &[TypeDescriptor],
        config: &WindowConfig,
    ) -> Result<Box<dyn WindowEvaluator>> {
        resolve_rank(RankType::Dense, args, config)
    }
}

#[derive(Debug, Default)]
struct RankState {
    /// Key of the current tie group; empty before the first row
    previous_value: KeyTuple,
    row_count: usize,
    current_rank: i64,
}

/// Streaming state machine shared by RANK and DENSE_RANK
#[derive(Debug)]
pub struct RankEvaluator {
    rank_type: RankType,
    comparator: KeyComparator,
    state: RankState,
    results: PivotBuffer,
}

impl RankEvaluator {
    pub fn new(rank_type: RankType, comparator: KeyComparator, config: &WindowConfig) -> Self {
        Self {
            rank_type,
            comparator,
            state: RankState::default(),
            results: PivotBuffer::new(rank_type.name(), config),
        }
    }

    pub fn rank_type(&self) -> RankType {
        self.rank_type
    }

    pub fn comparator(&self) -> KeyComparator {
        self.comparator
    }
}

impl WindowEvaluator for RankEvaluator {
    fn name(&self) -> &str {
        self.rank_type.name()
    }

    fn return_type(&self) -> TypeDescriptor {
        TypeDescriptor::array(TypeDescriptor::integer())
    }

    fn reset(&mut self) {
        // The retained key must not leak into the next partition
        self.state.previous_value.clear();
        self.state.row_count = 0;
        self.state.current_rank = 0;
        self.results.clear();
    }

    fn consume(&mut self, args: &[Value]) -> Result<()> {
        let arity = self.comparator.arity();
        if args.len() < arity {
            return Err(Error::argument_count_mismatch(
                self.rank_type.name(),
                arity,
                args.len(),
            ));
        }
        let key = &args[..arity];

        let state = &mut self.state;
        state.row_count += 1;
        if state.row_count == 1
            || self.comparator.compare(&state.previous_value, key) == KeyOrdering::NotEqual
        {
            state.current_rank = self.rank_type.advance(state.row_count, state.current_rank);
            state.previous_value.clear();
            state.previous_value.extend(key.iter().cloned());
        }
        self.results.push(state.current_rank);
        Ok(())
    }

    fn rows_consumed(&self) -> usize {
        self.results.len()
    }

    fn finish(&mut self) -> WindowOutput {
        WindowOutput::Pivoted(self.results.take())
    }
}
