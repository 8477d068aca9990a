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

//! Window Function Execution
//!
//! Drives one bound window function over partitions that arrive already
//! grouped and sorted. Each partition runs the full protocol:
//!
//! - `reset()` once at the partition start
//! - `consume()` once per row, with the argument columns extracted
//! - `finish()` once at the partition end

use smallvec::SmallVec;

use crate::core::{Error, Result, Row, TypeDescriptor, Value};
use crate::functions::{FunctionRegistry, WindowEvaluator, WindowOutput};

/// Per-row argument values - stack-allocated for common case (up to 4 arguments)
type ArgBuffer = SmallVec<[Value; 4]>;

/// Runs a window evaluator over sorted partitions of rows
pub struct PartitionRunner {
    evaluator: Box<dyn WindowEvaluator>,
    /// Row column feeding each function argument, in argument order
    arg_columns: SmallVec<[usize; 4]>,
    args: ArgBuffer,
}

impl PartitionRunner {
    /// Create a runner for an already bound evaluator
    pub fn new(evaluator: Box<dyn WindowEvaluator>, arg_columns: &[usize]) -> Self {
        Self {
            evaluator,
            arg_columns: SmallVec::from_slice(arg_columns),
            args: SmallVec::with_capacity(arg_columns.len()),
        }
    }

    /// Bind `name` through `registry` and create a runner for it
    ///
    /// `arg_types` and `arg_columns` describe the same arguments, in order;
    /// a length mismatch is a binding error at the first unpaired position.
    pub fn bind(
        registry: &FunctionRegistry,
        name: &str,
        arg_types: &[TypeDescriptor],
        arg_columns: &[usize],
    ) -> Result<Self> {
        if arg_types.len() != arg_columns.len() {
            return Err(Error::binding(
                name.to_uppercase(),
                arg_types.len().min(arg_columns.len()),
                format!(
                    "{} argument types bound to {} columns",
                    arg_types.len(),
                    arg_columns.len()
                ),
            ));
        }
        let evaluator = registry.resolve(name, arg_types)?;
        Ok(Self::new(evaluator, arg_columns))
    }

    /// The evaluator being driven
    pub fn evaluator(&self) -> &dyn WindowEvaluator {
        self.evaluator.as_ref()
    }

    /// Evaluate one partition
    pub fn run(&mut self, partition: &[Row]) -> Result<WindowOutput> {
        log::trace!(
            "{}: reset for partition of {} rows",
            self.evaluator.name(),
            partition.len()
        );
        self.evaluator.reset();

        for row in partition {
            self.args.clear();
            for &idx in &self.arg_columns {
                self.args.push(row.column(idx)?.clone());
            }
            self.evaluator.consume(&self.args)?;
        }

        let output = self.evaluator.finish();
        log::trace!(
            "{}: finished after {} rows",
            self.evaluator.name(),
            partition.len()
        );
        Ok(output)
    }

    /// Evaluate independent partitions one after another, reusing the evaluator
    pub fn run_partitions<'a, I>(&mut self, partitions: I) -> Result<Vec<WindowOutput>>
    where
        I: IntoIterator<Item = &'a [Row]>,
    {
        partitions
            .into_iter()
            .map(|partition| self.run(partition))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::global_registry;

    fn rows(values: &[(&str, i64)]) -> Vec<Row> {
        values
            .iter()
            .map(|(dept, salary)| Row::from_values(vec![Value::text(*dept), Value::integer(*salary)]))
            .collect()
    }

    #[test]
    fn test_run_rank() {
        let mut runner =
            PartitionRunner::bind(global_registry(), "RANK", &[TypeDescriptor::integer()], &[1])
                .unwrap();
        let partition = rows(&[("a", 100), ("a", 100), ("a", 200)]);
        assert_eq!(
            runner.run(&partition).unwrap(),
            WindowOutput::Pivoted(vec![1, 1, 3])
        );
    }

    #[test]
    fn test_run_partitions_independently() {
        let mut runner = PartitionRunner::bind(
            global_registry(),
            "DENSE_RANK",
            &[TypeDescriptor::integer()],
            &[1],
        )
        .unwrap();
        let first = rows(&[("a", 1), ("a", 2)]);
        let second = rows(&[("b", 2), ("b", 2), ("b", 3)]);
        let outputs = runner
            .run_partitions([first.as_slice(), second.as_slice()])
            .unwrap();
        assert_eq!(
            outputs,
            vec![
                WindowOutput::Pivoted(vec![1, 2]),
                WindowOutput::Pivoted(vec![1, 1, 2]),
            ]
        );
    }

    #[test]
    fn test_run_row_number_without_arguments() {
        let mut runner =
            PartitionRunner::bind(global_registry(), "ROW_NUMBER", &[], &[]).unwrap();
        let partition = rows(&[("a", 1), ("a", 1)]);
        assert_eq!(
            runner.run(&partition).unwrap(),
            WindowOutput::Pivoted(vec![1, 2])
        );
        assert_eq!(runner.evaluator().name(), "ROW_NUMBER");
    }

    #[test]
    fn test_bind_rejects_column_count_mismatch() {
        let err = PartitionRunner::bind(global_registry(), "rank", &[TypeDescriptor::integer()], &[])
            .err()
            .unwrap();
        match err {
            Error::Binding {
                function, position, ..
            } => {
                assert_eq!(function, "RANK");
                assert_eq!(position, 0);
            }
            other => panic!("expected binding error, got {other:?}"),
        }

        let err = PartitionRunner::bind(
            global_registry(),
            "LAST_VALUE",
            &[TypeDescriptor::integer()],
            &[0, 1],
        )
        .err()
        .unwrap();
        match err {
            Error::Binding { position, .. } => assert_eq!(position, 1),
            other => panic!("expected binding error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_column() {
        let mut runner =
            PartitionRunner::bind(global_registry(), "RANK", &[TypeDescriptor::integer()], &[5])
                .unwrap();
        let err = runner.run(&rows(&[("a", 1)])).unwrap_err();
        assert_eq!(err, Error::ColumnIndexOutOfBounds { index: 5 });
    }

    #[test]
    fn test_empty_partition() {
        let mut runner = PartitionRunner::bind(
            global_registry(),
            "LAST_VALUE",
            &[TypeDescriptor::integer()],
            &[1],
        )
        .unwrap();
        let output = runner.run(&[]).unwrap();
        assert!(output.as_partition_value().unwrap().is_null());
    }
}
