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

//! LAST_VALUE window function

use crate::core::{Error, Result, TypeDescriptor, Value};
use crate::functions::{
    FunctionDataType, FunctionInfo, FunctionSignature, WindowConfig, WindowEvaluator,
    WindowFunctionResolver, WindowOutput,
};

/// LAST_VALUE window function
///
/// Returns the last value of the partition. With the optional second
/// argument set to true on the first row, NULLs are skipped and the result
/// is the last non-NULL value.
///
/// The result is computed once per partition and stands for every row.
#[derive(Default)]
pub struct LastValueFunction;

impl WindowFunctionResolver for LastValueFunction {
    fn name(&self) -> &str {
        "LAST_VALUE"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "LAST_VALUE",
            "Returns the last value in the partition, optionally skipping NULLs",
            FunctionSignature::new(
                FunctionDataType::Any,
                vec![FunctionDataType::Any, FunctionDataType::Boolean],
                1,
                2,
            ),
        )
        .with_pivot_result(false)
        .with_supports_window(true)
    }

    fn resolve(
        &self,
        args: &[TypeDescriptor],
        _config: &WindowConfig,
    ) -> Result<Box<dyn WindowEvaluator>> {
        self.info()
            .signature
            .validate_arg_count(self.name(), args.len())?;
        if let Some(flag) = args.get(1) {
            if !flag.is_boolean() {
                return Err(Error::binding(
                    self.name(),
                    1,
                    format!("second argument must be a boolean expression, got {}", flag),
                ));
            }
        }
        Ok(Box::new(LastValueEvaluator::new(
            args[0].clone(),
            args.len() == 2,
        )))
    }
}

/// Streaming state for LAST_VALUE
#[derive(Debug)]
pub struct LastValueEvaluator {
    input_type: TypeDescriptor,
    has_skip_nulls_arg: bool,
    value: Value,
    first_row_pending: bool,
    skip_nulls: bool,
    rows: usize,
}

impl LastValueEvaluator {
    pub fn new(input_type: TypeDescriptor, has_skip_nulls_arg: bool) -> Self {
        let value = Value::null(input_type.data_type());
        Self {
            input_type,
            has_skip_nulls_arg,
            value,
            first_row_pending: true,
            skip_nulls: false,
            rows: 0,
        }
    }

    /// Whether NULLs are being skipped in the current partition
    pub fn skip_nulls(&self) -> bool {
        self.skip_nulls
    }

    fn expected_args(&self) -> usize {
        if self.has_skip_nulls_arg {
            2
        } else {
            1
        }
    }
}

impl WindowEvaluator for LastValueEvaluator {
    fn name(&self) -> &str {
        "LAST_VALUE"
    }

    fn return_type(&self) -> TypeDescriptor {
        self.input_type.clone()
    }

    fn reset(&mut self) {
        self.value = Value::null(self.input_type.data_type());
        self.first_row_pending = true;
        self.skip_nulls = false;
        self.rows = 0;
    }

    fn consume(&mut self, args: &[Value]) -> Result<()> {
        let expected = self.expected_args();
        if args.len() < expected {
            return Err(Error::argument_count_mismatch(
                "LAST_VALUE",
                expected,
                args.len(),
            ));
        }

        if self.first_row_pending {
            self.first_row_pending = false;
            if self.has_skip_nulls_arg {
                self.skip_nulls = args[1].as_boolean().unwrap_or(false);
            }
        }

        let incoming = &args[0];
        if !self.skip_nulls || !incoming.is_null() {
            self.value = incoming.clone();
        }
        self.rows += 1;
        Ok(())
    }

    fn rows_consumed(&self) -> usize {
        self.rows
    }

    fn finish(&mut self) -> WindowOutput {
        log::trace!(
            "LAST_VALUE: finished partition of {} rows (skip_nulls = {})",
            self.rows,
            self.skip_nulls
        );
        WindowOutput::Partition(std::mem::take(&mut self.value))
    }
}
