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

//! ROW_NUMBER window function

use crate::core::{Result, TypeDescriptor, Value};
use crate::functions::{
    FunctionDataType, FunctionInfo, FunctionSignature, WindowConfig, WindowEvaluator,
    WindowFunctionResolver, WindowOutput,
};

use super::PivotBuffer;

/// ROW_NUMBER window function
///
/// Assigns a unique number to each row within the partition, sequentially
/// from 1 in partition order. Unlike RANK(), ties still get distinct numbers.
#[derive(Default)]
pub struct RowNumberFunction;

impl WindowFunctionResolver for RowNumberFunction {
    fn name(&self) -> &str {
        "ROW_NUMBER"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["ROWNUMBER"]
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "ROW_NUMBER",
            "Assigns a sequential number, starting from 1, to each row within the partition",
            FunctionSignature::new(FunctionDataType::Integer, vec![], 0, 0),
        )
    }

    fn resolve(
        &self,
        args: &[TypeDescriptor],
        config: &WindowConfig,
    ) -> Result<Box<dyn WindowEvaluator>> {
        self.info()
            .signature
            .validate_arg_count(self.name(), args.len())?;
        Ok(Box::new(RowNumberEvaluator::new(config)))
    }
}

/// Streaming state for ROW_NUMBER
#[derive(Debug)]
pub struct RowNumberEvaluator {
    next_number: i64,
    results: PivotBuffer,
}

impl RowNumberEvaluator {
    pub fn new(config: &WindowConfig) -> Self {
        Self {
            next_number: 1,
            results: PivotBuffer::new("ROW_NUMBER", config),
        }
    }
}

impl WindowEvaluator for RowNumberEvaluator {
    fn name(&self) -> &str {
        "ROW_NUMBER"
    }

    fn return_type(&self) -> TypeDescriptor {
        TypeDescriptor::array(TypeDescriptor::integer())
    }

    fn reset(&mut self) {
        self.next_number = 1;
        self.results.clear();
    }

    fn consume(&mut self, _args: &[Value]) -> Result<()> {
        self.results.push(self.next_number);
        self.next_number += 1;
        Ok(())
    }

    fn rows_consumed(&self) -> usize {
        self.results.len()
    }

    fn finish(&mut self) -> WindowOutput {
        WindowOutput::Pivoted(self.results.take())
    }
}
