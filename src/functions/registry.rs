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

//! Function Registry
//!
//! This module provides the registry for looking up window function
//! resolvers by name and binding them to argument types.

use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;

use super::window::{DenseRankFunction, LastValueFunction, RankFunction, RowNumberFunction};
use super::{AggregateMode, FunctionInfo, WindowConfig, WindowEvaluator, WindowFunctionResolver};
use crate::core::{Error, Result, TypeDescriptor};

/// Global function registry instance
static GLOBAL_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// Get the global function registry
#[inline]
pub fn global_registry() -> &'static FunctionRegistry {
    GLOBAL_REGISTRY.get_or_init(FunctionRegistry::new)
}

type ResolverMap = FxHashMap<String, Arc<dyn WindowFunctionResolver>>;

/// Function registry for window functions
pub struct FunctionRegistry {
    /// Resolvers keyed by uppercase name and alias
    window_functions: RwLock<ResolverMap>,
    /// Configuration handed to every resolver
    config: WindowConfig,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Create a new function registry with all built-in functions registered
    pub fn new() -> Self {
        Self::with_config(WindowConfig::default())
    }

    /// Create a registry with built-in functions and a custom configuration
    pub fn with_config(config: WindowConfig) -> Self {
        let registry = Self {
            window_functions: RwLock::new(FxHashMap::default()),
            config,
        };

        registry.register(RowNumberFunction);
        registry.register(RankFunction);
        registry.register(DenseRankFunction);
        registry.register(LastValueFunction);

        registry
    }

    /// The configuration evaluators are built with
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Register a window function under its name and aliases
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register<F: WindowFunctionResolver + 'static>(&self, function: F) {
        let function: Arc<dyn WindowFunctionResolver> = Arc::new(function);
        let mut funcs = self.write();
        funcs.insert(function.name().to_uppercase(), Arc::clone(&function));
        for alias in function.aliases() {
            funcs.insert(alias.to_uppercase(), Arc::clone(&function));
        }
    }

    /// Bind a window function for complete (single pass) evaluation
    pub fn resolve(&self, name: &str, args: &[TypeDescriptor]) -> Result<Box<dyn WindowEvaluator>> {
        self.resolve_with_mode(name, args, AggregateMode::Complete)
    }

    /// Bind a window function for the requested evaluation mode
    ///
    /// Argument validation runs first, so a call that is both mistyped and
    /// requested in a decomposed mode reports the binding error.
    pub fn resolve_with_mode(
        &self,
        name: &str,
        args: &[TypeDescriptor],
        mode: AggregateMode,
    ) -> Result<Box<dyn WindowEvaluator>> {
        let function = self
            .lookup(name)
            .ok_or_else(|| Error::FunctionNotFound(name.to_string()))?;

        let evaluator = match function.resolve(args, &self.config) {
            Ok(evaluator) => evaluator,
            Err(err) => {
                log::debug!("{}: rejected at bind time: {}", function.name(), err);
                return Err(err);
            }
        };

        if mode.is_decomposed() {
            return Err(Error::unsupported_mode(function.name(), mode));
        }

        log::debug!(
            "{}: resolved with {} argument(s), returns {}",
            function.name(),
            args.len(),
            evaluator.return_type()
        );
        Ok(evaluator)
    }

    /// Check if a function name is a window function
    pub fn is_window_function(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Get function info by name
    pub fn get_info(&self, name: &str) -> Option<FunctionInfo> {
        self.lookup(name).map(|f| f.info())
    }

    /// List all window function names, aliases included, sorted
    pub fn list_window_functions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    fn lookup(&self, name: &str) -> Option<Arc<dyn WindowFunctionResolver>> {
        let funcs = self.read();
        // Fast path: name is already uppercase
        if let Some(f) = funcs.get(name) {
            return Some(Arc::clone(f));
        }
        funcs.get(&name.to_uppercase()).cloned()
    }

    // Registration never panics while holding the lock, so a poisoned map
    // is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, ResolverMap> {
        self.window_functions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ResolverMap> {
        self.window_functions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::functions::WindowOutput;

    #[test]
    fn test_registry_new() {
        let registry = FunctionRegistry::new();
        assert!(registry.is_window_function("ROW_NUMBER"));
        assert!(registry.is_window_function("RANK"));
        assert!(registry.is_window_function("DENSE_RANK"));
        assert!(registry.is_window_function("LAST_VALUE"));
        assert!(!registry.is_window_function("NTILE"));
    }

    #[test]
    fn test_registry_case_insensitive() {
        let registry = FunctionRegistry::new();
        assert!(registry.is_window_function("rank"));
        assert!(registry.is_window_function("Rank"));
        assert!(registry.is_window_function("dense_rank"));
    }

    #[test]
    fn test_aliases() {
        let registry = FunctionRegistry::new();
        assert!(registry.is_window_function("ROWNUMBER"));
        assert!(registry.is_window_function("denserank"));
        let info = registry.get_info("DenseRank").unwrap();
        assert_eq!(info.name, "DENSE_RANK");
    }

    #[test]
    fn test_resolve() {
        let registry = FunctionRegistry::new();
        let mut f = registry
            .resolve("dense_rank", &[TypeDescriptor::integer()])
            .unwrap();
        assert_eq!(f.name(), "DENSE_RANK");
        f.reset();
        f.consume(&[Value::integer(1)]).unwrap();
        f.consume(&[Value::integer(2)]).unwrap();
        assert_eq!(f.finish(), WindowOutput::Pivoted(vec![1, 2]));
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = FunctionRegistry::new();
        let err = registry.resolve("NTILE", &[]).err().unwrap();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_decomposed_modes_rejected() {
        let registry = FunctionRegistry::new();
        for mode in [
            AggregateMode::Partial,
            AggregateMode::PartialMerge,
            AggregateMode::Final,
        ] {
            let err = registry
                .resolve_with_mode("ROW_NUMBER", &[], mode)
                .err()
                .unwrap();
            assert_eq!(err, Error::unsupported_mode("ROW_NUMBER", mode));
        }
        assert!(registry
            .resolve_with_mode("ROW_NUMBER", &[], AggregateMode::Complete)
            .is_ok());
    }

    #[test]
    fn test_binding_checked_before_mode() {
        let registry = FunctionRegistry::new();
        let err = registry
            .resolve_with_mode("RANK", &[], AggregateMode::Partial)
            .err()
            .unwrap();
        assert!(err.is_binding_error());
    }

    #[test]
    fn test_function_info() {
        let registry = FunctionRegistry::new();
        let info = registry.get_info("last_value").unwrap();
        assert_eq!(info.name, "LAST_VALUE");
        assert!(!info.pivot_result);
        assert!(registry.get_info("NOPE").is_none());
    }

    #[test]
    fn test_list_functions() {
        let registry = FunctionRegistry::new();
        assert_eq!(
            registry.list_window_functions(),
            vec![
                "DENSERANK",
                "DENSE_RANK",
                "LAST_VALUE",
                "RANK",
                "ROWNUMBER",
                "ROW_NUMBER"
            ]
        );
    }

    #[test]
    fn test_custom_config() {
        let registry = FunctionRegistry::with_config(WindowConfig::small_partitions());
        assert_eq!(registry.config(), &WindowConfig::small_partitions());
        assert!(registry.resolve("ROW_NUMBER", &[]).is_ok());
    }

    #[test]
    fn test_global_registry() {
        let registry = global_registry();
        assert!(registry.is_window_function("ROW_NUMBER"));
        assert!(std::ptr::eq(registry, global_registry()));
    }
}
