//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi.
//! The Zi project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Operator Registry Module
//!
//! Maps operator names to factories so augmentation operators can be built
//! from configuration at runtime. The registry owns the
//! [`ZiFunctionRegistry`] used to resolve function references in those
//! configurations.

use std::collections::HashMap;

use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::function::ZiFunctionRegistry;
use crate::operator::ZiOperator;
use crate::operators::augment::{
    augment_deletion_factory, augment_insertion_factory, augment_swap_factory,
};

/// Given a JSON config value and the available functions, returns a boxed
/// operator ready to be applied to a record batch.
pub type OperatorFactory =
    fn(&Value, &ZiFunctionRegistry) -> Result<Box<dyn ZiOperator + Send + Sync>>;

/// Registry mapping operator names to their factory functions.
#[derive(Debug, Default)]
pub struct ZiOperatorRegistry {
    inner: HashMap<String, OperatorFactory>,
    functions: ZiFunctionRegistry,
}

impl ZiOperatorRegistry {
    pub fn new(functions: ZiFunctionRegistry) -> Self {
        ZiOperatorRegistry {
            inner: HashMap::new(),
            functions,
        }
    }

    /// Registry preloaded with the token augmentation operators.
    pub fn with_builtins(functions: ZiFunctionRegistry) -> Self {
        let mut registry = Self::new(functions);
        registry.register("augment.random_deletion", augment_deletion_factory);
        registry.register("augment.random_insertion", augment_insertion_factory);
        registry.register("augment.random_swap", augment_swap_factory);
        registry
    }

    pub fn register(&mut self, name: &str, factory: OperatorFactory) {
        self.inner.insert(name.to_string(), factory);
    }

    pub fn get(&self, name: &str) -> Result<OperatorFactory> {
        self.inner
            .get(name)
            .copied()
            .ok_or_else(|| ZiError::validation(format!("unknown operator: {}", name)))
    }

    pub fn functions(&self) -> &ZiFunctionRegistry {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut ZiFunctionRegistry {
        &mut self.functions
    }

    /// Sorted names of every registered operator.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.inner.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiates the operator registered under `name`.
    pub fn build(&self, name: &str, config: &Value) -> Result<Box<dyn ZiOperator + Send + Sync>> {
        let factory = self.get(name)?;
        factory(config, &self.functions)
    }
}
