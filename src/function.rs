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

//! # Zi Function Module
//!
//! Caller-supplied callables used by augmenters, injected at construction
//! and never inspected by the core:
//!
//! - **Predicates** (`Fn(&ZiToken) -> bool`): pure skip tests.
//! - **Mappers** (`Fn(&ZiToken) -> ZiToken`): pure insertion sources.
//! - **External functions** (`Fn(&Value) -> Result<Value>`): opaque calls that
//!   receive the raw token (a JSON string or integer) and may fail. Their
//!   errors are returned to the caller unchanged.
//!
//! Each callable carries a name. Configurations refer to callables by that
//! name and [`ZiFunctionRegistry`] resolves them back when a configuration
//! is imported.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::token::ZiToken;

pub type ZiPredicateFn = dyn Fn(&ZiToken) -> bool + Send + Sync;
pub type ZiMapperFn = dyn Fn(&ZiToken) -> ZiToken + Send + Sync;
pub type ZiExternalFn = dyn Fn(&Value) -> Result<Value> + Send + Sync;

/// A callable together with the name it is exported under.
pub struct ZiNamedFn<F: ?Sized> {
    name: String,
    func: Arc<F>,
}

impl<F: ?Sized> ZiNamedFn<F> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<F: ?Sized> Clone for ZiNamedFn<F> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<F: ?Sized> fmt::Debug for ZiNamedFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZiNamedFn").field("name", &self.name).finish()
    }
}

pub type ZiPredicate = ZiNamedFn<ZiPredicateFn>;
pub type ZiMapper = ZiNamedFn<ZiMapperFn>;
pub type ZiExternal = ZiNamedFn<ZiExternalFn>;

impl ZiPredicate {
    pub fn predicate<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&ZiToken) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn test(&self, token: &ZiToken) -> bool {
        (self.func)(token)
    }
}

impl ZiMapper {
    pub fn mapper<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&ZiToken) -> ZiToken + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn map(&self, token: &ZiToken) -> ZiToken {
        (self.func)(token)
    }
}

impl ZiExternal {
    pub fn external<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Invokes the function with the raw token value.
    pub fn call(&self, token: &ZiToken) -> Result<Value> {
        (self.func)(&token.to_value())
    }

    /// Invokes the function and coerces its result to a boolean.
    pub fn call_truthy(&self, token: &ZiToken) -> Result<bool> {
        self.call(token).map(|value| truthy(&value))
    }
}

/// Truthiness of a JSON value: false for null, false, zero and empty
/// strings, arrays or objects.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Named callables available when importing configurations.
#[derive(Debug, Default, Clone)]
pub struct ZiFunctionRegistry {
    predicates: HashMap<String, ZiPredicate>,
    mappers: HashMap<String, ZiMapper>,
    externals: HashMap<String, ZiExternal>,
}

impl ZiFunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_predicate<F>(&mut self, name: &str, func: F) -> &mut Self
    where
        F: Fn(&ZiToken) -> bool + Send + Sync + 'static,
    {
        self.predicates
            .insert(name.to_string(), ZiPredicate::predicate(name, func));
        self
    }

    pub fn register_mapper<F>(&mut self, name: &str, func: F) -> &mut Self
    where
        F: Fn(&ZiToken) -> ZiToken + Send + Sync + 'static,
    {
        self.mappers
            .insert(name.to_string(), ZiMapper::mapper(name, func));
        self
    }

    pub fn register_external<F>(&mut self, name: &str, func: F) -> &mut Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.externals
            .insert(name.to_string(), ZiExternal::external(name, func));
        self
    }

    pub fn predicate(&self, name: &str) -> Result<ZiPredicate> {
        self.predicates
            .get(name)
            .cloned()
            .ok_or_else(|| ZiError::validation(format!("unknown predicate function '{name}'")))
    }

    pub fn mapper(&self, name: &str) -> Result<ZiMapper> {
        self.mappers
            .get(name)
            .cloned()
            .ok_or_else(|| ZiError::validation(format!("unknown mapping function '{name}'")))
    }

    pub fn external(&self, name: &str) -> Result<ZiExternal> {
        self.externals
            .get(name)
            .cloned()
            .ok_or_else(|| ZiError::validation(format!("unknown external function '{name}'")))
    }
}
