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

//! Skip policies: which tokens may never be picked for deletion, as an
//! insertion prompt, or for swapping.

use std::collections::HashSet;

use crate::augment::config::ZiSkipConfig;
use crate::errors::{Result, ZiError};
use crate::function::{ZiExternal, ZiFunctionRegistry, ZiPredicate};
use crate::token::ZiToken;

/// The single active skip mechanism of an augmenter.
#[derive(Debug, Clone, Default)]
pub enum ZiSkipPolicy {
    /// Nothing is skipped.
    #[default]
    Nothing,
    /// Exact membership in a token list.
    List {
        tokens: Vec<ZiToken>,
        lookup: HashSet<ZiToken>,
    },
    /// Pure predicate over the token.
    Predicate(ZiPredicate),
    /// External function over the raw token value, coerced to a boolean.
    External(ZiExternal),
}

impl ZiSkipPolicy {
    pub fn list<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ZiToken>,
    {
        let tokens: Vec<ZiToken> = tokens.into_iter().map(Into::into).collect();
        let lookup = tokens.iter().cloned().collect();
        ZiSkipPolicy::List { tokens, lookup }
    }

    pub fn predicate<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&ZiToken) -> bool + Send + Sync + 'static,
    {
        ZiSkipPolicy::Predicate(ZiPredicate::predicate(name, func))
    }

    pub fn external<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&serde_json::Value) -> Result<serde_json::Value> + Send + Sync + 'static,
    {
        ZiSkipPolicy::External(ZiExternal::external(name, func))
    }

    /// Builds the policy named by a configuration record.
    pub fn from_config(config: &ZiSkipConfig, functions: &ZiFunctionRegistry) -> Result<Self> {
        let configured = [
            config.skip_list.is_some(),
            config.skip_fn.is_some(),
            config.skip_external.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();
        if configured > 1 {
            return Err(ZiError::validation(
                "at most one of skip_list, skip_fn, skip_external may be provided",
            ));
        }

        if let Some(tokens) = &config.skip_list {
            return Ok(ZiSkipPolicy::list(tokens.iter().cloned()));
        }
        if let Some(name) = &config.skip_fn {
            return Ok(ZiSkipPolicy::Predicate(functions.predicate(name)?));
        }
        if let Some(name) = &config.skip_external {
            return Ok(ZiSkipPolicy::External(functions.external(name)?));
        }
        Ok(ZiSkipPolicy::Nothing)
    }

    pub fn to_config(&self) -> ZiSkipConfig {
        match self {
            ZiSkipPolicy::Nothing => ZiSkipConfig::default(),
            ZiSkipPolicy::List { tokens, .. } => ZiSkipConfig {
                skip_list: Some(tokens.clone()),
                ..ZiSkipConfig::default()
            },
            ZiSkipPolicy::Predicate(predicate) => ZiSkipConfig {
                skip_fn: Some(predicate.name().to_string()),
                ..ZiSkipConfig::default()
            },
            ZiSkipPolicy::External(external) => ZiSkipConfig {
                skip_external: Some(external.name().to_string()),
                ..ZiSkipConfig::default()
            },
        }
    }

    /// True when `token` must be excluded from candidate selection.
    pub fn resolve(&self, token: &ZiToken) -> Result<bool> {
        match self {
            ZiSkipPolicy::Nothing => Ok(false),
            ZiSkipPolicy::List { lookup, .. } => Ok(lookup.contains(token)),
            ZiSkipPolicy::Predicate(predicate) => Ok(predicate.test(token)),
            ZiSkipPolicy::External(external) => external.call_truthy(token),
        }
    }

    /// Indices of `row` whose tokens are not skipped, in order.
    pub fn eligible(&self, row: &[ZiToken]) -> Result<Vec<usize>> {
        if matches!(self, ZiSkipPolicy::Nothing) {
            return Ok((0..row.len()).collect());
        }
        let mut eligible = Vec::with_capacity(row.len());
        for (index, token) in row.iter().enumerate() {
            if !self.resolve(token)? {
                eligible.push(index);
            }
        }
        Ok(eligible)
    }
}
