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

//! Flat configuration records for the augmenters.
//!
//! Every augmenter exports a configuration that is enough to rebuild an
//! equivalent instance. Scalars and token lists round-trip exactly; callables
//! are stored by name and resolved through a
//! [`ZiFunctionRegistry`](crate::function::ZiFunctionRegistry) on import.
//! Counts are signed here so a negative value reaches validation and is
//! reported as such.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::token::ZiToken;

/// Skip mechanism references. At most one may be set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZiSkipConfig {
    #[serde(default)]
    pub skip_list: Option<Vec<ZiToken>>,
    #[serde(default)]
    pub skip_fn: Option<String>,
    #[serde(default)]
    pub skip_external: Option<String>,
}

/// Insertion source references. Exactly one must be set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZiInsertionSourceConfig {
    #[serde(default)]
    pub insertion_list: Option<Vec<ZiToken>>,
    #[serde(default)]
    pub insertion_fn: Option<String>,
    #[serde(default)]
    pub insertion_external: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiDeletionConfig {
    pub rate: f64,
    #[serde(default)]
    pub max_deletions: Option<i64>,
    #[serde(flatten)]
    pub skip: ZiSkipConfig,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiInsertionConfig {
    pub rate: f64,
    #[serde(default)]
    pub max_insertions: Option<i64>,
    #[serde(flatten)]
    pub source: ZiInsertionSourceConfig,
    #[serde(flatten)]
    pub skip: ZiSkipConfig,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiSwapConfig {
    pub swaps: i64,
    #[serde(flatten)]
    pub skip: ZiSkipConfig,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Reads a configuration record from a JSON object.
pub fn parse_config<T: DeserializeOwned>(value: &Value) -> Result<T> {
    if !value.is_object() {
        return Err(ZiError::validation("augmenter config must be object"));
    }
    Ok(serde_json::from_value(value.clone())?)
}

/// Reads a configuration record from a YAML document.
pub fn parse_yaml_config<T: DeserializeOwned>(source: &str) -> Result<T> {
    Ok(serde_yaml::from_str(source)?)
}

pub(crate) fn check_rate(rate: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(ZiError::validation(format!(
            "rate must be between 0 and 1 (both inclusive), received rate={rate}"
        )));
    }
    Ok(rate)
}

pub(crate) fn check_count(field: &str, value: Option<i64>) -> Result<Option<usize>> {
    match value {
        None => Ok(None),
        Some(count) if count < 0 => Err(ZiError::validation(format!(
            "{field} must be non negative, received {field}={count}"
        ))),
        Some(count) => usize::try_from(count)
            .map(Some)
            .map_err(|_| ZiError::validation(format!("{field} is too large: {count}"))),
    }
}
