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

//! # Zi Error Module
//!
//! This module defines the error types shared by every augmenter, record
//! operator and configuration helper in the crate.
//!
//! ## Error Categories
//!
//! - **Validation**: Invalid configuration, raised eagerly at construction
//! - **Schema**: Token type problems (non string/integer tokens, mixed kinds,
//!   mapping functions returning the wrong kind)
//! - **Usage**: Inputs of a rank other than 1 or 2
//! - **External**: Failures raised by caller-supplied external functions,
//!   returned to the caller exactly as the function produced them
//! - **Operator**: Failures in record operators, tagged with the operator name
//! - **Serde**: Serialization/deserialization errors
//! - **Internal**: Unexpected internal failures
//!
//! ## Usage
//!
//! ```rust
//! use zix_textaug::errors::{Result, ZiError};
//!
//! fn check_rate(rate: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&rate) {
//!         return Err(ZiError::validation("rate must be in [0,1]"));
//!     }
//!     Ok(rate)
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout the crate.
pub type Result<T> = std::result::Result<T, ZiError>;

/// Canonical error enumeration for Zi token augmentation.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ZiError {
    /// Validation errors triggered by invalid parameters.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Errors caused by token values of an unexpected type.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Inputs that cannot be augmented in their current shape.
    #[error("usage error: {message}")]
    Usage { message: String },

    /// Failure raised inside a caller-supplied external function.
    #[error("external function '{function}' failed: {message}")]
    External { function: String, message: String },

    /// Any failure raised by an operator implementation.
    #[error("operator '{operator}' failed: {message}")]
    Operator { operator: String, message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ZiError {
    fn from(err: serde_json::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for ZiError {
    fn from(err: serde_yaml::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl ZiError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ZiError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct schema errors.
    pub fn schema<T: Into<String>>(message: T) -> Self {
        ZiError::Schema {
            message: message.into(),
        }
    }

    /// Helper to construct usage errors.
    pub fn usage<T: Into<String>>(message: T) -> Self {
        ZiError::Usage {
            message: message.into(),
        }
    }

    /// Helper for external functions reporting their own failure.
    pub fn external(function: impl Into<String>, message: impl Into<String>) -> Self {
        ZiError::External {
            function: function.into(),
            message: message.into(),
        }
    }

    /// Helper to construct operator errors.
    pub fn operator(name: impl Into<String>, message: impl Into<String>) -> Self {
        ZiError::Operator {
            operator: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        ZiError::Internal(message.into())
    }
}
