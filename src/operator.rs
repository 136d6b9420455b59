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

//! # Zi Operator Module
//!
//! Operators receive a batch of records, process them, and return a new
//! batch. The token augmenters are exposed to record pipelines through
//! operators defined in [`crate::operators::augment`].
//!
//! ## Error Handling
//!
//! Operators return `Result<ZiRecordBatch, ZiError>`. The [`execute_operator`]
//! helper tags failures with the operator name.

use crate::errors::{Result, ZiError};
use crate::record::ZiRecordBatch;

/// Contract that every Zi operator must fulfill.
pub trait ZiOperator: std::fmt::Debug {
    /// Unique, human-readable name for the operator, used in logs, error
    /// messages and registry lookups.
    fn name(&self) -> &'static str;

    /// Applies the operator to an incoming batch of records.
    fn apply(&self, batch: ZiRecordBatch) -> Result<ZiRecordBatch>;
}

/// Executes an operator, wrapping any failure with the operator name.
pub fn execute_operator(
    operator: &dyn ZiOperator,
    batch: ZiRecordBatch,
) -> Result<ZiRecordBatch> {
    operator
        .apply(batch)
        .map_err(|err| ZiError::operator(operator.name(), err.to_string()))
}
