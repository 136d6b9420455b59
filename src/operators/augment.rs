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

use serde_json::Value;

use crate::augment::{
    parse_config, ZiDeletionConfig, ZiInsertionConfig, ZiRandomDeletion, ZiRandomInsertion,
    ZiRandomSwap, ZiSwapConfig, ZiTokenAugmenter,
};
use crate::errors::{Result, ZiError};
use crate::function::ZiFunctionRegistry;
use crate::operator::ZiOperator;
use crate::operators::field::ZiFieldPath;
use crate::record::ZiRecordBatch;
use crate::token::{ZiSequence, ZiTokenBatch};

/// Applies a token augmenter to the token array found at `path` in each
/// record.
///
/// All arrays present in the batch are augmented together as one ragged
/// batch, in record order. Records without an array at `path` pass through.
#[derive(Debug)]
pub struct ZiAugmentTokens {
    path: ZiFieldPath,
    augmenter: Box<dyn ZiTokenAugmenter>,
}

impl ZiAugmentTokens {
    pub fn new(path: ZiFieldPath, augmenter: Box<dyn ZiTokenAugmenter>) -> Self {
        Self { path, augmenter }
    }

    pub fn augmenter(&self) -> &dyn ZiTokenAugmenter {
        self.augmenter.as_ref()
    }

    fn collect_rows(&self, batch: &ZiRecordBatch) -> Result<(Vec<usize>, Vec<ZiSequence>)> {
        let mut targets = Vec::new();
        let mut rows = Vec::new();
        for (index, record) in batch.iter().enumerate() {
            match self.path.resolve(record) {
                Some(value @ Value::Array(_)) => match ZiTokenBatch::from_value(value)? {
                    ZiTokenBatch::Flat(row) => {
                        targets.push(index);
                        rows.push(row);
                    }
                    ZiTokenBatch::Batched(_) => {
                        return Err(ZiError::usage(format!(
                            "field '{}' must hold a flat token array",
                            self.path.as_string()
                        )))
                    }
                },
                _ => log::debug!(
                    "{}: record {} has no token array at '{}'",
                    self.name(),
                    index,
                    self.path.as_string()
                ),
            }
        }
        Ok((targets, rows))
    }
}

impl ZiOperator for ZiAugmentTokens {
    fn name(&self) -> &'static str {
        self.augmenter.name()
    }

    fn apply(&self, mut batch: ZiRecordBatch) -> Result<ZiRecordBatch> {
        let (targets, rows) = self.collect_rows(&batch)?;
        if rows.is_empty() {
            return Ok(batch);
        }

        let rows = match self.augmenter.augment(ZiTokenBatch::Batched(rows))? {
            ZiTokenBatch::Batched(rows) => rows,
            ZiTokenBatch::Flat(_) => {
                return Err(ZiError::internal("augmenter changed the batch rank"))
            }
        };

        for (index, row) in targets.into_iter().zip(rows) {
            if let Some(slot) = self.path.resolve_mut(&mut batch[index]) {
                *slot = ZiTokenBatch::Flat(row).to_value();
            }
        }
        Ok(batch)
    }
}

fn read_path(operator: &str, config: &Value) -> Result<ZiFieldPath> {
    let path = config
        .as_object()
        .ok_or_else(|| ZiError::validation(format!("{operator} config must be object")))?
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| ZiError::validation(format!("{operator} requires string 'path'")))?;
    ZiFieldPath::parse(path)
}

pub fn augment_deletion_factory(
    config: &Value,
    functions: &ZiFunctionRegistry,
) -> Result<Box<dyn ZiOperator + Send + Sync>> {
    let path = read_path("augment.random_deletion", config)?;
    let config: ZiDeletionConfig = parse_config(config)?;
    let augmenter = ZiRandomDeletion::from_config(&config, functions)?;
    Ok(Box::new(ZiAugmentTokens::new(path, Box::new(augmenter))))
}

pub fn augment_insertion_factory(
    config: &Value,
    functions: &ZiFunctionRegistry,
) -> Result<Box<dyn ZiOperator + Send + Sync>> {
    let path = read_path("augment.random_insertion", config)?;
    let config: ZiInsertionConfig = parse_config(config)?;
    let augmenter = ZiRandomInsertion::from_config(&config, functions)?;
    Ok(Box::new(ZiAugmentTokens::new(path, Box::new(augmenter))))
}

pub fn augment_swap_factory(
    config: &Value,
    functions: &ZiFunctionRegistry,
) -> Result<Box<dyn ZiOperator + Send + Sync>> {
    let path = read_path("augment.random_swap", config)?;
    let config: ZiSwapConfig = parse_config(config)?;
    let augmenter = ZiRandomSwap::from_config(&config, functions)?;
    Ok(Box::new(ZiAugmentTokens::new(path, Box::new(augmenter))))
}
