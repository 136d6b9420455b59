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

//! # Zi Token Module
//!
//! Tokens are produced by an external tokenizer and arrive either as UTF-8
//! strings (word or character level) or as integer ids. A sequence is one
//! tokenized example; a batch is a list of sequences of possibly different
//! lengths.
//!
//! ## Batch Rank
//!
//! A [`ZiTokenBatch`] is either flat (rank 1, a single sequence) or batched
//! (rank 2, ragged rows). Augmenters normalize both to rows internally and
//! return the same rank they were given. JSON inputs of any other rank are
//! rejected with a usage error.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};

/// Atomic unit of a sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZiToken {
    Id(i64),
    Text(String),
}

/// The type carried by a token. Sequences are homogeneous in kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZiTokenKind {
    Text,
    Id,
}

impl ZiTokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZiTokenKind::Text => "text",
            ZiTokenKind::Id => "id",
        }
    }
}

impl fmt::Display for ZiTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ZiToken {
    pub fn kind(&self) -> ZiTokenKind {
        match self {
            ZiToken::Text(_) => ZiTokenKind::Text,
            ZiToken::Id(_) => ZiTokenKind::Id,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ZiToken::Text(text) => Some(text.as_str()),
            ZiToken::Id(_) => None,
        }
    }

    pub fn as_id(&self) -> Option<i64> {
        match self {
            ZiToken::Id(id) => Some(*id),
            ZiToken::Text(_) => None,
        }
    }

    /// Raw JSON representation handed to external functions.
    pub fn to_value(&self) -> Value {
        match self {
            ZiToken::Text(text) => Value::String(text.clone()),
            ZiToken::Id(id) => Value::from(*id),
        }
    }

    /// Parses a JSON scalar into a token. Only strings and integers qualify.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(ZiToken::Text(text.clone())),
            Value::Number(number) => number.as_i64().map(ZiToken::Id).ok_or_else(|| {
                ZiError::schema(format!("token ids must be integers, got {number}"))
            }),
            other => Err(ZiError::schema(format!(
                "tokens must be strings or integers, got {other}"
            ))),
        }
    }
}

impl fmt::Display for ZiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZiToken::Text(text) => f.write_str(text),
            ZiToken::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for ZiToken {
    fn from(value: &str) -> Self {
        ZiToken::Text(value.to_string())
    }
}

impl From<String> for ZiToken {
    fn from(value: String) -> Self {
        ZiToken::Text(value)
    }
}

impl From<i64> for ZiToken {
    fn from(value: i64) -> Self {
        ZiToken::Id(value)
    }
}

/// One tokenized example.
pub type ZiSequence = Vec<ZiToken>;

/// Shape of a batch as received, restored on output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZiBatchShape {
    Flat,
    Batched,
}

/// A flat sequence or a ragged list of sequences.
#[derive(Clone, Debug, PartialEq)]
pub enum ZiTokenBatch {
    Flat(ZiSequence),
    Batched(Vec<ZiSequence>),
}

impl ZiTokenBatch {
    pub fn rank(&self) -> usize {
        match self {
            ZiTokenBatch::Flat(_) => 1,
            ZiTokenBatch::Batched(_) => 2,
        }
    }

    pub fn shape(&self) -> ZiBatchShape {
        match self {
            ZiTokenBatch::Flat(_) => ZiBatchShape::Flat,
            ZiTokenBatch::Batched(_) => ZiBatchShape::Batched,
        }
    }

    /// Number of rows after promotion to rank 2.
    pub fn num_rows(&self) -> usize {
        match self {
            ZiTokenBatch::Flat(_) => 1,
            ZiTokenBatch::Batched(rows) => rows.len(),
        }
    }

    pub fn rows(&self) -> Vec<&ZiSequence> {
        match self {
            ZiTokenBatch::Flat(sequence) => vec![sequence],
            ZiTokenBatch::Batched(rows) => rows.iter().collect(),
        }
    }

    /// Promotes the batch to rows, remembering the original shape.
    pub fn into_rows(self) -> (ZiBatchShape, Vec<ZiSequence>) {
        match self {
            ZiTokenBatch::Flat(sequence) => (ZiBatchShape::Flat, vec![sequence]),
            ZiTokenBatch::Batched(rows) => (ZiBatchShape::Batched, rows),
        }
    }

    /// Inverse of [`ZiTokenBatch::into_rows`].
    pub fn from_rows(shape: ZiBatchShape, rows: Vec<ZiSequence>) -> Self {
        match shape {
            ZiBatchShape::Flat => ZiTokenBatch::Flat(rows.into_iter().next().unwrap_or_default()),
            ZiBatchShape::Batched => ZiTokenBatch::Batched(rows),
        }
    }

    /// Token kind shared by every token in the batch, `None` when empty.
    pub fn kind(&self) -> Result<Option<ZiTokenKind>> {
        let mut kind = None;
        for token in self.rows().into_iter().flatten() {
            match kind {
                None => kind = Some(token.kind()),
                Some(seen) if seen != token.kind() => {
                    return Err(ZiError::schema(format!(
                        "batch mixes {seen} and {} tokens",
                        token.kind()
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(kind)
    }

    /// Parses a JSON array of tokens (rank 1) or of token arrays (rank 2).
    pub fn from_value(value: &Value) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| {
            ZiError::usage("input must either be rank 1 or rank 2, received rank 0")
        })?;

        let nested = items.iter().filter(|item| item.is_array()).count();
        if nested == 0 {
            let sequence = items
                .iter()
                .map(ZiToken::from_value)
                .collect::<Result<ZiSequence>>()?;
            return Ok(ZiTokenBatch::Flat(sequence));
        }
        if nested != items.len() {
            return Err(ZiError::usage(
                "input mixes tokens and token rows at the same level",
            ));
        }

        let rows = items
            .iter()
            .map(|row| {
                let tokens = row.as_array().map(Vec::as_slice).unwrap_or_default();
                if tokens.iter().any(Value::is_array) {
                    return Err(ZiError::usage(
                        "input must either be rank 1 or rank 2, received rank 3 or higher",
                    ));
                }
                tokens.iter().map(ZiToken::from_value).collect::<Result<ZiSequence>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ZiTokenBatch::Batched(rows))
    }

    pub fn to_value(&self) -> Value {
        fn row_value(row: &ZiSequence) -> Value {
            Value::Array(row.iter().map(ZiToken::to_value).collect())
        }
        match self {
            ZiTokenBatch::Flat(sequence) => row_value(sequence),
            ZiTokenBatch::Batched(rows) => Value::Array(rows.iter().map(row_value).collect()),
        }
    }
}

impl From<ZiSequence> for ZiTokenBatch {
    fn from(value: ZiSequence) -> Self {
        ZiTokenBatch::Flat(value)
    }
}

impl From<Vec<ZiSequence>> for ZiTokenBatch {
    fn from(value: Vec<ZiSequence>) -> Self {
        ZiTokenBatch::Batched(value)
    }
}
