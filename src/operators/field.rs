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

use crate::errors::{Result, ZiError};
use crate::record::ZiRecord;

/// Dotted path to a value inside a record, rooted at `payload` or `metadata`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZiFieldPath {
    segments: Vec<String>,
}

impl ZiFieldPath {
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<String> = path
            .split('.')
            .map(|segment| segment.trim().to_string())
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.first().map(String::as_str) {
            None => Err(ZiError::validation("field path may not be empty")),
            Some("payload") => Ok(Self { segments }),
            Some("metadata") if segments.len() > 1 => Ok(Self { segments }),
            Some("metadata") => Err(ZiError::validation(
                "metadata paths must include at least one key",
            )),
            Some(_) => Err(ZiError::validation(
                "field path must start with 'payload' or 'metadata'",
            )),
        }
    }

    pub fn as_string(&self) -> String {
        self.segments.join(".")
    }

    pub fn resolve<'a>(&self, record: &'a ZiRecord) -> Option<&'a Value> {
        let (root, rest) = self.segments.split_first()?;
        match root.as_str() {
            "payload" => descend(&record.payload, rest),
            "metadata" => {
                let (key, rest) = rest.split_first()?;
                descend(record.metadata.as_ref()?.get(key)?, rest)
            }
            _ => None,
        }
    }

    pub fn resolve_mut<'a>(&self, record: &'a mut ZiRecord) -> Option<&'a mut Value> {
        let (root, rest) = self.segments.split_first()?;
        match root.as_str() {
            "payload" => descend_mut(&mut record.payload, rest),
            "metadata" => {
                let (key, rest) = rest.split_first()?;
                descend_mut(record.metadata.as_mut()?.get_mut(key)?, rest)
            }
            _ => None,
        }
    }
}

fn descend<'a>(mut current: &'a Value, segments: &[String]) -> Option<&'a Value> {
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn descend_mut<'a>(mut current: &'a mut Value, segments: &[String]) -> Option<&'a mut Value> {
    for segment in segments {
        current = current.as_object_mut()?.get_mut(segment)?;
    }
    Some(current)
}
