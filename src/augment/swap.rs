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

use crate::augment::config::{check_count, ZiSwapConfig};
use crate::augment::skip::ZiSkipPolicy;
use crate::augment::{augment_rows, ZiTokenAugmenter};
use crate::errors::{Result, ZiError};
use crate::function::ZiFunctionRegistry;
use crate::random::{ZiDrawSource, ZiSeedStream};
use crate::token::{ZiSequence, ZiTokenBatch};

/// Randomly swaps pairs of tokens.
///
/// Each sequence receives exactly `swaps` swaps, regardless of its length.
/// Both indices of a swap are drawn independently among the unprotected
/// tokens, so a swap may be a no-op. Protected tokens never move.
#[derive(Debug)]
pub struct ZiRandomSwap {
    swaps: usize,
    skip: ZiSkipPolicy,
    stream: ZiSeedStream,
}

impl ZiRandomSwap {
    pub fn new(swaps: usize, skip: ZiSkipPolicy, seed: Option<u64>) -> Result<Self> {
        let seed = seed.unwrap_or_else(ZiSeedStream::generate_seed);
        log::debug!("augment.random_swap: swaps={} seed={}", swaps, seed);
        Ok(Self {
            swaps,
            skip,
            stream: ZiSeedStream::new(seed),
        })
    }

    pub fn from_config(config: &ZiSwapConfig, functions: &ZiFunctionRegistry) -> Result<Self> {
        let swaps = check_count("swaps", Some(config.swaps))?
            .ok_or_else(|| ZiError::internal("swap count vanished during validation"))?;
        let skip = ZiSkipPolicy::from_config(&config.skip, functions)?;
        Self::new(swaps, skip, config.seed)
    }

    pub fn config(&self) -> ZiSwapConfig {
        ZiSwapConfig {
            swaps: self.swaps as i64,
            skip: self.skip.to_config(),
            seed: Some(self.stream.seed()),
        }
    }

    pub fn seed(&self) -> u64 {
        self.stream.seed()
    }

    pub(crate) fn swap_row<D: ZiDrawSource>(
        &self,
        row: ZiSequence,
        draws: &mut D,
    ) -> Result<ZiSequence> {
        if self.swaps == 0 {
            return Ok(row);
        }
        let slots = self.skip.eligible(&row)?;
        if slots.len() < 2 {
            return Ok(row);
        }

        let mut positions = slots.clone();
        for _ in 0..self.swaps {
            let first = draws.uniform(positions.len());
            let second = draws.uniform(positions.len());
            positions.swap(first, second);
        }

        let mut output = row.clone();
        for (slot, source) in slots.iter().zip(&positions) {
            output[*slot] = row[*source].clone();
        }
        Ok(output)
    }
}

impl ZiTokenAugmenter for ZiRandomSwap {
    fn name(&self) -> &'static str {
        "augment.random_swap"
    }

    fn augment(&self, batch: ZiTokenBatch) -> Result<ZiTokenBatch> {
        augment_rows(self.name(), &self.stream, batch, |row, draws| {
            self.swap_row(row, draws)
        })
    }

    fn config_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.config())?)
    }
}
