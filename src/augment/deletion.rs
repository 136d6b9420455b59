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

use crate::augment::config::{check_count, check_rate, ZiDeletionConfig};
use crate::augment::skip::ZiSkipPolicy;
use crate::augment::{augment_rows, ZiTokenAugmenter};
use crate::errors::Result;
use crate::function::ZiFunctionRegistry;
use crate::random::{ZiDrawSource, ZiSeedStream};
use crate::token::{ZiSequence, ZiTokenBatch};

/// Randomly deletes tokens.
///
/// For a sequence of length `L` the number of deletions is drawn from
/// `Binomial(L, rate)`, capped by `max_deletions`, and then chosen uniformly
/// without replacement among the tokens the skip policy does not protect.
/// Surviving tokens keep their relative order.
#[derive(Debug)]
pub struct ZiRandomDeletion {
    rate: f64,
    max_deletions: Option<usize>,
    skip: ZiSkipPolicy,
    stream: ZiSeedStream,
}

impl ZiRandomDeletion {
    pub fn new(
        rate: f64,
        max_deletions: Option<usize>,
        skip: ZiSkipPolicy,
        seed: Option<u64>,
    ) -> Result<Self> {
        let rate = check_rate(rate)?;
        let seed = seed.unwrap_or_else(ZiSeedStream::generate_seed);
        log::debug!("augment.random_deletion: rate={} seed={}", rate, seed);
        Ok(Self {
            rate,
            max_deletions,
            skip,
            stream: ZiSeedStream::new(seed),
        })
    }

    pub fn from_config(config: &ZiDeletionConfig, functions: &ZiFunctionRegistry) -> Result<Self> {
        check_rate(config.rate)?;
        let max_deletions = check_count("max_deletions", config.max_deletions)?;
        let skip = ZiSkipPolicy::from_config(&config.skip, functions)?;
        Self::new(config.rate, max_deletions, skip, config.seed)
    }

    pub fn config(&self) -> ZiDeletionConfig {
        ZiDeletionConfig {
            rate: self.rate,
            max_deletions: self.max_deletions.map(|count| count as i64),
            skip: self.skip.to_config(),
            seed: Some(self.stream.seed()),
        }
    }

    pub fn seed(&self) -> u64 {
        self.stream.seed()
    }

    pub(crate) fn delete_row<D: ZiDrawSource>(
        &self,
        row: ZiSequence,
        draws: &mut D,
    ) -> Result<ZiSequence> {
        let mut count = draws.binomial(row.len(), self.rate);
        if let Some(max) = self.max_deletions {
            count = count.min(max);
        }
        if count == 0 {
            return Ok(row);
        }

        let mut candidates = self.skip.eligible(&row)?;
        let count = count.min(candidates.len());
        if count == 0 {
            return Ok(row);
        }

        // Partial Fisher-Yates: the first `count` candidates are the victims.
        for i in 0..count {
            let j = i + draws.uniform(candidates.len() - i);
            candidates.swap(i, j);
        }
        let mut removed = vec![false; row.len()];
        for &index in &candidates[..count] {
            removed[index] = true;
        }

        Ok(row
            .into_iter()
            .zip(removed)
            .filter_map(|(token, gone)| (!gone).then_some(token))
            .collect())
    }
}

impl ZiTokenAugmenter for ZiRandomDeletion {
    fn name(&self) -> &'static str {
        "augment.random_deletion"
    }

    fn augment(&self, batch: ZiTokenBatch) -> Result<ZiTokenBatch> {
        augment_rows(self.name(), &self.stream, batch, |row, draws| {
            self.delete_row(row, draws)
        })
    }

    fn config_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.config())?)
    }
}
