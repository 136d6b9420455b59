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

//! # Zi Token Augmentation
//!
//! Three augmenters over batches of token sequences:
//!
//! - **deletion**: [`ZiRandomDeletion`] removes a binomially drawn number of
//!   tokens per sequence, optionally capped.
//! - **insertion**: [`ZiRandomInsertion`] inserts tokens taken from a list,
//!   a mapping function or an external function.
//! - **swap**: [`ZiRandomSwap`] performs a fixed number of pairwise swaps per
//!   sequence.
//!
//! All three accept a [`ZiSkipPolicy`] that protects tokens from being
//! selected, and a seed. Configuration is immutable after construction; the
//! only state that changes between calls is the row counter of the seed
//! stream (see [`crate::random`]).
//!
//! ## Usage
//!
//! ```rust
//! use zix_textaug::augment::{ZiRandomSwap, ZiSkipPolicy, ZiTokenAugmenter};
//! use zix_textaug::token::{ZiToken, ZiTokenBatch};
//!
//! let swap = ZiRandomSwap::new(3, ZiSkipPolicy::Nothing, Some(42))?;
//! let words: Vec<ZiToken> = ["Hey", "I", "like"].into_iter().map(ZiToken::from).collect();
//! let augmented = swap.augment(ZiTokenBatch::Flat(words))?;
//! ```

pub mod config;
pub mod deletion;
pub mod insertion;
pub mod skip;
pub mod swap;

use serde_json::Value;

use crate::errors::Result;
use crate::random::{ZiRowDraws, ZiSeedStream};
use crate::token::{ZiSequence, ZiTokenBatch};

pub use config::{
    parse_config, parse_yaml_config, ZiDeletionConfig, ZiInsertionConfig,
    ZiInsertionSourceConfig, ZiSkipConfig, ZiSwapConfig,
};
pub use deletion::ZiRandomDeletion;
pub use insertion::{ZiInsertionSource, ZiRandomInsertion};
pub use skip::ZiSkipPolicy;
pub use swap::ZiRandomSwap;

/// Contract shared by the token augmenters.
pub trait ZiTokenAugmenter: std::fmt::Debug + Send + Sync {
    /// Stable name used in logs and operator registries.
    fn name(&self) -> &'static str;

    /// Augments every row of `batch`, returning a batch of the same rank and
    /// row count.
    fn augment(&self, batch: ZiTokenBatch) -> Result<ZiTokenBatch>;

    /// Flat configuration sufficient to rebuild an equivalent augmenter.
    fn config_value(&self) -> Result<Value>;

    /// Augments a JSON array of tokens or of token arrays.
    fn augment_value(&self, value: &Value) -> Result<Value> {
        let batch = ZiTokenBatch::from_value(value)?;
        Ok(self.augment(batch)?.to_value())
    }
}

/// Runs `row_fn` over every row of `batch` with that row's own draws.
///
/// Rows reserve consecutive stream positions in row-major order before any
/// row is processed, so the result does not depend on whether rows run in
/// parallel.
pub(crate) fn augment_rows<F>(
    name: &'static str,
    stream: &ZiSeedStream,
    batch: ZiTokenBatch,
    row_fn: F,
) -> Result<ZiTokenBatch>
where
    F: Fn(ZiSequence, &mut ZiRowDraws) -> Result<ZiSequence> + Send + Sync,
{
    batch.kind()?;
    let (shape, rows) = batch.into_rows();
    let start = stream.reserve(rows.len());
    log::debug!(
        "{}: augmenting {} row(s) from stream position {}",
        name,
        rows.len(),
        start
    );

    #[cfg(feature = "parallel")]
    let rows = {
        use rayon::prelude::*;
        rows.into_par_iter()
            .enumerate()
            .map(|(offset, row)| {
                let mut draws = stream.draws_for(start + offset as u64);
                row_fn(row, &mut draws)
            })
            .collect::<Result<Vec<_>>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(offset, row)| {
            let mut draws = stream.draws_for(start + offset as u64);
            row_fn(row, &mut draws)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ZiTokenBatch::from_rows(shape, rows))
}
