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

use crate::augment::config::{
    check_count, check_rate, ZiInsertionConfig, ZiInsertionSourceConfig,
};
use crate::augment::skip::ZiSkipPolicy;
use crate::augment::{augment_rows, ZiTokenAugmenter};
use crate::errors::{Result, ZiError};
use crate::function::{ZiExternal, ZiFunctionRegistry, ZiMapper};
use crate::random::{ZiDrawSource, ZiSeedStream};
use crate::token::{ZiSequence, ZiToken, ZiTokenBatch};

/// Where inserted tokens come from.
#[derive(Debug, Clone)]
pub enum ZiInsertionSource {
    /// A uniformly drawn element of a fixed, non-empty list.
    List(Vec<ZiToken>),
    /// A pure mapping of the prompt token.
    Mapper(ZiMapper),
    /// An external function over the raw prompt value.
    External(ZiExternal),
}

impl ZiInsertionSource {
    pub fn list<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ZiToken>,
    {
        ZiInsertionSource::List(tokens.into_iter().map(Into::into).collect())
    }

    pub fn mapper<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&ZiToken) -> ZiToken + Send + Sync + 'static,
    {
        ZiInsertionSource::Mapper(ZiMapper::mapper(name, func))
    }

    pub fn external<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        ZiInsertionSource::External(ZiExternal::external(name, func))
    }

    pub fn from_config(
        config: &ZiInsertionSourceConfig,
        functions: &ZiFunctionRegistry,
    ) -> Result<Self> {
        match (
            &config.insertion_list,
            &config.insertion_fn,
            &config.insertion_external,
        ) {
            (Some(tokens), None, None) => Ok(ZiInsertionSource::List(tokens.clone())),
            (None, Some(name), None) => Ok(ZiInsertionSource::Mapper(functions.mapper(name)?)),
            (None, None, Some(name)) => {
                Ok(ZiInsertionSource::External(functions.external(name)?))
            }
            _ => Err(ZiError::validation(
                "exactly one of insertion_list, insertion_fn, insertion_external must be provided",
            )),
        }
    }

    pub fn to_config(&self) -> ZiInsertionSourceConfig {
        let mut config = ZiInsertionSourceConfig::default();
        match self {
            ZiInsertionSource::List(tokens) => config.insertion_list = Some(tokens.clone()),
            ZiInsertionSource::Mapper(mapper) => {
                config.insertion_fn = Some(mapper.name().to_string())
            }
            ZiInsertionSource::External(external) => {
                config.insertion_external = Some(external.name().to_string())
            }
        }
        config
    }

    fn validate(&self) -> Result<()> {
        if let ZiInsertionSource::List(tokens) = self {
            let first = tokens
                .first()
                .ok_or_else(|| ZiError::validation("insertion_list may not be empty"))?;
            if tokens.iter().any(|token| token.kind() != first.kind()) {
                return Err(ZiError::validation(
                    "insertion_list must not mix text and id tokens",
                ));
            }
        }
        Ok(())
    }

    fn produce<D: ZiDrawSource>(&self, prompt: &ZiToken, draws: &mut D) -> Result<ZiToken> {
        let token = match self {
            ZiInsertionSource::List(tokens) => tokens[draws.uniform(tokens.len())].clone(),
            ZiInsertionSource::Mapper(mapper) => mapper.map(prompt),
            ZiInsertionSource::External(external) => {
                ZiToken::from_value(&external.call(prompt)?)?
            }
        };
        if token.kind() != prompt.kind() {
            return Err(ZiError::schema(format!(
                "insertion produced a {} token for a sequence of {} tokens",
                token.kind(),
                prompt.kind()
            )));
        }
        Ok(token)
    }
}

/// Randomly inserts tokens.
///
/// For a sequence of length `L`, up to `min(Binomial(L, rate), max_insertions)`
/// attempts are made. Each attempt draws a prompt index and a location index
/// into the sequence as it stands after earlier attempts. A skipped prompt
/// abandons the attempt; otherwise the produced token is placed right after
/// the location.
#[derive(Debug)]
pub struct ZiRandomInsertion {
    rate: f64,
    max_insertions: Option<usize>,
    source: ZiInsertionSource,
    skip: ZiSkipPolicy,
    stream: ZiSeedStream,
}

impl ZiRandomInsertion {
    pub fn new(
        rate: f64,
        max_insertions: Option<usize>,
        source: ZiInsertionSource,
        skip: ZiSkipPolicy,
        seed: Option<u64>,
    ) -> Result<Self> {
        let rate = check_rate(rate)?;
        source.validate()?;
        let seed = seed.unwrap_or_else(ZiSeedStream::generate_seed);
        log::debug!("augment.random_insertion: rate={} seed={}", rate, seed);
        Ok(Self {
            rate,
            max_insertions,
            source,
            skip,
            stream: ZiSeedStream::new(seed),
        })
    }

    pub fn from_config(config: &ZiInsertionConfig, functions: &ZiFunctionRegistry) -> Result<Self> {
        check_rate(config.rate)?;
        let max_insertions = check_count("max_insertions", config.max_insertions)?;
        let source = ZiInsertionSource::from_config(&config.source, functions)?;
        let skip = ZiSkipPolicy::from_config(&config.skip, functions)?;
        Self::new(config.rate, max_insertions, source, skip, config.seed)
    }

    pub fn config(&self) -> ZiInsertionConfig {
        ZiInsertionConfig {
            rate: self.rate,
            max_insertions: self.max_insertions.map(|count| count as i64),
            source: self.source.to_config(),
            skip: self.skip.to_config(),
            seed: Some(self.stream.seed()),
        }
    }

    pub fn seed(&self) -> u64 {
        self.stream.seed()
    }

    pub(crate) fn insert_row<D: ZiDrawSource>(
        &self,
        mut row: ZiSequence,
        draws: &mut D,
    ) -> Result<ZiSequence> {
        let mut attempts = draws.binomial(row.len(), self.rate);
        if let Some(max) = self.max_insertions {
            attempts = attempts.min(max);
        }

        // Attempts never exceed the original length, so the row is non-empty here.
        for _ in 0..attempts {
            let prompt = draws.uniform(row.len());
            let location = draws.uniform(row.len());
            if self.skip.resolve(&row[prompt])? {
                continue;
            }
            let token = self.source.produce(&row[prompt], draws)?;
            row.insert(location + 1, token);
        }
        Ok(row)
    }
}

impl ZiTokenAugmenter for ZiRandomInsertion {
    fn name(&self) -> &'static str {
        "augment.random_insertion"
    }

    fn augment(&self, batch: ZiTokenBatch) -> Result<ZiTokenBatch> {
        augment_rows(self.name(), &self.stream, batch, |row, draws| {
            self.insert_row(row, draws)
        })
    }

    fn config_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.config())?)
    }
}
