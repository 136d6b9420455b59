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

//! # Zi Random Module
//!
//! Reproducible randomness for augmenters.
//!
//! A [`ZiSeedStream`] owns a seed and a monotonically advancing row counter.
//! Every row an augmenter processes reserves one counter position and gets a
//! private generator derived from `(seed, position)`. Rows therefore never
//! share draws, which gives two guarantees:
//!
//! - **Determinism**: the same seed and the same sequence of calls produce
//!   identical outputs.
//! - **Batch-size independence**: the n-th row an instance ever sees gets the
//!   same stream whether it arrives alone or inside a larger batch, and rows
//!   can be processed in parallel without changing results.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Source of the draws consumed by the per-row algorithms.
pub trait ZiDrawSource {
    /// Uniform integer in `[0, upper)`. `upper` must be positive.
    fn uniform(&mut self, upper: usize) -> usize;

    /// Number of successes in `trials` independent trials of `probability`.
    fn binomial(&mut self, trials: usize, probability: f64) -> usize;
}

/// Generator owned by a single row.
#[derive(Debug, Clone)]
pub struct ZiRowDraws {
    rng: StdRng,
}

impl ZiRowDraws {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ZiDrawSource for ZiRowDraws {
    fn uniform(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    fn binomial(&mut self, trials: usize, probability: f64) -> usize {
        (0..trials)
            .filter(|_| self.rng.gen_bool(probability))
            .count()
    }
}

/// Seed plus row counter shared by all calls of one augmenter.
#[derive(Debug)]
pub struct ZiSeedStream {
    seed: u64,
    counter: AtomicU64,
}

impl ZiSeedStream {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            counter: AtomicU64::new(0),
        }
    }

    /// Seed used when none is configured, uniform in `[1, 1e9]`.
    pub fn generate_seed() -> u64 {
        rand::thread_rng().gen_range(1..=1_000_000_000)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of rows drawn for so far.
    pub fn position(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// Reserves `rows` consecutive positions and returns the first one.
    pub fn reserve(&self, rows: usize) -> u64 {
        self.counter.fetch_add(rows as u64, Ordering::SeqCst)
    }

    /// Generator for the row at `position`.
    pub fn draws_for(&self, position: u64) -> ZiRowDraws {
        ZiRowDraws::from_seed(xxh3_64_with_seed(&position.to_le_bytes(), self.seed))
    }
}

/// Draws replayed from fixed lists, for pinning exact algorithm behavior.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ZiScriptedDraws {
    pub uniforms: std::collections::VecDeque<usize>,
    pub binomials: std::collections::VecDeque<usize>,
}

#[cfg(test)]
impl ZiScriptedDraws {
    pub fn new(binomials: &[usize], uniforms: &[usize]) -> Self {
        Self {
            uniforms: uniforms.iter().copied().collect(),
            binomials: binomials.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
impl ZiDrawSource for ZiScriptedDraws {
    fn uniform(&mut self, upper: usize) -> usize {
        let value = self.uniforms.pop_front().expect("scripted uniform draws exhausted");
        assert!(value < upper, "scripted draw {value} out of range {upper}");
        value
    }

    fn binomial(&mut self, trials: usize, _probability: f64) -> usize {
        let value = self.binomials.pop_front().expect("scripted binomial draws exhausted");
        value.min(trials)
    }
}
