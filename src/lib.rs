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

//! # Zi Token Augmentation Library
//!
//! Seeded text augmentation over batches of variable-length token sequences.
//! Tokens come from an external tokenizer as strings or integer ids; this
//! crate deletes, inserts and swaps them.
//!
//! ## Module Overview
//!
//! - **token**: Tokens, sequences and rank 1/2 batches
//! - **random**: Seed streams with one independent generator per row
//! - **function**: Named predicates, mappers and external functions
//! - **augment**: The deletion, insertion and swap augmenters, skip policies
//!   and their flat configurations
//! - **record** / **operator**: Records and the operator trait
//! - **operators**: Record operators wrapping the augmenters
//! - **registry**: Name-to-factory registry for building operators from config
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Rows of a batch are processed with Rayon. Output
//!   is identical either way.
//!
//! ## Quick Start
//!
//! ```rust
//! use zix_textaug::{ZiRandomDeletion, ZiSkipPolicy, ZiTokenAugmenter, ZiTokenBatch};
//! use serde_json::json;
//!
//! let deletion = ZiRandomDeletion::new(0.4, Some(1), ZiSkipPolicy::list(["like"]), Some(42))?;
//! let out = deletion.augment_value(&json!([["Hey", "I", "like"], ["Keras", "and", "Tensorflow"]]))?;
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, ZiError>`. Configuration problems are
//! reported at construction; rank and token type problems at call time.

pub mod augment;
pub mod errors;
pub mod function;
pub mod operator;
pub mod operators;
pub mod random;
pub mod record;
pub mod registry;
pub mod token;

pub use augment::{
    parse_config, parse_yaml_config, ZiDeletionConfig, ZiInsertionConfig, ZiInsertionSource,
    ZiInsertionSourceConfig, ZiRandomDeletion, ZiRandomInsertion, ZiRandomSwap, ZiSkipConfig,
    ZiSkipPolicy, ZiSwapConfig, ZiTokenAugmenter,
};
pub use errors::{Result, ZiError};
pub use function::{ZiExternal, ZiFunctionRegistry, ZiMapper, ZiPredicate};
pub use operator::{execute_operator, ZiOperator};
pub use operators::augment::ZiAugmentTokens;
pub use operators::field::ZiFieldPath;
pub use random::{ZiDrawSource, ZiRowDraws, ZiSeedStream};
pub use record::{ZiMetadata, ZiRecord, ZiRecordBatch};
pub use registry::ZiOperatorRegistry;
pub use token::{ZiBatchShape, ZiSequence, ZiToken, ZiTokenBatch, ZiTokenKind};
