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

use serde_json::json;
use zix_textaug::{
    parse_config, parse_yaml_config, ZiError, ZiFunctionRegistry, ZiRandomSwap, ZiSequence,
    ZiSkipPolicy, ZiSwapConfig, ZiToken, ZiTokenAugmenter, ZiTokenBatch,
};

fn words(items: &[&str]) -> ZiSequence {
    items.iter().map(|w| ZiToken::from(*w)).collect()
}

fn sorted(mut row: ZiSequence) -> ZiSequence {
    row.sort();
    row
}

#[test]
fn negative_swaps_fail() {
    let config: ZiSwapConfig = parse_config(&json!({"swaps": -1})).unwrap();
    assert!(matches!(
        ZiRandomSwap::from_config(&config, &ZiFunctionRegistry::new()),
        Err(ZiError::Validation { .. })
    ));
}

#[test]
fn two_skip_mechanisms_fail() {
    let mut functions = ZiFunctionRegistry::new();
    functions.register_external("never", |_| Ok(json!(false)));
    let config: ZiSwapConfig =
        parse_config(&json!({"swaps": 1, "skip_list": ["a"], "skip_external": "never"})).unwrap();
    assert!(ZiRandomSwap::from_config(&config, &functions).is_err());
}

#[test]
fn zero_swaps_is_identity() {
    let op = ZiRandomSwap::new(0, ZiSkipPolicy::Nothing, Some(42)).unwrap();
    let batch = ZiTokenBatch::Flat(words(&["Hey", "I", "like"]));
    assert_eq!(op.augment(batch.clone()).unwrap(), batch);
}

#[test]
fn swaps_preserve_the_multiset() {
    let op = ZiRandomSwap::new(3, ZiSkipPolicy::Nothing, Some(42)).unwrap();
    let rows = vec![
        words(&["Hey", "I", "like"]),
        words(&["Keras", "and", "Tensorflow"]),
        words(&["b", "y", "e", " ", "b", "y", "e"]),
    ];
    let out = op.augment(ZiTokenBatch::Batched(rows.clone())).unwrap();
    for (before, after) in rows.into_iter().zip(out.rows()) {
        assert_eq!(sorted(before), sorted(after.clone()));
    }
}

#[test]
fn protected_tokens_keep_their_index() {
    let op = ZiRandomSwap::new(10, ZiSkipPolicy::list(["and", "I"]), Some(7)).unwrap();
    for _ in 0..10 {
        let out = op
            .augment(ZiTokenBatch::Batched(vec![
                words(&["Keras", "and", "Tensorflow", "rocks"]),
                words(&["Hey", "I", "like"]),
            ]))
            .unwrap();
        let rows = out.rows();
        assert_eq!(rows[0][1], ZiToken::from("and"));
        assert_eq!(rows[1][1], ZiToken::from("I"));
    }
}

#[test]
fn one_eligible_token_is_identity() {
    let op = ZiRandomSwap::new(4, ZiSkipPolicy::list(["x"]), Some(7)).unwrap();
    let batch = ZiTokenBatch::Batched(vec![words(&["x", "y", "x"]), words(&["solo"])]);
    assert_eq!(op.augment(batch.clone()).unwrap(), batch);
}

#[test]
fn same_seed_same_output_and_batch_independence() {
    let rows = vec![
        words(&["Hey", "I", "like"]),
        words(&["Keras", "and", "Tensorflow"]),
    ];
    let batched = ZiRandomSwap::new(3, ZiSkipPolicy::Nothing, Some(42)).unwrap();
    let single = ZiRandomSwap::new(3, ZiSkipPolicy::Nothing, Some(42)).unwrap();

    let together = batched.augment(ZiTokenBatch::Batched(rows.clone())).unwrap();
    let apart: Vec<ZiSequence> = rows
        .into_iter()
        .map(|row| match single.augment(ZiTokenBatch::Flat(row)).unwrap() {
            ZiTokenBatch::Flat(row) => row,
            ZiTokenBatch::Batched(_) => panic!("rank changed"),
        })
        .collect();
    assert_eq!(together, ZiTokenBatch::Batched(apart));
}

#[test]
fn yaml_config_round_trips() {
    let config: ZiSwapConfig = parse_yaml_config("swaps: 3\nseed: 42\nskip_list: [and]\n").unwrap();
    let op = ZiRandomSwap::from_config(&config, &ZiFunctionRegistry::new()).unwrap();
    assert_eq!(op.config(), config);
    assert_eq!(op.config_value().unwrap()["swaps"], json!(3));
}
