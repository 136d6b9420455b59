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
use zix_textaug::{ZiError, ZiRandomSwap, ZiSkipPolicy, ZiToken, ZiTokenAugmenter, ZiTokenBatch};

#[test]
fn flat_arrays_are_rank_one() {
    let batch = ZiTokenBatch::from_value(&json!(["Hey", "I", "like"])).unwrap();
    assert_eq!(batch.rank(), 1);
    assert_eq!(batch.num_rows(), 1);
    assert_eq!(batch.to_value(), json!(["Hey", "I", "like"]));
}

#[test]
fn ragged_arrays_are_rank_two() {
    let batch = ZiTokenBatch::from_value(&json!([["Hey", "I", "like"], ["bye"], []])).unwrap();
    assert_eq!(batch.rank(), 2);
    assert_eq!(batch.num_rows(), 3);
    assert_eq!(batch.rows()[1], &vec![ZiToken::from("bye")]);
}

#[test]
fn scalars_and_deep_nesting_are_usage_errors() {
    assert!(matches!(
        ZiTokenBatch::from_value(&json!("Hey")),
        Err(ZiError::Usage { .. })
    ));
    assert!(matches!(
        ZiTokenBatch::from_value(&json!([[["Hey"]]])),
        Err(ZiError::Usage { .. })
    ));
    assert!(matches!(
        ZiTokenBatch::from_value(&json!(["Hey", ["I"]])),
        Err(ZiError::Usage { .. })
    ));
}

#[test]
fn non_token_values_are_schema_errors() {
    assert!(matches!(
        ZiTokenBatch::from_value(&json!([true])),
        Err(ZiError::Schema { .. })
    ));
    assert!(matches!(
        ZiTokenBatch::from_value(&json!([0.5])),
        Err(ZiError::Schema { .. })
    ));
}

#[test]
fn mixed_kinds_are_rejected_by_augmenters() {
    let swap = ZiRandomSwap::new(1, ZiSkipPolicy::Nothing, Some(1)).unwrap();
    let err = swap.augment_value(&json!([["a"], [1]])).unwrap_err();
    assert!(matches!(err, ZiError::Schema { .. }));
}

#[test]
fn augmenters_keep_rank() {
    let swap = ZiRandomSwap::new(2, ZiSkipPolicy::Nothing, Some(9)).unwrap();
    let flat = swap.augment_value(&json!([1, 2, 3])).unwrap();
    assert_eq!(flat.as_array().unwrap().len(), 3);
    assert!(flat.as_array().unwrap().iter().all(|v| v.is_i64()));

    let batched = swap.augment_value(&json!([[1, 2, 3], [4]])).unwrap();
    assert_eq!(batched.as_array().unwrap().len(), 2);
    assert_eq!(batched[1], json!([4]));

    let empty = swap.augment_value(&json!([])).unwrap();
    assert_eq!(empty, json!([]));
}
