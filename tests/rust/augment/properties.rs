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

use proptest::prelude::*;
use zix_textaug::{
    ZiInsertionSource, ZiRandomDeletion, ZiRandomInsertion, ZiRandomSwap, ZiSequence,
    ZiSkipPolicy, ZiToken, ZiTokenAugmenter, ZiTokenBatch,
};

const VOCAB: &[&str] = &["Hey", "I", "like", "Keras", "and", "Tensorflow", "."];
const PROTECTED: &[&str] = &["and", "."];

fn row_strategy() -> impl Strategy<Value = ZiSequence> {
    prop::collection::vec(prop::sample::select(VOCAB), 0..12)
        .prop_map(|words| words.into_iter().map(ZiToken::from).collect())
}

fn batch_strategy() -> impl Strategy<Value = Vec<ZiSequence>> {
    prop::collection::vec(row_strategy(), 0..6)
}

fn protected_count(row: &[ZiToken]) -> usize {
    row.iter()
        .filter(|token| token.as_text().map(|t| PROTECTED.contains(&t)).unwrap_or(false))
        .count()
}

fn is_subsequence(needle: &[ZiToken], haystack: &[ZiToken]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|token| rest.any(|candidate| candidate == token))
}

fn rows_of(batch: ZiTokenBatch) -> Vec<ZiSequence> {
    match batch {
        ZiTokenBatch::Batched(rows) => rows,
        ZiTokenBatch::Flat(row) => vec![row],
    }
}

fn one_by_one(augmenter: &dyn ZiTokenAugmenter, rows: &[ZiSequence]) -> Vec<ZiSequence> {
    rows.iter()
        .flat_map(|row| rows_of(augmenter.augment(ZiTokenBatch::Flat(row.clone())).unwrap()))
        .collect()
}

proptest! {
    #[test]
    fn deletion_only_removes_unprotected_tokens(
        rows in batch_strategy(),
        rate in 0.0f64..=1.0,
        max in prop::option::of(0usize..5),
        seed in any::<u64>(),
    ) {
        let op = ZiRandomDeletion::new(rate, max, ZiSkipPolicy::list(PROTECTED.iter().copied()), Some(seed)).unwrap();
        let out = rows_of(op.augment(ZiTokenBatch::Batched(rows.clone())).unwrap());
        prop_assert_eq!(out.len(), rows.len());
        for (before, after) in rows.iter().zip(&out) {
            let removed = before.len() - after.len();
            prop_assert!(removed <= max.unwrap_or(before.len()).min(before.len()));
            prop_assert!(is_subsequence(after, before));
            prop_assert_eq!(protected_count(before), protected_count(after));
        }
    }

    #[test]
    fn insertion_only_adds_list_tokens(
        rows in batch_strategy(),
        rate in 0.0f64..=1.0,
        max in prop::option::of(0usize..5),
        seed in any::<u64>(),
    ) {
        let op = ZiRandomInsertion::new(
            rate,
            max,
            ZiInsertionSource::list(["<ins>"]),
            ZiSkipPolicy::list(PROTECTED.iter().copied()),
            Some(seed),
        )
        .unwrap();
        let out = rows_of(op.augment(ZiTokenBatch::Batched(rows.clone())).unwrap());
        prop_assert_eq!(out.len(), rows.len());
        for (before, after) in rows.iter().zip(&out) {
            let added = after.len() - before.len();
            prop_assert!(added <= max.unwrap_or(before.len()).min(before.len()));
            let kept: ZiSequence = after
                .iter()
                .filter(|token| token.as_text() != Some("<ins>"))
                .cloned()
                .collect();
            prop_assert_eq!(&kept, before);
        }
    }

    #[test]
    fn swap_preserves_multiset_and_protected_slots(
        rows in batch_strategy(),
        swaps in 0usize..8,
        seed in any::<u64>(),
    ) {
        let op = ZiRandomSwap::new(swaps, ZiSkipPolicy::list(PROTECTED.iter().copied()), Some(seed)).unwrap();
        let out = rows_of(op.augment(ZiTokenBatch::Batched(rows.clone())).unwrap());
        for (before, after) in rows.iter().zip(&out) {
            let mut a = before.clone();
            let mut b = after.clone();
            a.sort();
            b.sort();
            prop_assert_eq!(a, b);
            for (index, token) in before.iter().enumerate() {
                if protected_count(std::slice::from_ref(token)) == 1 {
                    prop_assert_eq!(&after[index], token);
                }
            }
        }
    }

    #[test]
    fn batch_size_does_not_matter(rows in batch_strategy(), seed in any::<u64>()) {
        let deletion = || ZiRandomDeletion::new(0.5, None, ZiSkipPolicy::Nothing, Some(seed)).unwrap();
        let together = rows_of(deletion().augment(ZiTokenBatch::Batched(rows.clone())).unwrap());
        prop_assert_eq!(together, one_by_one(&deletion(), &rows));

        let insertion = || {
            ZiRandomInsertion::new(0.5, Some(3), ZiInsertionSource::list(["x", "y"]), ZiSkipPolicy::Nothing, Some(seed))
                .unwrap()
        };
        let together = rows_of(insertion().augment(ZiTokenBatch::Batched(rows.clone())).unwrap());
        prop_assert_eq!(together, one_by_one(&insertion(), &rows));

        let swap = || ZiRandomSwap::new(3, ZiSkipPolicy::Nothing, Some(seed)).unwrap();
        let together = rows_of(swap().augment(ZiTokenBatch::Batched(rows.clone())).unwrap());
        prop_assert_eq!(together, one_by_one(&swap(), &rows));
    }
}
