//! Proptest strategies for command tails and tokens
//!
//! Words produced here are lowercase ASCII, so they never collide with the
//! default option prefix and convert under the catch-all `STRING` type.

use proptest::prelude::*;

pub use proptest::proptest;

/// A lowercase ASCII word of 1 to 8 characters.
pub fn arb_word() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::char::range('a', 'z'), 1..=8)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Zero to five plain words.
pub fn arb_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_word(), 0..=5)
}

/// A tail joining plain words with single spaces.
pub fn arb_plain_tail() -> impl Strategy<Value = String> {
    arb_words().prop_map(|words| words.join(" "))
}

/// Zero to five integers, as tokens for `INTEGER` slots.
pub fn arb_integers() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(any::<i64>(), 0..=5)
}
