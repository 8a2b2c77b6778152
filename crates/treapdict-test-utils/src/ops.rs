//! Operation sequences for model-based property tests.
//!
//! Keys are drawn from a small range so that sequences hit existing keys,
//! duplicate inserts and absent removals often.

use std::collections::BTreeMap;

use proptest::prelude::*;

/// One dictionary operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    /// Insert or overwrite `key` with `value`.
    Insert(u16, u32),
    /// Remove `key` if present.
    Remove(u16),
    /// Remove everything.
    Clear,
}

impl Op {
    /// Apply the operation to a `BTreeMap` model with overwrite semantics.
    pub fn apply_to_model(&self, model: &mut BTreeMap<u16, u32>) {
        match *self {
            Op::Insert(key, value) => {
                model.insert(key, value);
            }
            Op::Remove(key) => {
                model.remove(&key);
            }
            Op::Clear => model.clear(),
        }
    }
}

/// Strategy for sequences of up to `max_len` operations over keys
/// `0..key_space`. Clears are rare so trees get a chance to grow.
pub fn arb_ops(key_space: u16, max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        6 => (0..key_space, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        3 => (0..key_space).prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ];
    proptest::collection::vec(op, 0..max_len)
}
