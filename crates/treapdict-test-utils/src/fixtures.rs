//! Deterministic data sets.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Length of every generated value.
pub const VALUE_LEN: usize = 8;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// `count` entries with distinct random `u32` keys and random lowercase
/// values of [`VALUE_LEN`] letters, in generation order.
///
/// The same seed always yields the same entries.
pub fn random_entries(count: usize, seed: u64) -> Vec<(u32, String)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut seen = HashSet::with_capacity(count);
    let mut entries = Vec::with_capacity(count);
    while entries.len() < count {
        let key: u32 = rng.random();
        if !seen.insert(key) {
            continue;
        }
        let value = (0..VALUE_LEN)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        entries.push((key, value));
    }
    entries
}

/// A copy of `entries` sorted by key.
pub fn sorted_entries(entries: &[(u32, String)]) -> Vec<(u32, String)> {
    let mut sorted = entries.to_vec();
    sorted.sort_unstable_by_key(|(key, _)| *key);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_have_distinct_keys() {
        let entries = random_entries(2_000, 9);
        let keys: HashSet<_> = entries.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), 2_000);
    }

    #[test]
    fn values_are_lowercase_words() {
        for (_, value) in random_entries(50, 1) {
            assert_eq!(value.len(), VALUE_LEN);
            assert!(value.bytes().all(|b| b.is_ascii_lowercase()));
        }
    }

    #[test]
    fn same_seed_same_entries() {
        assert_eq!(random_entries(20, 5), random_entries(20, 5));
        assert_ne!(random_entries(20, 5), random_entries(20, 6));
    }

    #[test]
    fn sorted_is_ascending() {
        let sorted = sorted_entries(&random_entries(100, 2));
        assert!(sorted.windows(2).all(|w| w[0].0 < w[1].0));
    }
}
