//! Structural hashing for immutable message values
//!
//! Every message precomputes one stable hash at construction time, derived
//! from its already-validated field values. The combinators here encode the
//! collection semantics of the protocol:
//!
//! - sequences (e.g. sampled meter values) are **order-sensitive**
//! - sets (e.g. signatures) are **order-insensitive multisets**
//! - optional fields contribute zero when absent and a non-zero mix of the
//!   element hash when present
//!
//! The guarantee is one-directional: structural equality implies equal
//! hashes, never the converse. Hash values are deterministic per type but
//! carry no meaning across processes or versions.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;

/// Seed for all hash folds (FNV-1a offset basis).
const SEED: u64 = 0xcbf2_9ce4_8422_2325;

/// Per-byte / per-element fold multiplier (FNV-1a prime).
const FOLD_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Small odd primes used to weight successive fields of a composite value.
const FIELD_PRIMES: [u64; 16] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59];

/// A deterministic structural hash, computed from validated field values.
///
/// Implementations must agree with the type's `PartialEq`: equal values must
/// produce equal hashes.
pub trait StableHash {
    fn stable_hash(&self) -> u64;
}

/// Combine the hashes of a composite value's fields in declaration order.
///
/// Each field hash is weighted by a small odd prime and XOR-folded into the
/// accumulator, so that swapping two field values almost always changes the
/// result while remaining fully deterministic.
pub fn combine(parts: &[u64]) -> u64 {
    parts.iter().enumerate().fold(SEED, |acc, (i, part)| {
        acc.wrapping_mul(FOLD_PRIME) ^ part.wrapping_mul(FIELD_PRIMES[i % FIELD_PRIMES.len()])
    })
}

/// Order-sensitive hash of a sequence field.
///
/// Two sequences with the same elements in a different order hash (and
/// compare) differently.
pub fn hash_seq<T: StableHash>(items: &[T]) -> u64 {
    items.iter().fold(SEED ^ items.len() as u64, |acc, item| {
        acc.wrapping_mul(FOLD_PRIME) ^ item.stable_hash()
    })
}

/// Order-insensitive multiset hash of a set-like field.
///
/// Element hashes are combined with a commutative operation so that
/// collection order carries no weight, while duplicate elements still
/// contribute once per occurrence.
pub fn hash_set<T: StableHash>(items: &[T]) -> u64 {
    items
        .iter()
        .fold(SEED ^ items.len() as u64, |acc, item| {
            acc.wrapping_add(item.stable_hash())
        })
}

/// Hash of an optional field: absent contributes zero, present contributes a
/// non-trivial mix of the element hash.
pub fn hash_opt<T: StableHash>(value: &Option<T>) -> u64 {
    match value {
        None => 0,
        Some(v) => v.stable_hash().wrapping_mul(31).wrapping_add(17),
    }
}

/// Deterministic hash of an arbitrary JSON value.
///
/// Object keys hash position-independently (serde_json maps iterate in a
/// deterministic order); arrays are order-sensitive, matching JSON semantics.
pub fn hash_json(value: &Value) -> u64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => b.stable_hash(),
        Value::Number(n) => n
            .as_f64()
            .map(|f| f.to_bits().wrapping_mul(FOLD_PRIME))
            .unwrap_or(1),
        Value::String(s) => s.stable_hash(),
        Value::Array(items) => items.iter().fold(SEED ^ items.len() as u64, |acc, item| {
            acc.wrapping_mul(FOLD_PRIME) ^ hash_json(item)
        }),
        Value::Object(map) => map.iter().fold(SEED ^ map.len() as u64, |acc, (k, v)| {
            acc.wrapping_add(combine(&[k.stable_hash(), hash_json(v)]))
        }),
    }
}

/// Count-based multiset equality: same cardinality and two-way containment.
///
/// Used for fields whose collection order carries no protocol meaning
/// (signatures). Duplicate-bearing inputs are handled deterministically:
/// every element must occur the same number of times on both sides.
pub fn multiset_eq<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let count = |xs: &[T], x: &T| xs.iter().filter(|y| *y == x).count();
    a.iter().all(|x| count(a, x) == count(b, x)) && b.iter().all(|x| count(a, x) == count(b, x))
}

impl StableHash for bool {
    fn stable_hash(&self) -> u64 {
        if *self {
            0x9e37_79b9_7f4a_7c15
        } else {
            0x5851_f42d_4c95_7f2d
        }
    }
}

impl StableHash for u32 {
    fn stable_hash(&self) -> u64 {
        (*self as u64).wrapping_mul(FOLD_PRIME) ^ SEED
    }
}

impl StableHash for u64 {
    fn stable_hash(&self) -> u64 {
        self.wrapping_mul(FOLD_PRIME) ^ SEED
    }
}

impl StableHash for i8 {
    fn stable_hash(&self) -> u64 {
        (*self as i64 as u64).wrapping_mul(FOLD_PRIME) ^ SEED
    }
}

impl StableHash for f64 {
    fn stable_hash(&self) -> u64 {
        self.to_bits().wrapping_mul(FOLD_PRIME) ^ SEED
    }
}

impl StableHash for str {
    fn stable_hash(&self) -> u64 {
        self.bytes()
            .fold(SEED, |acc, b| (acc ^ b as u64).wrapping_mul(FOLD_PRIME))
    }
}

impl StableHash for String {
    fn stable_hash(&self) -> u64 {
        self.as_str().stable_hash()
    }
}

impl StableHash for DateTime<Utc> {
    fn stable_hash(&self) -> u64 {
        (self.timestamp_millis() as u64).wrapping_mul(FOLD_PRIME) ^ SEED
    }
}

impl StableHash for Duration {
    fn stable_hash(&self) -> u64 {
        self.as_millis() as u64 ^ SEED
    }
}

impl StableHash for Value {
    fn stable_hash(&self) -> u64 {
        hash_json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_hash_is_order_sensitive() {
        let forward = hash_seq(&["a".to_string(), "b".to_string()]);
        let backward = hash_seq(&["b".to_string(), "a".to_string()]);
        assert_ne!(forward, backward);
    }

    #[test]
    fn set_hash_is_order_insensitive() {
        let forward = hash_set(&["a".to_string(), "b".to_string()]);
        let backward = hash_set(&["b".to_string(), "a".to_string()]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn set_hash_counts_duplicates() {
        let once = hash_set(&["a".to_string()]);
        let twice = hash_set(&["a".to_string(), "a".to_string()]);
        assert_ne!(once, twice);
    }

    #[test]
    fn absent_option_contributes_zero() {
        assert_eq!(hash_opt::<String>(&None), 0);
        assert_ne!(hash_opt(&Some("x".to_string())), 0);
    }

    #[test]
    fn multiset_eq_ignores_order_but_not_counts() {
        let a = vec!["x", "y", "y"];
        let b = vec!["y", "x", "y"];
        let c = vec!["x", "x", "y"];
        assert!(multiset_eq(&a, &b));
        assert!(!multiset_eq(&a, &c));
        assert!(!multiset_eq(&a[..2].to_vec(), &a));
    }

    #[test]
    fn combine_is_field_order_sensitive() {
        let h1 = "one".stable_hash();
        let h2 = "two".stable_hash();
        assert_ne!(combine(&[h1, h2]), combine(&[h2, h1]));
    }

    #[test]
    fn json_object_hash_is_key_order_independent() {
        let a: Value = serde_json::json!({ "x": 1, "y": 2 });
        let b: Value = serde_json::json!({ "y": 2, "x": 1 });
        assert_eq!(hash_json(&a), hash_json(&b));
    }
}
