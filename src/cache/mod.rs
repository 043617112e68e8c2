//! Cache Repository (C1): a content-addressed, append-only store of
//! previously-translated text units.
//!
//! The hash family is MetroHash128 rather than the CityHash128 the reference
//! implementation uses — see `DESIGN.md` for why. What the spec actually
//! requires (stability across runs/machines, one hash per `(text,
//! target_language)` pair, decimal rendering) holds for either family; this
//! crate never needs to read a cache file produced by the original service.

use metrohash::MetroHash128;
use std::hash::Hasher;

mod traits;

pub use traits::{CacheLookup, TranslationCacheRepo};

/// `hash(original ++ target_language)`, rendered as decimal digits.
///
/// Deterministic and stable across runs/processes: `MetroHash128` has no
/// randomized seed here (`MetroHash128::new()` always starts from the same
/// state), so two processes hashing the same bytes get the same digest.
pub fn content_hash(original: &str, target_language: &str) -> String {
    let mut hasher = MetroHash128::new();
    hasher.write(original.as_bytes());
    hasher.write(target_language.as_bytes());
    let (hi, lo) = hasher.finish128();
    let value: u128 = ((hi as u128) << 64) | (lo as u128);
    value.to_string()
}
