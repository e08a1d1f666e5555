//! # String Interning — Canonical Values with Handle Identity
//!
//! An [`Interner`] maps text to exactly one [`CanonicalValue`] per distinct
//! string. Every canonical value carries a [`Symbol`]: the id of the pool it
//! was interned in plus its insertion index. Two canonical values are
//! *identical* iff their symbols are equal, so identity comparison is one
//! integer-pair comparison instead of a character-by-character scan.
//!
//! ## Invariant
//!
//! For textually equal `s1` and `s2`, however each string was produced,
//! `interner.add(s1)` and `interner.add(s2)` return identical values, and
//! `interner.get(s1)` / `interner.get(s2)` return that same entry.
//!
//! Values drawn from *different* interners are never identical, even when
//! their text matches. Textual equality is still available through
//! `PartialEq`, `Ord`, and [`CanonicalValue::compare`].
//!
//! ## Lifecycle
//!
//! The pool only grows; there is no removal. It is meant for small, closed
//! vocabularies built once at initialization. [`Interner::add`] takes
//! `&mut self`, so a shared interner cannot be mutated concurrently; a built
//! interner is `Send + Sync` and serves lock-free reads.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{self, AtomicU64};
use std::sync::Arc;

use serde::{Serialize, Serializer};

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

// ─── Handles ─────────────────────────────────────────────────────────

/// Process-unique identifier of one [`Interner`] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolId(u64);

impl PoolId {
    fn next() -> Self {
        Self(NEXT_POOL_ID.fetch_add(1, atomic::Ordering::Relaxed))
    }

    /// Access the raw counter value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PoolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pool:{}", self.0)
    }
}

/// Identity handle of a canonical value: owning pool plus insertion index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    pool: PoolId,
    index: usize,
}

impl Symbol {
    /// The interner this symbol belongs to.
    pub fn pool(&self) -> PoolId {
        self.pool
    }

    /// Position of the value in its pool's insertion order.
    pub fn index(&self) -> usize {
        self.index
    }
}

// ─── Canonical Value ─────────────────────────────────────────────────

/// The unique, deduplicated representative of a text within one interner.
///
/// Cloning is a reference-count bump and preserves identity. Equality,
/// hashing, and ordering are by text; use [`CanonicalValue::is_identical`]
/// for the stricter identity check.
#[derive(Debug, Clone)]
pub struct CanonicalValue {
    symbol: Symbol,
    text: Arc<str>,
}

impl CanonicalValue {
    /// The interned text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The identity handle.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Whether both values came from the same interning operation.
    pub fn is_identical(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }

    /// Lexicographic comparison of the underlying text.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialEq for CanonicalValue {
    fn eq(&self, other: &Self) -> bool {
        self.is_identical(other) || self.as_str() == other.as_str()
    }
}

impl Eq for CanonicalValue {}

impl PartialEq<str> for CanonicalValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for CanonicalValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Hash for CanonicalValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for CanonicalValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CanonicalValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Borrow<str> for CanonicalValue {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for CanonicalValue {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CanonicalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ─── Interner ────────────────────────────────────────────────────────

/// A grow-only pool of canonical values.
#[derive(Debug)]
pub struct Interner {
    id: PoolId,
    index: HashMap<Arc<str>, usize>,
    entries: Vec<CanonicalValue>,
}

impl Interner {
    /// Create an empty pool with a fresh process-unique id.
    pub fn new() -> Self {
        Self {
            id: PoolId::next(),
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// The id shared by every symbol this pool hands out.
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// Intern `text`, returning the existing canonical value when equal text
    /// was added before.
    pub fn add(&mut self, text: &str) -> CanonicalValue {
        if let Some(existing) = self.get(text) {
            return existing.clone();
        }

        let text: Arc<str> = Arc::from(text);
        let symbol = Symbol {
            pool: self.id,
            index: self.entries.len(),
        };
        let value = CanonicalValue {
            symbol,
            text: Arc::clone(&text),
        };
        self.index.insert(text, symbol.index);
        self.entries.push(value.clone());

        tracing::trace!(
            pool = %self.id,
            index = symbol.index,
            value = %value,
            "interned new value"
        );
        value
    }

    /// Look up the canonical value for `text` without interning it.
    pub fn get(&self, text: &str) -> Option<&CanonicalValue> {
        self.index.get(text).and_then(|&i| self.entries.get(i))
    }

    /// Reverse lookup by handle. Symbols from another pool resolve to `None`.
    pub fn resolve(&self, symbol: Symbol) -> Option<&CanonicalValue> {
        if symbol.pool != self.id {
            return None;
        }
        self.entries.get(symbol.index)
    }

    /// Whether equal text has been interned.
    pub fn contains(&self, text: &str) -> bool {
        self.index.contains_key(text)
    }

    /// Number of distinct values in the pool.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical values in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalValue> {
        self.entries.iter()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Interner {
    type Item = &'a CanonicalValue;
    type IntoIter = std::slice::Iter<'a, CanonicalValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Equal text interned twice always yields identical values.
        #[test]
        fn add_is_idempotent(words in prop::collection::vec("[a-z0-9_]{0,12}", 0..32)) {
            let mut pool = Interner::new();
            let first: Vec<CanonicalValue> = words.iter().map(|w| pool.add(w)).collect();
            for (w, v) in words.iter().zip(&first) {
                // Rebuild the text so the second call sees a fresh allocation.
                let rebuilt: String = w.chars().collect();
                let again = pool.add(&rebuilt);
                prop_assert!(again.is_identical(v));
                prop_assert!(pool.get(&rebuilt).unwrap().is_identical(v));
            }
        }

        /// The pool holds exactly one entry per distinct text.
        #[test]
        fn pool_size_matches_distinct_count(words in prop::collection::vec("[a-c]{1,3}", 0..64)) {
            let mut pool = Interner::new();
            for w in &words {
                pool.add(w);
            }
            let distinct: std::collections::HashSet<&String> = words.iter().collect();
            prop_assert_eq!(pool.len(), distinct.len());
        }

        /// Identity and textual equality coincide within one pool.
        #[test]
        fn identity_matches_text_within_pool(a in "[a-d]{1,2}", b in "[a-d]{1,2}") {
            let mut pool = Interner::new();
            let va = pool.add(&a);
            let vb = pool.add(&b);
            prop_assert_eq!(va.is_identical(&vb), a == b);
        }
    }
}
