//! # Enum Definitions — One Closed Vocabulary with a Default
//!
//! An [`EnumDefinition`] interns a fixed, ordered list of raw values. The
//! first raw value is the default. Membership queries answer whether a
//! candidate value (read from a column, a request body, a config file) is
//! part of the closed set, and hand back the canonical instance when it is.
//!
//! ## Closed-enum capability
//!
//! A caller's enum type participates through [`ClosedEnum`]: it reports
//! membership, its default as text, and converts itself to a [`ColumnValue`]
//! for an external row/column store. The conversion is a seam only; no
//! persistence layer is implemented here.

use serde::{Deserialize, Serialize};

use crate::error::EnumError;
use crate::interner::{CanonicalValue, Interner};

// ─── Closed-enum capability ──────────────────────────────────────────

/// Value handed to an external row/column persistence layer.
///
/// A closed enum value always has text, so there is no `NULL` case; an
/// absent value is the caller's `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnValue {
    /// A text column value.
    Text(String),
}

/// Capability of a type whose values form a closed, string-valued set.
pub trait ClosedEnum {
    /// Whether this value is a member of its closed set.
    fn is_valid_value(&self) -> bool;

    /// The default value of the enum, as text.
    fn default_value(&self) -> &str;

    /// Convert to a value for external persistence.
    ///
    /// # Errors
    ///
    /// Implementations return [`EnumError::NotAMember`] for values outside
    /// the closed set.
    fn column_value(&self) -> Result<ColumnValue, EnumError>;
}

// ─── Enum Definition ─────────────────────────────────────────────────

/// A fixed vocabulary of canonical values plus its default.
///
/// Entries are unique by identity and kept in first-seen input order.
/// The definition is immutable once built.
#[derive(Debug)]
pub struct EnumDefinition {
    values: Interner,
    default_value: Option<CanonicalValue>,
}

impl EnumDefinition {
    /// Build a definition from raw values, interning each in order.
    ///
    /// The canonical form of the first value becomes the default. Repeated
    /// raw values collapse into one entry. An empty input produces a
    /// definition without a default.
    pub fn new<I, S>(raw_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = Interner::new();
        let mut default_value = None;
        let mut supplied = 0usize;

        for raw in raw_values {
            let canonical = values.add(raw.as_ref());
            if default_value.is_none() {
                default_value = Some(canonical);
            }
            supplied += 1;
        }

        Self::finish(values, default_value, supplied)
    }

    /// Build a definition whose default is `default`, followed by `rest`.
    ///
    /// Returns the default alongside the definition, so callers that always
    /// declare at least one value never handle an absent default.
    pub fn with_default<I, S>(default: &str, rest: I) -> (Self, CanonicalValue)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = Interner::new();
        let default_value = values.add(default);
        let mut supplied = 1usize;

        for raw in rest {
            values.add(raw.as_ref());
            supplied += 1;
        }

        let definition = Self::finish(values, Some(default_value.clone()), supplied);
        (definition, default_value)
    }

    fn finish(values: Interner, default_value: Option<CanonicalValue>, supplied: usize) -> Self {
        if supplied != values.len() {
            tracing::warn!(
                supplied,
                distinct = values.len(),
                "closed enum declared with repeated values; duplicates collapsed"
            );
        }
        tracing::debug!(
            pool = %values.id(),
            values = values.len(),
            default = default_value.as_ref().map(CanonicalValue::as_str),
            "closed enum definition built"
        );

        Self {
            values,
            default_value,
        }
    }

    /// The canonical instance for `text`, or `None` when `text` is not part
    /// of the vocabulary.
    pub fn lookup(&self, text: &str) -> Option<&CanonicalValue> {
        self.values.get(text)
    }

    /// The default value. `None` only for an empty definition.
    pub fn default_value(&self) -> Option<&CanonicalValue> {
        self.default_value.as_ref()
    }

    /// Whether `text` is part of the vocabulary.
    pub fn contains(&self, text: &str) -> bool {
        self.values.contains(text)
    }

    /// Whether `value` is one of this definition's own canonical entries.
    ///
    /// Stricter than [`EnumDefinition::contains`]: a value with matching
    /// text interned elsewhere is not a member.
    pub fn owns(&self, value: &CanonicalValue) -> bool {
        self.values
            .resolve(value.symbol())
            .is_some_and(|own| own.is_identical(value))
    }

    /// Canonical entries in declaration order.
    pub fn values(&self) -> std::slice::Iter<'_, CanonicalValue> {
        self.values.iter()
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the definition has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The underlying interner.
    pub fn interner(&self) -> &Interner {
        &self.values
    }
}

/// Look up `text` and re-type the canonical value as the caller's enum type.
pub fn enum_get<T>(definition: &EnumDefinition, text: &str) -> Option<T>
where
    T: ClosedEnum + From<CanonicalValue>,
{
    definition.lookup(text).cloned().map(T::from)
}

// ─── Tests ───────────────────────────────────────────────────────────
