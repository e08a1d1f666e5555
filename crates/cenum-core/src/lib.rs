//! # cenum-core — Closed Enum Foundations
//!
//! A closed enum is a fixed, named set of string-valued states known in full
//! when it is declared: a record's lifecycle status, a job phase, a payment
//! state. Values read back from storage or received over an API must be
//! checked against that allow-list before they are trusted.
//!
//! This crate provides the pieces that make that cheap and uniform:
//!
//! - [`Interner`] — canonicalizes text into a deduplicated pool. Equal text
//!   always yields the same [`CanonicalValue`], and identity comparison is a
//!   single [`Symbol`] comparison.
//! - [`EnumDefinition`] — one vocabulary with its designated default (the
//!   first declared value), answering membership queries.
//! - [`ClosedEnum`] — the capability a caller's enum type implements, with
//!   [`enum_get`] to re-type a successful lookup.
//! - [`closed_enum!`] — declares a string-backed closed enum type with a
//!   process-wide definition in one place.
//!
//! Transition tables between enum values live in `cenum-state`, layered on
//! top of this crate.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cenum-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Build once, read many: mutation needs `&mut`, everything built is
//!   `Send + Sync` for concurrent readers.

pub mod definition;
pub mod error;
pub mod interner;
pub mod macros;

// Re-export primary types for ergonomic imports.
pub use definition::{enum_get, ClosedEnum, ColumnValue, EnumDefinition};
pub use error::EnumError;
pub use interner::{CanonicalValue, Interner, PoolId, Symbol};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
