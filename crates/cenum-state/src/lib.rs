//! # cenum-state — Transition Tables for Closed Enums
//!
//! Layers state-transition knowledge on top of `cenum-core`. Each enum value
//! declares, next to its other behavior, which values it may move to. This
//! crate turns those local declarations into one explicit, ordered table of
//! legal edges.
//!
//! ## Modules
//!
//! - **Transition** (`transition.rs`): the [`Transitioner`] capability, the
//!   [`allowed_transitions`] deriver, and the resulting [`TransitionTable`].
//!   A value that declares itself as its own successor fails the whole
//!   derivation with [`TransitionError::TransitionNotAllowed`].
//!
//! - **Manifest** (`manifest.rs`): closed enums declared in YAML or JSON
//!   configuration, compiled into a definition plus transition table by the
//!   same deriver.
//!
//! ## Scope
//!
//! The table is static data computed once at initialization. Nothing here
//! executes or enforces transitions at runtime; that is left to the
//! consuming state machine.

pub mod manifest;
pub mod transition;

// ─── Transition re-exports ──────────────────────────────────────────

pub use transition::{
    allowed_transitions, Transition, TransitionError, TransitionTable, Transitioner,
};

// ─── Manifest re-exports ────────────────────────────────────────────

pub use manifest::{CompiledEnum, EnumManifest, ManifestError, ManifestState};
