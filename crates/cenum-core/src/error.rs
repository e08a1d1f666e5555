//! # Error Types
//!
//! Errors raised by the closed-enum foundations. A lookup miss is not an
//! error: membership queries return `Option` and an unknown value is a
//! routine validation outcome for the caller to handle.

use thiserror::Error;

/// Top-level error type for closed-enum values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnumError {
    /// The value is not a member of its enum's closed set and cannot be
    /// handed to persistence.
    #[error("value {value:?} is not a member of closed enum {enum_name}")]
    NotAMember {
        /// Name of the enum type.
        enum_name: &'static str,
        /// The offending text.
        value: String,
    },
}
