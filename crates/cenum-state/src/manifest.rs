//! # Enum Manifests — Closed Enums Declared in Configuration
//!
//! A manifest declares a vocabulary and its successor map in YAML or JSON,
//! so services can ship state machines as configuration:
//!
//! ```yaml
//! name: order_status
//! values: [pending, paid, shipped, cancelled]
//! transitions:
//!   pending: [paid, cancelled]
//!   paid: [shipped, cancelled]
//! ```
//!
//! [`EnumManifest::compile`] validates the manifest, builds its
//! [`EnumDefinition`], and derives the transition table with the same
//! deriver code-declared enums use. A value listed as its own successor
//! fails compilation with [`TransitionError::TransitionNotAllowed`].

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use cenum_core::{CanonicalValue, EnumDefinition, Symbol};

use crate::transition::{allowed_transitions, TransitionError, TransitionTable, Transitioner};

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised while loading or compiling a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest file does not exist.
    #[error("manifest not found: {}", .path.display())]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The manifest file could not be read.
    #[error("failed to read manifest {}: {source}", .path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The manifest is not valid YAML for this schema.
    #[error("invalid YAML manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The manifest is not valid JSON for this schema.
    #[error("invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension names no supported format.
    #[error("unsupported manifest format {extension:?}; expected .yaml, .yml, or .json")]
    UnsupportedFormat {
        /// The extension found, empty if none.
        extension: String,
    },

    /// The manifest has an empty `name`.
    #[error("manifest name must not be empty")]
    EmptyName,

    /// The manifest declares no values, so it has no default.
    #[error("manifest {name} declares no values")]
    NoValues {
        /// Manifest name.
        name: String,
    },

    /// A value appears more than once in `values`.
    #[error("manifest {name} declares value {value:?} more than once")]
    DuplicateValue {
        /// Manifest name.
        name: String,
        /// The repeated value.
        value: String,
    },

    /// A transition mentions a value outside `values`.
    #[error("manifest {name} references unknown value {value:?} as {role}")]
    UnknownValue {
        /// Manifest name.
        name: String,
        /// The unknown value.
        value: String,
        /// Where it appeared.
        role: String,
    },

    /// The successor map declares a self-transition.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

// ─── Manifest ────────────────────────────────────────────────────────

/// Declarative form of a closed enum and its successor map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumManifest {
    /// Name of the enum, used in diagnostics.
    pub name: String,
    /// Ordered values; the first is the default.
    pub values: Vec<String>,
    /// Legal successors per value. Values without an entry are terminal.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub transitions: BTreeMap<String, Vec<String>>,
}

impl EnumManifest {
    /// Parse and validate a YAML manifest.
    pub fn from_yaml_str(s: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_yaml::from_str(s)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse and validate a JSON manifest.
    pub fn from_json_str(s: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_json::from_str(s)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read a manifest file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !matches!(extension.as_str(), "yaml" | "yml" | "json") {
            return Err(ManifestError::UnsupportedFormat { extension });
        }

        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ManifestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ManifestError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let manifest = if extension == "json" {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };

        tracing::debug!(
            path = %path.display(),
            name = %manifest.name,
            values = manifest.values.len(),
            "loaded enum manifest"
        );
        Ok(manifest)
    }

    /// Check structural consistency: non-empty name and values, unique
    /// values, and every transition endpoint declared in `values`.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.name.trim().is_empty() {
            return Err(ManifestError::EmptyName);
        }
        if self.values.is_empty() {
            return Err(ManifestError::NoValues {
                name: self.name.clone(),
            });
        }

        let mut declared = HashSet::with_capacity(self.values.len());
        for value in &self.values {
            if !declared.insert(value.as_str()) {
                return Err(ManifestError::DuplicateValue {
                    name: self.name.clone(),
                    value: value.clone(),
                });
            }
        }

        for (source, targets) in &self.transitions {
            if !declared.contains(source.as_str()) {
                return Err(self.unknown(source, "transition source".to_string()));
            }
            for target in targets {
                if !declared.contains(target.as_str()) {
                    return Err(self.unknown(target, format!("successor of {source:?}")));
                }
            }
        }
        Ok(())
    }

    /// Validate, build the definition, and derive the transition table.
    pub fn compile(&self) -> Result<CompiledEnum, ManifestError> {
        self.validate()?;

        let definition = EnumDefinition::new(&self.values);
        let states: Vec<ManifestState> = definition
            .values()
            .map(|value| ManifestState {
                value: value.clone(),
                successors: self
                    .transitions
                    .get(value.as_str())
                    .map(|targets| {
                        targets
                            .iter()
                            .filter_map(|t| definition.lookup(t))
                            .map(CanonicalValue::symbol)
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();
        let table = allowed_transitions(&states)?;

        tracing::debug!(
            name = %self.name,
            values = states.len(),
            transitions = table.len(),
            "compiled enum manifest"
        );
        Ok(CompiledEnum {
            name: self.name.clone(),
            definition,
            states,
            table,
        })
    }

    fn unknown(&self, value: &str, role: String) -> ManifestError {
        ManifestError::UnknownValue {
            name: self.name.clone(),
            value: value.to_string(),
            role,
        }
    }
}

// ─── Manifest State ──────────────────────────────────────────────────

/// One manifest value with its declared successors.
#[derive(Debug, Clone)]
pub struct ManifestState {
    value: CanonicalValue,
    successors: Vec<Symbol>,
}

impl ManifestState {
    /// The canonical value.
    pub fn value(&self) -> &CanonicalValue {
        &self.value
    }

    /// The value's text.
    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }

    /// Whether no successors are declared.
    pub fn is_terminal(&self) -> bool {
        self.successors.is_empty()
    }
}

impl Transitioner for ManifestState {
    fn can_transition_to(&self, other: &Self) -> bool {
        self.successors.contains(&other.value.symbol())
    }

    fn is_identical_to(&self, other: &Self) -> bool {
        self.value.is_identical(&other.value)
    }
}

impl PartialEq for ManifestState {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for ManifestState {}

impl std::fmt::Display for ManifestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ManifestState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ─── Compiled Enum ───────────────────────────────────────────────────

/// A validated manifest: its definition, states, and transition table.
///
/// States and table share the definition's interner, so identity checks
/// between them hold.
#[derive(Debug)]
pub struct CompiledEnum {
    name: String,
    definition: EnumDefinition,
    states: Vec<ManifestState>,
    table: TransitionTable<ManifestState>,
}

impl CompiledEnum {
    /// Name of the enum.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The vocabulary.
    pub fn definition(&self) -> &EnumDefinition {
        &self.definition
    }

    /// States in declaration order.
    pub fn states(&self) -> &[ManifestState] {
        &self.states
    }

    /// The derived transition table.
    pub fn table(&self) -> &TransitionTable<ManifestState> {
        &self.table
    }

    /// The state for `text`, if it is a member.
    pub fn state(&self, text: &str) -> Option<&ManifestState> {
        let value = self.definition.lookup(text)?;
        self.states.get(value.symbol().index())
    }

    /// Whether `from -> to` is a declared-legal transition. Unknown text is
    /// never legal.
    pub fn allows(&self, from: &str, to: &str) -> bool {
        match (self.state(from), self.state(to)) {
            (Some(from), Some(to)) => self.table.allows(from, to),
            _ => false,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
