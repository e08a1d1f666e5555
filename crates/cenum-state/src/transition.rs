//! # Transition Tables — Deriving Legal Edges from a Predicate
//!
//! Each value of a closed enum declares locally which other values it may
//! move to, via [`Transitioner::can_transition_to`]. [`allowed_transitions`]
//! turns those per-value predicates into one explicit, ordered edge list that
//! a state-machine executor, a visualizer, or a validator can inspect without
//! re-deriving it.
//!
//! ## Algorithm
//!
//! For every ordered pair `(from, to)` of the input list crossed with itself,
//! outer loop over `from`, inner loop over `to`, both in input order:
//!
//! 1. If `from.can_transition_to(to)` is false, skip the pair.
//! 2. If `from.is_identical_to(to)`, abort with
//!    [`TransitionError::TransitionNotAllowed`].
//! 3. Otherwise append `Transition { from, to }`.
//!
//! The result is all-or-nothing: a self-transition discards every edge
//! collected so far.
//!
//! ## Ordering
//!
//! Edge order is part of the contract. The same input list and predicates
//! always produce the same table, edge for edge.
//!
//! Nothing here executes transitions; the table is static data.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// ─── Transitioner capability ─────────────────────────────────────────

/// Capability of an enum value that declares its legal successors.
pub trait Transitioner {
    /// Whether moving from `self` to `other` is a declared-legal change.
    fn can_transition_to(&self, other: &Self) -> bool;

    /// Whether `self` and `other` are the same canonical value.
    fn is_identical_to(&self, other: &Self) -> bool;
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised while deriving a transition table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// A value declared itself as its own legal successor.
    #[error("transition not allowed: {state} declares itself as a successor")]
    TransitionNotAllowed {
        /// The offending value.
        state: String,
        /// Its position in the input list.
        position: usize,
    },

    /// A stored edge that the source value's predicate does not accept.
    #[error("transition not declared: {from} -> {to}")]
    UndeclaredTransition {
        /// The edge's source value.
        from: String,
        /// The edge's target value.
        to: String,
        /// Position of the edge in the stored table.
        position: usize,
    },
}

// ─── Transition ──────────────────────────────────────────────────────

/// A declared-legal change from one enum value to a different one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition<E> {
    /// State before the change.
    pub from: E,
    /// State after the change.
    pub to: E,
}

impl<E: std::fmt::Display> std::fmt::Display for Transition<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

// ─── Transition Table ────────────────────────────────────────────────

/// Ordered list of legal transitions, outer order by `from`, inner by `to`.
///
/// Built by [`allowed_transitions`] or rebuilt from stored edges with
/// [`TransitionTable::from_edges`], which checks every edge against the
/// predicates. Deserialization goes through the same check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TransitionTable<E> {
    edges: Vec<Transition<E>>,
}

impl<E> TransitionTable<E> {
    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether no transitions are legal.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Transition<E>> {
        self.edges.iter()
    }

    /// Edges as a slice.
    pub fn as_slice(&self) -> &[Transition<E>] {
        &self.edges
    }

    /// Take ownership of the edges.
    pub fn into_vec(self) -> Vec<Transition<E>> {
        self.edges
    }
}

impl<E: Transitioner> TransitionTable<E> {
    /// Rebuild a table from stored edges, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::TransitionNotAllowed`] for an edge whose
    /// endpoints are identical, and [`TransitionError::UndeclaredTransition`]
    /// for an edge its source's predicate rejects. `position` is the edge's
    /// index in `edges`.
    pub fn from_edges(edges: Vec<Transition<E>>) -> Result<Self, TransitionError>
    where
        E: std::fmt::Display,
    {
        for (position, edge) in edges.iter().enumerate() {
            if edge.from.is_identical_to(&edge.to) {
                tracing::warn!(state = %edge.from, position, "stored edge is a self-transition");
                return Err(TransitionError::TransitionNotAllowed {
                    state: edge.from.to_string(),
                    position,
                });
            }
            if !edge.from.can_transition_to(&edge.to) {
                tracing::warn!(%edge, position, "stored edge is not declared by its source");
                return Err(TransitionError::UndeclaredTransition {
                    from: edge.from.to_string(),
                    to: edge.to.to_string(),
                    position,
                });
            }
        }
        Ok(Self { edges })
    }

    /// Whether the table contains the edge `from -> to`, matched by identity.
    pub fn allows(&self, from: &E, to: &E) -> bool {
        self.edges
            .iter()
            .any(|t| t.from.is_identical_to(from) && t.to.is_identical_to(to))
    }

    /// Targets reachable from `from` in one step, in table order.
    pub fn successors<'a>(&'a self, from: &'a E) -> impl Iterator<Item = &'a E> + 'a {
        self.edges
            .iter()
            .filter(move |t| t.from.is_identical_to(from))
            .map(|t| &t.to)
    }
}

impl<'de, E> Deserialize<'de> for TransitionTable<E>
where
    E: Deserialize<'de> + Transitioner + std::fmt::Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let edges = Vec::<Transition<E>>::deserialize(deserializer)?;
        Self::from_edges(edges).map_err(serde::de::Error::custom)
    }
}

impl<E> Default for TransitionTable<E> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<E> IntoIterator for TransitionTable<E> {
    type Item = Transition<E>;
    type IntoIter = std::vec::IntoIter<Transition<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a TransitionTable<E> {
    type Item = &'a Transition<E>;
    type IntoIter = std::slice::Iter<'a, Transition<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

// ─── Derivation ──────────────────────────────────────────────────────

/// Derive every legal transition between `states`.
///
/// # Errors
///
/// Returns [`TransitionError::TransitionNotAllowed`] if any value's
/// predicate accepts itself. No partial table is returned.
pub fn allowed_transitions<E>(states: &[E]) -> Result<TransitionTable<E>, TransitionError>
where
    E: Transitioner + Clone + std::fmt::Display,
{
    let mut edges = Vec::new();

    for (position, from) in states.iter().enumerate() {
        for to in states {
            if !from.can_transition_to(to) {
                continue;
            }
            if from.is_identical_to(to) {
                tracing::warn!(state = %from, position, "state declares a transition to itself");
                return Err(TransitionError::TransitionNotAllowed {
                    state: from.to_string(),
                    position,
                });
            }
            edges.push(Transition {
                from: from.clone(),
                to: to.clone(),
            });
        }
    }

    tracing::debug!(states = states.len(), edges = edges.len(), "transition table derived");
    Ok(TransitionTable { edges })
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Tagged-variant enum with a match-based predicate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    enum Light {
        Red,
        Green,
        Yellow,
    }

    impl std::fmt::Display for Light {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let s = match self {
                Self::Red => "RED",
                Self::Green => "GREEN",
                Self::Yellow => "YELLOW",
            };
            f.write_str(s)
        }
    }

    impl Transitioner for Light {
        fn can_transition_to(&self, other: &Self) -> bool {
            matches!(
                (self, other),
                (Self::Red, Self::Green) | (Self::Green, Self::Yellow) | (Self::Yellow, Self::Red)
            )
        }

        fn is_identical_to(&self, other: &Self) -> bool {
            self == other
        }
    }

    /// Predicate that accepts everything, including itself.
    #[derive(Debug, Clone, PartialEq)]
    struct Greedy(&'static str);

    impl std::fmt::Display for Greedy {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    impl Transitioner for Greedy {
        fn can_transition_to(&self, _other: &Self) -> bool {
            true
        }

        fn is_identical_to(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    #[test]
    fn test_cycle_edges_in_input_order() {
        let table = allowed_transitions(&[Light::Red, Light::Green, Light::Yellow]).unwrap();
        let edges: Vec<(Light, Light)> = table.iter().map(|t| (t.from, t.to)).collect();
        assert_eq!(
            edges,
            vec![
                (Light::Red, Light::Green),
                (Light::Green, Light::Yellow),
                (Light::Yellow, Light::Red),
            ]
        );
    }

    #[test]
    fn test_input_order_drives_edge_order() {
        let table = allowed_transitions(&[Light::Yellow, Light::Green, Light::Red]).unwrap();
        let first = &table.as_slice()[0];
        assert_eq!((first.from, first.to), (Light::Yellow, Light::Red));
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let table = allowed_transitions::<Light>(&[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table, TransitionTable::default());
    }

    #[test]
    fn test_subset_input_only_considers_present_values() {
        let table = allowed_transitions(&[Light::Red, Light::Yellow]).unwrap();
        let edges: Vec<String> = table.iter().map(ToString::to_string).collect();
        assert_eq!(edges, vec!["YELLOW -> RED"]);
    }

    #[test]
    fn test_self_transition_aborts() {
        let err = allowed_transitions(&[Greedy("a"), Greedy("b")]).unwrap_err();
        assert_eq!(
            err,
            TransitionError::TransitionNotAllowed {
                state: "a".to_string(),
                position: 0,
            }
        );
        assert_eq!(
            err.to_string(),
            "transition not allowed: a declares itself as a successor"
        );
    }

    #[test]
    fn test_allows_and_successors() {
        let table = allowed_transitions(&[Light::Red, Light::Green, Light::Yellow]).unwrap();
        assert!(table.allows(&Light::Red, &Light::Green));
        assert!(!table.allows(&Light::Green, &Light::Red));
        let next: Vec<&Light> = table.successors(&Light::Green).collect();
        assert_eq!(next, vec![&Light::Yellow]);
    }

    #[test]
    fn test_table_serializes_as_edge_list() {
        let table = allowed_transitions(&[Light::Red, Light::Green]).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"from":"Red","to":"Green"}]"#);
        let parsed: TransitionTable<Light> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);
    }

    fn edge<E>(from: E, to: E) -> Transition<E> {
        Transition { from, to }
    }

    #[test]
    fn test_from_edges_keeps_declared_edges() {
        let edges = vec![
            edge(Light::Yellow, Light::Red),
            edge(Light::Red, Light::Green),
        ];
        let table = TransitionTable::from_edges(edges.clone()).unwrap();
        assert_eq!(table.into_vec(), edges);
    }

    #[test]
    fn test_from_edges_rejects_self_transition() {
        let edges = vec![
            edge(Greedy("a"), Greedy("b")),
            edge(Greedy("b"), Greedy("b")),
        ];
        assert_eq!(
            TransitionTable::from_edges(edges),
            Err(TransitionError::TransitionNotAllowed {
                state: "b".to_string(),
                position: 1,
            })
        );
    }

    #[test]
    fn test_from_edges_rejects_undeclared_edge() {
        let edges = vec![edge(Light::Green, Light::Red)];
        let err = TransitionTable::from_edges(edges).unwrap_err();
        assert_eq!(
            err,
            TransitionError::UndeclaredTransition {
                from: "GREEN".to_string(),
                to: "RED".to_string(),
                position: 0,
            }
        );
        assert_eq!(err.to_string(), "transition not declared: GREEN -> RED");
    }

    #[test]
    fn test_deserialize_rejects_undeclared_edge() {
        let result = serde_json::from_str::<TransitionTable<Light>>(
            r#"[{"from":"Red","to":"Green"},{"from":"Green","to":"Red"}]"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("transition not declared: GREEN -> RED"), "{err}");
    }

    #[test]
    fn test_into_vec_and_into_iter() {
        let table = allowed_transitions(&[Light::Red, Light::Green, Light::Yellow]).unwrap();
        assert_eq!(table.len(), 3);
        let by_ref: usize = (&table).into_iter().count();
        let owned = table.clone().into_vec();
        assert_eq!(by_ref, owned.len());
        assert_eq!(table.into_iter().last().map(|t| t.to), Some(Light::Red));
    }
}
