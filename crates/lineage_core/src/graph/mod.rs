//! Ancestry graph: registry, relation engine and derived views.
//!
//! # Responsibility
//! - Own every entity in one `Ancestry` registry addressed by id.
//! - Keep both ends of every paired relation in sync, whichever end the
//!   caller mutates.
//!
//! # Invariants
//! - Symmetry: `b ∈ a.R` iff `a ∈ b.R⁻¹` after every public call returns.
//! - A rejected call leaves the graph untouched.
//! - Containment relations stay acyclic.

pub mod ancestry;
pub mod edit;
pub mod relation;
pub mod relations;
pub mod views;

use crate::model::ids::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors from graph mutation and lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Referenced entity is not registered.
    UnknownEntity { kind: EntityKind, id: String },
    /// An entity of this kind with this id is already registered.
    DuplicateId { kind: EntityKind, id: String },
    /// Member kind is not allowed in the relation.
    InvalidRelationMember {
        relation: &'static str,
        member: String,
    },
    /// Linking would make a node contain itself transitively.
    CyclicContainment {
        kind: EntityKind,
        node: String,
        parent: String,
    },
}

impl GraphError {
    pub(crate) fn unknown(kind: EntityKind, id: impl ToString) -> Self {
        Self::UnknownEntity {
            kind,
            id: id.to_string(),
        }
    }
}

impl Display for GraphError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEntity { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::DuplicateId { kind, id } => write!(f, "{kind} id already registered: {id}"),
            Self::InvalidRelationMember { relation, member } => {
                write!(f, "invalid relation member for `{relation}`: {member}")
            }
            Self::CyclicContainment { kind, node, parent } => write!(
                f,
                "cyclic containment: {kind} {node} cannot be placed under {parent}"
            ),
        }
    }
}

impl Error for GraphError {}
