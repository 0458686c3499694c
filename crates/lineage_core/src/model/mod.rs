//! Genealogical entity model.
//!
//! # Responsibility
//! - Define the entity kinds, their identifiers and reusable capabilities.
//! - Keep paired relation collections read-only outside the crate.
//!
//! # Invariants
//! - Every identity-bearing entity is addressed by a typed id.
//! - Relation fields hold ids, never owning references; the `Ancestry`
//!   registry resolves them.

pub mod capability;
pub mod date;
pub mod event;
pub mod file;
pub mod ids;
pub mod person;
pub mod place;
pub mod source;
pub mod value;
