//! Core genealogy graph for Lineage.
//! This crate is the single source of truth for relation invariants: every
//! paired relation stays symmetric whichever end is mutated.

pub mod collection;
pub mod config;
pub mod graph;
pub mod logging;
pub mod model;

pub use collection::{LinkedSet, SetOrder};
pub use config::{default_log_level, ConfigError, LoggingConfig, ValidatedLogging};
pub use graph::ancestry::{Ancestry, Entity};
pub use graph::edit::EntityMut;
pub use graph::relation::{ManyRelation, OneRelation};
pub use graph::{GraphError, GraphResult};
pub use logging::{init_logging, logging_status};
pub use model::capability::{Dated, HasCitations, HasFiles, HasLinks, Identifiable};
pub use model::ids::{
    CitationId, EntityKind, EntityRef, EventId, FileId, PersonId, PlaceId, PresenceId, SourceId,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
