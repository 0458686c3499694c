//! Entity identifiers.
//!
//! # Invariants
//! - Ids of identity-bearing kinds are opaque strings assigned by the
//!   importer; the core never generates or rewrites them.
//! - `PresenceId` is generated at construction because presences carry no
//!   importer identity.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Importer-assigned file id.
    FileId
);
entity_id!(
    /// Importer-assigned source id.
    SourceId
);
entity_id!(
    /// Importer-assigned citation id.
    CitationId
);
entity_id!(
    /// Importer-assigned place id.
    PlaceId
);
entity_id!(
    /// Importer-assigned event id.
    EventId
);
entity_id!(
    /// Importer-assigned person id.
    PersonId
);

/// Generated presence handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresenceId(Uuid);

impl PresenceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PresenceId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for PresenceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entity kind tag used in errors, logs and relation validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    File,
    Source,
    Citation,
    Place,
    Event,
    Presence,
    Person,
}

impl EntityKind {
    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Source => "source",
            Self::Citation => "citation",
            Self::Place => "place",
            Self::Event => "event",
            Self::Presence => "presence",
            Self::Person => "person",
        }
    }

    /// Whether entities of this kind can have files attached.
    pub fn has_files(self) -> bool {
        matches!(
            self,
            Self::Source | Self::Citation | Self::Event | Self::Person
        )
    }

    /// Whether entities of this kind can be claimed by citations.
    pub fn has_citations(self) -> bool {
        matches!(self, Self::Event | Self::Person)
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to any identity-bearing entity.
///
/// Used by the heterogeneous relations (`File::entities`,
/// `Citation::claims`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    File(FileId),
    Source(SourceId),
    Citation(CitationId),
    Place(PlaceId),
    Event(EventId),
    Person(PersonId),
}

impl EntityRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::File(_) => EntityKind::File,
            Self::Source(_) => EntityKind::Source,
            Self::Citation(_) => EntityKind::Citation,
            Self::Place(_) => EntityKind::Place,
            Self::Event(_) => EntityKind::Event,
            Self::Person(_) => EntityKind::Person,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::File(id) => id.as_str(),
            Self::Source(id) => id.as_str(),
            Self::Citation(id) => id.as_str(),
            Self::Place(id) => id.as_str(),
            Self::Event(id) => id.as_str(),
            Self::Person(id) => id.as_str(),
        }
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}

impl From<FileId> for EntityRef {
    fn from(value: FileId) -> Self {
        Self::File(value)
    }
}

impl From<SourceId> for EntityRef {
    fn from(value: SourceId) -> Self {
        Self::Source(value)
    }
}

impl From<CitationId> for EntityRef {
    fn from(value: CitationId) -> Self {
        Self::Citation(value)
    }
}

impl From<PlaceId> for EntityRef {
    fn from(value: PlaceId) -> Self {
        Self::Place(value)
    }
}

impl From<EventId> for EntityRef {
    fn from(value: EventId) -> Self {
        Self::Event(value)
    }
}

impl From<PersonId> for EntityRef {
    fn from(value: PersonId) -> Self {
        Self::Person(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityKind, EntityRef, PersonId, PlaceId, PresenceId};

    #[test]
    fn entity_ref_reports_kind_and_id() {
        let reference = EntityRef::from(PersonId::new("P0"));
        assert_eq!(reference.kind(), EntityKind::Person);
        assert_eq!(reference.id(), "P0");
        assert_eq!(reference.to_string(), "person:P0");
    }

    #[test]
    fn capability_kinds_match_entity_shapes() {
        assert!(EntityKind::Event.has_files());
        assert!(!EntityKind::Place.has_files());
        assert!(EntityKind::Person.has_citations());
        assert!(!EntityKind::Source.has_citations());
        assert!(!EntityRef::from(PlaceId::new("L0")).kind().has_citations());
    }

    #[test]
    fn presence_ids_are_unique() {
        assert_ne!(PresenceId::new(), PresenceId::new());
    }
}
