//! Event and presence entities.
//!
//! # Invariants
//! - A presence joins at most one person to at most one event.
//! - Event and presence type names serialize to stable lowercase wire names.

use crate::collection::LinkedSet;
use crate::model::capability::sealed::{CitationRefsMut, FileAttachmentsMut};
use crate::model::capability::{
    CitationRefs, Dated, FileAttachments, HasCitations, HasFiles, Identifiable,
};
use crate::model::date::Datey;
use crate::model::ids::{EventId, PersonId, PlaceId, PresenceId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Kind of life event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Birth,
    Baptism,
    Cremation,
    Death,
    Burial,
    Marriage,
    MarriageBanns,
    Residence,
    Immigration,
    Emigration,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Birth => "birth",
            Self::Baptism => "baptism",
            Self::Cremation => "cremation",
            Self::Death => "death",
            Self::Burial => "burial",
            Self::Marriage => "marriage",
            Self::MarriageBanns => "marriage-banns",
            Self::Residence => "residence",
            Self::Immigration => "immigration",
            Self::Emigration => "emigration",
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event in which people take part through presences.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    id: EventId,
    event_type: EventType,
    date: Option<Datey>,
    attachments: FileAttachments,
    citation_refs: CitationRefs,
    pub(crate) place: Option<PlaceId>,
    pub(crate) presences: LinkedSet<PresenceId>,
}

impl Event {
    pub fn new(id: impl Into<EventId>, event_type: EventType) -> Self {
        Self {
            id: id.into(),
            event_type,
            date: None,
            attachments: FileAttachments::new(),
            citation_refs: CitationRefs::new(),
            place: None,
            presences: LinkedSet::ordered(),
        }
    }

    /// Builder-style date assignment for importers.
    pub fn with_date(mut self, date: impl Into<Datey>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn set_event_type(&mut self, event_type: EventType) {
        self.event_type = event_type;
    }

    pub fn place(&self) -> Option<&PlaceId> {
        self.place.as_ref()
    }

    pub fn presences(&self) -> &LinkedSet<PresenceId> {
        &self.presences
    }
}

impl Identifiable for Event {
    type Id = EventId;

    fn id(&self) -> &EventId {
        &self.id
    }
}

impl Dated for Event {
    fn date(&self) -> Option<&Datey> {
        self.date.as_ref()
    }

    fn set_date(&mut self, date: Option<Datey>) {
        self.date = date;
    }
}

impl HasFiles for Event {
    fn file_attachments(&self) -> &FileAttachments {
        &self.attachments
    }
}

impl FileAttachmentsMut for Event {
    fn file_attachments_mut(&mut self) -> &mut FileAttachments {
        &mut self.attachments
    }
}

impl HasCitations for Event {
    fn citation_refs(&self) -> &CitationRefs {
        &self.citation_refs
    }
}

impl CitationRefsMut for Event {
    fn citation_refs_mut(&mut self) -> &mut CitationRefs {
        &mut self.citation_refs
    }
}

/// Role a person played in an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceRole {
    Subject,
    Witness,
    Attendee,
}

impl PresenceRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Witness => "witness",
            Self::Attendee => "attendee",
        }
    }
}

/// Join entity: one person present at one event under one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presence {
    id: PresenceId,
    role: PresenceRole,
    pub(crate) person: Option<PersonId>,
    pub(crate) event: Option<EventId>,
}

impl Presence {
    pub fn new(role: PresenceRole) -> Self {
        Self {
            id: PresenceId::new(),
            role,
            person: None,
            event: None,
        }
    }

    pub fn role(&self) -> PresenceRole {
        self.role
    }

    pub fn person(&self) -> Option<&PersonId> {
        self.person.as_ref()
    }

    pub fn event(&self) -> Option<&EventId> {
        self.event.as_ref()
    }

    /// Whether both participants are linked.
    pub fn is_linked(&self) -> bool {
        self.person.is_some() && self.event.is_some()
    }
}

impl Identifiable for Presence {
    type Id = PresenceId;

    fn id(&self) -> &PresenceId {
        &self.id
    }
}
