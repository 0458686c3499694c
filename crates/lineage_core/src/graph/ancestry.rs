//! Ancestry registry.
//!
//! # Responsibility
//! - Own every entity of every kind, keyed by id.
//! - Register entities built by the importer and hand read-only views to the
//!   renderer.
//!
//! # Invariants
//! - Ids are unique per kind; the registry never generates importer ids.
//! - Removing an entity does not scrub its partners' back-references; callers
//!   clear relations first when they need a clean graph.

use crate::graph::edit::EntityMut;
use crate::graph::relations::{CitationSource, PresenceEvent, PresencePerson};
use crate::graph::{GraphError, GraphResult};
use crate::model::capability::Identifiable;
use crate::model::event::{Event, Presence, PresenceRole};
use crate::model::file::File;
use crate::model::ids::{
    CitationId, EntityKind, EventId, FileId, PersonId, PlaceId, PresenceId, SourceId,
};
use crate::model::person::Person;
use crate::model::place::Place;
use crate::model::source::{Citation, Source};
use log::{debug, warn};
use std::collections::btree_map::{BTreeMap, Entry, Values};

/// Entity kind stored in the registry.
pub trait Entity: Identifiable + Sized + sealed::Table {
    const KIND: EntityKind;
}

/// Raw table access stays inside the crate; outside callers go through the
/// registry operations.
pub(crate) mod sealed {
    use super::Ancestry;
    use crate::model::capability::Identifiable;
    use std::collections::BTreeMap;

    pub trait Table: Identifiable + Sized {
        fn table(graph: &Ancestry) -> &BTreeMap<Self::Id, Self>;
        fn table_mut(graph: &mut Ancestry) -> &mut BTreeMap<Self::Id, Self>;
    }
}

macro_rules! registry_entity {
    ($entity:ty, $kind:expr, $field:ident) => {
        impl Entity for $entity {
            const KIND: EntityKind = $kind;
        }

        impl sealed::Table for $entity {
            fn table(graph: &Ancestry) -> &BTreeMap<Self::Id, Self> {
                &graph.$field
            }

            fn table_mut(graph: &mut Ancestry) -> &mut BTreeMap<Self::Id, Self> {
                &mut graph.$field
            }
        }
    };
}

registry_entity!(File, EntityKind::File, files);
registry_entity!(Source, EntityKind::Source, sources);
registry_entity!(Citation, EntityKind::Citation, citations);
registry_entity!(Place, EntityKind::Place, places);
registry_entity!(Event, EntityKind::Event, events);
registry_entity!(Presence, EntityKind::Presence, presences);
registry_entity!(Person, EntityKind::Person, people);

/// Aggregate of all entities, passed from importer to renderer.
#[derive(Debug, Default)]
pub struct Ancestry {
    files: BTreeMap<FileId, File>,
    people: BTreeMap<PersonId, Person>,
    places: BTreeMap<PlaceId, Place>,
    events: BTreeMap<EventId, Event>,
    sources: BTreeMap<SourceId, Source>,
    citations: BTreeMap<CitationId, Citation>,
    presences: BTreeMap<PresenceId, Presence>,
}

impl Ancestry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &BTreeMap<FileId, File> {
        &self.files
    }

    pub fn people(&self) -> &BTreeMap<PersonId, Person> {
        &self.people
    }

    pub fn places(&self) -> &BTreeMap<PlaceId, Place> {
        &self.places
    }

    pub fn events(&self) -> &BTreeMap<EventId, Event> {
        &self.events
    }

    pub fn sources(&self) -> &BTreeMap<SourceId, Source> {
        &self.sources
    }

    pub fn citations(&self) -> &BTreeMap<CitationId, Citation> {
        &self.citations
    }

    pub fn presences(&self) -> &BTreeMap<PresenceId, Presence> {
        &self.presences
    }

    pub fn file(&self, id: &FileId) -> Option<&File> {
        self.files.get(id)
    }

    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.people.get(id)
    }

    pub fn place(&self, id: &PlaceId) -> Option<&Place> {
        self.places.get(id)
    }

    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.get(id)
    }

    pub fn source(&self, id: &SourceId) -> Option<&Source> {
        self.sources.get(id)
    }

    pub fn citation(&self, id: &CitationId) -> Option<&Citation> {
        self.citations.get(id)
    }

    pub fn presence(&self, id: &PresenceId) -> Option<&Presence> {
        self.presences.get(id)
    }

    /// Looks up any registered entity by kind and id.
    pub fn get<E: Entity>(&self, id: &E::Id) -> Option<&E> {
        E::table(self).get(id)
    }

    /// Write handle for plain attributes (names, dates, flags, links).
    ///
    /// Ids and paired relation collections stay read-only through the
    /// handle; use the relation operations to change them.
    pub fn get_mut<E: Entity>(&mut self, id: &E::Id) -> Option<EntityMut<'_, E>> {
        E::table_mut(self).get_mut(id).map(EntityMut::new)
    }

    pub fn contains<E: Entity>(&self, id: &E::Id) -> bool {
        E::table(self).contains_key(id)
    }

    /// All entities of one kind, in id order.
    pub fn iter<E: Entity>(&self) -> Values<'_, E::Id, E> {
        E::table(self).values()
    }

    pub fn len<E: Entity>(&self) -> usize {
        E::table(self).len()
    }

    /// Removes an entity from the registry without touching its partners.
    ///
    /// Partners may keep dangling back-references afterward; clearing the
    /// entity's relations first is the caller's responsibility.
    pub fn remove<E: Entity>(&mut self, id: &E::Id) -> Option<E> {
        let removed = E::table_mut(self).remove(id);
        if removed.is_some() {
            debug!(
                "event=entity_remove module=graph status=ok kind={} id={}",
                E::KIND,
                id
            );
        }
        removed
    }

    pub fn insert_file(&mut self, file: File) -> GraphResult<FileId> {
        self.register(file)
    }

    pub fn insert_person(&mut self, person: Person) -> GraphResult<PersonId> {
        self.register(person)
    }

    pub fn insert_place(&mut self, place: Place) -> GraphResult<PlaceId> {
        self.register(place)
    }

    pub fn insert_event(&mut self, event: Event) -> GraphResult<EventId> {
        self.register(event)
    }

    pub fn insert_source(&mut self, source: Source) -> GraphResult<SourceId> {
        self.register(source)
    }

    /// Registers a citation and links it into its source's citations.
    ///
    /// # Errors
    /// - `UnknownEntity` when the cited source is not registered.
    /// - `DuplicateId` when the citation id is taken.
    pub fn insert_citation(&mut self, mut citation: Citation) -> GraphResult<CitationId> {
        let source = citation.source.take();
        if let Some(source) = &source {
            if !self.sources.contains_key(source) {
                return Err(rejected(GraphError::unknown(EntityKind::Source, source)));
            }
        }
        let id = self.register(citation)?;
        if source.is_some() {
            self.assign_linked::<CitationSource>(&id, source)?;
        }
        Ok(id)
    }

    /// Registers a presence. A fresh `Presence` arrives unlinked; one handed
    /// back by `remove` is relinked to the person and event it still names.
    ///
    /// # Errors
    /// - `UnknownEntity` when a named endpoint is not registered; nothing is
    ///   registered then.
    /// - `DuplicateId` when the presence id is taken.
    pub fn insert_presence(&mut self, mut presence: Presence) -> GraphResult<PresenceId> {
        let person = presence.person.take();
        let event = presence.event.take();
        if let Some(person) = &person {
            self.require::<Person>(person).map_err(rejected)?;
        }
        if let Some(event) = &event {
            self.require::<Event>(event).map_err(rejected)?;
        }
        let id = self.register(presence)?;
        if person.is_some() {
            self.assign_linked::<PresencePerson>(&id, person)?;
        }
        if event.is_some() {
            self.assign_linked::<PresenceEvent>(&id, event)?;
        }
        Ok(id)
    }

    /// Creates a presence of `person` at `event` under `role` and links both
    /// ends.
    pub fn add_presence(
        &mut self,
        person: &PersonId,
        event: &EventId,
        role: PresenceRole,
    ) -> GraphResult<PresenceId> {
        self.require::<Person>(person).map_err(rejected)?;
        self.require::<Event>(event).map_err(rejected)?;

        let id = self.register(Presence::new(role))?;
        self.assign_linked::<PresencePerson>(&id, Some(person.clone()))?;
        self.assign_linked::<PresenceEvent>(&id, Some(event.clone()))?;
        Ok(id)
    }

    pub(crate) fn require<E: Entity>(&self, id: &E::Id) -> GraphResult<&E> {
        E::table(self)
            .get(id)
            .ok_or_else(|| GraphError::unknown(E::KIND, id))
    }

    pub(crate) fn require_mut<E: Entity>(&mut self, id: &E::Id) -> GraphResult<&mut E> {
        E::table_mut(self)
            .get_mut(id)
            .ok_or_else(|| GraphError::unknown(E::KIND, id))
    }

    fn register<E: Entity>(&mut self, entity: E) -> GraphResult<E::Id> {
        let id = entity.id().clone();
        match E::table_mut(self).entry(id.clone()) {
            Entry::Occupied(_) => Err(rejected(GraphError::DuplicateId {
                kind: E::KIND,
                id: id.to_string(),
            })),
            Entry::Vacant(slot) => {
                slot.insert(entity);
                debug!(
                    "event=entity_insert module=graph status=ok kind={} id={}",
                    E::KIND,
                    id
                );
                Ok(id)
            }
        }
    }
}

/// Logs a rejected mutation and hands the error back.
pub(crate) fn rejected(err: GraphError) -> GraphError {
    warn!("event=graph_reject module=graph status=error reason={err}");
    err
}

/// Treats a missing partner as already detached.
pub(crate) fn tolerate_missing(result: GraphResult<()>) -> GraphResult<()> {
    match result {
        Err(GraphError::UnknownEntity { .. }) => Ok(()),
        other => other,
    }
}
