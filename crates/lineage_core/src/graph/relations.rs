//! Concrete relation pairs of the ancestry graph.
//!
//! # Responsibility
//! - Bind each entity collection to its paired side.
//! - Validate members (registration, allowed kinds, containment cycles).
//!
//! # Invariants
//! - Every marker names its partner in `on_added`/`on_removed` or through
//!   `OneRelation::Inverse`; no relation is one-sided.
//! - Dissolving either end of a presence dissolves the other end.

use crate::collection::LinkedSet;
use crate::graph::ancestry::{Ancestry, Entity};
use crate::graph::relation::{
    mirror_add, mirror_assign, mirror_clear, mirror_remove, ManyRelation, OneRelation,
};
use crate::graph::{GraphError, GraphResult};
use crate::model::capability::{HasCitations, HasFiles};
use crate::model::event::{Event, Presence};
use crate::model::file::File;
use crate::model::ids::{
    CitationId, EntityKind, EntityRef, EventId, FileId, PersonId, PlaceId, PresenceId, SourceId,
};
use crate::model::person::Person;
use crate::model::place::Place;
use crate::model::source::{Citation, Source};
use std::fmt::Display;
use std::marker::PhantomData;

/// Files attached to an entity of kind `E`. Paired with `FileEntities`.
pub struct FilesOf<E>(PhantomData<fn() -> E>);

pub type SourceFiles = FilesOf<Source>;
pub type CitationFiles = FilesOf<Citation>;
pub type EventFiles = FilesOf<Event>;
pub type PersonFiles = FilesOf<Person>;

impl<E> ManyRelation for FilesOf<E>
where
    E: Entity + HasFiles + 'static,
    EntityRef: From<E::Id>,
{
    type Owner = E::Id;
    type Member = FileId;

    const NAME: &'static str = "files";

    fn members<'a>(graph: &'a Ancestry, owner: &E::Id) -> GraphResult<&'a LinkedSet<FileId>> {
        Ok(graph.require::<E>(owner)?.files())
    }

    fn members_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &E::Id,
    ) -> GraphResult<&'a mut LinkedSet<FileId>> {
        Ok(&mut graph.require_mut::<E>(owner)?.file_attachments_mut().files)
    }

    fn check(graph: &Ancestry, _owner: &E::Id, member: &FileId) -> GraphResult<()> {
        graph.require::<File>(member).map(|_| ())
    }

    fn on_added(graph: &mut Ancestry, owner: &E::Id, member: &FileId) -> GraphResult<()> {
        mirror_add::<FileEntities>(graph, member, &EntityRef::from(owner.clone()))
    }

    fn on_removed(graph: &mut Ancestry, owner: &E::Id, member: &FileId) -> GraphResult<()> {
        mirror_remove::<FileEntities>(graph, member, &EntityRef::from(owner.clone()))
    }
}

/// Entities a file is attached to. Members must be sources, citations,
/// events or people.
pub struct FileEntities;

impl ManyRelation for FileEntities {
    type Owner = FileId;
    type Member = EntityRef;

    const NAME: &'static str = "file_entities";

    fn members<'a>(graph: &'a Ancestry, owner: &FileId) -> GraphResult<&'a LinkedSet<EntityRef>> {
        Ok(graph.require::<File>(owner)?.entities())
    }

    fn members_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &FileId,
    ) -> GraphResult<&'a mut LinkedSet<EntityRef>> {
        Ok(&mut graph.require_mut::<File>(owner)?.entities)
    }

    fn check(graph: &Ancestry, _owner: &FileId, member: &EntityRef) -> GraphResult<()> {
        if !member.kind().has_files() {
            return Err(invalid_member(Self::NAME, member));
        }
        ensure_registered(graph, member)
    }

    fn on_added(graph: &mut Ancestry, owner: &FileId, member: &EntityRef) -> GraphResult<()> {
        match member {
            EntityRef::Source(id) => mirror_add::<SourceFiles>(graph, id, owner),
            EntityRef::Citation(id) => mirror_add::<CitationFiles>(graph, id, owner),
            EntityRef::Event(id) => mirror_add::<EventFiles>(graph, id, owner),
            EntityRef::Person(id) => mirror_add::<PersonFiles>(graph, id, owner),
            other => Err(invalid_member(Self::NAME, other)),
        }
    }

    fn on_removed(graph: &mut Ancestry, owner: &FileId, member: &EntityRef) -> GraphResult<()> {
        match member {
            EntityRef::Source(id) => mirror_remove::<SourceFiles>(graph, id, owner),
            EntityRef::Citation(id) => mirror_remove::<CitationFiles>(graph, id, owner),
            EntityRef::Event(id) => mirror_remove::<EventFiles>(graph, id, owner),
            EntityRef::Person(id) => mirror_remove::<PersonFiles>(graph, id, owner),
            _ => Ok(()),
        }
    }
}

/// Citations claiming an entity of kind `E`. Paired with `CitationClaims`.
pub struct CitationsOf<E>(PhantomData<fn() -> E>);

pub type EventCitations = CitationsOf<Event>;
pub type PersonCitations = CitationsOf<Person>;

impl<E> ManyRelation for CitationsOf<E>
where
    E: Entity + HasCitations + 'static,
    EntityRef: From<E::Id>,
{
    type Owner = E::Id;
    type Member = CitationId;

    const NAME: &'static str = "citations";

    fn members<'a>(graph: &'a Ancestry, owner: &E::Id) -> GraphResult<&'a LinkedSet<CitationId>> {
        Ok(graph.require::<E>(owner)?.citations())
    }

    fn members_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &E::Id,
    ) -> GraphResult<&'a mut LinkedSet<CitationId>> {
        Ok(&mut graph.require_mut::<E>(owner)?.citation_refs_mut().citations)
    }

    fn check(graph: &Ancestry, _owner: &E::Id, member: &CitationId) -> GraphResult<()> {
        graph.require::<Citation>(member).map(|_| ())
    }

    fn on_added(graph: &mut Ancestry, owner: &E::Id, member: &CitationId) -> GraphResult<()> {
        mirror_add::<CitationClaims>(graph, member, &EntityRef::from(owner.clone()))
    }

    fn on_removed(graph: &mut Ancestry, owner: &E::Id, member: &CitationId) -> GraphResult<()> {
        mirror_remove::<CitationClaims>(graph, member, &EntityRef::from(owner.clone()))
    }
}

/// Entities a citation backs. Members must be events or people.
pub struct CitationClaims;

impl ManyRelation for CitationClaims {
    type Owner = CitationId;
    type Member = EntityRef;

    const NAME: &'static str = "claims";

    fn members<'a>(
        graph: &'a Ancestry,
        owner: &CitationId,
    ) -> GraphResult<&'a LinkedSet<EntityRef>> {
        Ok(graph.require::<Citation>(owner)?.claims())
    }

    fn members_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &CitationId,
    ) -> GraphResult<&'a mut LinkedSet<EntityRef>> {
        Ok(&mut graph.require_mut::<Citation>(owner)?.claims)
    }

    fn check(graph: &Ancestry, _owner: &CitationId, member: &EntityRef) -> GraphResult<()> {
        if !member.kind().has_citations() {
            return Err(invalid_member(Self::NAME, member));
        }
        ensure_registered(graph, member)
    }

    fn on_added(graph: &mut Ancestry, owner: &CitationId, member: &EntityRef) -> GraphResult<()> {
        match member {
            EntityRef::Event(id) => mirror_add::<EventCitations>(graph, id, owner),
            EntityRef::Person(id) => mirror_add::<PersonCitations>(graph, id, owner),
            other => Err(invalid_member(Self::NAME, other)),
        }
    }

    fn on_removed(
        graph: &mut Ancestry,
        owner: &CitationId,
        member: &EntityRef,
    ) -> GraphResult<()> {
        match member {
            EntityRef::Event(id) => mirror_remove::<EventCitations>(graph, id, owner),
            EntityRef::Person(id) => mirror_remove::<PersonCitations>(graph, id, owner),
            _ => Ok(()),
        }
    }
}

/// Citations of a source. Paired with `CitationSource`.
pub struct SourceCitations;

impl ManyRelation for SourceCitations {
    type Owner = SourceId;
    type Member = CitationId;

    const NAME: &'static str = "source_citations";

    fn members<'a>(
        graph: &'a Ancestry,
        owner: &SourceId,
    ) -> GraphResult<&'a LinkedSet<CitationId>> {
        Ok(graph.require::<Source>(owner)?.citations())
    }

    fn members_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &SourceId,
    ) -> GraphResult<&'a mut LinkedSet<CitationId>> {
        Ok(&mut graph.require_mut::<Source>(owner)?.citations)
    }

    fn check(graph: &Ancestry, _owner: &SourceId, member: &CitationId) -> GraphResult<()> {
        graph.require::<Citation>(member).map(|_| ())
    }

    fn on_added(graph: &mut Ancestry, owner: &SourceId, member: &CitationId) -> GraphResult<()> {
        mirror_assign::<CitationSource>(graph, member, owner)
    }

    fn on_removed(graph: &mut Ancestry, owner: &SourceId, member: &CitationId) -> GraphResult<()> {
        mirror_clear::<CitationSource>(graph, member, owner)
    }
}

/// Source a citation points into.
pub struct CitationSource;

impl OneRelation for CitationSource {
    type Owner = CitationId;
    type Target = SourceId;
    type Inverse = SourceCitations;

    const NAME: &'static str = "citation_source";

    fn slot<'a>(graph: &'a Ancestry, owner: &CitationId) -> GraphResult<&'a Option<SourceId>> {
        Ok(&graph.require::<Citation>(owner)?.source)
    }

    fn slot_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &CitationId,
    ) -> GraphResult<&'a mut Option<SourceId>> {
        Ok(&mut graph.require_mut::<Citation>(owner)?.source)
    }
}

/// Sources nested directly inside a source. Paired with `SourceContainedBy`.
pub struct SourceContains;

impl ManyRelation for SourceContains {
    type Owner = SourceId;
    type Member = SourceId;

    const NAME: &'static str = "contains";

    fn members<'a>(graph: &'a Ancestry, owner: &SourceId) -> GraphResult<&'a LinkedSet<SourceId>> {
        Ok(graph.require::<Source>(owner)?.contains())
    }

    fn members_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &SourceId,
    ) -> GraphResult<&'a mut LinkedSet<SourceId>> {
        Ok(&mut graph.require_mut::<Source>(owner)?.contains)
    }

    fn check(graph: &Ancestry, owner: &SourceId, member: &SourceId) -> GraphResult<()> {
        graph.require::<Source>(member)?;
        ensure_acyclic::<SourceTree>(graph, member, owner)
    }

    fn on_added(graph: &mut Ancestry, owner: &SourceId, member: &SourceId) -> GraphResult<()> {
        mirror_assign::<SourceContainedBy>(graph, member, owner)
    }

    fn on_removed(graph: &mut Ancestry, owner: &SourceId, member: &SourceId) -> GraphResult<()> {
        mirror_clear::<SourceContainedBy>(graph, member, owner)
    }
}

/// Source that directly contains a source.
pub struct SourceContainedBy;

impl OneRelation for SourceContainedBy {
    type Owner = SourceId;
    type Target = SourceId;
    type Inverse = SourceContains;

    const NAME: &'static str = "contained_by";

    fn slot<'a>(graph: &'a Ancestry, owner: &SourceId) -> GraphResult<&'a Option<SourceId>> {
        Ok(&graph.require::<Source>(owner)?.contained_by)
    }

    fn slot_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &SourceId,
    ) -> GraphResult<&'a mut Option<SourceId>> {
        Ok(&mut graph.require_mut::<Source>(owner)?.contained_by)
    }

    fn check(graph: &Ancestry, owner: &SourceId, target: &SourceId) -> GraphResult<()> {
        graph.require::<Source>(target)?;
        ensure_acyclic::<SourceTree>(graph, owner, target)
    }
}

/// Events that happened at a place. Paired with `EventPlace`.
pub struct PlaceEvents;

impl ManyRelation for PlaceEvents {
    type Owner = PlaceId;
    type Member = EventId;

    const NAME: &'static str = "place_events";

    fn members<'a>(graph: &'a Ancestry, owner: &PlaceId) -> GraphResult<&'a LinkedSet<EventId>> {
        Ok(graph.require::<Place>(owner)?.events())
    }

    fn members_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &PlaceId,
    ) -> GraphResult<&'a mut LinkedSet<EventId>> {
        Ok(&mut graph.require_mut::<Place>(owner)?.events)
    }

    fn check(graph: &Ancestry, _owner: &PlaceId, member: &EventId) -> GraphResult<()> {
        graph.require::<Event>(member).map(|_| ())
    }

    fn on_added(graph: &mut Ancestry, owner: &PlaceId, member: &EventId) -> GraphResult<()> {
        mirror_assign::<EventPlace>(graph, member, owner)
    }

    fn on_removed(graph: &mut Ancestry, owner: &PlaceId, member: &EventId) -> GraphResult<()> {
        mirror_clear::<EventPlace>(graph, member, owner)
    }
}

/// Place where an event happened.
pub struct EventPlace;

impl OneRelation for EventPlace {
    type Owner = EventId;
    type Target = PlaceId;
    type Inverse = PlaceEvents;

    const NAME: &'static str = "event_place";

    fn slot<'a>(graph: &'a Ancestry, owner: &EventId) -> GraphResult<&'a Option<PlaceId>> {
        Ok(&graph.require::<Event>(owner)?.place)
    }

    fn slot_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &EventId,
    ) -> GraphResult<&'a mut Option<PlaceId>> {
        Ok(&mut graph.require_mut::<Event>(owner)?.place)
    }
}

/// Places directly inside a place. Paired with `PlaceEnclosedBy`.
pub struct PlaceEncloses;

impl ManyRelation for PlaceEncloses {
    type Owner = PlaceId;
    type Member = PlaceId;

    const NAME: &'static str = "encloses";

    fn members<'a>(graph: &'a Ancestry, owner: &PlaceId) -> GraphResult<&'a LinkedSet<PlaceId>> {
        Ok(graph.require::<Place>(owner)?.encloses())
    }

    fn members_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &PlaceId,
    ) -> GraphResult<&'a mut LinkedSet<PlaceId>> {
        Ok(&mut graph.require_mut::<Place>(owner)?.encloses)
    }

    fn check(graph: &Ancestry, owner: &PlaceId, member: &PlaceId) -> GraphResult<()> {
        graph.require::<Place>(member)?;
        ensure_acyclic::<PlaceTree>(graph, member, owner)
    }

    fn on_added(graph: &mut Ancestry, owner: &PlaceId, member: &PlaceId) -> GraphResult<()> {
        mirror_assign::<PlaceEnclosedBy>(graph, member, owner)
    }

    fn on_removed(graph: &mut Ancestry, owner: &PlaceId, member: &PlaceId) -> GraphResult<()> {
        mirror_clear::<PlaceEnclosedBy>(graph, member, owner)
    }
}

/// Place that directly encloses a place.
pub struct PlaceEnclosedBy;

impl OneRelation for PlaceEnclosedBy {
    type Owner = PlaceId;
    type Target = PlaceId;
    type Inverse = PlaceEncloses;

    const NAME: &'static str = "enclosed_by";

    fn slot<'a>(graph: &'a Ancestry, owner: &PlaceId) -> GraphResult<&'a Option<PlaceId>> {
        Ok(&graph.require::<Place>(owner)?.enclosed_by)
    }

    fn slot_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &PlaceId,
    ) -> GraphResult<&'a mut Option<PlaceId>> {
        Ok(&mut graph.require_mut::<Place>(owner)?.enclosed_by)
    }

    fn check(graph: &Ancestry, owner: &PlaceId, target: &PlaceId) -> GraphResult<()> {
        graph.require::<Place>(target)?;
        ensure_acyclic::<PlaceTree>(graph, owner, target)
    }
}

/// Presences at an event. Paired with `PresenceEvent`.
pub struct EventPresences;

impl ManyRelation for EventPresences {
    type Owner = EventId;
    type Member = PresenceId;

    const NAME: &'static str = "event_presences";

    fn members<'a>(graph: &'a Ancestry, owner: &EventId) -> GraphResult<&'a LinkedSet<PresenceId>> {
        Ok(graph.require::<Event>(owner)?.presences())
    }

    fn members_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &EventId,
    ) -> GraphResult<&'a mut LinkedSet<PresenceId>> {
        Ok(&mut graph.require_mut::<Event>(owner)?.presences)
    }

    fn check(graph: &Ancestry, _owner: &EventId, member: &PresenceId) -> GraphResult<()> {
        graph.require::<Presence>(member).map(|_| ())
    }

    fn on_added(graph: &mut Ancestry, owner: &EventId, member: &PresenceId) -> GraphResult<()> {
        mirror_assign::<PresenceEvent>(graph, member, owner)
    }

    fn on_removed(graph: &mut Ancestry, owner: &EventId, member: &PresenceId) -> GraphResult<()> {
        mirror_clear::<PresenceEvent>(graph, member, owner)
    }
}

/// Event a presence belongs to.
pub struct PresenceEvent;

impl OneRelation for PresenceEvent {
    type Owner = PresenceId;
    type Target = EventId;
    type Inverse = EventPresences;

    const NAME: &'static str = "presence_event";

    fn slot<'a>(graph: &'a Ancestry, owner: &PresenceId) -> GraphResult<&'a Option<EventId>> {
        Ok(&graph.require::<Presence>(owner)?.event)
    }

    fn slot_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &PresenceId,
    ) -> GraphResult<&'a mut Option<EventId>> {
        Ok(&mut graph.require_mut::<Presence>(owner)?.event)
    }

    fn on_cleared(
        graph: &mut Ancestry,
        owner: &PresenceId,
        _previous: &EventId,
    ) -> GraphResult<()> {
        if PresencePerson::slot(graph, owner)?.is_some() {
            graph.assign_linked::<PresencePerson>(owner, None)?;
        }
        Ok(())
    }
}

/// Presences of a person. Paired with `PresencePerson`.
pub struct PersonPresences;

impl ManyRelation for PersonPresences {
    type Owner = PersonId;
    type Member = PresenceId;

    const NAME: &'static str = "person_presences";

    fn members<'a>(
        graph: &'a Ancestry,
        owner: &PersonId,
    ) -> GraphResult<&'a LinkedSet<PresenceId>> {
        Ok(graph.require::<Person>(owner)?.presences())
    }

    fn members_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &PersonId,
    ) -> GraphResult<&'a mut LinkedSet<PresenceId>> {
        Ok(&mut graph.require_mut::<Person>(owner)?.presences)
    }

    fn check(graph: &Ancestry, _owner: &PersonId, member: &PresenceId) -> GraphResult<()> {
        graph.require::<Presence>(member).map(|_| ())
    }

    fn on_added(graph: &mut Ancestry, owner: &PersonId, member: &PresenceId) -> GraphResult<()> {
        mirror_assign::<PresencePerson>(graph, member, owner)
    }

    fn on_removed(
        graph: &mut Ancestry,
        owner: &PersonId,
        member: &PresenceId,
    ) -> GraphResult<()> {
        mirror_clear::<PresencePerson>(graph, member, owner)
    }
}

/// Person a presence belongs to.
pub struct PresencePerson;

impl OneRelation for PresencePerson {
    type Owner = PresenceId;
    type Target = PersonId;
    type Inverse = PersonPresences;

    const NAME: &'static str = "presence_person";

    fn slot<'a>(graph: &'a Ancestry, owner: &PresenceId) -> GraphResult<&'a Option<PersonId>> {
        Ok(&graph.require::<Presence>(owner)?.person)
    }

    fn slot_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &PresenceId,
    ) -> GraphResult<&'a mut Option<PersonId>> {
        Ok(&mut graph.require_mut::<Presence>(owner)?.person)
    }

    fn on_cleared(
        graph: &mut Ancestry,
        owner: &PresenceId,
        _previous: &PersonId,
    ) -> GraphResult<()> {
        if PresenceEvent::slot(graph, owner)?.is_some() {
            graph.assign_linked::<PresenceEvent>(owner, None)?;
        }
        Ok(())
    }
}

/// Parents of a person. Paired with `PersonChildren`.
pub struct PersonParents;

impl ManyRelation for PersonParents {
    type Owner = PersonId;
    type Member = PersonId;

    const NAME: &'static str = "parents";

    fn members<'a>(graph: &'a Ancestry, owner: &PersonId) -> GraphResult<&'a LinkedSet<PersonId>> {
        Ok(graph.require::<Person>(owner)?.parents())
    }

    fn members_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &PersonId,
    ) -> GraphResult<&'a mut LinkedSet<PersonId>> {
        Ok(&mut graph.require_mut::<Person>(owner)?.parents)
    }

    fn check(graph: &Ancestry, _owner: &PersonId, member: &PersonId) -> GraphResult<()> {
        graph.require::<Person>(member).map(|_| ())
    }

    fn on_added(graph: &mut Ancestry, owner: &PersonId, member: &PersonId) -> GraphResult<()> {
        mirror_add::<PersonChildren>(graph, member, owner)
    }

    fn on_removed(graph: &mut Ancestry, owner: &PersonId, member: &PersonId) -> GraphResult<()> {
        mirror_remove::<PersonChildren>(graph, member, owner)
    }
}

/// Children of a person. Paired with `PersonParents`.
pub struct PersonChildren;

impl ManyRelation for PersonChildren {
    type Owner = PersonId;
    type Member = PersonId;

    const NAME: &'static str = "children";

    fn members<'a>(graph: &'a Ancestry, owner: &PersonId) -> GraphResult<&'a LinkedSet<PersonId>> {
        Ok(graph.require::<Person>(owner)?.children())
    }

    fn members_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &PersonId,
    ) -> GraphResult<&'a mut LinkedSet<PersonId>> {
        Ok(&mut graph.require_mut::<Person>(owner)?.children)
    }

    fn check(graph: &Ancestry, _owner: &PersonId, member: &PersonId) -> GraphResult<()> {
        graph.require::<Person>(member).map(|_| ())
    }

    fn on_added(graph: &mut Ancestry, owner: &PersonId, member: &PersonId) -> GraphResult<()> {
        mirror_add::<PersonParents>(graph, member, owner)
    }

    fn on_removed(graph: &mut Ancestry, owner: &PersonId, member: &PersonId) -> GraphResult<()> {
        mirror_remove::<PersonParents>(graph, member, owner)
    }
}

/// Single-parent containment hierarchy (places, sources).
pub trait Containment {
    type Node: Clone + PartialEq + Display;

    const KIND: EntityKind;

    /// Direct parent, `None` for roots and unregistered nodes.
    fn parent(graph: &Ancestry, node: &Self::Node) -> Option<Self::Node>;

    /// Direct children, empty for unregistered nodes.
    fn children(graph: &Ancestry, node: &Self::Node) -> Vec<Self::Node>;
}

/// Place hierarchy (`enclosed_by` / `encloses`).
pub struct PlaceTree;

impl Containment for PlaceTree {
    type Node = PlaceId;

    const KIND: EntityKind = EntityKind::Place;

    fn parent(graph: &Ancestry, node: &PlaceId) -> Option<PlaceId> {
        graph.place(node).and_then(|place| place.enclosed_by().cloned())
    }

    fn children(graph: &Ancestry, node: &PlaceId) -> Vec<PlaceId> {
        graph
            .place(node)
            .map(|place| place.encloses().to_vec())
            .unwrap_or_default()
    }
}

/// Source hierarchy (`contained_by` / `contains`).
pub struct SourceTree;

impl Containment for SourceTree {
    type Node = SourceId;

    const KIND: EntityKind = EntityKind::Source;

    fn parent(graph: &Ancestry, node: &SourceId) -> Option<SourceId> {
        graph
            .source(node)
            .and_then(|source| source.contained_by().cloned())
    }

    fn children(graph: &Ancestry, node: &SourceId) -> Vec<SourceId> {
        graph
            .source(node)
            .map(|source| source.contains().to_vec())
            .unwrap_or_default()
    }
}

/// Rejects placing `node` under `parent` when `parent` is `node` itself or
/// one of its descendants.
pub(crate) fn ensure_acyclic<T: Containment>(
    graph: &Ancestry,
    node: &T::Node,
    parent: &T::Node,
) -> GraphResult<()> {
    let mut visited: Vec<T::Node> = Vec::new();
    let mut cursor = Some(parent.clone());
    while let Some(current) = cursor {
        if current == *node || visited.contains(&current) {
            return Err(GraphError::CyclicContainment {
                kind: T::KIND,
                node: node.to_string(),
                parent: parent.to_string(),
            });
        }
        cursor = T::parent(graph, &current);
        visited.push(current);
    }
    Ok(())
}

fn ensure_registered(graph: &Ancestry, member: &EntityRef) -> GraphResult<()> {
    match member {
        EntityRef::File(id) => graph.require::<File>(id).map(|_| ()),
        EntityRef::Source(id) => graph.require::<Source>(id).map(|_| ()),
        EntityRef::Citation(id) => graph.require::<Citation>(id).map(|_| ()),
        EntityRef::Place(id) => graph.require::<Place>(id).map(|_| ()),
        EntityRef::Event(id) => graph.require::<Event>(id).map(|_| ()),
        EntityRef::Person(id) => graph.require::<Person>(id).map(|_| ()),
    }
}

fn invalid_member(relation: &'static str, member: &EntityRef) -> GraphError {
    GraphError::InvalidRelationMember {
        relation,
        member: member.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{ensure_acyclic, PlaceEncloses, PlaceEnclosedBy, PlaceTree};
    use crate::graph::ancestry::Ancestry;
    use crate::graph::GraphError;
    use crate::model::ids::PlaceId;
    use crate::model::place::Place;

    fn places(ids: &[&str]) -> Ancestry {
        let mut ancestry = Ancestry::new();
        for id in ids {
            ancestry
                .insert_place(Place::new(*id, Vec::new()))
                .expect("insert place");
        }
        ancestry
    }

    #[test]
    fn acyclic_check_walks_the_parent_chain() {
        let mut ancestry = places(&["L0", "L1", "L2"]);
        let (l0, l1, l2) = (PlaceId::new("L0"), PlaceId::new("L1"), PlaceId::new("L2"));
        ancestry
            .set_linked::<PlaceEnclosedBy>(&l1, Some(l0.clone()))
            .expect("L1 under L0");
        ancestry
            .add_related::<PlaceEncloses, _>(&l1, [l2.clone()])
            .expect("L2 under L1");

        assert!(ensure_acyclic::<PlaceTree>(&ancestry, &l2, &l0).is_ok());
        assert!(ensure_acyclic::<PlaceTree>(&ancestry, &l0, &l2).is_err());
        assert!(ensure_acyclic::<PlaceTree>(&ancestry, &l0, &l0).is_err());
    }

    #[test]
    fn self_enclosure_is_rejected_without_mutation() {
        let mut ancestry = places(&["L0"]);
        let l0 = PlaceId::new("L0");
        let err = ancestry
            .add_related::<PlaceEncloses, _>(&l0, [l0.clone()])
            .expect_err("self containment must fail");
        assert!(matches!(err, GraphError::CyclicContainment { .. }));
        let place = ancestry.place(&l0).expect("place");
        assert!(place.encloses().is_empty());
        assert!(place.enclosed_by().is_none());
    }
}
