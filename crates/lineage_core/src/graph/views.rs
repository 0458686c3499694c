//! Derived, non-stored views over the live graph.
//!
//! # Invariants
//! - Views are recomputed on every call and never cached.
//! - Dangling ids left behind by `Ancestry::remove` are skipped.

use crate::graph::ancestry::{rejected, Ancestry};
use crate::graph::relations::{Containment, PlaceTree, SourceTree};
use crate::graph::GraphResult;
use crate::model::event::{Event, EventType, PresenceRole};
use crate::model::ids::{PersonId, PlaceId, SourceId};
use crate::model::person::Person;
use crate::model::place::Place;
use crate::model::source::Source;
use std::collections::VecDeque;

const START_TYPES: [EventType; 2] = [EventType::Birth, EventType::Baptism];
const END_TYPES: [EventType; 2] = [EventType::Death, EventType::Burial];

impl Ancestry {
    /// Other children of `person`'s parents, in parent then child order,
    /// without duplicates.
    pub fn siblings(&self, person: &PersonId) -> GraphResult<Vec<PersonId>> {
        let subject = self.require::<Person>(person).map_err(rejected)?;
        let mut siblings: Vec<PersonId> = Vec::new();
        for parent in subject.parents() {
            let Some(parent) = self.person(parent) else {
                continue;
            };
            for child in parent.children() {
                if child != person && !siblings.contains(child) {
                    siblings.push(child.clone());
                }
            }
        }
        Ok(siblings)
    }

    /// Event that starts `person`'s life: a birth, else a baptism.
    pub fn start(&self, person: &PersonId) -> GraphResult<Option<&Event>> {
        self.defining_event(person, &START_TYPES)
    }

    /// Event that ends `person`'s life: a death, else a burial.
    pub fn end(&self, person: &PersonId) -> GraphResult<Option<&Event>> {
        self.defining_event(person, &END_TYPES)
    }

    /// First event of the highest-priority type among `person`'s subject
    /// presences. Within one type the earliest added presence wins.
    pub fn defining_event(
        &self,
        person: &PersonId,
        priority: &[EventType],
    ) -> GraphResult<Option<&Event>> {
        let subject = self.require::<Person>(person).map_err(rejected)?;
        for event_type in priority {
            for presence in subject.presences() {
                let Some(presence) = self.presence(presence) else {
                    continue;
                };
                if presence.role() != PresenceRole::Subject {
                    continue;
                }
                let Some(event) = presence.event().and_then(|event| self.event(event)) else {
                    continue;
                };
                if event.event_type() == *event_type {
                    return Ok(Some(event));
                }
            }
        }
        Ok(None)
    }

    /// Enclosing places of `place`, nearest first.
    pub fn place_ancestors(&self, place: &PlaceId) -> GraphResult<Vec<PlaceId>> {
        self.require::<Place>(place).map_err(rejected)?;
        Ok(ancestors::<PlaceTree>(self, place))
    }

    /// Places enclosed by `place` at any depth, breadth first.
    pub fn place_descendants(&self, place: &PlaceId) -> GraphResult<Vec<PlaceId>> {
        self.require::<Place>(place).map_err(rejected)?;
        Ok(descendants::<PlaceTree>(self, place))
    }

    /// Containing sources of `source`, nearest first.
    pub fn source_ancestors(&self, source: &SourceId) -> GraphResult<Vec<SourceId>> {
        self.require::<Source>(source).map_err(rejected)?;
        Ok(ancestors::<SourceTree>(self, source))
    }

    /// Sources contained by `source` at any depth, breadth first.
    pub fn source_descendants(&self, source: &SourceId) -> GraphResult<Vec<SourceId>> {
        self.require::<Source>(source).map_err(rejected)?;
        Ok(descendants::<SourceTree>(self, source))
    }
}

fn ancestors<T: Containment>(graph: &Ancestry, node: &T::Node) -> Vec<T::Node> {
    let mut chain: Vec<T::Node> = Vec::new();
    let mut cursor = T::parent(graph, node);
    while let Some(current) = cursor {
        if current == *node || chain.contains(&current) {
            break;
        }
        cursor = T::parent(graph, &current);
        chain.push(current);
    }
    chain
}

fn descendants<T: Containment>(graph: &Ancestry, node: &T::Node) -> Vec<T::Node> {
    let mut found: Vec<T::Node> = Vec::new();
    let mut queue: VecDeque<T::Node> = T::children(graph, node).into();
    while let Some(current) = queue.pop_front() {
        if current == *node || found.contains(&current) {
            continue;
        }
        queue.extend(T::children(graph, &current));
        found.push(current);
    }
    found
}

#[cfg(test)]
mod tests {
    use crate::graph::ancestry::Ancestry;
    use crate::graph::relations::{PersonChildren, PersonParents, PlaceEncloses};
    use crate::model::event::{Event, EventType, PresenceRole};
    use crate::model::ids::{EventId, PersonId, PlaceId};
    use crate::model::person::Person;
    use crate::model::place::Place;

    fn people(ids: &[&str]) -> Ancestry {
        let mut ancestry = Ancestry::new();
        for id in ids {
            ancestry.insert_person(Person::new(*id)).expect("insert person");
        }
        ancestry
    }

    #[test]
    fn siblings_exclude_self_and_deduplicate_shared_parents() {
        let mut ancestry = people(&["Pa", "Pb", "X", "Y", "Z"]);
        let children = || ["X", "Y", "Z"].map(|id| PersonId::new(id));
        for parent in ["Pa", "Pb"] {
            ancestry
                .add_related::<PersonChildren, _>(&PersonId::new(parent), children())
                .expect("add children");
        }

        let siblings = ancestry.siblings(&PersonId::new("X")).expect("siblings");
        assert_eq!(siblings, vec![PersonId::new("Y"), PersonId::new("Z")]);
    }

    #[test]
    fn siblings_follow_live_parent_changes() {
        let mut ancestry = people(&["Pa", "X", "Y"]);
        let (pa, x, y) = (PersonId::new("Pa"), PersonId::new("X"), PersonId::new("Y"));
        ancestry
            .add_related::<PersonParents, _>(&x, [pa.clone()])
            .expect("parent of X");
        ancestry
            .add_related::<PersonParents, _>(&y, [pa.clone()])
            .expect("parent of Y");
        assert_eq!(ancestry.siblings(&x).expect("siblings"), vec![y.clone()]);

        ancestry
            .remove_related::<PersonChildren>(&pa, &y)
            .expect("remove child");
        assert!(ancestry.siblings(&x).expect("siblings").is_empty());
    }

    #[test]
    fn start_prefers_birth_over_earlier_baptism() {
        let mut ancestry = people(&["P0"]);
        let p0 = PersonId::new("P0");
        ancestry
            .insert_event(Event::new("E-bap", EventType::Baptism))
            .expect("insert baptism");
        ancestry
            .insert_event(Event::new("E-birth", EventType::Birth))
            .expect("insert birth");
        ancestry
            .add_presence(&p0, &EventId::new("E-bap"), PresenceRole::Subject)
            .expect("baptism presence");
        ancestry
            .add_presence(&p0, &EventId::new("E-birth"), PresenceRole::Subject)
            .expect("birth presence");

        let start = ancestry.start(&p0).expect("start").expect("start event");
        assert_eq!(start.event_type(), EventType::Birth);
        assert!(ancestry.end(&p0).expect("end").is_none());
    }

    #[test]
    fn non_subject_presences_do_not_define_life_events() {
        let mut ancestry = people(&["P0"]);
        let p0 = PersonId::new("P0");
        ancestry
            .insert_event(Event::new("E-death", EventType::Death))
            .expect("insert death");
        ancestry
            .add_presence(&p0, &EventId::new("E-death"), PresenceRole::Witness)
            .expect("witness presence");

        assert!(ancestry.end(&p0).expect("end").is_none());
    }

    #[test]
    fn place_walks_are_nearest_first_and_breadth_first() {
        let mut ancestry = Ancestry::new();
        for id in ["A", "B", "C", "D"] {
            ancestry
                .insert_place(Place::new(id, Vec::new()))
                .expect("insert place");
        }
        let id = |value: &str| PlaceId::new(value);
        ancestry
            .add_related::<PlaceEncloses, _>(&id("A"), [id("B"), id("D")])
            .expect("A encloses B, D");
        ancestry
            .add_related::<PlaceEncloses, _>(&id("B"), [id("C")])
            .expect("B encloses C");

        assert_eq!(
            ancestry.place_ancestors(&id("C")).expect("ancestors"),
            vec![id("B"), id("A")]
        );
        let mut descendants = ancestry.place_descendants(&id("A")).expect("descendants");
        assert_eq!(descendants.pop(), Some(id("C")));
        descendants.sort();
        assert_eq!(descendants, vec![id("B"), id("D")]);
    }
}
