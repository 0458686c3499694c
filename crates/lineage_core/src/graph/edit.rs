//! Guarded write access to registered entities.
//!
//! # Invariants
//! - Only plain attributes are writable through `EntityMut`.
//! - Ids and paired relation sides stay read-only through `Deref`, so an
//!   edit can neither re-key an entity nor desynchronize a relation pair.

use crate::model::capability::{Dated, HasLinks, LinkList};
use crate::model::date::Datey;
use crate::model::event::{Event, EventType};
use crate::model::file::File;
use crate::model::person::Person;
use crate::model::place::Place;
use crate::model::source::{Citation, Source};
use crate::model::value::{Coordinates, LocalizedName, Name, Note};
use std::ops::Deref;

/// Write handle to one registered entity, returned by `Ancestry::get_mut`.
///
/// Reads go through `Deref`; the handle never hands out `&mut E`, so the
/// entity cannot be replaced wholesale:
///
/// ```compile_fail
/// use lineage_core::model::person::Person;
/// use lineage_core::{Ancestry, PersonId};
///
/// let mut ancestry = Ancestry::new();
/// ancestry.insert_person(Person::new("P0")).unwrap();
/// let mut person = ancestry.get_mut::<Person>(&PersonId::new("P0")).unwrap();
/// *person = Person::new("P9");
/// ```
#[derive(Debug)]
pub struct EntityMut<'a, E> {
    entity: &'a mut E,
}

impl<'a, E> EntityMut<'a, E> {
    pub(crate) fn new(entity: &'a mut E) -> Self {
        Self { entity }
    }
}

impl<E> Deref for EntityMut<'_, E> {
    type Target = E;

    fn deref(&self) -> &E {
        &*self.entity
    }
}

impl<E: Dated> EntityMut<'_, E> {
    pub fn set_date(&mut self, date: Option<Datey>) {
        self.entity.set_date(date);
    }
}

impl<E: HasLinks> EntityMut<'_, E> {
    /// Links have no inverse side and are freely editable.
    pub fn links_mut(&mut self) -> &mut LinkList {
        self.entity.links_mut()
    }
}

impl EntityMut<'_, Person> {
    pub fn set_name(&mut self, name: Option<Name>) {
        self.entity.set_name(name);
    }

    pub fn set_alternative_names(&mut self, names: impl IntoIterator<Item = Name>) {
        self.entity.set_alternative_names(names);
    }

    pub fn set_private(&mut self, private: Option<bool>) {
        self.entity.set_private(private);
    }
}

impl EntityMut<'_, Place> {
    pub fn set_names(&mut self, names: Vec<LocalizedName>) {
        self.entity.set_names(names);
    }

    pub fn set_coordinates(&mut self, coordinates: Option<Coordinates>) {
        self.entity.set_coordinates(coordinates);
    }
}

impl EntityMut<'_, Event> {
    pub fn set_event_type(&mut self, event_type: EventType) {
        self.entity.set_event_type(event_type);
    }
}

impl EntityMut<'_, Source> {
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.entity.set_name(name);
    }

    pub fn set_private(&mut self, private: Option<bool>) {
        self.entity.set_private(private);
    }
}

impl EntityMut<'_, Citation> {
    pub fn set_description(&mut self, description: Option<String>) {
        self.entity.set_description(description);
    }

    pub fn set_private(&mut self, private: Option<bool>) {
        self.entity.set_private(private);
    }
}

impl EntityMut<'_, File> {
    pub fn set_media_type(&mut self, media_type: Option<String>) {
        self.entity.set_media_type(media_type);
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.entity.set_description(description);
    }

    pub fn add_note(&mut self, note: Note) {
        self.entity.add_note(note);
    }

    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.entity.set_notes(notes);
    }

    pub fn set_private(&mut self, private: Option<bool>) {
        self.entity.set_private(private);
    }
}
