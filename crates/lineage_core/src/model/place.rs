//! Place entity.

use crate::collection::LinkedSet;
use crate::model::capability::{HasLinks, Identifiable, LinkList};
use crate::model::ids::{EventId, PlaceId};
use crate::model::value::{Coordinates, LocalizedName};

/// Place where events happened. Places nest into a containment tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    id: PlaceId,
    names: Vec<LocalizedName>,
    coordinates: Option<Coordinates>,
    links: LinkList,
    pub(crate) events: LinkedSet<EventId>,
    pub(crate) enclosed_by: Option<PlaceId>,
    pub(crate) encloses: LinkedSet<PlaceId>,
}

impl Place {
    pub fn new(id: impl Into<PlaceId>, names: Vec<LocalizedName>) -> Self {
        Self {
            id: id.into(),
            names,
            coordinates: None,
            links: LinkList::new(),
            events: LinkedSet::ordered(),
            enclosed_by: None,
            encloses: LinkedSet::unordered(),
        }
    }

    pub fn names(&self) -> &[LocalizedName] {
        &self.names
    }

    pub fn set_names(&mut self, names: Vec<LocalizedName>) {
        self.names = names;
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn set_coordinates(&mut self, coordinates: Option<Coordinates>) {
        self.coordinates = coordinates;
    }

    /// Events that happened here.
    pub fn events(&self) -> &LinkedSet<EventId> {
        &self.events
    }

    /// Enclosing place in the containment tree.
    pub fn enclosed_by(&self) -> Option<&PlaceId> {
        self.enclosed_by.as_ref()
    }

    /// Directly enclosed places.
    pub fn encloses(&self) -> &LinkedSet<PlaceId> {
        &self.encloses
    }
}

impl Identifiable for Place {
    type Id = PlaceId;

    fn id(&self) -> &PlaceId {
        &self.id
    }
}

impl HasLinks for Place {
    fn links(&self) -> &LinkList {
        &self.links
    }

    fn links_mut(&mut self) -> &mut LinkList {
        &mut self.links
    }
}
