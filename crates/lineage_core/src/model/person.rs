//! Person entity.

use crate::collection::LinkedSet;
use crate::model::capability::sealed::{CitationRefsMut, FileAttachmentsMut};
use crate::model::capability::{
    CitationRefs, FileAttachments, HasCitations, HasFiles, HasLinks, Identifiable, LinkList,
};
use crate::model::ids::{PersonId, PresenceId};
use crate::model::value::Name;

/// Person in the ancestry.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    id: PersonId,
    name: Option<Name>,
    alternative_names: Vec<Name>,
    attachments: FileAttachments,
    citation_refs: CitationRefs,
    links: LinkList,
    pub(crate) parents: LinkedSet<PersonId>,
    pub(crate) children: LinkedSet<PersonId>,
    pub(crate) presences: LinkedSet<PresenceId>,
    private: Option<bool>,
}

impl Person {
    pub fn new(id: impl Into<PersonId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            alternative_names: Vec::new(),
            attachments: FileAttachments::new(),
            citation_refs: CitationRefs::new(),
            links: LinkList::new(),
            parents: LinkedSet::ordered(),
            children: LinkedSet::ordered(),
            presences: LinkedSet::ordered(),
            private: None,
        }
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn set_name(&mut self, name: Option<Name>) {
        self.name = name;
    }

    pub fn alternative_names(&self) -> &[Name] {
        &self.alternative_names
    }

    pub fn set_alternative_names(&mut self, names: impl IntoIterator<Item = Name>) {
        self.alternative_names = names.into_iter().collect();
    }

    pub fn parents(&self) -> &LinkedSet<PersonId> {
        &self.parents
    }

    pub fn children(&self) -> &LinkedSet<PersonId> {
        &self.children
    }

    /// Presences in the order they were linked.
    pub fn presences(&self) -> &LinkedSet<PresenceId> {
        &self.presences
    }

    /// Privacy marker set by privacy policies; `None` means undecided.
    pub fn private(&self) -> Option<bool> {
        self.private
    }

    pub fn set_private(&mut self, private: Option<bool>) {
        self.private = private;
    }
}

impl Identifiable for Person {
    type Id = PersonId;

    fn id(&self) -> &PersonId {
        &self.id
    }
}

impl HasFiles for Person {
    fn file_attachments(&self) -> &FileAttachments {
        &self.attachments
    }
}

impl FileAttachmentsMut for Person {
    fn file_attachments_mut(&mut self) -> &mut FileAttachments {
        &mut self.attachments
    }
}

impl HasCitations for Person {
    fn citation_refs(&self) -> &CitationRefs {
        &self.citation_refs
    }
}

impl CitationRefsMut for Person {
    fn citation_refs_mut(&mut self) -> &mut CitationRefs {
        &mut self.citation_refs
    }
}

impl HasLinks for Person {
    fn links(&self) -> &LinkList {
        &self.links
    }

    fn links_mut(&mut self) -> &mut LinkList {
        &mut self.links
    }
}
