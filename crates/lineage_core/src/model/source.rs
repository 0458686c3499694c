//! Source and citation entities.

use crate::collection::LinkedSet;
use crate::model::capability::sealed::FileAttachmentsMut;
use crate::model::capability::{
    Dated, FileAttachments, HasFiles, HasLinks, Identifiable, LinkList,
};
use crate::model::date::Datey;
use crate::model::ids::{CitationId, EntityRef, SourceId};

/// Source of genealogical evidence. Sources nest into a containment tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    id: SourceId,
    name: String,
    date: Option<Datey>,
    attachments: FileAttachments,
    links: LinkList,
    pub(crate) contained_by: Option<SourceId>,
    pub(crate) contains: LinkedSet<SourceId>,
    pub(crate) citations: LinkedSet<CitationId>,
    private: Option<bool>,
}

impl Source {
    pub fn new(id: impl Into<SourceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: None,
            attachments: FileAttachments::new(),
            links: LinkList::new(),
            contained_by: None,
            contains: LinkedSet::unordered(),
            citations: LinkedSet::ordered(),
            private: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Parent source in the containment tree.
    pub fn contained_by(&self) -> Option<&SourceId> {
        self.contained_by.as_ref()
    }

    /// Direct child sources.
    pub fn contains(&self) -> &LinkedSet<SourceId> {
        &self.contains
    }

    pub fn citations(&self) -> &LinkedSet<CitationId> {
        &self.citations
    }

    pub fn private(&self) -> Option<bool> {
        self.private
    }

    pub fn set_private(&mut self, private: Option<bool>) {
        self.private = private;
    }
}

impl Identifiable for Source {
    type Id = SourceId;

    fn id(&self) -> &SourceId {
        &self.id
    }
}

impl Dated for Source {
    fn date(&self) -> Option<&Datey> {
        self.date.as_ref()
    }

    fn set_date(&mut self, date: Option<Datey>) {
        self.date = date;
    }
}

impl HasFiles for Source {
    fn file_attachments(&self) -> &FileAttachments {
        &self.attachments
    }
}

impl FileAttachmentsMut for Source {
    fn file_attachments_mut(&mut self) -> &mut FileAttachments {
        &mut self.attachments
    }
}

impl HasLinks for Source {
    fn links(&self) -> &LinkList {
        &self.links
    }

    fn links_mut(&mut self) -> &mut LinkList {
        &mut self.links
    }
}

/// Citation of one source, backing any number of claims.
#[derive(Debug, Clone, PartialEq)]
pub struct Citation {
    id: CitationId,
    description: Option<String>,
    pub(crate) source: Option<SourceId>,
    attachments: FileAttachments,
    pub(crate) claims: LinkedSet<EntityRef>,
    private: Option<bool>,
}

impl Citation {
    /// Creates a citation of `source`. The source side is linked when the
    /// citation is inserted into an ancestry.
    pub fn new(id: impl Into<CitationId>, source: impl Into<SourceId>) -> Self {
        Self {
            id: id.into(),
            description: None,
            source: Some(source.into()),
            attachments: FileAttachments::new(),
            claims: LinkedSet::unordered(),
            private: None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Cited source. `None` only after the citation was removed from its
    /// source's citations.
    pub fn source(&self) -> Option<&SourceId> {
        self.source.as_ref()
    }

    /// Claims backed by this citation.
    pub fn claims(&self) -> &LinkedSet<EntityRef> {
        &self.claims
    }

    pub fn private(&self) -> Option<bool> {
        self.private
    }

    pub fn set_private(&mut self, private: Option<bool>) {
        self.private = private;
    }
}

impl Identifiable for Citation {
    type Id = CitationId;

    fn id(&self) -> &CitationId {
        &self.id
    }
}

impl HasFiles for Citation {
    fn file_attachments(&self) -> &FileAttachments {
        &self.attachments
    }
}

impl FileAttachmentsMut for Citation {
    fn file_attachments_mut(&mut self) -> &mut FileAttachments {
        &mut self.attachments
    }
}
