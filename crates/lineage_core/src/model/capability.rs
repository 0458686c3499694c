//! Reusable relation bundles composed into entity kinds.
//!
//! # Responsibility
//! - Own the collection behind each capability (`HasFiles`, `HasCitations`,
//!   `HasLinks`) plus the plain `Dated`/`Identifiable` attributes.
//! - Expose read access publicly; paired collections are only mutated by the
//!   relation engine inside this crate.
//!
//! # Invariants
//! - A capability never reads another capability's state.
//! - `LinkList` holds each distinct link once (value equality).

use crate::collection::LinkedSet;
use crate::model::date::Datey;
use crate::model::ids::{CitationId, FileId};
use crate::model::value::Link;
use std::fmt::{Debug, Display};
use std::slice::Iter;

/// Entity with a stable identity.
pub trait Identifiable {
    type Id: Clone + Ord + Debug + Display;

    fn id(&self) -> &Self::Id;
}

/// Entity carrying an optional date or date range.
pub trait Dated {
    fn date(&self) -> Option<&Datey>;
    fn set_date(&mut self, date: Option<Datey>);
}

/// Files attached to one entity. Mirrors `File::entities`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAttachments {
    pub(crate) files: LinkedSet<FileId>,
}

impl FileAttachments {
    pub fn new() -> Self {
        Self {
            files: LinkedSet::ordered(),
        }
    }

    pub fn files(&self) -> &LinkedSet<FileId> {
        &self.files
    }
}

/// Entity that files can be attached to.
///
/// Attachments are read-only outside this crate; attach files through the
/// `FilesOf` relation so `File::entities` follows:
///
/// ```compile_fail
/// use lineage_core::model::person::Person;
/// use lineage_core::HasFiles;
///
/// let mut person = Person::new("P0");
/// person.file_attachments_mut();
/// ```
pub trait HasFiles: sealed::FileAttachmentsMut {
    fn file_attachments(&self) -> &FileAttachments;

    fn files(&self) -> &LinkedSet<FileId> {
        self.file_attachments().files()
    }
}

/// Citations backing one claim. Mirrors `Citation::claims`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationRefs {
    pub(crate) citations: LinkedSet<CitationId>,
}

impl CitationRefs {
    pub fn new() -> Self {
        Self {
            citations: LinkedSet::ordered(),
        }
    }

    pub fn citations(&self) -> &LinkedSet<CitationId> {
        &self.citations
    }
}

/// Entity that citations can claim.
pub trait HasCitations: sealed::CitationRefsMut {
    fn citation_refs(&self) -> &CitationRefs;

    fn citations(&self) -> &LinkedSet<CitationId> {
        self.citation_refs().citations()
    }
}

/// Write access to paired capability sides, reachable only from this crate.
pub(crate) mod sealed {
    use super::{CitationRefs, FileAttachments};

    pub trait FileAttachmentsMut {
        fn file_attachments_mut(&mut self) -> &mut FileAttachments;
    }

    pub trait CitationRefsMut {
        fn citation_refs_mut(&mut self) -> &mut CitationRefs;
    }
}

/// Links owned by one entity. No inverse side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkList {
    links: Vec<Link>,
}

impl LinkList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `link` unless an equal link is present. Returns whether it was
    /// added.
    pub fn add(&mut self, link: Link) -> bool {
        if self.links.contains(&link) {
            return false;
        }
        self.links.push(link);
        true
    }

    /// Removes an equal link. Returns whether one was present.
    pub fn remove(&mut self, link: &Link) -> bool {
        let before = self.links.len();
        self.links.retain(|current| current != link);
        self.links.len() != before
    }

    pub fn contains(&self, link: &Link) -> bool {
        self.links.contains(link)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Link> {
        self.links.iter()
    }
}

/// Entity that owns external links.
pub trait HasLinks {
    fn links(&self) -> &LinkList;
    fn links_mut(&mut self) -> &mut LinkList;
}

#[cfg(test)]
mod tests {
    use super::{CitationRefs, FileAttachments, LinkList};
    use crate::collection::SetOrder;
    use crate::model::value::Link;

    #[test]
    fn link_list_deduplicates_by_value() {
        let mut links = LinkList::new();
        let link = Link::new("https://example.com", None).expect("valid link");
        assert!(links.add(link.clone()));
        assert!(!links.add(link.clone()));
        assert_eq!(links.len(), 1);

        assert!(links.remove(&link));
        assert!(!links.remove(&link));
        assert!(links.is_empty());
    }

    #[test]
    fn capability_collections_start_empty_and_ordered() {
        let files = FileAttachments::new();
        assert!(files.files().is_empty());
        assert_eq!(files.files().order(), SetOrder::Insertion);

        let citations = CitationRefs::new();
        assert!(citations.citations().is_empty());
    }
}
