//! Media/document file entity.

use crate::collection::LinkedSet;
use crate::model::capability::Identifiable;
use crate::model::ids::{EntityRef, FileId};
use crate::model::value::Note;

/// File referenced by any entity with file capability.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    id: FileId,
    path: String,
    media_type: Option<String>,
    description: Option<String>,
    notes: Vec<Note>,
    pub(crate) entities: LinkedSet<EntityRef>,
    private: Option<bool>,
}

impl File {
    pub fn new(id: impl Into<FileId>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            media_type: None,
            description: None,
            notes: Vec::new(),
            entities: LinkedSet::unordered(),
            private: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Final path component, empty when the path ends in a separator.
    pub fn name(&self) -> &str {
        &self.path[name_start(&self.path)..]
    }

    /// Path without its extension.
    pub fn basename(&self) -> &str {
        split_extension(&self.path).0
    }

    /// Extension without the leading dot, if any.
    pub fn extension(&self) -> Option<&str> {
        Some(split_extension(&self.path).1).filter(|extension| !extension.is_empty())
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn set_media_type(&mut self, media_type: Option<String>) {
        self.media_type = media_type;
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Notes in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    /// Entities this file is attached to.
    pub fn entities(&self) -> &LinkedSet<EntityRef> {
        &self.entities
    }

    pub fn private(&self) -> Option<bool> {
        self.private
    }

    pub fn set_private(&mut self, private: Option<bool>) {
        self.private = private;
    }
}

impl Identifiable for File {
    type Id = FileId;

    fn id(&self) -> &FileId {
        &self.id
    }
}

fn name_start(path: &str) -> usize {
    path.rfind('/').map_or(0, |separator| separator + 1)
}

/// Splits at the last dot of the final component. Leading dots belong to
/// the name, and the raw string is never normalized.
fn split_extension(path: &str) -> (&str, &str) {
    let start = name_start(path);
    match path.rfind('.') {
        Some(dot) if dot > start && !path[start..dot].bytes().all(|byte| byte == b'.') => {
            (&path[..dot], &path[dot + 1..])
        }
        _ => (path, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::File;
    use crate::model::value::Note;

    #[test]
    fn derives_name_basename_and_extension_from_path() {
        let file = File::new("F0", "media/scans/letter.tar.gz");
        assert_eq!(file.name(), "letter.tar.gz");
        assert_eq!(file.basename(), "media/scans/letter.tar");
        assert_eq!(file.extension(), Some("gz"));
    }

    #[test]
    fn path_without_extension_keeps_basename() {
        let file = File::new("F1", "media/.hidden");
        assert_eq!(file.extension(), None);
        assert_eq!(file.basename(), "media/.hidden");
    }

    #[test]
    fn trailing_separator_keeps_the_path_whole() {
        let file = File::new("F3", "dir/file.txt/");
        assert_eq!(file.basename(), "dir/file.txt/");
        assert_eq!(file.extension(), None);
        assert_eq!(file.name(), "");
    }

    #[test]
    fn non_ascii_paths_split_on_char_boundaries() {
        let file = File::new("F4", "x.é//");
        assert_eq!(file.basename(), "x.é//");
        assert_eq!(file.extension(), None);

        let file = File::new("F5", "scans/brief.é");
        assert_eq!(file.basename(), "scans/brief");
        assert_eq!(file.extension(), Some("é"));
        assert_eq!(file.name(), "brief.é");
    }

    #[test]
    fn dots_only_in_directories_or_leading_do_not_split() {
        assert_eq!(File::new("F6", "v1.2/readme").basename(), "v1.2/readme");
        assert_eq!(File::new("F7", "..rc").extension(), None);
        let file = File::new("F8", "draft.");
        assert_eq!(file.basename(), "draft");
        assert_eq!(file.extension(), None);
    }

    #[test]
    fn notes_keep_insertion_order() {
        let mut file = File::new("F2", "a.jpg");
        file.add_note(Note::new("first"));
        file.add_note(Note::new("second"));
        let texts: Vec<&str> = file.notes().iter().map(Note::text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }
}
