//! Owned value types without identity: notes, links and names.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static URL_SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$").expect("valid url scheme regex"));

/// Free-text note attached to a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    text: String,
}

impl Note {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Errors from link construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// URL is blank after trim.
    EmptyUrl,
    /// URL does not start with a scheme such as `https:`.
    MissingScheme(String),
}

impl Display for LinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "link url must not be blank"),
            Self::MissingScheme(url) => write!(f, "link url has no scheme: {url}"),
        }
    }
}

impl Error for LinkError {}

/// External link owned by an entity with link capability.
///
/// Links compare by value; an owner holds each distinct link once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    url: String,
    label: Option<String>,
}

impl Link {
    /// Creates a link after checking the url carries a scheme.
    pub fn new(url: impl Into<String>, label: Option<String>) -> Result<Self, LinkError> {
        let url = url.into().trim().to_string();
        if url.is_empty() {
            return Err(LinkError::EmptyUrl);
        }
        if !URL_SCHEME_RE.is_match(&url) {
            return Err(LinkError::MissingScheme(url));
        }
        let label = label
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Ok(Self { url, label })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Label to display, falling back to the url.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.url)
    }

    pub fn has_label(&self) -> bool {
        self.label.is_some()
    }
}

/// Name in one locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedName {
    pub name: String,
    pub locale: Option<String>,
}

impl LocalizedName {
    pub fn new(name: impl Into<String>, locale: Option<String>) -> Self {
        Self {
            name: name.into(),
            locale,
        }
    }
}

impl Display for LocalizedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Given name with optional nickname.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndividualName {
    pub name: String,
    pub nick: Option<String>,
}

/// Family name with optional prefix (`van`, `de`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FamilyName {
    pub name: String,
    pub prefix: Option<String>,
}

impl Display for FamilyName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix} {}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Person name. Orders by family name first, then individual name.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Name {
    pub family: Option<FamilyName>,
    pub individual: Option<IndividualName>,
}

impl Name {
    pub fn new(individual: Option<IndividualName>, family: Option<FamilyName>) -> Self {
        Self { family, individual }
    }
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FamilyName, IndividualName, Link, LinkError, Name};

    #[test]
    fn link_label_falls_back_to_url() {
        let link = Link::new("https://example.com", None).expect("valid link");
        assert_eq!(link.label(), "https://example.com");
        assert!(!link.has_label());

        let labelled =
            Link::new("https://example.com", Some("Example".to_string())).expect("valid link");
        assert_eq!(labelled.label(), "Example");
    }

    #[test]
    fn link_rejects_blank_or_schemeless_url() {
        assert_eq!(Link::new("  ", None), Err(LinkError::EmptyUrl));
        assert_eq!(
            Link::new("example.com", None),
            Err(LinkError::MissingScheme("example.com".to_string()))
        );
    }

    #[test]
    fn names_order_by_family_first() {
        let a = Name::new(
            Some(IndividualName {
                name: "Zoe".to_string(),
                nick: None,
            }),
            Some(FamilyName {
                name: "Aalst".to_string(),
                prefix: Some("van".to_string()),
            }),
        );
        let b = Name::new(
            Some(IndividualName {
                name: "Anna".to_string(),
                nick: None,
            }),
            Some(FamilyName {
                name: "Berg".to_string(),
                prefix: None,
            }),
        );
        assert!(a < b);
        assert_eq!(
            a.family.as_ref().map(ToString::to_string).as_deref(),
            Some("van Aalst")
        );
    }
}
