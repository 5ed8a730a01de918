//! Relationship parts (`_rels/*.rels`)
//!
//! OOXML maps relationship ids to targets in separate `.rels` parts. The
//! cover-sheet writer uses them for the package root, the styles and
//! settings parts, and the embedded logo.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};
use crate::xml::{escape_xml, XML_DECLARATION};

/// OOXML namespace for relationships
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Common relationship type URIs
impl Relationships {
    /// Main document part of the package
    pub const TYPE_OFFICE_DOCUMENT: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    /// Core (Dublin Core) properties part
    pub const TYPE_CORE_PROPERTIES: &'static str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    /// Image relationship type
    pub const TYPE_IMAGE: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    /// Styles relationship type
    pub const TYPE_STYLES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    /// Settings relationship type
    pub const TYPE_SETTINGS: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
}

/// Relationship entries of one `.rels` part, in document order
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<Relationship>,
    /// Highest numeric `rIdN` ever seen; new ids continue after it
    last_id: u32,
}

/// One `<Relationship>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    /// Part path relative to the owning part, or a URL
    pub target: String,
    pub rel_type: String,
    /// `External` for URLs, None for package parts
    pub target_mode: Option<String>,
}

impl Relationships {
    /// Create an empty relationships part
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `.rels` part
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut rels = Self::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    if let Some(rel) = relationship_from(e) {
                        rels.push(rel);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    fn push(&mut self, rel: Relationship) {
        if let Some(n) = extract_id_number(&rel.id) {
            self.last_id = self.last_id.max(n);
        }
        self.entries.push(rel);
    }

    /// Add a package-internal relationship, returning its new id (`rIdN`)
    pub fn add(&mut self, target: impl Into<String>, rel_type: impl Into<String>) -> String {
        let id = format!("rId{}", self.last_id + 1);
        self.push(Relationship {
            id: id.clone(),
            target: target.into(),
            rel_type: rel_type.into(),
            target_mode: None,
        });
        id
    }

    /// Add an image relationship
    pub fn add_image(&mut self, target: impl Into<String>) -> String {
        self.add(target, Self::TYPE_IMAGE)
    }

    /// Id of the first relationship of `rel_type`, adding one if missing
    pub fn ensure(&mut self, target: &str, rel_type: &str) -> String {
        match self.find_by_type(rel_type) {
            Some((id, _)) => id.to_string(),
            None => self.add(target, rel_type),
        }
    }

    /// First relationship of the given type
    pub fn find_by_type(&self, rel_type: &str) -> Option<(&str, &Relationship)> {
        self.iter().find(|(_, rel)| rel.rel_type == rel_type)
    }

    /// Drop every relationship of the given type; their ids stay retired
    pub fn remove_type(&mut self, rel_type: &str) {
        self.entries.retain(|rel| rel.rel_type != rel_type);
    }

    /// Serialize as a `.rels` part
    pub fn to_xml(&self) -> String {
        let mut xml = format!(
            "{}\n<Relationships xmlns=\"{}\">\n",
            XML_DECLARATION, RELATIONSHIPS_NS
        );

        for rel in &self.entries {
            xml.push_str(&format!(
                r#"  <Relationship Id="{}" Type="{}" Target="{}""#,
                escape_xml(&rel.id),
                escape_xml(&rel.rel_type),
                escape_xml(&rel.target)
            ));
            if let Some(ref mode) = rel.target_mode {
                xml.push_str(&format!(r#" TargetMode="{}""#, escape_xml(mode)));
            }
            xml.push_str("/>\n");
        }

        xml.push_str("</Relationships>");
        xml
    }

    /// Target of relationship `id`
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entry(id).map(|rel| rel.target.as_str())
    }

    /// Whether `id` points at an image
    pub fn is_image(&self, id: &str) -> bool {
        self.entry(id).is_some_and(|rel| rel.rel_type == Self::TYPE_IMAGE)
    }

    fn entry(&self, id: &str) -> Option<&Relationship> {
        self.entries.iter().find(|rel| rel.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Relationships in document order, keyed by id
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Relationship)> {
        self.entries.iter().map(|rel| (rel.id.as_str(), rel))
    }
}

/// Build a relationship from element attributes; `Id` and `Target` are required
fn relationship_from(element: &BytesStart<'_>) -> Option<Relationship> {
    let mut id = None;
    let mut target = None;
    let mut rel_type = String::new();
    let mut target_mode = None;

    for attr in element.attributes().flatten() {
        let Ok(value) = attr.unescape_value() else {
            continue;
        };
        match attr.key.as_ref() {
            b"Id" => id = Some(value.into_owned()),
            b"Target" => target = Some(value.into_owned()),
            b"Type" => rel_type = value.into_owned(),
            b"TargetMode" => target_mode = Some(value.into_owned()),
            _ => {}
        }
    }

    Some(Relationship {
        id: id?,
        target: target?,
        rel_type,
        target_mode,
    })
}

/// Numeric part of a relationship id, case-insensitive on the `rId` prefix
fn extract_id_number(id: &str) -> Option<u32> {
    let prefix = id.get(..3)?;
    if !prefix.eq_ignore_ascii_case("rid") {
        return None;
    }
    id[3..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE_RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
            <Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/old.png"/>
            <Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
        </Relationships>"#;

    #[test]
    fn test_parse_relationships() {
        let rels = Relationships::parse(TEMPLATE_RELS).unwrap();
        assert_eq!(rels.len(), 3);
        assert_eq!(rels.get("rId1"), Some("styles.xml"));
        assert!(rels.is_image("rId4"));
        assert!(!rels.is_image("rId1"));
    }

    #[test]
    fn test_add_continues_from_existing() {
        let mut rels = Relationships::parse(TEMPLATE_RELS).unwrap();
        let id = rels.add_image("media/logo.png");
        assert_eq!(id, "rId8");
    }

    #[test]
    fn test_remove_type_keeps_others() {
        let mut rels = Relationships::parse(TEMPLATE_RELS).unwrap();
        rels.remove_type(Relationships::TYPE_IMAGE);

        assert_eq!(rels.len(), 2);
        assert!(rels.get("rId4").is_none());
        let ids: Vec<&str> = rels.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["rId1", "rId7"]);

        // ids are never reused
        assert_eq!(rels.add_image("media/logo.png"), "rId8");
    }

    #[test]
    fn test_ensure_reuses_existing() {
        let mut rels = Relationships::parse(TEMPLATE_RELS).unwrap();
        assert_eq!(rels.ensure("styles.xml", Relationships::TYPE_STYLES), "rId1");
        assert_eq!(
            rels.ensure("settings.xml", Relationships::TYPE_SETTINGS),
            "rId8"
        );
        assert_eq!(rels.len(), 4);
    }

    #[test]
    fn test_to_xml_reparses() {
        let mut rels = Relationships::new();
        rels.add("styles.xml", Relationships::TYPE_STYLES);
        rels.add_image("media/a&b.png");

        let xml = rels.to_xml();
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains(r#"Id="rId1""#));
        assert!(xml.contains("media/a&amp;b.png"));

        let reparsed = Relationships::parse(xml.as_bytes()).unwrap();
        assert_eq!(reparsed.get("rId2"), Some("media/a&b.png"));
    }

    #[test]
    fn test_extract_id_number() {
        assert_eq!(extract_id_number("rId1"), Some(1));
        assert_eq!(extract_id_number("RId5"), Some(5));
        assert_eq!(extract_id_number("rIdx"), None);
        assert_eq!(extract_id_number("invalid"), None);
    }
}
