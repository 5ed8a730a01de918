//! `[Content_Types].xml`
//!
//! Maps file extensions (`Default`) and individual parts (`Override`) to
//! MIME types. Template content types are parsed and extended, so parts the
//! template brings along (themes, fonts, numbering) stay declared.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};
use crate::xml::{escape_xml, XML_DECLARATION};

/// Path of the content types part inside the package
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

pub const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const CT_XML: &str = "application/xml";
pub const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
/// Main part type of a `.dotx` template; never valid in the output
pub const CT_TEMPLATE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml";
pub const CT_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
pub const CT_SETTINGS: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml";
pub const CT_CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";

/// Parsed or generated content types
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypes {
    /// (extension, content type), in insertion order
    defaults: Vec<(String, String)>,
    /// (part name, content type), in insertion order
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    /// The entries every WordprocessingML package needs
    pub fn new() -> Self {
        let mut types = Self::default();
        types.set_default("rels", CT_RELATIONSHIPS);
        types.set_default("xml", CT_XML);
        types
    }

    /// Parse an existing `[Content_Types].xml`
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut types = Self::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    let is_default = match e.local_name().as_ref() {
                        b"Default" => Some(true),
                        b"Override" => Some(false),
                        _ => None,
                    };

                    if let Some(is_default) = is_default {
                        let key_attr: &[u8] = if is_default { b"Extension" } else { b"PartName" };
                        let mut key = None;
                        let mut content_type = None;
                        for attr in e.attributes().filter_map(|a| a.ok()) {
                            let value = attr.unescape_value().ok().map(|s| s.to_string());
                            if attr.key.as_ref() == key_attr {
                                key = value;
                            } else if attr.key.as_ref() == b"ContentType" {
                                content_type = value;
                            }
                        }

                        match (key, content_type, is_default) {
                            (Some(key), Some(ct), true) => types.set_default(&key, &ct),
                            (Some(key), Some(ct), false) => types.set_override(&key, &ct),
                            _ => {}
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(types)
    }

    /// Declare the content type of an extension (case-insensitive)
    pub fn set_default(&mut self, extension: &str, content_type: &str) {
        let extension = extension.to_ascii_lowercase();
        match self.defaults.iter_mut().find(|(ext, _)| *ext == extension) {
            Some(entry) => entry.1 = content_type.to_string(),
            None => self.defaults.push((extension, content_type.to_string())),
        }
    }

    /// Declare the content type of a single part (`/word/styles.xml`)
    pub fn set_override(&mut self, part_name: &str, content_type: &str) {
        let part_name = normalize_part_name(part_name);
        match self.overrides.iter_mut().find(|(part, _)| *part == part_name) {
            Some(entry) => entry.1 = content_type.to_string(),
            None => self.overrides.push((part_name, content_type.to_string())),
        }
    }

    /// Content type declared for a part
    #[cfg(test)]
    pub(crate) fn override_for(&self, part_name: &str) -> Option<&str> {
        let part_name = normalize_part_name(part_name);
        self.overrides
            .iter()
            .find(|(part, _)| *part == part_name)
            .map(|(_, ct)| ct.as_str())
    }

    /// Serialize to `[Content_Types].xml`
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!(r#"<Types xmlns="{}">"#, CONTENT_TYPES_NS));
        xml.push('\n');

        for (ext, ct) in &self.defaults {
            xml.push_str(&format!(
                "  <Default Extension=\"{}\" ContentType=\"{}\"/>\n",
                escape_xml(ext),
                escape_xml(ct)
            ));
        }
        for (part, ct) in &self.overrides {
            xml.push_str(&format!(
                "  <Override PartName=\"{}\" ContentType=\"{}\"/>\n",
                escape_xml(part),
                escape_xml(ct)
            ));
        }

        xml.push_str("</Types>");
        xml
    }
}

fn normalize_part_name(part_name: &str) -> String {
    if part_name.starts_with('/') {
        part_name.to_string()
    } else {
        format!("/{}", part_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_package_defaults() {
        let xml = ContentTypes::new().to_xml();
        assert!(xml.contains(&format!(
            r#"<Default Extension="rels" ContentType="{}"/>"#,
            CT_RELATIONSHIPS
        )));
        assert!(xml.contains(&format!(
            r#"<Default Extension="xml" ContentType="{}"/>"#,
            CT_XML
        )));
    }

    #[test]
    fn test_parse_template_types() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml"/>
  <Override PartName="/word/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
</Types>"#;
        let mut types = ContentTypes::parse(xml).unwrap();
        assert_eq!(types.override_for("/word/document.xml"), Some(CT_TEMPLATE));

        types.set_override("word/document.xml", CT_DOCUMENT);
        assert_eq!(types.override_for("/word/document.xml"), Some(CT_DOCUMENT));
        assert!(types.override_for("/word/theme/theme1.xml").is_some());
    }

    #[test]
    fn test_set_default_does_not_duplicate() {
        let mut types = ContentTypes::new();
        types.set_default("png", "image/png");
        types.set_default("PNG", "image/png");

        let xml = types.to_xml();
        assert_eq!(xml.matches(r#"Extension="png""#).count(), 1);
    }

    #[test]
    fn test_to_xml_reparses() {
        let mut types = ContentTypes::new();
        types.set_default("jpeg", "image/jpeg");
        types.set_override("/word/styles.xml", CT_STYLES);

        let reparsed = ContentTypes::parse(types.to_xml().as_bytes()).unwrap();
        assert_eq!(reparsed, types);
    }
}
