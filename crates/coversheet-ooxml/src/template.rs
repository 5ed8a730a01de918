//! User-supplied `.dotx`/`.docx` base packages
//!
//! A template contributes everything the cover sheet does not generate
//! (theme, custom styles, headers, fonts). The body, its relationships and
//! the content types are regenerated on top of it.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::archive::OoxmlArchive;
use crate::document::{ReferenceKind, SectionReference};
use crate::error::{OoxmlError, Result};
use crate::parts::DOCUMENT_PATH;
use crate::relationships::Relationships;

/// A Word template wrapper
#[derive(Debug, Clone)]
pub struct Template {
    archive: OoxmlArchive,
}

impl Template {
    /// Load a template from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_archive(OoxmlArchive::open(path)?)
    }

    /// Load a template from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_archive(OoxmlArchive::from_bytes(bytes)?)
    }

    fn from_archive(archive: OoxmlArchive) -> Result<Self> {
        if !archive.contains(DOCUMENT_PATH) {
            return Err(OoxmlError::InvalidTemplate(format!(
                "{} is missing; not a WordprocessingML package",
                DOCUMENT_PATH
            )));
        }
        Ok(Self { archive })
    }

    /// Get a reference to the underlying archive
    pub fn archive(&self) -> &OoxmlArchive {
        &self.archive
    }

    /// Header and footer references of the template body's final section
    pub fn section_references(&self) -> Result<Vec<SectionReference>> {
        let Some(xml) = self.archive.get(DOCUMENT_PATH) else {
            return Ok(Vec::new());
        };

        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut refs = Vec::new();
        let mut in_section = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"sectPr" => {
                    // a later section replaces an earlier one
                    refs.clear();
                    in_section = true;
                }
                Ok(Event::End(ref e)) if e.local_name().as_ref() == b"sectPr" => {
                    in_section = false;
                }
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if in_section => {
                    if let Some(reference) = section_reference_from(e) {
                        refs.push(reference);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(refs)
    }

    /// Relationships of a part, or an empty set when the part has none
    pub fn relationships(&self, rels_path: &str) -> Result<Relationships> {
        match self.archive.get(rels_path) {
            Some(xml) => Relationships::parse(xml),
            None => Ok(Relationships::new()),
        }
    }
}

fn section_reference_from(element: &BytesStart<'_>) -> Option<SectionReference> {
    let kind = match element.local_name().as_ref() {
        b"headerReference" => ReferenceKind::Header,
        b"footerReference" => ReferenceKind::Footer,
        _ => return None,
    };

    let mut ref_type = String::from("default");
    let mut rel_id = None;
    for attr in element.attributes().flatten() {
        let Ok(value) = attr.unescape_value() else {
            continue;
        };
        match attr.key.local_name().as_ref() {
            b"type" => ref_type = value.into_owned(),
            b"id" => rel_id = Some(value.into_owned()),
            _ => {}
        }
    }

    Some(SectionReference {
        kind,
        ref_type,
        rel_id: rel_id?,
    })
}
