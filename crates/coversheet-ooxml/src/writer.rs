//! DOCX Writer
//!
//! Assembles a complete WordprocessingML package for a [`RenderingPlan`],
//! either from scratch or on top of a user template.
//!
//! # Example
//!
//! ```
//! use coversheet_core::{CoverRenderer, FormEvent, FormField, FormState};
//! use coversheet_ooxml::DocxWriter;
//!
//! let plan = FormState::new()
//!     .apply(FormEvent::SetField(FormField::University, "Test University".into()))
//!     .plan();
//! let bytes = DocxWriter::new().render(&plan)?;
//! assert!(bytes.starts_with(b"PK"));
//! # Ok::<(), coversheet_ooxml::OoxmlError>(())
//! ```

use coversheet_core::{CoverRenderer, ExportTarget, RenderingPlan};

use crate::archive::OoxmlArchive;
use crate::content_types::{
    ContentTypes, CONTENT_TYPES_PATH, CT_CORE_PROPERTIES, CT_DOCUMENT, CT_SETTINGS, CT_STYLES,
};
use crate::document::DocumentBuilder;
use crate::error::Result;
use crate::image::content_type_for_extension;
use crate::parts::{
    core_properties_xml, patch_settings_xml, settings_xml, styles_xml, CORE_PROPERTIES_PATH,
    DOCUMENT_PATH, DOCUMENT_RELS_PATH, MEDIA_DIR, ROOT_RELS_PATH, SETTINGS_PATH, STYLES_PATH,
};
use crate::relationships::Relationships;
use crate::template::Template;

/// Base name of the embedded logo part
pub const LOGO_MEDIA_STEM: &str = "logo";

/// DOCX Writer for cover sheets
#[derive(Debug, Clone, Default)]
pub struct DocxWriter {
    /// Optional base package
    template: Option<Template>,
}

impl DocxWriter {
    /// A writer that generates every part itself
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer that builds on top of `template`
    pub fn with_template(template: Template) -> Self {
        Self {
            template: Some(template),
        }
    }

    /// Whether a template is in use
    pub fn has_template(&self) -> bool {
        self.template.is_some()
    }

    /// Generate the package for `plan`
    pub fn generate(&self, plan: &RenderingPlan) -> Result<Vec<u8>> {
        let archive = self.build_archive(plan)?;
        let bytes = archive.to_bytes()?;
        tracing::debug!(
            parts = archive.len(),
            bytes = bytes.len(),
            template = self.has_template(),
            "generated DOCX package"
        );
        Ok(bytes)
    }

    /// Generate the package as an unpacked archive
    pub fn build_archive(&self, plan: &RenderingPlan) -> Result<OoxmlArchive> {
        let (mut archive, mut doc_rels, mut root_rels, mut content_types) = match self.template {
            Some(ref template) => (
                template.archive().clone(),
                template.relationships(DOCUMENT_RELS_PATH)?,
                template.relationships(ROOT_RELS_PATH)?,
                match template.archive().get(CONTENT_TYPES_PATH) {
                    Some(xml) => ContentTypes::parse(xml)?,
                    None => ContentTypes::new(),
                },
            ),
            None => (
                OoxmlArchive::new(),
                Relationships::new(),
                Relationships::new(),
                ContentTypes::new(),
            ),
        };

        // images referenced by the old body go away with it
        let stale_media: Vec<String> = doc_rels
            .iter()
            .filter(|(_, rel)| rel.rel_type == Relationships::TYPE_IMAGE)
            .map(|(_, rel)| format!("word/{}", rel.target.trim_start_matches('/')))
            .collect();
        for path in &stale_media {
            archive.remove(path);
        }
        doc_rels.remove_type(Relationships::TYPE_IMAGE);

        // styles: keep the template's, generate otherwise
        doc_rels.ensure("styles.xml", Relationships::TYPE_STYLES);
        if !archive.contains(STYLES_PATH) {
            archive.set_string(STYLES_PATH, styles_xml(plan));
        }
        content_types.set_override(STYLES_PATH, CT_STYLES);

        doc_rels.ensure("settings.xml", Relationships::TYPE_SETTINGS);
        let settings = match archive.get_string(SETTINGS_PATH) {
            Some(existing) => patch_settings_xml(&existing, plan),
            None => settings_xml(plan),
        };
        archive.set_string(SETTINGS_PATH, settings);
        content_types.set_override(SETTINGS_PATH, CT_SETTINGS);

        let logo_rel_id = match plan.logo {
            Some(ref logo) => {
                let ext = logo.format().extension();
                let file_name = format!("{}.{}", LOGO_MEDIA_STEM, ext);
                archive.set(format!("{}{}", MEDIA_DIR, file_name), logo.bytes().to_vec());
                content_types.set_default(ext, content_type_for_extension(ext));
                Some(doc_rels.add_image(format!("media/{}", file_name)))
            }
            None => None,
        };

        // headers and footers stay attached while their parts are still related
        let section_refs = match self.template {
            Some(ref template) => template
                .section_references()?
                .into_iter()
                .filter(|r| doc_rels.get(&r.rel_id).is_some() && !doc_rels.is_image(&r.rel_id))
                .collect(),
            None => Vec::new(),
        };

        let document = DocumentBuilder::new(plan)
            .with_section_references(section_refs)
            .build(logo_rel_id.as_deref());
        archive.set_string(DOCUMENT_PATH, document);
        content_types.set_override(DOCUMENT_PATH, CT_DOCUMENT);
        archive.set_string(DOCUMENT_RELS_PATH, doc_rels.to_xml());

        archive.set_string(CORE_PROPERTIES_PATH, core_properties_xml(plan));
        content_types.set_override(CORE_PROPERTIES_PATH, CT_CORE_PROPERTIES);

        root_rels.ensure(DOCUMENT_PATH, Relationships::TYPE_OFFICE_DOCUMENT);
        root_rels.ensure(CORE_PROPERTIES_PATH, Relationships::TYPE_CORE_PROPERTIES);
        archive.set_string(ROOT_RELS_PATH, root_rels.to_xml());

        archive.set_string(CONTENT_TYPES_PATH, content_types.to_xml());

        Ok(archive)
    }
}

impl CoverRenderer for DocxWriter {
    type Error = crate::error::OoxmlError;

    fn target(&self) -> ExportTarget {
        ExportTarget::Docx
    }

    fn render(&self, plan: &RenderingPlan) -> Result<Vec<u8>> {
        self.generate(plan)
    }
}
