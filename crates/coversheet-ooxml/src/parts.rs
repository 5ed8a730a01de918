//! Package parts other than the main document
//!
//! Styles, settings and core properties are generated from scratch for a
//! plain package. When a template provides its own styles or settings they
//! are kept and only patched where the cover sheet needs it.

use coversheet_core::RenderingPlan;

use crate::xml::{escape_xml, NS_W, XML_DECLARATION};

pub const DOCUMENT_PATH: &str = "word/document.xml";
pub const DOCUMENT_RELS_PATH: &str = "word/_rels/document.xml.rels";
pub const ROOT_RELS_PATH: &str = "_rels/.rels";
pub const STYLES_PATH: &str = "word/styles.xml";
pub const SETTINGS_PATH: &str = "word/settings.xml";
pub const CORE_PROPERTIES_PATH: &str = "docProps/core.xml";
pub const MEDIA_DIR: &str = "word/media/";

/// `word/styles.xml` whose document default run font is the plan's font
pub fn styles_xml(plan: &RenderingPlan) -> String {
    let font = escape_xml(plan.font.docx);
    format!(
        r#"{decl}
<w:styles xmlns:w="{ns}">
<w:docDefaults>
<w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}" w:eastAsia="{font}"/><w:sz w:val="24"/><w:szCs w:val="24"/><w:lang w:val="en-GB"/></w:rPr></w:rPrDefault>
<w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault>
</w:docDefaults>
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>
<w:style w:type="character" w:default="1" w:styleId="DefaultParagraphFont"><w:name w:val="Default Paragraph Font"/><w:uiPriority w:val="1"/><w:semiHidden/></w:style>
</w:styles>"#,
        decl = XML_DECLARATION,
        ns = NS_W,
        font = font
    )
}

/// `word/settings.xml`; Word only paints `<w:background>` when
/// `displayBackgroundShape` is set
pub fn settings_xml(plan: &RenderingPlan) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:settings xmlns:w="{}">"#, NS_W));
    if !plan.page_color.is_white() {
        xml.push_str("<w:displayBackgroundShape/>");
    }
    xml.push_str(r#"<w:defaultTabStop w:val="720"/>"#);
    xml.push_str(r#"<w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat>"#);
    xml.push_str("</w:settings>");
    xml
}

/// Add `displayBackgroundShape` to existing template settings when missing
pub fn patch_settings_xml(settings: &str, plan: &RenderingPlan) -> String {
    if plan.page_color.is_white() || settings.contains("displayBackgroundShape") {
        return settings.to_string();
    }

    // insert right after the opening <w:settings ...> tag
    match settings
        .find("<w:settings")
        .and_then(|start| settings[start..].find('>').map(|end| start + end + 1))
    {
        Some(pos) if !settings[..pos].ends_with("/>") => format!(
            "{}<w:displayBackgroundShape/>{}",
            &settings[..pos],
            &settings[pos..]
        ),
        _ => settings_xml(plan),
    }
}

/// `docProps/core.xml`: title is the transformed title, creator the student
pub fn core_properties_xml(plan: &RenderingPlan) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    );

    if !plan.title.is_empty() {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(&plan.title)));
    }
    if !plan.module.is_empty() {
        xml.push_str(&format!(
            "<dc:subject>{}</dc:subject>",
            escape_xml(&plan.module)
        ));
    }
    if !plan.student_name.is_empty() {
        xml.push_str(&format!(
            "<dc:creator>{}</dc:creator>",
            escape_xml(&plan.student_name)
        ));
    }
    if let Some(date) = iso_date(plan) {
        xml.push_str(&format!(
            "<dcterms:created xsi:type=\"dcterms:W3CDTF\">{}</dcterms:created>",
            date
        ));
    }

    xml.push_str("</cp:coreProperties>");
    xml
}

/// Submission date as a W3CDTF timestamp when it looks like `YYYY-MM-DD`
fn iso_date(plan: &RenderingPlan) -> Option<String> {
    let date = plan
        .details
        .iter()
        .find(|d| d.label == coversheet_core::plan::DATE_LABEL)?
        .value
        .trim();

    let bytes = date.as_bytes();
    let looks_like_date = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    looks_like_date.then(|| format!("{}T00:00:00Z", date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coversheet_core::{Color, FontFamily, FormEvent, FormField, FormState};

    #[test]
    fn test_styles_use_resolved_font() {
        let plan = FormState::new()
            .apply(FormEvent::SetFontFamily(FontFamily::Sinhala))
            .plan();
        let xml = styles_xml(&plan);
        assert!(xml.contains(r#"w:ascii="Iskoola Pota""#));
        assert!(xml.contains(r#"w:cs="Iskoola Pota""#));
    }

    #[test]
    fn test_settings_background_flag() {
        let white = FormState::new().plan();
        assert!(!settings_xml(&white).contains("displayBackgroundShape"));

        let tinted = FormState::new()
            .apply(FormEvent::SetPageColor(Color::rgb(0xee, 0xee, 0xee)))
            .plan();
        assert!(settings_xml(&tinted).contains("<w:displayBackgroundShape/>"));
    }

    #[test]
    fn test_patch_template_settings() {
        let tinted = FormState::new()
            .apply(FormEvent::SetPageColor(Color::rgb(0xee, 0xee, 0xee)))
            .plan();
        let template = r#"<?xml version="1.0"?><w:settings xmlns:w="x"><w:zoom w:percent="100"/></w:settings>"#;

        let patched = patch_settings_xml(template, &tinted);
        assert!(patched.contains(r#"<w:settings xmlns:w="x"><w:displayBackgroundShape/><w:zoom"#));
        assert_eq!(patch_settings_xml(&patched, &tinted), patched);

        let white = FormState::new().plan();
        assert_eq!(patch_settings_xml(template, &white), template);
    }

    #[test]
    fn test_core_properties() {
        let plan = FormState::new()
            .apply_all([
                FormEvent::SetField(FormField::AssignmentTitle, "Lab <1>".into()),
                FormEvent::SetField(FormField::StudentName, "Ada".into()),
                FormEvent::SetField(FormField::SubmissionDate, "2026-10-17".into()),
            ])
            .plan();
        let xml = core_properties_xml(&plan);

        assert!(xml.contains("<dc:title>Lab &lt;1&gt;</dc:title>"));
        assert!(xml.contains("<dc:creator>Ada</dc:creator>"));
        assert!(xml.contains("2026-10-17T00:00:00Z"));
        assert!(!xml.contains("<dc:subject>"));
    }

    #[test]
    fn test_free_text_date_not_used_as_timestamp() {
        let plan = FormState::new()
            .apply(FormEvent::SetField(
                FormField::SubmissionDate,
                "17th October".into(),
            ))
            .plan();
        assert!(!core_properties_xml(&plan).contains("dcterms:created"));
    }
}
