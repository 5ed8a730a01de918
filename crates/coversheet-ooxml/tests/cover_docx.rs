//! Cover Sheet DOCX Tests
//!
//! End-to-end checks that reopen the generated package the way Word would.

use coversheet_core::logo::TINY_PNG;
use coversheet_core::{
    CaseMode, CoverRenderer, ExportTarget, FontFamily, FormEvent, FormField, FormState, Logo,
    PreviewRenderer,
};
use coversheet_ooxml::{DocxWriter, OoxmlArchive};

fn document_xml(form: &FormState) -> String {
    let bytes = DocxWriter::new().render(&form.plan()).unwrap();
    OoxmlArchive::from_bytes(&bytes)
        .unwrap()
        .get_string("word/document.xml")
        .unwrap()
}

fn base_form() -> FormState {
    FormState::new().apply_all([
        FormEvent::SetField(FormField::University, "Test University".into()),
        FormEvent::SetField(FormField::AssignmentTitle, "the o'reilly report".into()),
        FormEvent::SetField(FormField::StudentId, "S123".into()),
    ])
}

#[test]
fn test_title_matches_preview_for_every_case_mode() {
    for mode in [
        CaseMode::Uppercase,
        CaseMode::Lowercase,
        CaseMode::Capitalize,
        CaseMode::None,
    ] {
        let form = base_form().apply(FormEvent::SetTitleCase(mode));
        let plan = form.plan();

        let preview = PreviewRenderer::new().render(&plan);
        let preview_title = &preview.elements[2].text;

        let xml = document_xml(&form);
        let escaped = preview_title.replace('\'', "&apos;");
        assert!(
            xml.contains(&escaped),
            "{:?}: {:?} missing from document",
            mode,
            preview_title
        );
    }
}

#[test]
fn test_every_font_family_writes_a_font_name() {
    for family in FontFamily::ALL {
        let form = base_form().apply(FormEvent::SetFontFamily(family));
        let xml = document_xml(&form);
        let expected = format!(r#"w:ascii="{}""#, family.resolve().docx);
        assert!(xml.contains(&expected), "{:?}", family);
    }
}

#[test]
fn test_date_line_follows_input() {
    let with_date = base_form().apply(FormEvent::SetField(
        FormField::SubmissionDate,
        "2026-10-17".into(),
    ));
    assert!(document_xml(&with_date).contains("Date:"));

    let without = with_date.apply(FormEvent::SetField(FormField::SubmissionDate, "  ".into()));
    assert!(!document_xml(&without).contains("Date:"));
}

#[test]
fn test_second_logo_replaces_first() {
    let first = Logo::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 1]);
    let second = Logo::from_bytes(TINY_PNG.to_vec());
    let form = base_form().apply_all([FormEvent::UploadLogo(first), FormEvent::UploadLogo(second)]);

    let bytes = DocxWriter::new().render(&form.plan()).unwrap();
    let archive = OoxmlArchive::from_bytes(&bytes).unwrap();

    assert_eq!(archive.get("word/media/logo.png"), Some(TINY_PNG));
    assert!(!archive.contains("word/media/logo.jpeg"));
}

#[test]
fn test_file_name_and_write_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let plan = base_form().plan();
    let writer = DocxWriter::new();

    let path = dir.path().join(plan.file_name(writer.target()));
    std::fs::write(&path, writer.render(&plan).unwrap()).unwrap();

    assert!(path.ends_with("CoverSheet_S123.docx"));
    assert_eq!(writer.target(), ExportTarget::Docx);
    assert!(OoxmlArchive::open(&path).unwrap().contains("word/document.xml"));
}
