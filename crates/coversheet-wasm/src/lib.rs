//! coversheet-wasm - WebAssembly bindings for coversheet
//!
//! This crate exposes the live preview and the DOCX export to a browser
//! page. The form is passed as the same object shape as `coversheet.toml`
//! (`{ cover: {...}, style: {...} }`), the logo as raw image bytes.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use coversheet_core::{
    CoverLayout, CoverRenderer, ExportTarget, FormEvent, FormSettings, FormState, Logo,
    PreviewDocument, PreviewRenderer,
};
use coversheet_ooxml::DocxWriter;

/// Everything the page needs to redraw after a form change
#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    pub preview: PreviewDocument,
    pub layout: CoverLayout,
    pub pdf_advisories: Vec<String>,
    pub pdf_file_name: String,
    pub docx_file_name: String,
}

/// Returns the current version of coversheet
#[wasm_bindgen]
pub fn version() -> String {
    coversheet_core::VERSION.to_string()
}

/// Standalone preview HTML for the form
#[wasm_bindgen]
pub fn preview_html(form: JsValue, logo: Option<Vec<u8>>) -> Result<String, JsValue> {
    let settings = settings_from_js(form)?;
    Ok(render_preview(&build_form(&settings, logo)).to_html())
}

/// Preview elements, page layout and export names as a JS object
#[wasm_bindgen]
pub fn preview_plan(form: JsValue, logo: Option<Vec<u8>>) -> Result<JsValue, JsValue> {
    let settings = settings_from_js(form)?;
    let view = plan_view(&build_form(&settings, logo));
    serde_wasm_bindgen::to_value(&view).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// DOCX package bytes for the form
#[wasm_bindgen]
pub fn export_docx(form: JsValue, logo: Option<Vec<u8>>) -> Result<Vec<u8>, JsValue> {
    let settings = settings_from_js(form)?;
    render_docx(&build_form(&settings, logo)).map_err(|e| JsValue::from_str(&e))
}

/// Download name for `extension` (`pdf` or `docx`)
#[wasm_bindgen]
pub fn export_file_name(form: JsValue, extension: &str) -> Result<String, JsValue> {
    let settings = settings_from_js(form)?;
    file_name(&build_form(&settings, None), extension).map_err(|e| JsValue::from_str(&e))
}

/// Notice to show before a PDF export, if any
#[wasm_bindgen]
pub fn pdf_advisory(form: JsValue) -> Result<Option<String>, JsValue> {
    let settings = settings_from_js(form)?;
    Ok(advisory(&build_form(&settings, None)))
}

fn settings_from_js(form: JsValue) -> Result<FormSettings, JsValue> {
    if form.is_undefined() || form.is_null() {
        return Ok(FormSettings::default());
    }
    serde_wasm_bindgen::from_value(form).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Form snapshot for settings plus an optional uploaded logo
pub fn build_form(settings: &FormSettings, logo: Option<Vec<u8>>) -> FormState {
    let form = FormState::new().apply_all(settings.events());
    match logo {
        Some(bytes) if !bytes.is_empty() => form.apply(FormEvent::UploadLogo(Logo::from_bytes(bytes))),
        _ => form,
    }
}

fn render_preview(form: &FormState) -> PreviewDocument {
    PreviewRenderer::new().render(&form.plan())
}

/// Preview, layout and export names in one structure
pub fn plan_view(form: &FormState) -> PlanView {
    let plan = form.plan();
    PlanView {
        preview: PreviewRenderer::new().render(&plan),
        layout: CoverLayout::plan(&plan),
        pdf_advisories: plan
            .pdf_advisories()
            .iter()
            .map(|a| a.message().to_string())
            .collect(),
        pdf_file_name: plan.file_name(ExportTarget::Pdf),
        docx_file_name: plan.file_name(ExportTarget::Docx),
    }
}

fn render_docx(form: &FormState) -> Result<Vec<u8>, String> {
    DocxWriter::new()
        .render(&form.plan())
        .map_err(|e| e.to_string())
}

fn file_name(form: &FormState, extension: &str) -> Result<String, String> {
    let target = ExportTarget::from_extension(extension)
        .ok_or_else(|| format!("Unsupported export type: {}", extension))?;
    Ok(form.plan().file_name(target))
}

fn advisory(form: &FormState) -> Option<String> {
    form.plan()
        .pdf_advisories()
        .first()
        .map(|a| a.message().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coversheet_core::logo::TINY_PNG;
    use coversheet_core::FontFamily;

    fn settings() -> FormSettings {
        FormSettings::from_toml_str(
            r#"
[cover]
university = "Test University"
title = "final report"
student_id = "S123"

[style]
title_case = "uppercase"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_version() {
        assert_eq!(version(), "0.1.0");
    }

    #[test]
    fn test_plan_view() {
        let view = plan_view(&build_form(&settings(), None));
        assert_eq!(view.pdf_file_name, "CoverSheet_S123.pdf");
        assert_eq!(view.docx_file_name, "CoverSheet_S123.docx");
        assert!(view.pdf_advisories.is_empty());
        assert!(view.preview.to_html().contains("FINAL REPORT"));
        assert!(view.layout.logo.is_none());
    }

    #[test]
    fn test_empty_logo_bytes_ignored() {
        let form = build_form(&settings(), Some(Vec::new()));
        assert!(form.plan().logo.is_none());

        let form = build_form(&settings(), Some(TINY_PNG.to_vec()));
        assert!(form.plan().logo.is_some());
    }

    #[test]
    fn test_docx_bytes() {
        let bytes = render_docx(&build_form(&settings(), Some(TINY_PNG.to_vec()))).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_file_name_by_extension() {
        let form = build_form(&settings(), None);
        assert_eq!(file_name(&form, ".docx").unwrap(), "CoverSheet_S123.docx");
        assert!(file_name(&form, "odt").is_err());
    }

    #[test]
    fn test_sinhala_advisory() {
        let mut settings = settings();
        assert!(advisory(&build_form(&settings, None)).is_none());

        settings.style.font_family = FontFamily::Sinhala;
        assert!(advisory(&build_form(&settings, None)).is_some());
    }
}
