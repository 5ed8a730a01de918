//! Rendering plan to Typst markup
//!
//! The page uses zero margins and absolute placement, so every block lands
//! at the millimetre position computed by [`CoverLayout`]. Text edges are
//! set to the baseline, which makes a block's `dy` its baseline position.

use coversheet_core::layout::{CoverLayout, TextBlock};
use coversheet_core::{Color, PdfBaseFont, RenderingPlan};

/// Typst family fallback list for a PDF base font
pub fn font_families(font: PdfBaseFont) -> &'static [&'static str] {
    match font {
        PdfBaseFont::Times => &["Times New Roman", "Liberation Serif", "TeX Gyre Termes"],
        PdfBaseFont::Helvetica => &["Helvetica", "Arial", "Liberation Sans", "TeX Gyre Heros"],
        PdfBaseFont::Courier => &["Courier New", "Liberation Mono", "TeX Gyre Cursor"],
    }
}

/// Transpiler for converting a rendering plan to Typst markup
pub struct Transpiler;

impl Transpiler {
    /// Transpile a plan to a complete Typst document
    pub fn transpile(plan: &RenderingPlan) -> String {
        let layout = CoverLayout::plan(plan);
        let mut output = String::new();

        // Document metadata
        output.push_str(&format!(
            "#set document(title: \"{}\"",
            escape_string(&plan.title)
        ));
        if !plan.student_name.is_empty() {
            output.push_str(&format!(
                ", author: \"{}\"",
                escape_string(&plan.student_name)
            ));
        }
        output.push_str(")\n");

        output.push_str(&Self::page_setup(&layout, plan));

        // Frame
        let frame = &layout.frame;
        output.push_str(&format!(
            "#place(top + left, dx: {}, dy: {}, rect(width: {}, height: {}, stroke: {} + {}))\n",
            mm(frame.x_mm),
            mm(frame.y_mm),
            mm(frame.width_mm),
            mm(frame.height_mm),
            mm(frame.stroke_mm),
            frame.color.to_typst()
        ));

        // Logo
        if let Some(ref logo) = layout.logo {
            output.push_str(&format!(
                "#place(top + left, dx: {}, dy: {}, image({}, width: {}, height: {}, fit: \"stretch\"))\n",
                mm(logo.x_mm),
                mm(logo.y_mm),
                bytes_literal(logo.logo.bytes()),
                mm(logo.size_mm),
                mm(logo.size_mm)
            ));
        }

        for block in &layout.blocks {
            output.push_str(&Self::text_block(block));
        }

        for row in &layout.details {
            let style = &row.style;
            output.push_str(&format!(
                "#place(top + left, dx: {}, dy: {}, {})\n",
                mm(row.label_x_mm),
                mm(row.y_mm),
                text_call(&row.label, style.size_pt, style.bold, style.color)
            ));
            output.push_str(&format!(
                "#place(top + left, dx: {}, dy: {}, {})\n",
                mm(row.value_x_mm),
                mm(row.y_mm),
                text_call(&row.value, style.size_pt, style.bold, style.color)
            ));
        }

        output
    }

    fn page_setup(layout: &CoverLayout, plan: &RenderingPlan) -> String {
        let mut setup = format!(
            "#set page(width: {}, height: {}, margin: 0pt",
            mm(layout.page_width_mm),
            mm(layout.page_height_mm)
        );
        if !layout.page_color.is_white() {
            setup.push_str(&format!(", fill: {}", layout.page_color.to_typst()));
        }
        setup.push_str(")\n");

        let families = font_families(plan.font.pdf)
            .iter()
            .map(|f| format!("\"{}\"", f))
            .collect::<Vec<_>>()
            .join(", ");
        setup.push_str(&format!(
            "#set text(font: ({}), top-edge: \"baseline\", bottom-edge: \"baseline\")\n",
            families
        ));
        setup
    }

    fn text_block(block: &TextBlock) -> String {
        let style = &block.style;
        let mut body = text_call(&block.text, style.size_pt, style.bold, style.color);

        if let Some(underline) = style.underline {
            body = format!(
                "box(inset: (x: {}, bottom: {}), stroke: (bottom: {} + {}), {})",
                mm(underline.overhang_mm),
                mm(underline.offset_mm),
                mm(underline.stroke_mm),
                style.color.to_typst(),
                body
            );
        }

        // blocks are centred on the page, so no dx is needed
        format!("#place(top + center, dy: {}, {})\n", mm(block.y_mm), body)
    }
}

fn text_call(text: &str, size_pt: f32, bold: bool, color: Color) -> String {
    format!(
        "text(size: {}pt, weight: \"{}\", fill: {}, \"{}\")",
        size_pt,
        if bold { "bold" } else { "regular" },
        color.to_typst(),
        escape_string(text)
    )
}

/// Millimetre length literal
fn mm(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{}mm", rounded)
}

/// Typst `bytes(...)` constructor for raw data
fn bytes_literal(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 4 + 10);
    out.push_str("bytes((");
    for b in data {
        out.push_str(&b.to_string());
        out.push(',');
    }
    out.push_str("))");
    out
}

/// Escape special characters for a Typst string literal
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
