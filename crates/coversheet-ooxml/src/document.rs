//! `word/document.xml` generation
//!
//! The cover sheet flows as centered paragraphs whose after-spacing stands
//! in for the fixed bands of the page layout. Sizes are half-points, spacing
//! and indents are twips (1/20 pt).

use coversheet_core::layout::{
    DETAIL_SIZE_PT, FACULTY_SIZE_PT, INSTITUTION_SIZE_PT, MODULE_SIZE_PT,
};
use coversheet_core::{Color, RenderingPlan};

use crate::image::{InlineImage, LOGO_SIZE_PX};
use crate::xml::{escape_xml, NS_A, NS_PIC, NS_R, NS_W, NS_WP, XML_DECLARATION};

/// A4 width in twips
pub const PAGE_WIDTH_TWIPS: u32 = 11906;
/// A4 height in twips
pub const PAGE_HEIGHT_TWIPS: u32 = 16838;
/// One inch on every side
pub const PAGE_MARGIN_TWIPS: u32 = 1440;

/// Distance of the page border from the text area, in points. With one-inch
/// margins this puts the border 20 mm from the paper edge.
pub const BORDER_SPACE_PT: u32 = 15;
/// Border width in eighths of a point (1.5 mm)
pub const BORDER_SIZE_EIGHTHS: u32 = 34;

pub const LOGO_SPACING_AFTER: u32 = 400;
pub const INSTITUTION_SPACING_AFTER: u32 = 200;
pub const FACULTY_SPACING_AFTER: u32 = 1200;
pub const TITLE_SPACING_AFTER: u32 = 400;
pub const MODULE_SPACING_AFTER: u32 = 2000;

/// Left indent of the detail lines (one inch)
pub const DETAIL_INDENT_TWIPS: u32 = 1440;
/// Tab stop separating detail labels from values
pub const DETAIL_TAB_STOP_TWIPS: u32 = 2000;

/// Paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Justify {
    Center,
    Left,
}

/// A text run with its formatting
#[derive(Debug, Clone)]
struct Run<'a> {
    text: &'a str,
    bold: bool,
    underline: bool,
    half_points: u32,
    color: Color,
    /// Emit a tab after the text
    tab: bool,
}

impl<'a> Run<'a> {
    fn new(text: &'a str, size_pt: f32, color: Color) -> Self {
        Self {
            text,
            bold: false,
            underline: false,
            half_points: half_points(size_pt),
            color,
            tab: false,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    fn tab(mut self) -> Self {
        self.tab = true;
        self
    }
}

/// Which part a section reference points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Header,
    Footer,
}

impl ReferenceKind {
    fn element(&self) -> &'static str {
        match self {
            Self::Header => "headerReference",
            Self::Footer => "footerReference",
        }
    }
}

/// A header or footer attached to the section (`<w:headerReference>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReference {
    pub kind: ReferenceKind,
    /// `default`, `first` or `even`
    pub ref_type: String,
    pub rel_id: String,
}

impl SectionReference {
    fn to_xml(&self) -> String {
        format!(
            r#"<w:{} w:type="{}" r:id="{}"/>"#,
            self.kind.element(),
            escape_xml(&self.ref_type),
            escape_xml(&self.rel_id)
        )
    }
}

/// Builds the main document part for a rendering plan
pub struct DocumentBuilder<'a> {
    plan: &'a RenderingPlan,
    section_refs: Vec<SectionReference>,
    /// `<w:titlePg/>`: the first page uses its own header and footer
    title_page: bool,
    output: String,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(plan: &'a RenderingPlan) -> Self {
        Self {
            plan,
            section_refs: Vec::new(),
            title_page: false,
            output: String::new(),
        }
    }

    /// Keep headers and footers of a base package on the cover page
    pub fn with_section_references(mut self, refs: Vec<SectionReference>) -> Self {
        self.title_page = refs.iter().any(|r| r.ref_type == "first");
        self.section_refs = refs;
        self
    }

    /// Generate the complete document.xml; `logo_rel_id` is the relationship
    /// of the embedded logo, if any
    pub fn build(mut self, logo_rel_id: Option<&str>) -> String {
        let plan = self.plan;

        self.output.push_str(XML_DECLARATION);
        self.output.push('\n');
        self.output.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}" xmlns:wp="{}" xmlns:a="{}" xmlns:pic="{}">"#,
            NS_W, NS_R, NS_WP, NS_A, NS_PIC
        ));
        self.output.push('\n');

        if !plan.page_color.is_white() {
            self.output.push_str(&format!(
                "<w:background w:color=\"{}\"/>\n",
                plan.page_color.to_docx()
            ));
        }

        self.output.push_str("<w:body>\n");

        if let Some(rel_id) = logo_rel_id {
            self.logo_paragraph(rel_id);
        }

        self.paragraph(
            Justify::Center,
            INSTITUTION_SPACING_AFTER,
            &[Run::new(&plan.institution, INSTITUTION_SIZE_PT, plan.theme_color).bold()],
        );
        self.paragraph(
            Justify::Center,
            FACULTY_SPACING_AFTER,
            &[Run::new(&plan.faculty, FACULTY_SIZE_PT, plan.faculty_color)],
        );
        self.paragraph(
            Justify::Center,
            TITLE_SPACING_AFTER,
            &[Run::new(&plan.title, plan.title_size as f32, plan.theme_color)
                .bold()
                .underline()],
        );
        self.paragraph(
            Justify::Center,
            MODULE_SPACING_AFTER,
            &[Run::new(&plan.module, MODULE_SIZE_PT, plan.body_color).bold()],
        );

        for line in &plan.details {
            self.paragraph(
                Justify::Left,
                0,
                &[
                    Run::new(line.label, DETAIL_SIZE_PT, plan.body_color)
                        .bold()
                        .tab(),
                    Run::new(&line.value, DETAIL_SIZE_PT, plan.body_color),
                ],
            );
        }

        self.section_properties();

        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>");
        self.output
    }

    fn logo_paragraph(&mut self, rel_id: &str) {
        let drawing = InlineImage::square(1, rel_id, LOGO_SIZE_PX).with_descr("University Logo");

        self.output.push_str("<w:p>");
        self.paragraph_properties(Justify::Center, LOGO_SPACING_AFTER);
        self.output.push_str("<w:r>");
        self.output.push_str(&drawing.to_xml());
        self.output.push_str("</w:r>");
        self.output.push_str("</w:p>\n");
    }

    fn paragraph(&mut self, justify: Justify, spacing_after: u32, runs: &[Run<'_>]) {
        self.output.push_str("<w:p>");
        self.paragraph_properties(justify, spacing_after);
        for run in runs {
            self.run(run);
        }
        self.output.push_str("</w:p>\n");
    }

    fn paragraph_properties(&mut self, justify: Justify, spacing_after: u32) {
        self.output.push_str("<w:pPr>");
        if justify == Justify::Left {
            self.output.push_str(&format!(
                r#"<w:tabs><w:tab w:val="left" w:pos="{}"/></w:tabs>"#,
                DETAIL_TAB_STOP_TWIPS
            ));
        }
        self.output.push_str(&format!(
            r#"<w:spacing w:after="{}"/>"#,
            spacing_after
        ));
        match justify {
            Justify::Center => self.output.push_str(r#"<w:jc w:val="center"/>"#),
            Justify::Left => self.output.push_str(&format!(
                r#"<w:ind w:left="{}"/>"#,
                DETAIL_INDENT_TWIPS
            )),
        }
        self.output.push_str("</w:pPr>");
    }

    fn run(&mut self, run: &Run<'_>) {
        let font = escape_xml(self.plan.font.docx);

        self.output.push_str("<w:r><w:rPr>");
        self.output.push_str(&format!(
            r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:cs="{0}" w:eastAsia="{0}"/>"#,
            font
        ));
        if run.bold {
            self.output.push_str("<w:b/><w:bCs/>");
        }
        self.output.push_str(&format!(
            r#"<w:color w:val="{}"/>"#,
            run.color.to_docx()
        ));
        self.output.push_str(&format!(
            r#"<w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#,
            run.half_points
        ));
        if run.underline {
            self.output.push_str(r#"<w:u w:val="single"/>"#);
        }
        self.output.push_str("</w:rPr>");

        if !run.text.is_empty() {
            self.output.push_str(&format!(
                r#"<w:t xml:space="preserve">{}</w:t>"#,
                escape_xml(run.text)
            ));
        }
        if run.tab {
            self.output.push_str("<w:tab/>");
        }
        self.output.push_str("</w:r>");
    }

    fn section_properties(&mut self) {
        let border = format!(
            r#"w:val="single" w:sz="{}" w:space="{}" w:color="{}""#,
            BORDER_SIZE_EIGHTHS,
            BORDER_SPACE_PT,
            self.plan.theme_color.to_docx()
        );

        self.output.push_str("<w:sectPr>");
        for reference in &self.section_refs {
            self.output.push_str(&reference.to_xml());
        }
        self.output.push_str(&format!(
            r#"<w:pgSz w:w="{}" w:h="{}"/>"#,
            PAGE_WIDTH_TWIPS, PAGE_HEIGHT_TWIPS
        ));
        self.output.push_str(&format!(
            r#"<w:pgMar w:top="{0}" w:right="{0}" w:bottom="{0}" w:left="{0}" w:header="708" w:footer="708" w:gutter="0"/>"#,
            PAGE_MARGIN_TWIPS
        ));
        self.output.push_str(r#"<w:pgBorders w:offsetFrom="text">"#);
        for side in ["top", "left", "bottom", "right"] {
            self.output.push_str(&format!("<w:{} {}/>", side, border));
        }
        self.output.push_str("</w:pgBorders>");
        if self.title_page {
            self.output.push_str("<w:titlePg/>");
        }
        self.output.push_str("</w:sectPr>\n");
    }
}

/// Point size to WordprocessingML half-points
pub fn half_points(size_pt: f32) -> u32 {
    (size_pt * 2.0).round() as u32
}
