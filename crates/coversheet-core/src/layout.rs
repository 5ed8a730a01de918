//! Fixed vertical layout of the cover sheet
//!
//! This is not a general layout engine. The page is a fixed top-to-bottom
//! flow on A4 paper, measured in millimetres from the top-left corner:
//!
//! ```text
//!  frame (20 mm margin)
//!  logo 30x30 at y=40            | or +10 mm of spacing
//!  INSTITUTION        22pt bold, theme colour
//!  Faculty            16pt, grey
//!  ...reserved band (60 mm)...
//!  Title              title size, bold, theme colour, underlined
//!  Module             18pt bold, black
//!  ...
//!  Name:     value    14pt, bottom anchored at page height - 80 mm
//!  Index No: value
//!  Date:     value    (only when a date was entered)
//! ```
//!
//! Text `y` values are baselines. Every band between the anchors is
//! pre-allocated, so empty fields keep their slot as empty text.

use serde::Serialize;

use crate::color::Color;
use crate::logo::Logo;
use crate::plan::RenderingPlan;

/// Millimetres per typographic point
pub const MM_PER_PT: f32 = 25.4 / 72.0;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Distance from the paper edge to the frame
pub const MARGIN_MM: f32 = 20.0;
pub const FRAME_STROKE_MM: f32 = 1.5;

/// Top of the header region
pub const HEADER_TOP_MM: f32 = 40.0;
pub const LOGO_SIZE_MM: f32 = 30.0;
/// Advance after the logo row when a logo is present
pub const LOGO_ADVANCE_MM: f32 = 40.0;
/// Advance when there is no logo
pub const NO_LOGO_ADVANCE_MM: f32 = 10.0;
pub const INSTITUTION_ADVANCE_MM: f32 = 15.0;
/// Reserved band between the faculty line and the title
pub const RESERVED_BAND_MM: f32 = 60.0;
pub const TITLE_ADVANCE_MM: f32 = 20.0;
/// Distance of the detail block from the bottom edge
pub const DETAILS_FROM_BOTTOM_MM: f32 = 80.0;
pub const DETAIL_LINE_HEIGHT_MM: f32 = 10.0;
pub const DETAIL_LABEL_INSET_MM: f32 = 20.0;
pub const DETAIL_VALUE_INSET_MM: f32 = 60.0;

pub const INSTITUTION_SIZE_PT: f32 = 22.0;
pub const FACULTY_SIZE_PT: f32 = 16.0;
pub const MODULE_SIZE_PT: f32 = 18.0;
pub const DETAIL_SIZE_PT: f32 = 14.0;

/// What a block shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockRole {
    Institution,
    Faculty,
    Title,
    Module,
}

/// Rule drawn under a text block, as wide as the rendered text
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Underline {
    /// Distance of the rule below the baseline
    pub offset_mm: f32,
    /// Extra length past each end of the text
    pub overhang_mm: f32,
    pub stroke_mm: f32,
}

/// Typography of a text block
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size_pt: f32,
    pub bold: bool,
    pub color: Color,
    pub underline: Option<Underline>,
}

impl TextStyle {
    /// Font size converted to millimetres
    pub fn size_mm(&self) -> f32 {
        self.size_pt * MM_PER_PT
    }
}

/// A line of text centred on the page at a fixed baseline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub role: BlockRole,
    pub text: String,
    /// Horizontal centre of the text
    pub center_x_mm: f32,
    /// Baseline position
    pub y_mm: f32,
    pub style: TextStyle,
}

impl TextBlock {
    /// Estimated top of the glyphs (ascent of 0.8 em)
    pub fn top_mm(&self) -> f32 {
        self.y_mm - 0.8 * self.style.size_mm()
    }

    /// Estimated bottom of the glyphs or the underline, whichever is lower
    pub fn bottom_mm(&self) -> f32 {
        let descent = self.y_mm + 0.25 * self.style.size_mm();
        match self.style.underline {
            Some(u) => descent.max(self.y_mm + u.offset_mm + u.stroke_mm),
            None => descent,
        }
    }
}

/// One row of the student detail block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
    pub label_x_mm: f32,
    pub value_x_mm: f32,
    /// Baseline position
    pub y_mm: f32,
    pub style: TextStyle,
}

/// Placement of the logo; always a square, the image is stretched to fit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogoBox {
    pub x_mm: f32,
    /// Top edge
    pub y_mm: f32,
    pub size_mm: f32,
    #[serde(skip)]
    pub logo: Logo,
}

/// Rectangle drawn inside the page margin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
    pub stroke_mm: f32,
    pub color: Color,
}

/// Positioned content of one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub page_color: Color,
    pub frame: Frame,
    pub logo: Option<LogoBox>,
    /// Centered header and title blocks, top to bottom
    pub blocks: Vec<TextBlock>,
    /// Student details, top to bottom
    pub details: Vec<DetailRow>,
}

impl CoverLayout {
    /// Plan the page for a rendering plan
    pub fn plan(plan: &RenderingPlan) -> Self {
        let center_x = PAGE_WIDTH_MM / 2.0;
        let mut y = HEADER_TOP_MM;

        let logo = match plan.logo {
            Some(ref logo) => {
                let placed = LogoBox {
                    x_mm: center_x - LOGO_SIZE_MM / 2.0,
                    y_mm: y,
                    size_mm: LOGO_SIZE_MM,
                    logo: logo.clone(),
                };
                y += LOGO_ADVANCE_MM;
                Some(placed)
            }
            None => {
                y += NO_LOGO_ADVANCE_MM;
                None
            }
        };

        let centered = |role, text: &str, y_mm, style| TextBlock {
            role,
            text: text.to_string(),
            center_x_mm: center_x,
            y_mm,
            style,
        };

        let mut blocks = Vec::with_capacity(4);

        blocks.push(centered(
            BlockRole::Institution,
            &plan.institution,
            y,
            TextStyle {
                size_pt: INSTITUTION_SIZE_PT,
                bold: true,
                color: plan.theme_color,
                underline: None,
            },
        ));
        y += INSTITUTION_ADVANCE_MM;

        blocks.push(centered(
            BlockRole::Faculty,
            &plan.faculty,
            y,
            TextStyle {
                size_pt: FACULTY_SIZE_PT,
                bold: false,
                color: plan.faculty_color,
                underline: None,
            },
        ));
        y += RESERVED_BAND_MM;

        blocks.push(centered(
            BlockRole::Title,
            &plan.title,
            y,
            TextStyle {
                size_pt: plan.title_size as f32,
                bold: true,
                color: plan.theme_color,
                underline: Some(Underline {
                    offset_mm: 2.0,
                    overhang_mm: 5.0,
                    stroke_mm: 0.5,
                }),
            },
        ));
        y += TITLE_ADVANCE_MM;

        blocks.push(centered(
            BlockRole::Module,
            &plan.module,
            y,
            TextStyle {
                size_pt: MODULE_SIZE_PT,
                bold: true,
                color: plan.body_color,
                underline: None,
            },
        ));

        let detail_style = TextStyle {
            size_pt: DETAIL_SIZE_PT,
            bold: false,
            color: plan.body_color,
            underline: None,
        };
        let details_top = PAGE_HEIGHT_MM - DETAILS_FROM_BOTTOM_MM;
        let details = plan
            .details
            .iter()
            .enumerate()
            .map(|(i, line)| DetailRow {
                label: line.label.to_string(),
                value: line.value.clone(),
                label_x_mm: MARGIN_MM + DETAIL_LABEL_INSET_MM,
                value_x_mm: MARGIN_MM + DETAIL_VALUE_INSET_MM,
                y_mm: details_top + i as f32 * DETAIL_LINE_HEIGHT_MM,
                style: detail_style,
            })
            .collect();

        Self {
            page_width_mm: PAGE_WIDTH_MM,
            page_height_mm: PAGE_HEIGHT_MM,
            page_color: plan.page_color,
            frame: Frame {
                x_mm: MARGIN_MM,
                y_mm: MARGIN_MM,
                width_mm: PAGE_WIDTH_MM - 2.0 * MARGIN_MM,
                height_mm: PAGE_HEIGHT_MM - 2.0 * MARGIN_MM,
                stroke_mm: FRAME_STROKE_MM,
                color: plan.theme_color,
            },
            logo,
            blocks,
            details,
        }
    }

    /// Find the block for `role`
    pub fn block(&self, role: BlockRole) -> Option<&TextBlock> {
        self.blocks.iter().find(|b| b.role == role)
    }
}
