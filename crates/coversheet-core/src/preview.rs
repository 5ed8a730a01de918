//! Live preview renderer
//!
//! Turns a [`RenderingPlan`] into a small, self-contained HTML fragment that
//! mirrors the exported page. Unlike the exports, empty text fields show a
//! placeholder label so the user can see where each value goes.

use serde::Serialize;

use crate::color::Color;
use crate::plan::{RenderingPlan, DATE_LABEL, INDEX_LABEL, NAME_LABEL};

/// Icon shown in place of a missing logo
pub const LOGO_PLACEHOLDER_HTML: &str = r#"<i class="fa-solid fa-university"></i>"#;

/// Which element of the preview a piece of text belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreviewSlot {
    University,
    Faculty,
    Assignment,
    Module,
    Name,
    StudentId,
    Date,
}

impl PreviewSlot {
    /// DOM id of the element
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::University => "prev-university",
            Self::Faculty => "prev-faculty",
            Self::Assignment => "prev-assignment",
            Self::Module => "prev-module",
            Self::Name => "prev-name",
            Self::StudentId => "prev-id",
            Self::Date => "prev-date",
        }
    }

    /// Label shown while the field is empty
    ///
    /// The date has none: an empty date drops its detail line altogether.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::University => Some("UNIVERSITY NAME"),
            Self::Faculty => Some("Faculty Name"),
            Self::Assignment => Some("Assignment Title"),
            Self::Module => Some("Module Name"),
            Self::Name => Some("Student Name"),
            Self::StudentId => Some("Student ID"),
            Self::Date => None,
        }
    }

    fn for_detail(label: &str) -> Self {
        match label {
            NAME_LABEL => Self::Name,
            INDEX_LABEL => Self::StudentId,
            DATE_LABEL => Self::Date,
            _ => Self::Name,
        }
    }
}

/// A text element with its inline style
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewElement {
    pub slot: PreviewSlot,
    /// Label shown in front of the text (detail lines only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub text: String,
    /// Whether `text` is a placeholder rather than user input
    pub is_placeholder: bool,
    pub style: String,
}

/// Content of the logo box
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PreviewLogo {
    /// An uploaded image, inlined as a data URL
    Image { src: String },
    /// The generic institution icon
    Placeholder,
}

impl PreviewLogo {
    fn to_html(&self) -> String {
        match self {
            Self::Image { src } => format!(
                r#"<img src="{}" alt="University Logo" style="max-width: 100%; max-height: 100%;">"#,
                escape_html(src)
            ),
            Self::Placeholder => LOGO_PLACEHOLDER_HTML.to_string(),
        }
    }
}

/// Everything the browser needs to redraw the preview
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewDocument {
    /// Paper background colour
    pub background: Color,
    /// CSS `font-family` value
    pub font_family: &'static str,
    /// CSS border of the content box
    pub border: String,
    pub logo: PreviewLogo,
    /// Header, title and module, top to bottom
    pub elements: Vec<PreviewElement>,
    /// Student details, top to bottom
    pub details: Vec<PreviewElement>,
}

impl PreviewDocument {
    /// Find the element for `slot`
    pub fn element(&self, slot: PreviewSlot) -> Option<&PreviewElement> {
        self.elements
            .iter()
            .chain(self.details.iter())
            .find(|e| e.slot == slot)
    }

    /// Render as an HTML fragment
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str(&format!(
            r#"<div class="paper-preview" style="background: {}; font-family: {};">"#,
            self.background,
            escape_html(self.font_family)
        ));
        html.push('\n');
        html.push_str(&format!(
            r#"  <div class="preview-content" style="border: {};">"#,
            self.border
        ));
        html.push('\n');
        html.push_str(&format!(
            "    <div class=\"preview-logo\" id=\"preview-logo\">{}</div>\n",
            self.logo.to_html()
        ));

        for element in &self.elements {
            html.push_str(&format!(
                "    <div id=\"{}\"{}{}>{}</div>\n",
                element.slot.element_id(),
                class_attr(element),
                style_attr(&element.style),
                escape_html(&element.text)
            ));
        }

        html.push_str("    <div class=\"preview-details\">\n");
        for detail in &self.details {
            html.push_str(&format!(
                "      <p><strong>{}</strong> <span id=\"{}\"{}>{}</span></p>\n",
                escape_html(detail.label.unwrap_or_default()),
                detail.slot.element_id(),
                class_attr(detail),
                escape_html(&detail.text)
            ));
        }
        html.push_str("    </div>\n");

        html.push_str("  </div>\n</div>\n");
        html
    }
}

/// Builds preview documents
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewRenderer;

impl PreviewRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Describe the preview for `plan`
    pub fn render(&self, plan: &RenderingPlan) -> PreviewDocument {
        let theme = plan.theme_color;

        let elements = vec![
            text_element(
                PreviewSlot::University,
                &plan.institution,
                format!("color: {};", theme),
            ),
            text_element(
                PreviewSlot::Faculty,
                &plan.faculty,
                format!("color: {};", plan.faculty_color),
            ),
            text_element(
                PreviewSlot::Assignment,
                &plan.title,
                format!("color: {}; font-size: {}pt;", theme, plan.title_size),
            ),
            text_element(PreviewSlot::Module, &plan.module, String::new()),
        ];

        let details = plan
            .details
            .iter()
            .map(|line| PreviewElement {
                label: Some(line.label),
                ..text_element(PreviewSlot::for_detail(line.label), &line.value, String::new())
            })
            .collect();

        let logo = match plan.logo {
            Some(ref logo) => PreviewLogo::Image {
                src: logo.to_data_url(),
            },
            None => PreviewLogo::Placeholder,
        };

        PreviewDocument {
            background: plan.page_color,
            font_family: plan.font.preview,
            border: format!("2px solid {}", theme),
            logo,
            elements,
            details,
        }
    }
}

fn text_element(slot: PreviewSlot, text: &str, style: String) -> PreviewElement {
    let placeholder = if text.is_empty() { slot.placeholder() } else { None };
    PreviewElement {
        slot,
        label: None,
        text: placeholder.unwrap_or(text).to_string(),
        is_placeholder: placeholder.is_some(),
        style,
    }
}

fn class_attr(element: &PreviewElement) -> &'static str {
    if element.is_placeholder {
        r#" class="placeholder""#
    } else {
        ""
    }
}

fn style_attr(style: &str) -> String {
    if style.is_empty() {
        String::new()
    } else {
        format!(r#" style="{}""#, escape_html(style))
    }
}

/// Basic HTML escaping
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
