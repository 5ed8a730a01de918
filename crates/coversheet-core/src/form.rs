//! Form state snapshots
//!
//! A [`FormState`] is never edited in place by the renderers. Each user input
//! is expressed as a [`FormEvent`] and [`FormState::apply`] produces the next
//! snapshot, which is then handed to the pure planning functions.

use serde::{Deserialize, Serialize};

use crate::case::CaseMode;
use crate::color::Color;
use crate::font::FontFamily;
use crate::logo::Logo;
use crate::plan::RenderingPlan;

/// Default title size in points
pub const DEFAULT_TITLE_SIZE: u32 = 24;
/// Smallest accepted title size in points
pub const MIN_TITLE_SIZE: u32 = 8;
/// Largest accepted title size in points
pub const MAX_TITLE_SIZE: u32 = 48;

/// Plain text fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    University,
    Faculty,
    Module,
    AssignmentTitle,
    StudentName,
    StudentId,
    SubmissionDate,
}

/// A single user input
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// A text field changed
    SetField(FormField, String),
    SetThemeColor(Color),
    SetPageColor(Color),
    SetFontFamily(FontFamily),
    SetTitleCase(CaseMode),
    /// New title size; clamped into the accepted range
    SetTitleSize(u32),
    /// A file was picked; replaces any previous logo
    UploadLogo(Logo),
    /// The file selection was cleared
    ClearLogo,
}

/// Everything the user has entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormState {
    pub university: String,
    pub faculty: String,
    pub module: String,
    pub assignment_title: String,
    pub student_name: String,
    pub student_id: String,
    /// Free text; usually `YYYY-MM-DD`
    pub submission_date: String,
    pub theme_color: Color,
    pub page_color: Color,
    pub font_family: FontFamily,
    pub title_case: CaseMode,
    pub title_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// A fresh form, dated today
    pub fn new() -> Self {
        Self {
            university: String::new(),
            faculty: String::new(),
            module: String::new(),
            assignment_title: String::new(),
            student_name: String::new(),
            student_id: String::new(),
            submission_date: today(),
            theme_color: Color::DEFAULT_THEME,
            page_color: Color::WHITE,
            font_family: FontFamily::default(),
            title_case: CaseMode::default(),
            title_size: DEFAULT_TITLE_SIZE,
            logo: None,
        }
    }

    /// Produce the next snapshot after `event`
    pub fn apply(self, event: FormEvent) -> Self {
        let mut next = self;
        match event {
            FormEvent::SetField(field, value) => *next.field_mut(field) = value,
            FormEvent::SetThemeColor(color) => next.theme_color = color,
            FormEvent::SetPageColor(color) => next.page_color = color,
            FormEvent::SetFontFamily(family) => next.font_family = family,
            FormEvent::SetTitleCase(mode) => next.title_case = mode,
            FormEvent::SetTitleSize(size) => next.title_size = clamp_title_size(size),
            FormEvent::UploadLogo(logo) => next.logo = Some(logo),
            FormEvent::ClearLogo => next.logo = None,
        }
        next
    }

    /// Apply a sequence of events in order
    pub fn apply_all<I>(self, events: I) -> Self
    where
        I: IntoIterator<Item = FormEvent>,
    {
        events.into_iter().fold(self, Self::apply)
    }

    /// Read a text field
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::University => &self.university,
            FormField::Faculty => &self.faculty,
            FormField::Module => &self.module,
            FormField::AssignmentTitle => &self.assignment_title,
            FormField::StudentName => &self.student_name,
            FormField::StudentId => &self.student_id,
            FormField::SubmissionDate => &self.submission_date,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::University => &mut self.university,
            FormField::Faculty => &mut self.faculty,
            FormField::Module => &mut self.module,
            FormField::AssignmentTitle => &mut self.assignment_title,
            FormField::StudentName => &mut self.student_name,
            FormField::StudentId => &mut self.student_id,
            FormField::SubmissionDate => &mut self.submission_date,
        }
    }

    /// Derive the rendering plan for this snapshot
    pub fn plan(&self) -> RenderingPlan {
        RenderingPlan::from_form(self)
    }
}

/// Clamp a requested title size into the accepted range
pub fn clamp_title_size(size: u32) -> u32 {
    size.clamp(MIN_TITLE_SIZE, MAX_TITLE_SIZE)
}

/// Today's local date as `YYYY-MM-DD`
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
