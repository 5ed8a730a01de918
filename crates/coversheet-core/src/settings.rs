//! Form file (`coversheet.toml`)
//!
//! Lets a cover sheet be described once and re-exported from the command
//! line. Every section is optional; missing keys keep the form defaults.
//!
//! ```toml
//! [cover]
//! university = "Test University"
//! student_id = "S123"
//!
//! [style]
//! theme_color = "#1a237e"
//! title_case = "uppercase"
//!
//! [logo]
//! path = "logo.png"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::case::CaseMode;
use crate::color::Color;
use crate::error::Result;
use crate::font::FontFamily;
use crate::form::{FormEvent, FormField, FormState, DEFAULT_TITLE_SIZE};
use crate::logo::Logo;

/// Conventional name of the form file
pub const DEFAULT_SETTINGS_FILE: &str = "coversheet.toml";

/// Top-level form file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FormSettings {
    /// Text content of the sheet
    pub cover: CoverSettings,
    /// Typography and colours
    pub style: StyleSettings,
    pub logo: LogoSettings,
    pub pdf: PdfSettings,
    pub docx: DocxSettings,
}

/// Text fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoverSettings {
    pub university: String,
    pub faculty: String,
    pub module: String,
    pub title: String,
    pub student_name: String,
    pub student_id: String,
    /// Submission date; today when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Typography and colour choices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    /// Kept as text so a typo falls back instead of rejecting the file
    pub theme_color: String,
    pub page_color: String,
    pub font_family: FontFamily,
    pub title_case: CaseMode,
    pub title_size: u32,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            theme_color: Color::DEFAULT_THEME.to_css(),
            page_color: Color::WHITE.to_css(),
            font_family: FontFamily::default(),
            title_case: CaseMode::default(),
            title_size: DEFAULT_TITLE_SIZE,
        }
    }
}

/// Logo file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LogoSettings {
    /// Image path, relative to the form file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// PDF export options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PdfSettings {
    /// Extra font files handed to the PDF compiler
    pub fonts: Vec<PathBuf>,
}

/// DOCX export options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DocxSettings {
    /// Base `.dotx`/`.docx` package
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

impl FormSettings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Read and parse a form file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded form file");
        Ok(settings)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Form events that turn a fresh form into this one (logo excluded)
    pub fn events(&self) -> Vec<FormEvent> {
        let cover = &self.cover;
        let style = &self.style;

        let mut events = vec![
            FormEvent::SetField(FormField::University, cover.university.clone()),
            FormEvent::SetField(FormField::Faculty, cover.faculty.clone()),
            FormEvent::SetField(FormField::Module, cover.module.clone()),
            FormEvent::SetField(FormField::AssignmentTitle, cover.title.clone()),
            FormEvent::SetField(FormField::StudentName, cover.student_name.clone()),
            FormEvent::SetField(FormField::StudentId, cover.student_id.clone()),
        ];
        if let Some(ref date) = cover.date {
            events.push(FormEvent::SetField(FormField::SubmissionDate, date.clone()));
        }

        events.extend([
            FormEvent::SetThemeColor(Color::parse_or(&style.theme_color, Color::DEFAULT_THEME)),
            FormEvent::SetPageColor(Color::parse_or(&style.page_color, Color::WHITE)),
            FormEvent::SetFontFamily(style.font_family),
            FormEvent::SetTitleCase(style.title_case),
            FormEvent::SetTitleSize(style.title_size),
        ]);
        events
    }

    /// Build the form, reading the logo relative to `base_dir`
    pub fn to_form(&self, base_dir: &Path) -> Result<FormState> {
        let mut form = FormState::new().apply_all(self.events());
        if let Some(path) = self.logo_path(base_dir) {
            form = form.apply(FormEvent::UploadLogo(Logo::load(&path)?));
        }
        Ok(form)
    }

    /// Logo path resolved against `base_dir`
    pub fn logo_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.logo.path.as_deref().map(|p| resolve(base_dir, p))
    }

    /// Font paths resolved against `base_dir`
    pub fn font_paths(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.pdf.fonts.iter().map(|p| resolve(base_dir, p)).collect()
    }

    /// Template path resolved against `base_dir`
    pub fn template_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.docx.template.as_deref().map(|p| resolve(base_dir, p))
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Commented starter form file, dated `date`
pub fn starter_toml(date: &str) -> String {
    format!(
        r##"# Cover sheet form. Command line flags override these values.

[cover]
university = "University of Example"
faculty = "Faculty of Computing"
module = "CS101 - Introduction to Programming"
title = "Final Report"
student_name = "Your Name"
student_id = "S000000"
date = "{date}"

[style]
theme_color = "#1a237e"
page_color = "#ffffff"
# times, helvetica, courier, georgia, verdana, sinhala
font_family = "times"
# uppercase, lowercase, capitalize, none
title_case = "uppercase"
title_size = 24

[logo]
# path = "logo.png"

[pdf]
# fonts = ["fonts/NotoSansSinhala-Regular.ttf"]
fonts = []

[docx]
# template = "template.dotx"
"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logo::TINY_PNG;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = FormSettings::from_toml_str("").unwrap();
        assert_eq!(settings, FormSettings::default());

        let form = settings.to_form(Path::new(".")).unwrap();
        assert_eq!(form.theme_color, Color::DEFAULT_THEME);
        assert_eq!(form.title_size, DEFAULT_TITLE_SIZE);
        assert!(!form.submission_date.is_empty());
    }

    #[test]
    fn test_parse_sections() {
        let toml = r##"
[cover]
university = "Test University"
student_id = "S123"
date = ""

[style]
theme_color = "#800000"
font_family = "courier"
title_case = "capitalize"
title_size = 30

[pdf]
fonts = ["a.ttf"]
"##;
        let settings = FormSettings::from_toml_str(toml).unwrap();
        assert_eq!(settings.cover.university, "Test University");
        assert_eq!(settings.style.font_family, FontFamily::Courier);
        assert_eq!(settings.pdf.fonts, vec![PathBuf::from("a.ttf")]);

        let form = settings.to_form(Path::new(".")).unwrap();
        assert_eq!(form.student_id, "S123");
        assert_eq!(form.submission_date, "");
        assert_eq!(form.title_case, CaseMode::Capitalize);
        assert_eq!(form.title_size, 30);
        assert_eq!(form.theme_color, Color::rgb(0x80, 0, 0));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let toml = r##"
[style]
theme_color = "not-a-colour"
font_family = "comic-sans"
title_case = "shouting"
title_size = 400
"##;
        let form = FormSettings::from_toml_str(toml)
            .unwrap()
            .to_form(Path::new("."))
            .unwrap();
        assert_eq!(form.theme_color, Color::DEFAULT_THEME);
        assert_eq!(form.font_family, FontFamily::Times);
        assert_eq!(form.title_case, CaseMode::None);
        assert_eq!(form.title_size, crate::form::MAX_TITLE_SIZE);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(FormSettings::from_toml_str("[cover\nuniversity = 1").is_err());
    }

    #[test]
    fn test_logo_loaded_relative_to_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.png"), TINY_PNG).unwrap();

        let settings = FormSettings::from_toml_str("[logo]\npath = \"logo.png\"").unwrap();
        let form = settings.to_form(dir.path()).unwrap();
        assert_eq!(form.logo.unwrap().bytes(), TINY_PNG);
    }

    #[test]
    fn test_missing_logo_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = FormSettings::from_toml_str("[logo]\npath = \"nope.png\"").unwrap();
        assert!(settings.to_form(dir.path()).is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SETTINGS_FILE);
        std::fs::write(&path, "[docx]\ntemplate = \"base.dotx\"").unwrap();

        let settings = FormSettings::load(&path).unwrap();
        assert_eq!(
            settings.template_path(dir.path()),
            Some(dir.path().join("base.dotx"))
        );
    }

    #[test]
    fn test_starter_file_parses() {
        let text = starter_toml("2026-10-17");
        let settings = FormSettings::from_toml_str(&text).unwrap();
        assert_eq!(settings.cover.date.as_deref(), Some("2026-10-17"));
        assert_eq!(settings.style.title_case, CaseMode::Uppercase);
        assert!(settings.logo.path.is_none());
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = FormSettings::from_toml_str(&starter_toml("2026-01-01")).unwrap();
        let text = settings.to_toml_string().unwrap();
        assert_eq!(FormSettings::from_toml_str(&text).unwrap(), settings);
    }
}
