//! Title case transformer

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// How the assignment title is cased
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CaseMode {
    /// Every character upper-cased
    Uppercase,
    /// Every character lower-cased
    Lowercase,
    /// First character of every word upper-cased, the rest untouched
    Capitalize,
    /// Title left as typed
    #[default]
    None,
}

impl CaseMode {
    /// Resolve a form token; unknown tokens leave the title unchanged
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "uppercase" => Self::Uppercase,
            "lowercase" => Self::Lowercase,
            "capitalize" => Self::Capitalize,
            _ => Self::None,
        }
    }

    /// The form token for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Capitalize => "capitalize",
            Self::None => "none",
        }
    }

    /// Transform `text` according to this mode
    ///
    /// Uppercase and lowercase are idempotent. Capitalize only touches the
    /// first word character after a word boundary, so mixed-case input such
    /// as `"mcDonald"` keeps its inner capitals.
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Uppercase => text.to_uppercase(),
            Self::Lowercase => text.to_lowercase(),
            Self::Capitalize => capitalize_words(text),
            Self::None => text.to_string(),
        }
    }
}

impl From<String> for CaseMode {
    fn from(token: String) -> Self {
        Self::from_token(&token)
    }
}

fn capitalize_words(text: &str) -> String {
    static WORD_START: OnceLock<Regex> = OnceLock::new();
    let re = WORD_START.get_or_init(|| Regex::new(r"\b\w").unwrap());

    re.replace_all(text, |caps: &regex::Captures| caps[0].to_uppercase())
        .into_owned()
}
