//! Person records: the nodes of the family tree

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One entry in the genealogical tree.
///
/// Children keep their authored order; that order drives left-to-right
/// display and the search tie-break for duplicate names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Display name (non-empty, not unique)
    pub name: String,
    /// Alternate-script display name
    #[serde(default, alias = "gujaratiName", skip_serializing_if = "Option::is_none")]
    pub localized_name: Option<String>,
    /// Opaque photo reference, resolved to an asset path by the caller
    #[serde(default, rename = "photo", skip_serializing_if = "Option::is_none")]
    pub photo_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Person>,
}

impl Person {
    /// Create a person without children or optional fields.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            localized_name: None,
            photo_ref: None,
            birth_date: None,
            death_date: None,
            children: Vec::new(),
        }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<Person>) -> Self {
        Self {
            children,
            ..Self::leaf(name)
        }
    }

    pub fn localized(mut self, localized_name: impl Into<String>) -> Self {
        self.localized_name = Some(localized_name.into());
        self
    }

    pub fn photo(mut self, photo_ref: impl Into<String>) -> Self {
        self.photo_ref = Some(photo_ref.into());
        self
    }

    pub fn born(mut self, date: impl Into<String>) -> Self {
        self.birth_date = Some(date.into());
        self
    }

    pub fn died(mut self, date: impl Into<String>) -> Self {
        self.death_date = Some(date.into());
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Label for the requested language, falling back to `name`.
    pub fn display_name(&self, language: Language) -> &str {
        match language {
            Language::English => &self.name,
            Language::Gujarati => self.localized_name.as_deref().unwrap_or(&self.name),
        }
    }

    /// Placeholder shown instead of a photo: the first two characters of the name.
    pub fn initials(&self) -> String {
        self.name.chars().take(2).collect()
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Label language for bilingual display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "en")]
    English,
    #[serde(alias = "gu")]
    Gujarati,
}

impl Language {
    /// Section labels for the date boxes.
    pub fn born_label(self) -> &'static str {
        match self {
            Language::English => "Born",
            Language::Gujarati => "જન્મ",
        }
    }

    pub fn passed_label(self) -> &'static str {
        match self {
            Language::English => "Passed",
            Language::Gujarati => "અવસાન",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "english"),
            Language::Gujarati => write!(f, "gujarati"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "gu" | "gujarati" => Ok(Language::Gujarati),
            other => Err(format!("unknown language: {other}")),
        }
    }
}
