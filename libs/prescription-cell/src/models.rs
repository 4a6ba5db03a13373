// libs/prescription-cell/src/models.rs
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use notification_cell::NotificationError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionRequest {
    pub email: String,
    pub name: String,
    pub medic_name: String,
    pub specialty: String,
}

// ==============================================================================
// DECLARATIVE DOCUMENT
// ==============================================================================

/// Partial text style. Unset fields inherit from the enclosing level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub font_size: Option<f32>,
    pub bold: Option<bool>,
    pub italics: Option<bool>,
}

impl Style {
    pub fn size(font_size: f32) -> Self {
        Self {
            font_size: Some(font_size),
            ..Self::default()
        }
    }

    /// Fields set on `over` win.
    pub fn merged(self, over: &Style) -> Style {
        Style {
            font_size: over.font_size.or(self.font_size),
            bold: over.bold.or(self.bold),
            italics: over.italics.or(self.italics),
        }
    }
}

pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Fully resolved style of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStyle {
    pub font_size: f32,
    pub bold: bool,
    pub italics: bool,
}

impl From<Style> for ResolvedStyle {
    fn from(style: Style) -> Self {
        Self {
            font_size: style.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            bold: style.bold.unwrap_or(false),
            italics: style.italics.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub overrides: Style,
}

impl TextRun {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn styled(text: &str, style: &str, overrides: Style) -> Self {
        Self {
            text: text.to_string(),
            style: Some(style.to_string()),
            overrides,
        }
    }

    pub fn with(text: &str, overrides: Style) -> Self {
        Self {
            text: text.to_string(),
            style: None,
            overrides,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub overrides: Style,
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentDefinition {
    pub title: String,
    #[serde(default)]
    pub default_style: Style,
    #[serde(default)]
    pub styles: HashMap<String, Style>,
    pub content: Vec<Paragraph>,
}

impl DocumentDefinition {
    fn named(&self, name: &Option<String>) -> Style {
        name.as_ref()
            .and_then(|n| self.styles.get(n))
            .copied()
            .unwrap_or_default()
    }

    /// Default style, then the paragraph's named style and overrides, then
    /// the run's named style and overrides.
    pub fn resolve(&self, paragraph: &Paragraph, run: &TextRun) -> ResolvedStyle {
        self.default_style
            .merged(&self.named(&paragraph.style))
            .merged(&paragraph.overrides)
            .merged(&self.named(&run.style))
            .merged(&run.overrides)
            .into()
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PrescriptionError {
    #[error("PDF render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Notification(#[from] NotificationError),
}
