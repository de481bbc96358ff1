//! Descriptor - Display metadata attached to every tagged variant

use serde::Serialize;

/// Color family used by renderers.
///
/// Renderers map these onto whatever palette they have (ANSI colors in
/// the terminal, CSS classes in a browser).
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Accent,
    Green,
    Purple,
    Blue,
    Cyan,
    Red,
    Amber,
    Indigo,
    Pink,
    Bright,
    Muted,
}

/// Icon, label and tone for one tag value
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Descriptor {
    pub icon: &'static str,
    pub label: String,
    pub tone: Tone,
}

impl Descriptor {
    pub fn new(icon: &'static str, label: impl Into<String>, tone: Tone) -> Self {
        Self {
            icon,
            label: label.into(),
            tone,
        }
    }
}
