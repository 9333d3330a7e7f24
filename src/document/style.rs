//! Per-block text formatting.

use serde::{Deserialize, Serialize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// CSS keyword for this alignment.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// List marker applied to a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    None,
    Bullet,
    Number,
}

/// Formatting attributes of a block.
///
/// A plain value: copy it, change it, store it back. Unset optional
/// attributes mean "not specified" and are left out of every rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    pub list_type: ListType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl Style {
    /// Return a copy with `patch` applied on top.
    #[must_use]
    pub fn patched(&self, patch: &StylePatch) -> Self {
        let mut next = self.clone();
        if let Some(bold) = patch.bold {
            next.bold = bold;
        }
        if let Some(italic) = patch.italic {
            next.italic = italic;
        }
        if let Some(underline) = patch.underline {
            next.underline = underline;
        }
        if let Some(font_size) = patch.font_size {
            next.font_size = font_size;
        }
        if let Some(color) = &patch.color {
            next.color.clone_from(color);
        }
        if let Some(alignment) = patch.alignment {
            next.alignment = alignment;
        }
        if let Some(list_type) = patch.list_type {
            next.list_type = list_type;
        }
        if let Some(font_family) = &patch.font_family {
            next.font_family.clone_from(font_family);
        }
        next
    }
}

/// A partial style update.
///
/// `None` leaves the attribute alone. For optional attributes the inner
/// `Option` sets (`Some(Some(x))`) or clears (`Some(None)`) the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePatch {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub font_size: Option<Option<f32>>,
    pub color: Option<Option<String>>,
    pub alignment: Option<Option<Alignment>>,
    pub list_type: Option<ListType>,
    pub font_family: Option<Option<String>>,
}

impl StylePatch {
    pub fn bold(bold: bool) -> Self {
        Self {
            bold: Some(bold),
            ..Self::default()
        }
    }

    pub fn italic(italic: bool) -> Self {
        Self {
            italic: Some(italic),
            ..Self::default()
        }
    }

    pub fn alignment(alignment: Alignment) -> Self {
        Self {
            alignment: Some(Some(alignment)),
            ..Self::default()
        }
    }
}
