//! Common types and data structures

use serde::{Deserialize, Serialize};

/// Kind under which an object is registered in the selection registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Agency,
    Line,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Agency => "agency",
            ObjectKind::Line => "line",
        }
    }
}

/// Side of the main window where the info panel is docked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoPanelPosition {
    Left,
    #[default]
    Right,
}

impl InfoPanelPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            InfoPanelPosition::Left => "left",
            InfoPanelPosition::Right => "right",
        }
    }
}

/// Payload handed to a preference change handler: `{ "value": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueChange {
    pub value: serde_json::Value,
}

impl ValueChange {
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self { value: value.into() }
    }
}

/// Entry of the `sections.transition` preference map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    pub localized_title: String,
}

impl SectionDescriptor {
    /// Only an explicit `false` disables a section
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// One option of a select input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectChoice {
    pub value: String,
    pub label: String,
}
