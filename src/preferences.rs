//! User preferences stored as preferences.json in the app data directory
//!
//! Preferences are a JSON tree addressed by dot-separated paths
//! (`transit.agencies.defaultColor`). The stored tree is always the built-in
//! defaults with the user's file merged on top, so every path that has a
//! default can be read and reset.

use crate::constants::*;
use crate::types::{InfoPanelPosition, SectionDescriptor};
use crate::utils::kph_to_mps;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace, warn};

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("failed to access preferences file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid preferences JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("preferences root must be a JSON object")]
    NotAnObject,
    #[error("invalid preference path `{0}`")]
    InvalidPath(String),
}

/// Built-in default tree. Section order here is the order offered in the UI.
pub fn default_tree() -> Value {
    json!({
        "language": "en",
        "defaultSection": "agencies",
        "infoPanelPosition": "right",
        "defaultWalkingSpeedMetersPerSeconds": kph_to_mps(DEFAULT_WALKING_SPEED_KPH),
        "sections": {
            "transition": {
                "agencies": { "localizedTitle": "main:sections:Agencies" },
                "nodes": { "localizedTitle": "main:sections:Nodes" },
                "services": { "localizedTitle": "main:sections:Services" },
                "scenarios": { "localizedTitle": "main:sections:Scenarios" },
                "routing": { "localizedTitle": "main:sections:Routing" },
                "accessibilityMap": { "localizedTitle": "main:sections:AccessibilityMap" },
                "batchCalculation": { "localizedTitle": "main:sections:BatchCalculation" },
                "simulations": { "enabled": false, "localizedTitle": "main:sections:Simulations" },
                "gtfsImport": { "localizedTitle": "main:sections:GtfsImport" },
                "gtfsExport": { "localizedTitle": "main:sections:GtfsExport" }
            }
        },
        "transit": {
            "agencies": { "defaultColor": DEFAULT_OBJECT_COLOR },
            "lines": { "defaultColor": DEFAULT_OBJECT_COLOR }
        }
    })
}

/// Typed snapshot of the preferences read by the general section
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralAttributes {
    /// `sections.transition` in iteration order, malformed entries skipped
    pub sections: Vec<(String, SectionDescriptor)>,
    pub default_section: String,
    pub info_panel_position: InfoPanelPosition,
    /// Raw stored value; the speed field decides how to display it
    pub default_walking_speed_meters_per_seconds: Value,
}

#[derive(Debug, Clone)]
pub struct Preferences {
    values: Value,
    defaults: Value,
}

impl Default for Preferences {
    fn default() -> Self {
        let defaults = default_tree();
        Self {
            values: defaults.clone(),
            defaults,
        }
    }
}

impl Preferences {
    /// Build preferences from a user tree merged over the defaults
    pub fn from_user_values(user: Value) -> Result<Self, PreferencesError> {
        if !user.is_object() {
            return Err(PreferencesError::NotAnObject);
        }
        let mut prefs = Self::default();
        merge(&mut prefs.values, user);
        Ok(prefs)
    }

    pub fn file_path(data_dir: &Path) -> PathBuf {
        data_dir.join(PREFS_FILE_NAME)
    }

    pub fn load_from(path: &Path) -> Result<Self, PreferencesError> {
        let s = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&s)?;
        Self::from_user_values(user)
    }

    pub fn load(data_dir: &Path) -> Self {
        let path = Self::file_path(data_dir);
        if !path.exists() {
            debug!("No preferences file found, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(prefs) => {
                debug!(path = %path.display(), "Preferences loaded");
                prefs
            }
            Err(e) => {
                warn!(error = %e, "Failed to load preferences, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), PreferencesError> {
        let path = Self::file_path(data_dir);
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&path, json)?;
        debug!(path = %path.display(), "Preferences saved");
        Ok(())
    }

    /// Raw value at `path`, if any
    pub fn value(&self, path: &str) -> Option<&Value> {
        lookup(&self.values, path)
    }

    pub fn default_value(&self, path: &str) -> Option<&Value> {
        lookup(&self.defaults, path)
    }

    /// Typed read with a fallback for missing or mistyped values
    pub fn get<T: DeserializeOwned>(&self, path: &str, fallback: T) -> T {
        self.value(path)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or(fallback)
    }

    pub fn set(&mut self, path: &str, value: Value) -> Result<(), PreferencesError> {
        let segments = split_path(path)?;
        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| PreferencesError::InvalidPath(path.to_string()))?;

        let mut node = &mut self.values;
        for segment in parents {
            let map = node
                .as_object_mut()
                .ok_or_else(|| PreferencesError::InvalidPath(path.to_string()))?;
            node = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        let map = node
            .as_object_mut()
            .ok_or_else(|| PreferencesError::InvalidPath(path.to_string()))?;
        map.insert(last.to_string(), value);
        Ok(())
    }

    /// Restore the default at `path`, or drop the value when there is none
    pub fn reset_to_default(&mut self, path: &str) -> Result<(), PreferencesError> {
        match self.default_value(path).cloned() {
            Some(default) => self.set(path, default),
            None => {
                let segments = split_path(path)?;
                if let Some((last, parents)) = segments.split_last() {
                    let parent = parents
                        .iter()
                        .try_fold(&mut self.values, |node, segment| node.get_mut(*segment));
                    if let Some(map) = parent.and_then(Value::as_object_mut) {
                        map.remove(*last);
                    }
                }
                Ok(())
            }
        }
    }

    pub fn is_default(&self, path: &str) -> bool {
        self.value(path) == self.default_value(path)
    }

    pub fn attributes(&self) -> GeneralAttributes {
        let sections = self
            .value(PREF_TRANSITION_SECTIONS)
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(name, raw)| {
                        match serde_json::from_value::<SectionDescriptor>(raw.clone()) {
                            Ok(section) => Some((name.clone(), section)),
                            Err(e) => {
                                trace!(section = %name, error = %e, "Skipping malformed section");
                                None
                            }
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        GeneralAttributes {
            sections,
            default_section: self.get(PREF_DEFAULT_SECTION, String::new()),
            info_panel_position: self.get(PREF_INFO_PANEL_POSITION, InfoPanelPosition::default()),
            default_walking_speed_meters_per_seconds: self
                .value(PREF_WALKING_SPEED)
                .cloned()
                .unwrap_or(Value::Null),
        }
    }
}

fn split_path(path: &str) -> Result<Vec<&str>, PreferencesError> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(PreferencesError::InvalidPath(path.to_string()));
    }
    Ok(segments)
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |node, segment| node.get(segment))
}

/// Deep-merge `overlay` into `base`; objects merge key by key, anything else replaces
fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "transition-panels-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn get_returns_default_color() {
        let prefs = Preferences::default();
        let color: String = prefs.get(PREF_AGENCY_DEFAULT_COLOR, "#000000".to_string());
        assert_eq!(color, DEFAULT_OBJECT_COLOR);
    }

    #[test]
    fn get_falls_back_on_missing_or_mistyped_value() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.get("transit.unknown.key", 7u32), 7);

        prefs.set(PREF_LINE_DEFAULT_COLOR, json!(12)).unwrap();
        assert_eq!(
            prefs.get(PREF_LINE_DEFAULT_COLOR, "#0086FF".to_string()),
            "#0086FF"
        );
    }

    #[test]
    fn set_creates_intermediate_objects() {
        let mut prefs = Preferences::default();
        prefs.set("map.layers.visible", json!(true)).unwrap();
        assert!(prefs.get("map.layers.visible", false));
    }

    #[test]
    fn set_rejects_empty_segments() {
        let mut prefs = Preferences::default();
        assert!(matches!(
            prefs.set("transit..color", json!("#fff")),
            Err(PreferencesError::InvalidPath(_))
        ));
        assert!(matches!(
            prefs.set("", json!(1)),
            Err(PreferencesError::InvalidPath(_))
        ));
    }

    #[test]
    fn set_through_scalar_is_invalid() {
        let mut prefs = Preferences::default();
        assert!(matches!(
            prefs.set("defaultSection.nested", json!(1)),
            Err(PreferencesError::InvalidPath(_))
        ));
    }

    #[test]
    fn reset_restores_default_and_is_default_tracks_it() {
        let mut prefs = Preferences::default();
        assert!(prefs.is_default(PREF_INFO_PANEL_POSITION));

        prefs.set(PREF_INFO_PANEL_POSITION, json!("left")).unwrap();
        assert!(!prefs.is_default(PREF_INFO_PANEL_POSITION));
        assert_eq!(prefs.attributes().info_panel_position, InfoPanelPosition::Left);

        prefs.reset_to_default(PREF_INFO_PANEL_POSITION).unwrap();
        assert!(prefs.is_default(PREF_INFO_PANEL_POSITION));
        assert_eq!(prefs.attributes().info_panel_position, InfoPanelPosition::Right);
    }

    #[test]
    fn reset_without_default_removes_value() {
        let mut prefs = Preferences::default();
        prefs.set("custom.flag", json!(true)).unwrap();
        prefs.reset_to_default("custom.flag").unwrap();
        assert!(prefs.value("custom.flag").is_none());
    }

    #[test]
    fn attributes_keep_section_order() {
        let prefs = Preferences::default();
        let attributes = prefs.attributes();
        let names: Vec<&str> = attributes
            .sections
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names.first(), Some(&"agencies"));
        assert_eq!(names.last(), Some(&"gtfsExport"));
        assert!(names.contains(&"simulations"));
    }

    #[test]
    fn attributes_skip_malformed_sections() {
        let prefs = Preferences::from_user_values(json!({
            "sections": { "transition": { "broken": 42 } }
        }))
        .unwrap();
        assert!(prefs
            .attributes()
            .sections
            .iter()
            .all(|(name, _)| name != "broken"));
    }

    #[test]
    fn user_values_merge_over_defaults() {
        let prefs = Preferences::from_user_values(json!({
            "transit": { "lines": { "defaultColor": "#ff0000" } }
        }))
        .unwrap();
        assert_eq!(
            prefs.get(PREF_LINE_DEFAULT_COLOR, String::new()),
            "#ff0000"
        );
        assert_eq!(
            prefs.get(PREF_AGENCY_DEFAULT_COLOR, String::new()),
            DEFAULT_OBJECT_COLOR
        );
    }

    #[test]
    fn non_object_root_is_rejected() {
        assert!(matches!(
            Preferences::from_user_values(json!([1, 2])),
            Err(PreferencesError::NotAnObject)
        ));
    }

    #[test]
    fn save_then_load_keeps_changes() {
        let dir = temp_dir("save-load");
        let mut prefs = Preferences::default();
        prefs.set(PREF_DEFAULT_SECTION, json!("scenarios")).unwrap();
        prefs.save(&dir).unwrap();

        let loaded = Preferences::load(&dir);
        assert_eq!(loaded.attributes().default_section, "scenarios");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let dir = temp_dir("malformed");
        std::fs::write(Preferences::file_path(&dir), "{ not json").unwrap();
        let loaded = Preferences::load(&dir);
        assert!(loaded.is_default(PREF_DEFAULT_SECTION));
        std::fs::remove_dir_all(&dir).ok();
    }
}
