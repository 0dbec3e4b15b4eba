//! Application constants and preference key paths

pub const APP_NAME: &str = "Transition Panels";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fallback color for new agencies and lines when no preference is set
pub const DEFAULT_OBJECT_COLOR: &str = "#0086FF";

pub const PREFS_FILE_NAME: &str = "preferences.json";

// Preference paths (dot-separated)
pub const PREF_AGENCY_DEFAULT_COLOR: &str = "transit.agencies.defaultColor";
pub const PREF_LINE_DEFAULT_COLOR: &str = "transit.lines.defaultColor";
pub const PREF_DEFAULT_SECTION: &str = "defaultSection";
pub const PREF_INFO_PANEL_POSITION: &str = "infoPanelPosition";
pub const PREF_WALKING_SPEED: &str = "defaultWalkingSpeedMetersPerSeconds";
pub const PREF_TRANSITION_SECTIONS: &str = "sections.transition";
pub const PREF_LANGUAGE: &str = "language";

/// Open/close animation of the general preferences panel, in seconds
pub const PANEL_TRANSITION_SECS: f32 = 0.1;

/// Walking speed offered before the user picks one, in km/h
pub const DEFAULT_WALKING_SPEED_KPH: f64 = 5.0;
