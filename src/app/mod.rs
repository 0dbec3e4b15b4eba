//! App module - contains the main application state and logic

mod agency_list;
mod edit_panel;
mod preferences_general;

use crate::constants::PREF_LANGUAGE;
use crate::i18n::{Catalog, Translate};
use crate::preferences::Preferences;
use crate::theme;
use crate::transit::{CollectionManager, SelectedObjects};
use crate::types::ValueChange;
use crate::utils::rasterize_agency_icon;
use agency_list::{agency_list_view, apply_action, AgencyListProps, TransitContext};
use eframe::egui;
use preferences_general::{dispatch, preferences_general_section, PreferencesEditor, PreferencesSectionProps};
use std::path::PathBuf;
use tracing::{debug, info, warn};

// ============================================================================
// PREFERENCES STATE
// ============================================================================

/// Preferences store plus the reset counter handed to the panels
pub struct PreferencesState {
    pub(crate) preferences: Preferences,
    pub(crate) reset_changes_count: u64,
    /// Where changes are written; None keeps them in memory only
    data_dir: Option<PathBuf>,
}

impl PreferencesState {
    pub fn new(preferences: Preferences, data_dir: Option<PathBuf>) -> Self {
        Self {
            preferences,
            reset_changes_count: 0,
            data_dir,
        }
    }

    pub fn persist(&self) {
        if let Some(dir) = &self.data_dir {
            if let Err(e) = self.preferences.save(dir) {
                warn!(error = %e, "Failed to save preferences");
            }
        }
    }
}

impl PreferencesEditor for PreferencesState {
    fn on_value_change(&mut self, path: &str, change: ValueChange) {
        match self.preferences.set(path, change.value) {
            Ok(()) => {
                debug!(path, "Preference changed");
                self.persist();
            }
            Err(e) => warn!(path, error = %e, "Rejected preference change"),
        }
    }

    fn reset_pref_to_default(&mut self, path: &str) {
        if let Err(e) = self.preferences.reset_to_default(path) {
            warn!(path, error = %e, "Failed to reset preference");
            return;
        }
        self.reset_changes_count += 1;
        debug!(path, resets = self.reset_changes_count, "Preference reset to default");
        self.persist();
    }
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) prefs: PreferencesState,
    pub(crate) catalog: Catalog,
    pub(crate) collections: CollectionManager,
    pub(crate) selection: SelectedObjects,
    pub(crate) agency_icon: Option<egui::TextureHandle>,
    pub(crate) show_preferences: bool,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, preferences: Preferences, data_dir: PathBuf) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let (pixels, w, h) = rasterize_agency_icon(64);
        let agency_icon = cc.egui_ctx.load_texture(
            "agency_icon",
            egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
            egui::TextureOptions::LINEAR,
        );

        let language: String = preferences.get(PREF_LANGUAGE, "en".to_string());
        let catalog = Catalog::for_language(&language);
        info!(language = catalog.language(), "Interface language");

        Self {
            prefs: PreferencesState::new(preferences, Some(data_dir)),
            catalog,
            collections: CollectionManager::default(),
            selection: SelectedObjects::default(),
            agency_icon: Some(agency_icon),
            show_preferences: false,
        }
    }

    pub(crate) fn t(&self, key: &str) -> String {
        self.catalog.t(key)
    }

    pub(crate) fn render_agency_list(&mut self, ui: &mut egui::Ui) {
        let props = AgencyListProps {
            agency_collection: Some(self.collections.agencies()),
            line_collection: Some(self.collections.lines()),
            selected_agency: self.selection.selected_agency(),
            selected_line: self.selection.selected_line(),
        };
        let action = agency_list_view(ui, &props, &self.catalog, self.agency_icon.as_ref());

        if let Some(action) = action {
            apply_action(
                action,
                TransitContext {
                    preferences: &self.prefs.preferences,
                    collections: &mut self.collections,
                    selection: &mut self.selection,
                },
            );
        }
    }

    pub(crate) fn render_preferences(&mut self, ui: &mut egui::Ui) {
        let props = PreferencesSectionProps {
            preferences: &self.prefs.preferences,
            reset_changes_count: self.prefs.reset_changes_count,
        };
        let events = preferences_general_section(ui, &props, &self.catalog);
        dispatch(events, &mut self.prefs);
    }
}
