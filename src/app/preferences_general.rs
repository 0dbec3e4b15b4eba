//! General section of the preferences panel
//!
//! Three bound fields (default section, info panel position, default walking
//! speed), each with a reset-to-default button. Edits are collected as
//! [`FieldEvent`]s while drawing and handed to a [`PreferencesEditor`]
//! once the frame's widgets are done.

use crate::constants::*;
use crate::i18n::Translate;
use crate::preferences::Preferences;
use crate::theme;
use crate::types::{SectionDescriptor, SelectChoice, ValueChange};
use crate::ui::components::{input_wrapper, reset_button};
use crate::utils::{speed_from_input, speed_to_display};
use eframe::egui;
use serde_json::Value;

/// Receiver of preference edits; owned by whoever owns the store
pub trait PreferencesEditor {
    fn on_value_change(&mut self, path: &str, change: ValueChange);
    fn reset_pref_to_default(&mut self, path: &str);
}

pub struct PreferencesSectionProps<'a> {
    pub preferences: &'a Preferences,
    /// Bumped by the owner on every reset; invalidates input display caches
    pub reset_changes_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    Changed { path: &'static str, change: ValueChange },
    Reset { path: &'static str },
}

pub fn dispatch(events: Vec<FieldEvent>, editor: &mut dyn PreferencesEditor) {
    for event in events {
        match event {
            FieldEvent::Changed { path, change } => editor.on_value_change(path, change),
            FieldEvent::Reset { path } => editor.reset_pref_to_default(path),
        }
    }
}

/// Enabled sections as select choices, in preference order
pub fn section_choices(sections: &[(String, SectionDescriptor)], t: &dyn Translate) -> Vec<SelectChoice> {
    sections
        .iter()
        .filter(|(_, section)| section.is_enabled())
        .map(|(name, section)| SelectChoice {
            value: name.clone(),
            label: t.t(&section.localized_title),
        })
        .collect()
}

pub fn info_panel_choices(t: &dyn Translate) -> Vec<SelectChoice> {
    vec![
        SelectChoice {
            value: "left".to_string(),
            label: t.t("main:Left"),
        },
        SelectChoice {
            value: "right".to_string(),
            label: t.t("main:Right"),
        },
    ]
}

/// Change event for a select, only when the picked value differs from the current one
pub fn select_change(path: &'static str, current: &str, picked: Option<String>) -> Option<FieldEvent> {
    picked
        .filter(|value| value != current)
        .map(|value| FieldEvent::Changed {
            path,
            change: ValueChange::new(value),
        })
}

/// Display cache of a formatted text input.
///
/// Holds the text being typed so partial input ("5.") survives frames. The
/// text is re-derived from the stored value whenever the reset generation
/// changes or the stored value differs from the last one this input saw.
#[derive(Debug, Clone, Default)]
pub struct FormattedInputCache {
    text: String,
    generation: Option<u64>,
    seen: Option<Value>,
}

impl FormattedInputCache {
    pub fn sync(&mut self, stored: &Value, generation: u64, value_to_string: impl Fn(&Value) -> String) {
        let stale = self.generation != Some(generation) || self.seen.as_ref() != Some(stored);
        if stale {
            self.text = value_to_string(stored);
            self.generation = Some(generation);
            self.seen = Some(stored.clone());
        }
    }

    /// Record typed text and return the value to store
    pub fn edit(&mut self, text: String, string_to_value: impl Fn(&str) -> Value) -> Value {
        let value = string_to_value(&text);
        self.text = text;
        self.seen = Some(value.clone());
        value
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

fn walking_speed_value(text: &str) -> Value {
    speed_from_input(text).map_or(Value::Null, Value::from)
}

/// Draw the section and return this frame's edits; the owner passes them to
/// [`dispatch`] once it no longer borrows the preferences for the props.
pub fn preferences_general_section(
    ui: &mut egui::Ui,
    props: &PreferencesSectionProps<'_>,
    t: &dyn Translate,
) -> Vec<FieldEvent> {
    let prefs = props.preferences.attributes();
    let section_choices = section_choices(&prefs.sections, t);
    let position_choices = info_panel_choices(t);
    let reset_label = t.t("main:preferences:ResetToDefault");
    let mut events = Vec::new();

    collapsible(
        ui,
        "preferences_general",
        &t.t("main:preferences:General"),
        PANEL_TRANSITION_SECS,
        |ui| {
            theme::section_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());

                input_wrapper(ui, &t.t("main:preferences:DefaultSection"), None, |ui| {
                    let picked = select_input(
                        ui,
                        "formFieldPreferencesDefaultSection",
                        &prefs.default_section,
                        &section_choices,
                    );
                    events.extend(select_change(PREF_DEFAULT_SECTION, &prefs.default_section, picked));
                    events.extend(reset_field(ui, props.preferences, PREF_DEFAULT_SECTION, &reset_label));
                });

                input_wrapper(ui, &t.t("main:preferences:InfoPanelPosition"), None, |ui| {
                    let current = prefs.info_panel_position.as_str();
                    let picked = select_input(
                        ui,
                        "formFieldPreferencesInfoPanelPosition",
                        current,
                        &position_choices,
                    );
                    events.extend(select_change(PREF_INFO_PANEL_POSITION, current, picked));
                    events.extend(reset_field(ui, props.preferences, PREF_INFO_PANEL_POSITION, &reset_label));
                });

                let help = t.t("main:preferences:DefaultWalkingSpeedKphHelp");
                input_wrapper(
                    ui,
                    &t.t("main:preferences:DefaultWalkingSpeedKph"),
                    Some(help.as_str()),
                    |ui| {
                        let stored = &prefs.default_walking_speed_meters_per_seconds;
                        if let Some(value) = formatted_input(
                            ui,
                            "formFieldPreferencesDefaultWalkingSpeedMetersPerSeconds",
                            stored,
                            props.reset_changes_count,
                        ) {
                            events.push(FieldEvent::Changed {
                                path: PREF_WALKING_SPEED,
                                change: ValueChange { value },
                            });
                        }
                        events.extend(reset_field(ui, props.preferences, PREF_WALKING_SPEED, &reset_label));
                    },
                );
            });
        },
    );

    events
}

/// Reset button for the field at `path`, enabled only off the default
fn reset_field(
    ui: &mut egui::Ui,
    preferences: &Preferences,
    path: &'static str,
    tooltip: &str,
) -> Option<FieldEvent> {
    let enabled = !preferences.is_default(path);
    reset_button(ui, enabled, tooltip).then_some(FieldEvent::Reset { path })
}

/// Collapsible panel, open by default, with a fixed-duration open/close fade
fn collapsible(
    ui: &mut egui::Ui,
    id_salt: &str,
    title: &str,
    transition_secs: f32,
    add_body: impl FnOnce(&mut egui::Ui),
) {
    let id = ui.make_persistent_id(id_salt);
    let mut open = ui.data(|d| d.get_temp::<bool>(id)).unwrap_or(true);

    let caret = if open {
        egui_phosphor::regular::CARET_DOWN
    } else {
        egui_phosphor::regular::CARET_RIGHT
    };
    let header = ui.add(
        egui::Button::new(
            egui::RichText::new(format!("{}  {}", caret, title))
                .size(theme::FONT_HEADING)
                .strong()
                .color(theme::TEXT_PRIMARY),
        )
        .frame(false),
    );
    if header.clicked() {
        open = !open;
        ui.data_mut(|d| d.insert_temp(id, open));
    }

    let openness = ui
        .ctx()
        .animate_bool_with_time(id.with("openness"), open, transition_secs);
    if openness > 0.0 {
        ui.scope(|ui| {
            ui.multiply_opacity(openness);
            add_body(ui);
        });
    }
}

/// Select input; returns the value picked this frame, if any
fn select_input(ui: &mut egui::Ui, id_salt: &str, current: &str, choices: &[SelectChoice]) -> Option<String> {
    let selected_label = choices
        .iter()
        .find(|c| c.value == current)
        .map(|c| c.label.clone())
        .unwrap_or_default();
    let mut picked = None;
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(selected_label)
        .width(theme::SELECT_WIDTH)
        .show_ui(ui, |ui| {
            for choice in choices {
                if ui
                    .selectable_label(choice.value == current, choice.label.as_str())
                    .clicked()
                {
                    picked = Some(choice.value.clone());
                }
            }
        });
    picked
}

/// Numeric text input showing km/h over a value stored in m/s.
/// Returns the value to store when the text changed this frame.
fn formatted_input(ui: &mut egui::Ui, id_salt: &str, stored: &Value, generation: u64) -> Option<Value> {
    let id = ui.make_persistent_id(id_salt);
    let mut cache = ui.data_mut(|d| d.get_temp_mut_or_default::<FormattedInputCache>(id).clone());
    cache.sync(stored, generation, speed_to_display);

    let mut text = cache.text().to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut text)
            .id(id.with("text"))
            .desired_width(theme::SELECT_WIDTH - 16.0)
            .font(egui::FontId::proportional(theme::FONT_LABEL)),
    );

    let result = response
        .changed()
        .then(|| cache.edit(text, walking_speed_value));
    ui.data_mut(|d| d.insert_temp(id, cache));
    result
}
