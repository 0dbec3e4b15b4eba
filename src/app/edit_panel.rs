//! Info panel for the object being edited (save / cancel)

use super::App;
use crate::i18n::Translate;
use crate::theme;
use crate::transit::{SelectedObject, TransitObject};
use crate::types::ObjectKind;
use eframe::egui;
use tracing::info;

enum EditOutcome {
    Save,
    Cancel,
}

fn text_field(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.add(
        egui::Label::new(egui::RichText::new(label).size(theme::FONT_LABEL).color(theme::TEXT_MUTED))
            .selectable(false),
    );
    ui.add(egui::TextEdit::singleline(value).desired_width(theme::SELECT_WIDTH));
}

fn color_field(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.add(
        egui::Label::new(egui::RichText::new(label).size(theme::FONT_LABEL).color(theme::TEXT_MUTED))
            .selectable(false),
    );
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(theme::SWATCH_SIZE * 2.0, theme::SWATCH_SIZE * 2.0),
            egui::Sense::hover(),
        );
        ui.painter()
            .rect_filled(rect, theme::RADIUS_DEFAULT, theme::object_color(value));
        ui.add(egui::TextEdit::singleline(value).desired_width(theme::SELECT_WIDTH - 32.0));
    });
}

fn save_cancel(ui: &mut egui::Ui, save_label: String, cancel_label: String) -> Option<EditOutcome> {
    let mut outcome = None;
    ui.add_space(theme::SPACING_MD);
    ui.horizontal(|ui| {
        if ui.add(theme::button_blue(save_label)).clicked() {
            outcome = Some(EditOutcome::Save);
        }
        if ui.add(theme::button(cancel_label)).clicked() {
            outcome = Some(EditOutcome::Cancel);
        }
    });
    outcome
}

impl App {
    pub(crate) fn render_edit_panel(&mut self, ui: &mut egui::Ui) {
        if self.selection.is_empty() {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(self.t("main:NothingSelected"))
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
            return;
        }

        let save_label = self.t("main:Save");
        let cancel_label = self.t("main:Cancel");

        if let Some(agency) = self.selection.selected_agency_mut() {
            let title = if agency.is_new() {
                self.catalog.t("transit:transitAgency:NewUnsaved")
            } else {
                format!("{} {}", self.catalog.t("transit:transitAgency:Agency"), agency.label())
            };
            ui.heading(title);
            ui.add_space(theme::SPACING_SM);
            let attributes = agency.attributes_mut();
            text_field(ui, &self.catalog.t("transit:transitAgency:Acronym"), &mut attributes.acronym);
            text_field(ui, &self.catalog.t("transit:transitAgency:Name"), &mut attributes.name);
            color_field(ui, &self.catalog.t("main:Color"), &mut attributes.color);

            match save_cancel(ui, save_label, cancel_label) {
                Some(EditOutcome::Save) => {
                    if let Some(SelectedObject::Agency(agency)) = self.selection.deselect(ObjectKind::Agency) {
                        info!(id = agency.id(), "Saving agency");
                        self.collections.save_agency(agency);
                    }
                }
                Some(EditOutcome::Cancel) => {
                    self.selection.deselect(ObjectKind::Agency);
                }
                None => {}
            }
            return;
        }

        if let Some(line) = self.selection.selected_line_mut() {
            let title = if line.is_new() {
                self.catalog.t("transit:transitLine:NewUnsaved")
            } else {
                format!("{} {}", self.catalog.t("transit:transitLine:Line"), line.label())
            };
            ui.heading(title);
            ui.add_space(theme::SPACING_SM);

            let agency_label = self.catalog.t("transit:transitAgency:Agency");
            let agencies = self.collections.agencies();
            let attributes = line.attributes_mut();
            ui.add(
                egui::Label::new(
                    egui::RichText::new(agency_label).size(theme::FONT_LABEL).color(theme::TEXT_MUTED),
                )
                .selectable(false),
            );
            let current = attributes
                .agency_id
                .and_then(|id| agencies.get(id))
                .map(|a| a.label())
                .unwrap_or_default();
            egui::ComboBox::from_id_salt("line_agency")
                .selected_text(current)
                .width(theme::SELECT_WIDTH)
                .show_ui(ui, |ui| {
                    for agency in agencies.features() {
                        ui.selectable_value(&mut attributes.agency_id, Some(agency.id()), agency.label());
                    }
                });
            text_field(ui, &self.catalog.t("transit:transitLine:Shortname"), &mut attributes.shortname);
            text_field(ui, &self.catalog.t("transit:transitLine:Longname"), &mut attributes.longname);
            color_field(ui, &self.catalog.t("main:Color"), &mut attributes.color);

            match save_cancel(ui, save_label, cancel_label) {
                Some(EditOutcome::Save) => {
                    if let Some(SelectedObject::Line(line)) = self.selection.deselect(ObjectKind::Line) {
                        info!(id = line.id(), "Saving line");
                        self.collections.save_line(line);
                    }
                }
                Some(EditOutcome::Cancel) => {
                    self.selection.deselect(ObjectKind::Line);
                }
                None => {}
            }
        }
    }
}
