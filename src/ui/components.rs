//! Reusable UI components
//!
//! Leaf widgets shared by the agency list and the preference sections.

use crate::theme;
use crate::transit::{Agency, Line, TransitObject};
use eframe::egui;

/// Props of one agency row: the agency plus the whole selection context
pub struct AgencyRowProps<'a> {
    pub agency: &'a Agency,
    pub line_count: usize,
    pub selected_agency: Option<&'a Agency>,
    pub selected_line: Option<&'a Line>,
}

impl AgencyRowProps<'_> {
    /// Active when the agency is being edited or owns the line being edited
    pub fn is_active(&self) -> bool {
        let id = self.agency.id();
        self.selected_agency.is_some_and(|a| a.id() == id)
            || self.selected_line.is_some_and(|l| l.agency_id() == Some(id))
    }
}

/// Agency row; returns the click response
pub fn agency_row(ui: &mut egui::Ui, props: &AgencyRowProps<'_>, lines_label: &str) -> egui::Response {
    let width = ui.available_width();
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(width, theme::ROW_HEIGHT), egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        if props.is_active() {
            painter.rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_ROW_ACTIVE);
            painter.rect_stroke(
                rect,
                theme::RADIUS_DEFAULT,
                egui::Stroke::new(theme::STROKE_DEFAULT, theme::ACCENT),
                egui::StrokeKind::Inside,
            );
        } else if response.hovered() {
            painter.rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_ELEVATED);
        }

        let swatch = egui::Rect::from_center_size(
            egui::pos2(rect.min.x + 14.0, rect.center().y),
            egui::vec2(theme::SWATCH_SIZE, theme::SWATCH_SIZE),
        );
        painter.rect_filled(swatch, 2.0, theme::object_color(props.agency.color()));

        painter.text(
            egui::pos2(swatch.max.x + theme::SPACING_MD, rect.center().y),
            egui::Align2::LEFT_CENTER,
            props.agency.label(),
            egui::FontId::proportional(theme::FONT_BODY),
            theme::TEXT_PRIMARY,
        );
        painter.text(
            egui::pos2(rect.max.x - theme::SPACING_MD, rect.center().y),
            egui::Align2::RIGHT_CENTER,
            format!("{} {}", props.line_count, lines_label),
            egui::FontId::proportional(theme::FONT_SMALL),
            theme::TEXT_MUTED,
        );
    }

    response
}

/// Labelled field wrapper; the help text shows as a hover tooltip on the label
pub fn input_wrapper<R>(
    ui: &mut egui::Ui,
    label: &str,
    help: Option<&str>,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    ui.vertical(|ui| {
        let label_resp = ui.add(
            egui::Label::new(
                egui::RichText::new(label)
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_SECONDARY),
            )
            .selectable(false),
        );
        if let Some(help) = help {
            label_resp.on_hover_text(help);
        }
        let inner = ui.horizontal(add_contents).inner;
        ui.add_space(theme::SPACING_SM);
        inner
    })
    .inner
}

/// Circular-arrow reset button; disabled while the value is already the default
pub fn reset_button(ui: &mut egui::Ui, enabled: bool, tooltip: &str) -> bool {
    let icon = egui::RichText::new(egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE)
        .size(theme::FONT_BODY)
        .color(if enabled { theme::TEXT_SECONDARY } else { theme::TEXT_DIM });
    ui.add_enabled(enabled, egui::Button::new(icon).frame(false))
        .on_hover_text(tooltip)
        .clicked()
}
