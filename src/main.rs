#![windows_subsystem = "windows"]
//! Transition Panels - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod i18n;
mod preferences;
mod theme;
mod transit;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use preferences::Preferences;
use tracing::info;
use types::InfoPanelPosition;
use utils::{get_data_dir, rasterize_app_icon};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "transition-panels.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,transition_panels=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Transition Panels starting");

    let preferences = Preferences::load(&data_dir);

    let (rgba, width, height) = rasterize_app_icon(64);
    let icon = egui::IconData { rgba, width, height };

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1100.0, 720.0])
        .with_min_inner_size([800.0, 500.0])
        .with_title(APP_NAME)
        .with_icon(std::sync::Arc::new(icon));

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, preferences, data_dir)))),
    )
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_bar")
            .frame(egui::Frame::new().fill(theme::BG_ELEVATED).inner_margin(egui::Margin::symmetric(12, 6)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(APP_NAME)
                                .size(theme::FONT_HEADING)
                                .strong()
                                .color(theme::ACCENT_LIGHT),
                        )
                        .selectable(false),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let label = format!("{}  {}", egui_phosphor::regular::GEAR, self.t("main:Preferences"));
                        if ui.add(theme::button(label)).clicked() {
                            self.show_preferences = !self.show_preferences;
                        }
                    });
                });
            });

        // The list sits on the side chosen for the info panel
        let position = self.prefs.preferences.attributes().info_panel_position;
        let side_panel = match position {
            InfoPanelPosition::Left => egui::SidePanel::left("agency_list_panel"),
            InfoPanelPosition::Right => egui::SidePanel::right("agency_list_panel"),
        };
        side_panel
            .resizable(false)
            .exact_width(theme::SIDEBAR_WIDTH)
            .frame(theme::sidebar_frame())
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_agency_list(ui);
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE).inner_margin(egui::Margin::same(20)))
            .show(ctx, |ui| {
                self.render_edit_panel(ui);
            });

        // Preferences modal (centered overlay)
        if self.show_preferences {
            let modal_response = egui::Modal::new(egui::Id::new("preferences_modal"))
                .backdrop_color(egui::Color32::from_black_alpha(120))
                .frame(theme::modal_frame())
                .show(ctx, |ui| {
                    ui.set_width(theme::PREFERENCES_WIDTH);

                    ui.horizontal(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(self.t("main:Preferences"))
                                    .size(theme::FONT_HEADING)
                                    .strong(),
                            )
                            .selectable(false),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let close = egui::RichText::new(egui_phosphor::regular::X)
                                .size(theme::FONT_HEADING)
                                .color(theme::TEXT_DIM);
                            if ui.add(egui::Button::new(close).frame(false)).clicked() {
                                self.show_preferences = false;
                            }
                        });
                    });
                    ui.add_space(theme::SPACING_SM);
                    ui.separator();
                    ui.add_space(theme::SPACING_SM);

                    self.render_preferences(ui);
                });

            if modal_response.should_close() {
                self.show_preferences = false;
            }
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.prefs.persist();
    }
}
