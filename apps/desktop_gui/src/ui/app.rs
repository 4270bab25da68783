use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::StartupConfig;
use crate::controller::events::{UiErrorCategory, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_all;
use crate::controller::reducer::AppState;
use crate::ui::panels;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::NotFound => "Not found",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Server => "Server",
        UiErrorCategory::Configuration => "Configuration",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

fn context_label(context: UiErrorContext) -> &'static str {
    match context {
        UiErrorContext::BackendStartup => "Startup",
        UiErrorContext::CatalogLoad => "Loading products",
        UiErrorContext::PackSetLoad => "Loading packs",
        UiErrorContext::PackSetSave => "Saving packs",
        UiErrorContext::Fulfillment => "Calculating packs",
    }
}

pub struct FulfillmentApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    server_url: String,
    state: AppState,

    status: String,
    status_banner: Option<StatusBanner>,
}

impl FulfillmentApp {
    /// Builds the app and issues the one catalog load of the session.
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: &StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            server_url: startup.server_url.clone(),
            state: AppState::default(),
            status: "Connecting".to_string(),
            status_banner: None,
        };
        let commands = app.state.start();
        app.dispatch(commands);
        app
    }

    fn dispatch(&mut self, commands: Vec<BackendCommand>) {
        dispatch_all(&self.cmd_tx, commands, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    self.status = format!(
                        "{} failed ({} error): {}",
                        context_label(err.context()),
                        err_label(err.category()),
                        err.message()
                    );
                    if err.is_user_visible() {
                        self.status_banner = Some(StatusBanner {
                            severity: StatusBannerSeverity::Error,
                            message: self.status.clone(),
                        });
                    }
                }
                other => {
                    let commands = self.state.apply(other);
                    self.dispatch(commands);
                }
            }
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(&self.server_url);
                });
            });
        });
    }

    fn show_main_form(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_status_banner(ui);
                ui.heading("Order Fulfillment");
                ui.add_space(12.0);

                let mut commands = panels::show_product_field(ui, &mut self.state);
                ui.add_space(8.0);
                commands.extend(panels::show_pack_sizes(ui, &mut self.state));
                ui.add_space(8.0);
                commands.extend(panels::show_quantity_form(ui, &mut self.state));
                self.dispatch(commands);

                panels::show_fulfillment_error(ui, &self.state);

                if let Some(view) = self.state.fulfillment().view() {
                    ui.add_space(12.0);
                    ui.separator();
                    panels::show_result(ui, &view);
                }
            });
        });
    }
}

impl eframe::App for FulfillmentApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_status_bar(ctx);
        self.show_main_form(ctx);
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
