//! Form sections. Each returns the backend commands its interactions produced.

use client_core::{PackRows, ResultView};
use egui::{Button, ComboBox, Grid, Key, RichText, TextEdit, Ui};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::AppState;
use crate::controller::state::PackSetView;
use crate::ui::theme;

pub fn show_product_field(ui: &mut Ui, state: &mut AppState) -> Vec<BackendCommand> {
    ui.label(RichText::new("Product").strong());

    if state.catalog().is_loading() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading products...");
        });
        return Vec::new();
    }

    if state.catalog().products().is_empty() {
        let mut text = state.manual_product_id().to_string();
        let response = ui.add(
            TextEdit::singleline(&mut text)
                .hint_text("Enter product UUID")
                .desired_width(320.0),
        );
        if response.changed() {
            return state.set_manual_product_id(text);
        }
        return Vec::new();
    }

    let mut chosen = state.selection().cloned();
    let selected_text = state
        .selected_product()
        .map(|product| product.name.clone())
        .unwrap_or_else(|| "Select a product".to_string());
    ComboBox::from_id_salt("product_select")
        .selected_text(selected_text)
        .width(320.0)
        .show_ui(ui, |ui| {
            for product in state.catalog().products() {
                ui.selectable_value(
                    &mut chosen,
                    Some(product.id.clone()),
                    product.name.as_str(),
                );
            }
        });

    if chosen.as_ref() != state.selection() {
        return state.select_product(chosen);
    }
    Vec::new()
}

pub fn show_pack_sizes(ui: &mut Ui, state: &mut AppState) -> Vec<BackendCommand> {
    if state.selection().is_none() {
        return Vec::new();
    }

    ui.label(RichText::new("Available Pack Sizes:").strong());
    ui.horizontal_wrapped(|ui| match state.pack_set().view() {
        PackSetView::Loading => {
            ui.spinner();
            ui.label("Loading...");
        }
        PackSetView::Empty => {
            ui.label("No packs configured");
        }
        PackSetView::Sizes(packs) => {
            for pack in packs {
                theme::pack_badge(ui, pack.size);
            }
        }
    });

    let saving = state.editor().is_saving();
    let can_save = state.can_save_pack_sizes();
    let mut save_clicked = false;
    ui.horizontal(|ui| {
        ui.add_enabled(
            !saving,
            TextEdit::singleline(state.editor_mut().text_mut())
                .hint_text("250, 500, 1000")
                .desired_width(240.0),
        );
        let label = if saving { "Saving..." } else { "Save Packs" };
        save_clicked = ui.add_enabled(can_save, Button::new(label)).clicked();
    });

    if let Some(message) = state.editor().error() {
        theme::error_label(ui, message);
    }

    if save_clicked {
        return state.save_pack_sizes();
    }
    Vec::new()
}

pub fn show_quantity_form(ui: &mut Ui, state: &mut AppState) -> Vec<BackendCommand> {
    ui.label(RichText::new("Quantity").strong());
    let response = ui.add(
        TextEdit::singleline(state.fulfillment_mut().quantity_input_mut())
            .hint_text("Enter quantity")
            .desired_width(160.0),
    );
    let enter_pressed =
        response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

    let loading = state.fulfillment().is_loading();
    let label = if loading { "Loading..." } else { "Calculate Packs" };
    let clicked = ui.add_enabled(!loading, Button::new(label)).clicked();

    if let Some(hint) = state.fulfillment().form_hint() {
        ui.colored_label(theme::HINT_TEXT, hint);
    }

    if (clicked || enter_pressed) && !loading {
        return state.submit_fulfillment();
    }
    Vec::new()
}

pub fn show_fulfillment_error(ui: &mut Ui, state: &AppState) {
    if let Some(message) = state.fulfillment().error() {
        theme::error_label(ui, message);
    }
}

pub fn show_result(ui: &mut Ui, view: &ResultView) {
    ui.heading("Fulfillment Result");
    ui.horizontal(|ui| {
        ui.label(RichText::new("Requested:").strong());
        ui.label(format!("{} items", view.requested_quantity));
    });
    ui.horizontal(|ui| {
        ui.label(RichText::new("Total Items:").strong());
        ui.label(format!("{} items", view.total_items));
    });

    ui.add_space(8.0);
    ui.label(RichText::new("Packs to Ship").size(16.0).strong());
    Grid::new("packs_table")
        .striped(true)
        .num_columns(2)
        .min_col_width(120.0)
        .show(ui, |ui| {
            ui.label(RichText::new("Pack Size").strong());
            ui.label(RichText::new("Quantity").strong());
            ui.end_row();

            match &view.rows {
                PackRows::Table(rows) => {
                    for row in rows {
                        ui.label(row.pack_size.to_string());
                        ui.label(row.count.to_string());
                        ui.end_row();
                    }
                }
                PackRows::NoPacks => {
                    ui.label("No packs");
                    ui.end_row();
                }
            }
        });
}
