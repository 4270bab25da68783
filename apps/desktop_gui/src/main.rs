use std::sync::Arc;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use client_core::{FulfillmentApi, HttpFulfillmentClient, UnavailableFulfillmentApi};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::{load_startup_config, Args};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::ui::FulfillmentApp;

fn main() -> anyhow::Result<()> {
    let startup = load_startup_config(Args::parse());

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&startup.log_filter))
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);

    let api: Arc<dyn FulfillmentApi> =
        match HttpFulfillmentClient::new(&startup.server_url, startup.request_timeout) {
            Ok(client) => {
                tracing::info!(server_url = %client.base_url(), "fulfillment client ready");
                Arc::new(client)
            }
            Err(err) => {
                tracing::error!(server_url = %startup.server_url, "failed to build client: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(
                    UiErrorContext::BackendStartup,
                    &err,
                )));
                Arc::new(UnavailableFulfillmentApi::new(err.user_message()))
            }
        };
    backend_bridge::runtime::launch(cmd_rx, ui_tx, api);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Order Fulfillment")
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Order Fulfillment",
        options,
        Box::new(move |_cc| Ok(Box::new(FulfillmentApp::bootstrap(cmd_tx, ui_rx, &startup)))),
    )
    .map_err(|err| anyhow!("desktop shell exited with error: {err}"))
}
