//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::FulfillmentApi;
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. Every command runs as its own task, so
/// a slow call never holds up the ones queued behind it.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    api: Arc<dyn FulfillmentApi>,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("fulfillment-backend")
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        while let Ok(cmd) = cmd_rx.recv() {
            let api = Arc::clone(&api);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                let event = execute(api.as_ref(), cmd).await;
                if ui_tx.try_send(event).is_err() {
                    warn!("ui event queue unavailable; dropping backend event");
                }
            });
        }
        info!("backend command queue closed; worker exiting");
    });
}

/// Runs one command against the service and turns the outcome into the
/// event the reducer expects. Errors never escape as anything but an event.
pub async fn execute(api: &dyn FulfillmentApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::LoadCatalog => {
            info!("backend: list_products");
            match api.list_products().await {
                Ok(products) => UiEvent::CatalogLoaded(products),
                Err(err) => UiEvent::CatalogLoadFailed(UiError::from_client_error(
                    UiErrorContext::CatalogLoad,
                    &err,
                )),
            }
        }
        BackendCommand::LoadPackSizes { ticket, product_id } => {
            info!(ticket = ticket.0, product_id = %product_id, "backend: list_pack_sizes");
            match api.list_pack_sizes(&product_id).await {
                Ok(packs) => UiEvent::PackSizesLoaded {
                    ticket,
                    product_id,
                    packs,
                },
                Err(err) => UiEvent::PackSizesLoadFailed {
                    ticket,
                    product_id,
                    error: UiError::from_client_error(UiErrorContext::PackSetLoad, &err),
                },
            }
        }
        BackendCommand::ReplacePackSizes {
            ticket,
            product_id,
            sizes,
        } => {
            info!(
                ticket = ticket.0,
                product_id = %product_id,
                count = sizes.len(),
                "backend: replace_pack_sizes"
            );
            match api.replace_pack_sizes(&product_id, &sizes).await {
                Ok(packs) => UiEvent::PackSizesSaved {
                    ticket,
                    product_id,
                    packs,
                },
                Err(err) => UiEvent::PackSizesSaveFailed {
                    ticket,
                    product_id,
                    error: UiError::from_client_error(UiErrorContext::PackSetSave, &err),
                },
            }
        }
        BackendCommand::Fulfill {
            ticket,
            product_id,
            quantity,
        } => {
            info!(
                ticket = ticket.0,
                product_id = %product_id,
                quantity,
                "backend: fulfill"
            );
            match api.fulfill(&product_id, quantity).await {
                Ok(result) => UiEvent::FulfillmentComputed { ticket, result },
                Err(err) => UiEvent::FulfillmentFailed {
                    ticket,
                    error: UiError::from_client_error(UiErrorContext::Fulfillment, &err),
                },
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
