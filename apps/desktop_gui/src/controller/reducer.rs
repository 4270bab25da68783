//! Reducer over the component state machines.
//!
//! User actions and backend events both enter here and leave as the
//! commands the backend worker should run next.

use shared::domain::{Product, ProductId};
use tracing::debug;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::state::{
    CatalogLoader, FulfillmentOrchestrator, PackSetEditor, PackSetLoader,
};

#[derive(Debug, Default)]
pub struct AppState {
    catalog: CatalogLoader,
    selection: Option<ProductId>,
    manual_product_id: String,
    pack_set: PackSetLoader,
    editor: PackSetEditor,
    fulfillment: FulfillmentOrchestrator,
}

impl AppState {
    pub fn start(&mut self) -> Vec<BackendCommand> {
        self.catalog.start().into_iter().collect()
    }

    pub fn select_product(&mut self, product_id: Option<ProductId>) -> Vec<BackendCommand> {
        if self.selection == product_id {
            return Vec::new();
        }
        self.selection = product_id;
        let command = self.pack_set.on_selection_changed(self.selection.as_ref());
        if self.selection.is_none() {
            self.editor.sync_from(self.pack_set.packs());
        }
        command.into_iter().collect()
    }

    /// Free-text product entry used when the catalog is empty. An empty
    /// field is the empty selection.
    pub fn set_manual_product_id(&mut self, text: String) -> Vec<BackendCommand> {
        let selection = (!text.is_empty()).then(|| ProductId::new(text.clone()));
        self.manual_product_id = text;
        self.select_product(selection)
    }

    pub fn save_pack_sizes(&mut self) -> Vec<BackendCommand> {
        if !self.can_save_pack_sizes() {
            return Vec::new();
        }
        self.editor
            .begin_save(self.selection.as_ref())
            .into_iter()
            .collect()
    }

    pub fn submit_fulfillment(&mut self) -> Vec<BackendCommand> {
        match self.fulfillment.submit(self.selection.as_ref()) {
            Ok(command) => vec![command],
            Err(rejection) => {
                debug!(?rejection, "fulfillment submission rejected by form validation");
                Vec::new()
            }
        }
    }

    pub fn apply(&mut self, event: UiEvent) -> Vec<BackendCommand> {
        match event {
            UiEvent::Info(_) | UiEvent::Error(_) => Vec::new(),
            UiEvent::CatalogLoaded(products) => match self.catalog.apply_loaded(products) {
                Some(first) => self.select_product(Some(first)),
                None => Vec::new(),
            },
            UiEvent::CatalogLoadFailed(err) => {
                self.catalog.apply_failed(&err);
                Vec::new()
            }
            UiEvent::PackSizesLoaded {
                ticket,
                product_id,
                packs,
            } => {
                if self.pack_set.apply_loaded(ticket, &product_id, packs) {
                    self.editor.sync_from(self.pack_set.packs());
                }
                Vec::new()
            }
            UiEvent::PackSizesLoadFailed {
                ticket,
                product_id,
                error,
            } => {
                self.pack_set.apply_failed(ticket, &product_id, &error);
                Vec::new()
            }
            UiEvent::PackSizesSaved {
                ticket,
                product_id,
                packs,
            } => {
                if !self.editor.apply_saved(ticket, &product_id) {
                    return Vec::new();
                }
                if self.selection.as_ref() != Some(&product_id) {
                    debug!(
                        product_id = %product_id,
                        "saved pack sizes belong to a product no longer selected"
                    );
                    return Vec::new();
                }
                self.pack_set.replace(&product_id, packs);
                self.editor.sync_from(self.pack_set.packs());
                Vec::new()
            }
            UiEvent::PackSizesSaveFailed {
                ticket,
                product_id,
                error,
            } => {
                self.editor.apply_save_failed(ticket, &product_id, &error);
                Vec::new()
            }
            UiEvent::FulfillmentComputed { ticket, result } => {
                self.fulfillment.apply_result(ticket, result);
                Vec::new()
            }
            UiEvent::FulfillmentFailed { ticket, error } => {
                self.fulfillment.apply_failed(ticket, &error);
                Vec::new()
            }
        }
    }

    pub fn can_save_pack_sizes(&self) -> bool {
        self.selection.is_some() && self.editor.can_save(self.pack_set.is_loading())
    }

    pub fn selection(&self) -> Option<&ProductId> {
        self.selection.as_ref()
    }

    pub fn selected_product(&self) -> Option<&Product> {
        let selection = self.selection.as_ref()?;
        self.catalog
            .products()
            .iter()
            .find(|product| &product.id == selection)
    }

    pub fn manual_product_id(&self) -> &str {
        &self.manual_product_id
    }

    pub fn catalog(&self) -> &CatalogLoader {
        &self.catalog
    }

    pub fn pack_set(&self) -> &PackSetLoader {
        &self.pack_set
    }

    pub fn editor(&self) -> &PackSetEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut PackSetEditor {
        &mut self.editor
    }

    pub fn fulfillment(&self) -> &FulfillmentOrchestrator {
        &self.fulfillment
    }

    pub fn fulfillment_mut(&mut self) -> &mut FulfillmentOrchestrator {
        &mut self.fulfillment
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
