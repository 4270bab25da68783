//! Per-component state machines. Each struct is the single writer of its own
//! state; the reducer wires them together.

use client_core::{format_pack_sizes, parse_pack_sizes, parse_quantity, QuantityError, ResultView};
use shared::{
    domain::{PackSize, Product, ProductId},
    protocol::FulfillmentResult,
};
use tracing::{debug, error, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiError;

/// Generation stamp attached to every issued request. Only the response
/// carrying a component's current ticket is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RequestTicket(pub u64);

#[derive(Debug, Default)]
struct TicketIssuer {
    last: u64,
}

impl TicketIssuer {
    fn issue(&mut self) -> RequestTicket {
        self.last += 1;
        RequestTicket(self.last)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingRequest {
    ticket: RequestTicket,
    product_id: ProductId,
}

impl PendingRequest {
    fn matches(&self, ticket: RequestTicket, product_id: &ProductId) -> bool {
        self.ticket == ticket && &self.product_id == product_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CatalogPhase {
    #[default]
    NotStarted,
    Loading,
    Settled,
}

#[derive(Debug, Default)]
pub struct CatalogLoader {
    products: Vec<Product>,
    phase: CatalogPhase,
}

impl CatalogLoader {
    /// Issues the catalog read. Runs once per session.
    pub fn start(&mut self) -> Option<BackendCommand> {
        if self.phase != CatalogPhase::NotStarted {
            return None;
        }
        self.phase = CatalogPhase::Loading;
        Some(BackendCommand::LoadCatalog)
    }

    /// Replaces the product set and returns the default selection.
    pub fn apply_loaded(&mut self, products: Vec<Product>) -> Option<ProductId> {
        self.phase = CatalogPhase::Settled;
        self.products = products;
        self.products.first().map(|product| product.id.clone())
    }

    pub fn apply_failed(&mut self, err: &UiError) {
        self.phase = CatalogPhase::Settled;
        error!(error = err.message(), "failed to fetch products");
    }

    pub fn is_loading(&self) -> bool {
        self.phase != CatalogPhase::Settled
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackSetView<'a> {
    Loading,
    Empty,
    Sizes(&'a [PackSize]),
}

#[derive(Debug, Default)]
pub struct PackSetLoader {
    packs: Vec<PackSize>,
    in_flight: Option<PendingRequest>,
    tickets: TicketIssuer,
}

impl PackSetLoader {
    /// Reacts to a new selection. An empty selection clears the set without
    /// a network call; anything else issues a load that supersedes earlier ones.
    pub fn on_selection_changed(
        &mut self,
        selection: Option<&ProductId>,
    ) -> Option<BackendCommand> {
        let Some(product_id) = selection else {
            self.packs.clear();
            self.in_flight = None;
            return None;
        };

        let ticket = self.tickets.issue();
        self.in_flight = Some(PendingRequest {
            ticket,
            product_id: product_id.clone(),
        });
        Some(BackendCommand::LoadPackSizes {
            ticket,
            product_id: product_id.clone(),
        })
    }

    /// Returns true when the set was replaced.
    pub fn apply_loaded(
        &mut self,
        ticket: RequestTicket,
        product_id: &ProductId,
        packs: Vec<PackSize>,
    ) -> bool {
        if !self.is_current(ticket, product_id) {
            debug!(
                ticket = ticket.0,
                product_id = %product_id,
                "discarding stale pack-size response"
            );
            return false;
        }
        self.in_flight = None;
        self.packs = packs;
        true
    }

    /// Keeps the previous set in place.
    pub fn apply_failed(&mut self, ticket: RequestTicket, product_id: &ProductId, err: &UiError) {
        error!(
            ticket = ticket.0,
            product_id = %product_id,
            error = err.message(),
            "failed to fetch packs"
        );
        if self.is_current(ticket, product_id) {
            self.in_flight = None;
        }
    }

    /// Installs the set a save returned. It is newer than any load still out
    /// for the same product.
    pub fn replace(&mut self, product_id: &ProductId, packs: Vec<PackSize>) {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|pending| &pending.product_id == product_id)
        {
            self.in_flight = None;
        }
        self.packs = packs;
    }

    fn is_current(&self, ticket: RequestTicket, product_id: &ProductId) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|pending| pending.matches(ticket, product_id))
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn packs(&self) -> &[PackSize] {
        &self.packs
    }

    pub fn view(&self) -> PackSetView<'_> {
        if self.is_loading() {
            PackSetView::Loading
        } else if self.packs.is_empty() {
            PackSetView::Empty
        } else {
            PackSetView::Sizes(&self.packs)
        }
    }
}

#[derive(Debug, Default)]
pub struct PackSetEditor {
    text: String,
    pending: Option<PendingRequest>,
    error: Option<String>,
    tickets: TicketIssuer,
}

impl PackSetEditor {
    /// Regenerates the text from the authoritative set, dropping unsaved edits.
    pub fn sync_from(&mut self, packs: &[PackSize]) {
        self.text = format_pack_sizes(packs.iter().map(|pack| pack.size));
    }

    pub fn begin_save(&mut self, selection: Option<&ProductId>) -> Option<BackendCommand> {
        let product_id = selection?.clone();
        if let Some(pending) = &self.pending {
            debug!(
                ticket = pending.ticket.0,
                "pack-size save already in flight; ignoring save request"
            );
            return None;
        }

        self.error = None;
        let sizes = parse_pack_sizes(&self.text);
        let ticket = self.tickets.issue();
        self.pending = Some(PendingRequest {
            ticket,
            product_id: product_id.clone(),
        });
        Some(BackendCommand::ReplacePackSizes {
            ticket,
            product_id,
            sizes,
        })
    }

    /// Returns true when the response belongs to the save in flight.
    pub fn apply_saved(&mut self, ticket: RequestTicket, product_id: &ProductId) -> bool {
        if !self.is_current(ticket, product_id) {
            debug!(ticket = ticket.0, "discarding stale pack-size save response");
            return false;
        }
        self.pending = None;
        self.error = None;
        true
    }

    /// Surfaces the failure; the text stays as the user left it.
    pub fn apply_save_failed(
        &mut self,
        ticket: RequestTicket,
        product_id: &ProductId,
        err: &UiError,
    ) {
        warn!(
            ticket = ticket.0,
            product_id = %product_id,
            error = err.message(),
            "failed to update packs"
        );
        if !self.is_current(ticket, product_id) {
            return;
        }
        self.pending = None;
        self.error = Some(err.message().to_string());
    }

    fn is_current(&self, ticket: RequestTicket, product_id: &ProductId) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| pending.matches(ticket, product_id))
    }

    pub fn can_save(&self, packs_loading: bool) -> bool {
        !self.is_saving() && !packs_loading
    }

    pub fn is_saving(&self) -> bool {
        self.pending.is_some()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    NoProduct,
    Quantity(QuantityError),
}

impl SubmitRejection {
    pub fn hint(&self) -> &'static str {
        match self {
            SubmitRejection::NoProduct => "Select a product first",
            SubmitRejection::Quantity(_) => "Enter a quantity of at least 1",
        }
    }
}

#[derive(Debug, Default)]
pub struct FulfillmentOrchestrator {
    quantity_input: String,
    requested_quantity: u64,
    result: Option<FulfillmentResult>,
    error: Option<String>,
    form_hint: Option<&'static str>,
    pending: Option<RequestTicket>,
    tickets: TicketIssuer,
}

impl FulfillmentOrchestrator {
    /// Validates the form and issues the request. A new submission supersedes
    /// any request still in flight.
    pub fn submit(
        &mut self,
        selection: Option<&ProductId>,
    ) -> Result<BackendCommand, SubmitRejection> {
        let checked = match selection {
            None => Err(SubmitRejection::NoProduct),
            Some(product_id) => parse_quantity(&self.quantity_input)
                .map(|quantity| (product_id.clone(), quantity))
                .map_err(SubmitRejection::Quantity),
        };
        let (product_id, quantity) = match checked {
            Ok(valid) => valid,
            Err(rejection) => {
                self.form_hint = Some(rejection.hint());
                return Err(rejection);
            }
        };

        self.form_hint = None;
        self.error = None;
        self.result = None;
        self.requested_quantity = quantity;
        let ticket = self.tickets.issue();
        self.pending = Some(ticket);
        Ok(BackendCommand::Fulfill {
            ticket,
            product_id,
            quantity,
        })
    }

    pub fn apply_result(&mut self, ticket: RequestTicket, result: FulfillmentResult) -> bool {
        if self.pending != Some(ticket) {
            debug!(ticket = ticket.0, "discarding superseded fulfillment response");
            return false;
        }
        self.pending = None;
        self.result = Some(result);
        true
    }

    pub fn apply_failed(&mut self, ticket: RequestTicket, err: &UiError) -> bool {
        warn!(ticket = ticket.0, error = err.message(), "fulfillment request failed");
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        self.result = None;
        self.error = Some(err.message().to_string());
        true
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn quantity_input_mut(&mut self) -> &mut String {
        &mut self.quantity_input
    }

    pub fn requested_quantity(&self) -> u64 {
        self.requested_quantity
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn form_hint(&self) -> Option<&'static str> {
        self.form_hint
    }

    pub fn view(&self) -> Option<ResultView> {
        self.result
            .as_ref()
            .map(|result| ResultView::present(result, self.requested_quantity))
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
