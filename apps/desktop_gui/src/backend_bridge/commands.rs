//! Backend commands queued from UI to backend worker.

use shared::domain::ProductId;

use crate::controller::state::RequestTicket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    LoadCatalog,
    LoadPackSizes {
        ticket: RequestTicket,
        product_id: ProductId,
    },
    ReplacePackSizes {
        ticket: RequestTicket,
        product_id: ProductId,
        sizes: Vec<u64>,
    },
    Fulfill {
        ticket: RequestTicket,
        product_id: ProductId,
        quantity: u64,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadCatalog => "load_catalog",
            BackendCommand::LoadPackSizes { .. } => "load_pack_sizes",
            BackendCommand::ReplacePackSizes { .. } => "replace_pack_sizes",
            BackendCommand::Fulfill { .. } => "fulfill",
        }
    }
}
