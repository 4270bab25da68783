use async_trait::async_trait;
use shared::{
    domain::{PackSize, Product, ProductId},
    protocol::FulfillmentResult,
};

pub mod error;
pub mod pack_sizes;
pub mod presenter;
pub mod transport;

pub use error::{ClientError, ClientResult};
pub use pack_sizes::{format_pack_sizes, parse_pack_sizes, parse_quantity, QuantityError};
pub use presenter::{PackRow, PackRows, ResultView};
pub use transport::HttpFulfillmentClient;

/// Operations the remote fulfillment service exposes.
#[async_trait]
pub trait FulfillmentApi: Send + Sync {
    async fn list_products(&self) -> ClientResult<Vec<Product>>;
    async fn list_pack_sizes(&self, product_id: &ProductId) -> ClientResult<Vec<PackSize>>;
    /// Replaces the whole pack-size set of a product and returns the stored set.
    async fn replace_pack_sizes(
        &self,
        product_id: &ProductId,
        sizes: &[u64],
    ) -> ClientResult<Vec<PackSize>>;
    async fn fulfill(
        &self,
        product_id: &ProductId,
        quantity: u64,
    ) -> ClientResult<FulfillmentResult>;
}

/// Stand-in used when no usable client could be built; every call fails with
/// the startup reason.
pub struct UnavailableFulfillmentApi {
    reason: String,
}

impl UnavailableFulfillmentApi {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable<T>(&self) -> ClientResult<T> {
        Err(ClientError::Unavailable(format!(
            "fulfillment service unavailable: {}",
            self.reason
        )))
    }
}

#[async_trait]
impl FulfillmentApi for UnavailableFulfillmentApi {
    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.unavailable()
    }

    async fn list_pack_sizes(&self, _product_id: &ProductId) -> ClientResult<Vec<PackSize>> {
        self.unavailable()
    }

    async fn replace_pack_sizes(
        &self,
        _product_id: &ProductId,
        _sizes: &[u64],
    ) -> ClientResult<Vec<PackSize>> {
        self.unavailable()
    }

    async fn fulfill(
        &self,
        _product_id: &ProductId,
        _quantity: u64,
    ) -> ClientResult<FulfillmentResult> {
        self.unavailable()
    }
}
