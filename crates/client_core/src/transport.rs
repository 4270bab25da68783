//! reqwest-backed implementation of [`FulfillmentApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{PackSize, Product, ProductId},
    error::ApiError,
    protocol::{FulfillmentQuery, FulfillmentResult},
};
use tracing::debug;
use url::Url;

use crate::{ClientError, ClientResult, FulfillmentApi};

#[derive(Debug, Clone)]
pub struct HttpFulfillmentClient {
    http: Client,
    base_url: Url,
}

impl HttpFulfillmentClient {
    pub fn new(server_url: &str, timeout: Duration) -> ClientResult<Self> {
        let invalid = |reason: String| ClientError::InvalidServerUrl {
            url: server_url.to_string(),
            reason,
        };

        let base_url = Url::parse(server_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "unsupported scheme `{}`",
                base_url.scheme()
            )));
        }
        if base_url.cannot_be_a_base() {
            return Err(invalid("url cannot carry a path".to_string()));
        }

        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base url. Each segment is percent-encoded
    /// on its own, so ids containing `/` stay a single segment.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidServerUrl {
                url: self.base_url.to_string(),
                reason: "url cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(|err| {
                debug!(status = status.as_u16(), "failed to read error body: {err}");
                err
            })?;
            return Err(ApiError::from_response(status.as_u16(), &body).into());
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl FulfillmentApi for HttpFulfillmentClient {
    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        let url = self.endpoint(&["api", "products"])?;
        let response = self.http.get(url).send().await?;
        Self::decode(response).await
    }

    async fn list_pack_sizes(&self, product_id: &ProductId) -> ClientResult<Vec<PackSize>> {
        let url = self.endpoint(&["api", "products", product_id.as_str(), "packs"])?;
        let response = self.http.get(url).send().await?;
        Self::decode(response).await
    }

    async fn replace_pack_sizes(
        &self,
        product_id: &ProductId,
        sizes: &[u64],
    ) -> ClientResult<Vec<PackSize>> {
        let url = self.endpoint(&["api", "products", product_id.as_str(), "packs"])?;
        debug!(product_id = %product_id, sizes = ?sizes, "replacing pack sizes");
        let response = self.http.put(url).json(sizes).send().await?;
        Self::decode(response).await
    }

    async fn fulfill(
        &self,
        product_id: &ProductId,
        quantity: u64,
    ) -> ClientResult<FulfillmentResult> {
        let url = self.endpoint(&["api", "fulfill"])?;
        let response = self
            .http
            .get(url)
            .query(&FulfillmentQuery {
                product_id: product_id.as_str(),
                quantity,
            })
            .send()
            .await?;
        let result: FulfillmentResult = Self::decode(response).await?;
        debug!(product_id = %product_id, quantity, ?result, "fulfillment response");
        Ok(result)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
