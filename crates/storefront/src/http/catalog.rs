//! Catalog source backed by the inventory service's REST endpoints.

use std::time::Duration;

use async_trait::async_trait;
use common::Money;
use domain::{CatalogError, CatalogItem, CatalogQuery, CatalogSource};
use reqwest::{Client, RequestBuilder};

use super::{SweetDto, build_client, error_message, normalize_base_url};
use crate::error::Result;

/// Reads sweets from `GET {base}/sweets` and `GET {base}/sweets/search`.
#[derive(Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpCatalog {
    /// Creates a catalog with its own client.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Self::with_client(build_client(timeout)?, base_url)
    }

    /// Creates a catalog sharing an existing client.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
            token: None,
        })
    }

    /// Sends `token` as a bearer credential on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    async fn fetch(
        &self,
        request: RequestBuilder,
    ) -> std::result::Result<Vec<CatalogItem>, CatalogError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Rejected {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let sweets: Vec<SweetDto> = response
            .json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))?;
        tracing::debug!(count = sweets.len(), "catalog fetched");
        sweets.into_iter().map(CatalogItem::try_from).collect()
    }
}

impl std::fmt::Debug for HttpCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalog")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Query parameters for the set, non-empty filters, in the service's names.
pub(crate) fn search_params(query: &CatalogQuery) -> Vec<(&'static str, String)> {
    let text = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    let price = |value: Option<Money>| value.map(|m| format!("{:.2}", m.as_decimal()));

    [
        ("name", text(&query.name)),
        ("category", text(&query.category)),
        ("minPrice", price(query.min_price)),
        ("maxPrice", price(query.max_price)),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| (key, v)))
    .collect()
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn list(&self) -> std::result::Result<Vec<CatalogItem>, CatalogError> {
        let url = format!("{}/sweets", self.base_url);
        self.fetch(self.client.get(url)).await
    }

    async fn search(
        &self,
        query: &CatalogQuery,
    ) -> std::result::Result<Vec<CatalogItem>, CatalogError> {
        let params = search_params(query);
        if params.is_empty() {
            return self.list().await;
        }
        let url = format!("{}/sweets/search", self.base_url);
        self.fetch(self.client.get(url).query(&params)).await
    }
}
