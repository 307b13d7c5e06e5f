//! Purchase API backed by the inventory service's REST endpoint.

use std::time::Duration;

use async_trait::async_trait;
use checkout::{PurchaseApi, PurchaseError, PurchaseRequest, StockLevel};
use domain::Session;
use reqwest::{Client, StatusCode};

use super::{SweetDto, build_client, error_message, normalize_base_url};
use crate::error::Result;

/// Sends `POST {base}/sweets/{id}/purchase?count={n}` with the session's
/// bearer token.
#[derive(Debug, Clone)]
pub struct HttpPurchaseApi {
    client: Client,
    base_url: String,
}

impl HttpPurchaseApi {
    /// Creates a purchase API with its own client.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Self::with_client(build_client(timeout)?, base_url)
    }

    /// Creates a purchase API sharing an existing client.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PurchaseApi for HttpPurchaseApi {
    #[tracing::instrument(
        skip(self, session),
        fields(sweet_id = %request.sweet_id, count = request.quantity)
    )]
    async fn purchase(
        &self,
        session: &Session,
        request: PurchaseRequest,
    ) -> std::result::Result<StockLevel, PurchaseError> {
        let url = format!("{}/sweets/{}/purchase", self.base_url, request.sweet_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&session.token)
            .query(&[("count", request.quantity)])
            .send()
            .await
            .map_err(|e| PurchaseError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let sweet: SweetDto = response
                .json()
                .await
                .map_err(|e| {
                    PurchaseError::Transport(format!("invalid purchase response: {e}"))
                })?;
            return Ok(sweet.stock_level());
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        metrics::counter!("purchase_http_errors_total", "status" => status.as_u16().to_string())
            .increment(1);
        tracing::debug!(status = status.as_u16(), %message, "purchase refused");

        Err(classify(status, message, request))
    }
}

/// Maps a non-success response to a purchase error.
///
/// The service reports a stock shortfall as a generic failure whose message
/// says so, or as `409 Conflict`.
fn classify(status: StatusCode, message: String, request: PurchaseRequest) -> PurchaseError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PurchaseError::Unauthorized,
        StatusCode::NOT_FOUND => PurchaseError::NotFound {
            sweet_id: request.sweet_id,
        },
        StatusCode::CONFLICT => insufficient(request),
        _ if message.to_lowercase().contains("insufficient stock") => insufficient(request),
        _ => PurchaseError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}

fn insufficient(request: PurchaseRequest) -> PurchaseError {
    PurchaseError::InsufficientStock {
        sweet_id: request.sweet_id,
        requested: request.quantity,
        available: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::SweetId;

    fn request() -> PurchaseRequest {
        PurchaseRequest {
            sweet_id: SweetId::new(4),
            quantity: 2,
        }
    }

    #[test]
    fn test_classify_statuses() {
        assert_eq!(
            classify(StatusCode::FORBIDDEN, String::new(), request()),
            PurchaseError::Unauthorized
        );
        assert_eq!(
            classify(StatusCode::NOT_FOUND, String::new(), request()),
            PurchaseError::NotFound {
                sweet_id: SweetId::new(4)
            }
        );
        assert!(matches!(
            classify(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Insufficient stock".to_string(),
                request()
            ),
            PurchaseError::InsufficientStock { requested: 2, .. }
        ));
        assert_eq!(
            classify(StatusCode::BAD_REQUEST, "Count must be >= 1".to_string(), request()),
            PurchaseError::Rejected {
                status: 400,
                message: "Count must be >= 1".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_relative_base_url() {
        assert!(HttpPurchaseApi::new("/api", Duration::from_secs(1)).is_err());
    }
}
