//! REST order store for a hosted PostgREST-style database endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::orders::{
    models::OrderRecord,
    store::{OrderStore, OrderStoreError},
};

/// Configuration for a hosted order table.
#[derive(Debug, Clone)]
pub struct RestOrderStoreConfig {
    /// Project base URL, e.g. `"https://project.example.co"`.
    pub base_url: String,

    /// Anonymous API key sent as both `apikey` and bearer token.
    pub api_key: String,

    /// Table orders are inserted into.
    pub table: String,

    /// Request timeout.
    pub timeout: Duration,
}

impl RestOrderStoreConfig {
    /// Configuration for the `orders` table with a 15 second timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: "orders".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// HTTP client inserting orders into a hosted table.
#[derive(Debug, Clone)]
pub struct RestOrderStore {
    config: RestOrderStoreConfig,
    http: Client,
}

impl RestOrderStore {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: RestOrderStoreConfig) -> Result<Self, OrderStoreError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    /// URL orders are posted to.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.table
        )
    }
}

#[async_trait]
impl OrderStore for RestOrderStore {
    async fn insert(&self, order: &OrderRecord) -> Result<(), OrderStoreError> {
        let url = self.endpoint();

        debug!(order = %order.id(), %url, "posting order");

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Prefer", "return=minimal")
            .json(&[order])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(error) => {
                    debug!(%error, "could not read rejection body");

                    String::new()
                }
            };

            warn!(order = %order.id(), %status, "order store rejected order");

            return Err(OrderStoreError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&body, status),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pulls the `message` out of a JSON error body, falling back to the raw text and then to the
/// status reason. Never empty.
fn rejection_message(body: &str, status: StatusCode) -> String {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map_or_else(|_| body.trim().to_string(), |error| error.message.trim().to_string());

    if !message.is_empty() {
        return message;
    }

    status
        .canonical_reason()
        .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{cart::Cart, checkout::CustomerInfo, orders::OrderId, products::Product};

    #[test]
    fn endpoint_joins_base_url_and_table() -> TestResult {
        let store = RestOrderStore::new(RestOrderStoreConfig::new(
            "https://shop.example.co/",
            "anon",
        ))?;

        assert_eq!(store.endpoint(), "https://shop.example.co/rest/v1/orders");

        Ok(())
    }

    #[test]
    fn rejection_message_prefers_json_message() {
        let body = r#"{"code":"23505","message":"duplicate key value violates unique constraint"}"#;

        assert_eq!(
            rejection_message(body, StatusCode::CONFLICT),
            "duplicate key value violates unique constraint"
        );
    }

    #[test]
    fn rejection_message_falls_back_to_raw_text() {
        assert_eq!(
            rejection_message(" upstream timed out \n", StatusCode::BAD_GATEWAY),
            "upstream timed out"
        );
    }

    #[test]
    fn rejection_message_is_never_blank() -> TestResult {
        assert_eq!(
            rejection_message("", StatusCode::SERVICE_UNAVAILABLE),
            "Service Unavailable"
        );
        assert_eq!(
            rejection_message(r#"{"message":"  "}"#, StatusCode::CONFLICT),
            "Conflict"
        );
        assert_eq!(
            rejection_message("\n", StatusCode::from_u16(599)?),
            "HTTP 599"
        );

        Ok(())
    }

    fn order() -> TestResult<OrderRecord> {
        let created_at = Timestamp::from_millisecond(1_725_000_000_000)?;
        let mut cart = Cart::new();
        cart.add_item(&Product::new(1, "كريم", 22_500), 2);

        let customer = CustomerInfo {
            first_name: "منى".to_string(),
            last_name: "حسن".to_string(),
            phone: "01112345678".to_string(),
            email: None,
            city: "الجيزة".to_string(),
            address: "الدقي".to_string(),
            notes: None,
        };

        Ok(OrderRecord::place(
            OrderId::at(created_at),
            &cart,
            customer,
            created_at,
        )?)
    }

    fn store(server: &MockServer) -> Result<RestOrderStore, OrderStoreError> {
        RestOrderStore::new(RestOrderStoreConfig::new(server.uri(), "anon"))
    }

    #[tokio::test]
    async fn insert_posts_single_row_with_auth_headers() -> TestResult {
        let server = MockServer::start().await;
        let order = order()?;

        Mock::given(method("POST"))
            .and(path("/rest/v1/orders"))
            .and(header("apikey", "anon"))
            .and(header("authorization", "Bearer anon"))
            .and(header("prefer", "return=minimal"))
            .and(body_json(serde_json::to_value([&order])?))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        store(&server)?.insert(&order).await?;

        let requests = server.received_requests().await.ok_or("request recording is off")?;
        let request = requests.first().ok_or("no request received")?;
        let rows: serde_json::Value = serde_json::from_slice(&request.body)?;

        assert_eq!(rows.as_array().map(Vec::len), Some(1));
        assert_eq!(rows[0]["id"], "KLD-1725000000000");
        assert_eq!(rows[0]["total"].as_f64(), Some(450.0));
        assert_eq!(rows[0]["items"][0]["price"].as_f64(), Some(225.0));
        assert_eq!(rows[0]["payment_method"], "cod");

        Ok(())
    }

    #[tokio::test]
    async fn conflict_surfaces_store_message() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/orders"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint",
            })))
            .mount(&server)
            .await;

        let result = store(&server)?.insert(&order()?).await;

        assert!(
            matches!(
                &result,
                Err(OrderStoreError::Rejected { status: 409, message })
                    if message == "duplicate key value violates unique constraint"
            ),
            "expected a 409 rejection, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_error_body_uses_status_reason() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = store(&server)?.insert(&order()?).await;

        assert_eq!(
            result.err().map(|error| error.message()).as_deref(),
            Some("Service Unavailable")
        );

        Ok(())
    }
}
