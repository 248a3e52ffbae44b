//! # HTTP Clients
//!
//! Reqwest-backed implementations of the collaborator traits.
//!
//! ## Wire Shape
//! The services answer with a thin envelope:
//! ```json
//! { "data": { ... }, "message": null }
//! ```
//! On failure the envelope's `message` (or the raw body) becomes the
//! user-facing remote error text. The engine depends only on these outcome
//! semantics; the path layout below is the deployment's convention, not a
//! contract the core cares about.
//!
//! ## Status Code Mapping
//! ```text
//! 400 → LedgerError::Validation (service-side input rejection)
//! 404 → LedgerError::NotFound
//! 409 → LedgerError::Remote (conflict; message passed through)
//! 5xx → LedgerError::Remote (message passed through when present)
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use vela_core::{Address, Order, ValidationError};

use crate::api::{
    AddressResolver, CarrierQuoter, CheckoutOutcome, CheckoutRequest, CreateOrderRequest,
    OrderLedger, OrderListFilter, OrderPage, Parcel, RegionId, ZoneCode,
};
use crate::config::GatewayConfig;
use crate::error::{LedgerError, LedgerResult};

// =============================================================================
// Envelope
// =============================================================================

/// Response envelope shared by the ledger and shipping services.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    data: Option<T>,
    message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    fn into_data(self) -> LedgerResult<T> {
        self.data.ok_or_else(|| {
            LedgerError::MalformedResponse(
                self.message
                    .unwrap_or_else(|| "envelope carried no data".to_string()),
            )
        })
    }
}

/// Maps a non-success response to a typed error.
async fn error_for(response: reqwest::Response) -> LedgerError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    // Prefer the envelope message when the body parses as one.
    let message = serde_json::from_str::<ApiEnvelope<()>>(&body)
        .ok()
        .and_then(|e| e.message)
        .or(if body.is_empty() { None } else { Some(body) });

    match status {
        StatusCode::BAD_REQUEST => LedgerError::Validation(ValidationError::InvalidFormat {
            field: "request".to_string(),
            reason: message.unwrap_or_else(|| "rejected by service".to_string()),
        }),
        StatusCode::NOT_FOUND => LedgerError::NotFound {
            entity: "resource",
            id: message.unwrap_or_default(),
        },
        _ => LedgerError::Remote { message },
    }
}

/// Shared request plumbing for both gateways.
#[derive(Debug, Clone)]
struct JsonGateway {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl JsonGateway {
    fn new(base_url: &str, bearer_token: Option<String>, timeout_secs: u64) -> LedgerResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(JsonGateway {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> LedgerResult<T> {
        let response = self.authorize(self.client.get(self.url(path))).send().await?;
        Self::unwrap_response(response).await
    }

    async fn get_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> LedgerResult<T> {
        let response = self
            .authorize(self.client.get(self.url(path)).query(query))
            .send()
            .await?;
        Self::unwrap_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> LedgerResult<T> {
        let response = self
            .authorize(self.client.post(self.url(path)).json(body))
            .send()
            .await?;
        Self::unwrap_response(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> LedgerResult<T> {
        let response = self
            .authorize(self.client.put(self.url(path)).json(body))
            .send()
            .await?;
        Self::unwrap_response(response).await
    }

    /// POST where success needs no body (the caller re-fetches instead).
    async fn post_no_data<B: Serialize>(&self, path: &str, body: &B) -> LedgerResult<()> {
        let response = self
            .authorize(self.client.post(self.url(path)).json(body))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_for(response).await)
        }
    }

    async fn delete(&self, path: &str) -> LedgerResult<()> {
        let response = self
            .authorize(self.client.delete(self.url(path)))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_for(response).await)
        }
    }

    async fn unwrap_response<T: DeserializeOwned>(response: reqwest::Response) -> LedgerResult<T> {
        if !response.status().is_success() {
            return Err(error_for(response).await);
        }
        let envelope: ApiEnvelope<T> = response.json().await?;
        envelope.into_data()
    }
}

// =============================================================================
// Order Ledger Client
// =============================================================================

/// HTTP client for the remote order ledger.
#[derive(Debug, Clone)]
pub struct HttpLedger {
    gateway: JsonGateway,
}

impl HttpLedger {
    /// Builds a client from gateway configuration.
    pub fn new(config: &GatewayConfig) -> LedgerResult<Self> {
        Ok(HttpLedger {
            gateway: JsonGateway::new(
                &config.ledger.base_url,
                config.ledger.bearer_token.clone(),
                config.client.timeout_secs,
            )?,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpsertItemBody<'a> {
    variant_id: &'a str,
    quantity: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyPromotionBody<'a> {
    code: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CancelBody<'a> {
    reason: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateShippingBody<'a> {
    address: &'a Address,
    fee_minor: i64,
}

#[async_trait]
impl OrderLedger for HttpLedger {
    async fn create_draft(&self, req: CreateOrderRequest) -> LedgerResult<Order> {
        debug!("create_draft");
        self.gateway.post("api/orders", &req).await
    }

    async fn fetch(&self, order_id: &str) -> LedgerResult<Order> {
        debug!(order_id = %order_id, "fetch order");
        self.gateway.get(&format!("api/orders/{}", order_id)).await
    }

    async fn upsert_item(
        &self,
        order_id: &str,
        variant_id: &str,
        quantity: i64,
    ) -> LedgerResult<Order> {
        debug!(order_id = %order_id, variant_id = %variant_id, quantity, "upsert item");
        self.gateway
            .put(
                &format!("api/orders/{}/items", order_id),
                &UpsertItemBody {
                    variant_id,
                    quantity,
                },
            )
            .await
    }

    async fn remove_item(&self, order_id: &str, variant_id: &str) -> LedgerResult<Order> {
        debug!(order_id = %order_id, variant_id = %variant_id, "remove item");
        // Quantity 0 and deletion are the same operation on the wire.
        self.upsert_item(order_id, variant_id, 0).await
    }

    async fn apply_promotion(&self, order_id: &str, code: &str) -> LedgerResult<Order> {
        debug!(order_id = %order_id, code = %code, "apply promotion");
        self.gateway
            .post(
                &format!("api/orders/{}/promotion", order_id),
                &ApplyPromotionBody { code },
            )
            .await
    }

    async fn remove_promotion(&self, order_id: &str) -> LedgerResult<Order> {
        debug!(order_id = %order_id, "remove promotion");
        self.gateway
            .post(
                &format!("api/orders/{}/promotion/remove", order_id),
                &serde_json::json!({}),
            )
            .await
    }

    async fn cancel(&self, order_id: &str, reason: &str) -> LedgerResult<()> {
        debug!(order_id = %order_id, "cancel order");
        self.gateway
            .post_no_data(
                &format!("api/orders/{}/cancel", order_id),
                &CancelBody { reason },
            )
            .await
    }

    async fn delete_draft(&self, order_id: &str) -> LedgerResult<()> {
        debug!(order_id = %order_id, "delete draft");
        self.gateway.delete(&format!("api/orders/{}", order_id)).await
    }

    async fn update_shipping(
        &self,
        order_id: &str,
        address: Address,
        fee_minor: i64,
    ) -> LedgerResult<Order> {
        debug!(order_id = %order_id, fee_minor, "update shipping");
        self.gateway
            .put(
                &format!("api/orders/{}/shipping", order_id),
                &UpdateShippingBody {
                    address: &address,
                    fee_minor,
                },
            )
            .await
    }

    async fn list(&self, filter: OrderListFilter) -> LedgerResult<OrderPage> {
        debug!(?filter, "list orders");
        self.gateway.get_query("api/orders", &filter).await
    }

    async fn checkout(
        &self,
        order_id: &str,
        req: CheckoutRequest,
    ) -> LedgerResult<CheckoutOutcome> {
        debug!(order_id = %order_id, "checkout");
        self.gateway
            .post(&format!("api/orders/{}/checkout", order_id), &req)
            .await
    }
}

// =============================================================================
// Shipping Gateway Client
// =============================================================================

/// HTTP client for address resolution and carrier quotation.
#[derive(Debug, Clone)]
pub struct HttpShippingGateway {
    gateway: JsonGateway,
}

impl HttpShippingGateway {
    /// Builds a client from gateway configuration.
    pub fn new(config: &GatewayConfig) -> LedgerResult<Self> {
        Ok(HttpShippingGateway {
            gateway: JsonGateway::new(&config.shipping.base_url, None, config.client.timeout_secs)?,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegionQuery<'a> {
    province: &'a str,
    district: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ZoneQuery<'a> {
    region: &'a str,
    ward: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteBody<'a> {
    zone: &'a str,
    parcels: &'a [Parcel],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    fee_minor: i64,
}

#[async_trait]
impl AddressResolver for HttpShippingGateway {
    async fn resolve_region(&self, province: &str, district: &str) -> LedgerResult<RegionId> {
        debug!(province = %province, district = %district, "resolve region");
        self.gateway
            .get_query("api/regions", &RegionQuery { province, district })
            .await
    }

    async fn resolve_zone(&self, region: &RegionId, ward: &str) -> LedgerResult<ZoneCode> {
        debug!(region = %region.0, ward = %ward, "resolve zone");
        self.gateway
            .get_query(
                "api/zones",
                &ZoneQuery {
                    region: &region.0,
                    ward,
                },
            )
            .await
    }
}

#[async_trait]
impl CarrierQuoter for HttpShippingGateway {
    async fn quote(&self, zone: &ZoneCode, parcels: &[Parcel]) -> LedgerResult<i64> {
        debug!(zone = %zone.0, lines = parcels.len(), "carrier quote");
        let resp: QuoteResponse = self
            .gateway
            .post("api/quotes", &QuoteBody {
                zone: &zone.0,
                parcels,
            })
            .await?;
        Ok(resp.fee_minor)
    }
}
