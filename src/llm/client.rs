//! HTTP client for the assistant worker API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use crate::cart::{Cart, LineItem};
use crate::config::BackendConfig;
use crate::error::{ClientError, ClientResult, ConfigError};

use super::history::HistoryEntry;

/// Cart line as the worker expects it alongside each message.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CartItemPayload {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

impl From<&LineItem> for CartItemPayload {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AskRequest<'a> {
    message: &'a str,
    cart_items: Vec<CartItemPayload>,
    user_id: &'a str,
}

#[derive(Deserialize, Debug)]
struct AskReply {
    reply: String,
}

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct HistoryPayload {
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

/// Seam for the assistant backend, so sessions can run against a scripted
/// stand-in under test.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// One chat turn: the user's message plus current cart context, answered
    /// with the assistant's raw reply text.
    async fn ask(&self, message: &str, cart: &Cart, user_id: &str) -> ClientResult<String>;

    /// The stored conversation for this user, oldest first.
    async fn history(&self, user_id: &str) -> ClientResult<Vec<HistoryEntry>>;
}

pub struct HttpBackend {
    http: reqwest::Client,
    ask_url: Url,
    history_url: Url,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, ConfigError> {
        let invalid = |source| ConfigError::InvalidUrl {
            url: config.api_url.clone(),
            source,
        };
        let mut base = Url::parse(&config.api_url).map_err(invalid)?;
        // join() replaces the last path segment unless the base ends in "/"
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let ask_url = base.join("ai-assistant").map_err(invalid)?;
        let history_url = base.join("chat-history").map_err(invalid)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            ask_url,
            history_url,
        })
    }
}

#[async_trait]
impl AssistantBackend for HttpBackend {
    #[instrument(skip(self, cart))]
    async fn ask(&self, message: &str, cart: &Cart, user_id: &str) -> ClientResult<String> {
        let body = AskRequest {
            message,
            cart_items: cart.items().iter().map(CartItemPayload::from).collect(),
            user_id,
        };
        let response = self.http.post(self.ask_url.clone()).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(status, response).await);
        }
        let reply: AskReply =
            response
                .json()
                .await
                .map_err(|error| ClientError::InvalidResponse {
                    reason: error.to_string(),
                })?;
        Ok(reply.reply)
    }

    #[instrument(skip(self))]
    async fn history(&self, user_id: &str) -> ClientResult<Vec<HistoryEntry>> {
        let mut url = self.history_url.clone();
        url.query_pairs_mut().append_pair("userId", user_id);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(status, response).await);
        }
        let payload: HistoryPayload =
            response
                .json()
                .await
                .map_err(|error| ClientError::InvalidResponse {
                    reason: error.to_string(),
                })?;
        Ok(payload.history)
    }
}

/// Maps a non-2xx response to a client error, pulling the server's own error
/// text out of the body when there is one. 429 stays distinguishable so the
/// session can word the rate-limit message differently.
async fn error_for_status(status: StatusCode, response: reqwest::Response) -> ClientError {
    let detail = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error);
    match status.as_u16() {
        429 => ClientError::RateLimited { detail },
        code => ClientError::Api {
            status: code,
            detail,
        },
    }
}
