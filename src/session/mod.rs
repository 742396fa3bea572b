//! Conversation session: owns the cart and drives chat turns.

use std::time::Duration;

use tracing::{instrument, warn};
use uuid::Uuid;

use crate::cart::Cart;
use crate::catalog::Product;
use crate::config::AssistantConfig;
use crate::engine::{self, templates};
use crate::error::ClientError;
use crate::llm::{AssistantBackend, ChatMessage, Role};

/// Where the caller should navigate after a checkout directive, and how long
/// to keep the confirmation readable first.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRedirect {
    pub url: String,
    pub delay: Duration,
}

/// One completed chat turn, ready for presentation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Turn {
    pub messages: Vec<String>,
    pub details: Vec<Product>,
    pub redirect: Option<CheckoutRedirect>,
}

impl Turn {
    fn message(text: impl Into<String>) -> Self {
        Self {
            messages: vec![text.into()],
            ..Self::default()
        }
    }
}

pub struct ChatSession {
    backend: Box<dyn AssistantBackend>,
    config: AssistantConfig,
    cart: Cart,
    user_id: String,
}

impl ChatSession {
    pub fn new(backend: Box<dyn AssistantBackend>, config: AssistantConfig) -> Self {
        Self {
            backend,
            config,
            cart: Cart::new(),
            user_id: format!("user_{}", Uuid::new_v4()),
        }
    }

    /// Reuse a stored identity instead of the generated one.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Replay the stored conversation. An empty or unreachable history falls
    /// back to the greeting.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) -> Vec<ChatMessage> {
        match self.backend.history(&self.user_id).await {
            Ok(entries) if !entries.is_empty() => {
                entries.iter().map(ChatMessage::from_entry).collect()
            }
            Ok(_) => vec![self.greeting()],
            Err(error) => {
                warn!(%error, "Could not load chat history");
                vec![self.greeting()]
            }
        }
    }

    /// One chat turn: send the message with cart context, run the raw reply
    /// through the dispatch pipeline, and fold backend failures into
    /// apologetic chat messages instead of errors.
    #[instrument(skip(self))]
    pub async fn turn(&mut self, message: &str) -> Turn {
        match self.backend.ask(message, &self.cart, &self.user_id).await {
            Ok(raw) => {
                let outcome = engine::handle_reply(&raw, &mut self.cart, &self.config);
                let redirect = outcome.navigate.then(|| CheckoutRedirect {
                    url: self.config.checkout.url.clone(),
                    delay: Duration::from_millis(self.config.checkout.redirect_delay_ms),
                });
                Turn {
                    messages: outcome.messages,
                    details: outcome.details,
                    redirect,
                }
            }
            Err(ClientError::RateLimited { detail }) => {
                Turn::message(templates::rate_limited(detail.as_deref()))
            }
            Err(ClientError::Api { status, detail }) => {
                warn!(status, "Assistant API error");
                let reason = detail
                    .unwrap_or_else(|| "the assistant reported a server problem".to_string());
                Turn::message(templates::trouble(&reason))
            }
            Err(error @ ClientError::Transport { .. }) => {
                warn!(%error, "Assistant transport failure");
                Turn::message(templates::connection_trouble())
            }
            Err(error) => {
                warn!(%error, "Assistant call failed");
                Turn::message(templates::trouble(&error.to_string()))
            }
        }
    }

    /// Ask about a product on the user's behalf. Returns the question to show
    /// as the user's own message, plus the assistant's turn.
    pub async fn request_product_detail(&mut self, product: &Product) -> (String, Turn) {
        let question = templates::detail_question(&product.title);
        let turn = self.turn(&question).await;
        (question, turn)
    }

    fn greeting(&self) -> ChatMessage {
        ChatMessage::new(Role::Ai, templates::greeting(&self.config.persona.name))
    }
}
