//! Fetches the product feed, with a short-lived in-memory cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult, ConfigError};

use super::Product;

/// Wire envelope of the feed: `{ "product": [ ... ] }`.
#[derive(Deserialize, Debug)]
struct FeedPayload {
    #[serde(default)]
    product: Vec<Product>,
}

#[derive(Clone)]
struct CachedFeed {
    products: Vec<Product>,
    fetched_at: Instant,
}

impl CachedFeed {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() > ttl
    }
}

pub struct CatalogClient {
    http: reqwest::Client,
    feed_url: Url,
    ttl: Duration,
    cached: Arc<RwLock<Option<CachedFeed>>>,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, ConfigError> {
        let feed_url = Url::parse(&config.feed_url).map_err(|source| ConfigError::InvalidUrl {
            url: config.feed_url.clone(),
            source,
        })?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            feed_url,
            ttl: Duration::from_secs(config.cache_ttl_seconds),
            cached: Arc::new(RwLock::new(None)),
        })
    }

    /// All products, served from cache while fresh.
    #[instrument(skip(self))]
    pub async fn products(&self) -> CatalogResult<Vec<Product>> {
        {
            let cached = self.cached.read().await;
            if let Some(feed) = cached.as_ref() {
                if !feed.is_expired(self.ttl) {
                    debug!(count = feed.products.len(), "Product feed cache hit");
                    return Ok(feed.products.clone());
                }
            }
        }

        debug!(url = %self.feed_url, "Fetching product feed");
        let response = self.http.get(self.feed_url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::Status {
                status: response.status().as_u16(),
            });
        }
        let payload: FeedPayload = response.json().await?;

        let mut cached = self.cached.write().await;
        *cached = Some(CachedFeed {
            products: payload.product.clone(),
            fetched_at: Instant::now(),
        });
        Ok(payload.product)
    }

    /// Products matching a keyword, optionally restricted to in-stock ones.
    /// An empty keyword matches everything.
    #[instrument(skip(self))]
    pub async fn search(&self, keyword: &str, available_only: bool) -> CatalogResult<Vec<Product>> {
        let products = self.products().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.matches_keyword(keyword))
            .filter(|p| !available_only || p.is_available())
            .collect())
    }
}
