use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::StatusCode;
use tracing::{debug, instrument, warn};

use super::dto::{ProductEnvelope, ProductRecord};
use crate::config::ProductApiConfig;

/// Why a lookup produced no product. Callers may treat every variant as
/// "absent"; the tags exist for logging and error mapping.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("product not found")]
    NotFound,

    #[error("product database unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("product database answered with HTTP {0}")]
    Upstream(StatusCode),

    #[error("product database sent a malformed body: {0}")]
    Malformed(#[source] reqwest::Error),
}

#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn lookup(&self, barcode: &str) -> Result<ProductRecord, LookupError>;
}

pub(crate) fn is_valid_barcode(barcode: &str) -> bool {
    lazy_static! {
        static ref BARCODE_RE: Regex = Regex::new(r"^[0-9]{6,14}$").unwrap();
    }
    BARCODE_RE.is_match(barcode)
}

/// Open Food Facts v0 product API.
#[derive(Clone)]
pub struct OpenFoodFactsClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenFoodFactsClient {
    pub fn new(cfg: &ProductApiConfig) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(cfg.user_agent.clone());
        if let Some(timeout) = cfg.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, cfg.base_url.clone()))
    }

    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub fn product_url(&self, barcode: &str) -> String {
        format!("{}/api/v0/product/{}.json", self.base_url, barcode)
    }
}

#[async_trait]
impl ProductLookup for OpenFoodFactsClient {
    #[instrument(skip(self))]
    async fn lookup(&self, barcode: &str) -> Result<ProductRecord, LookupError> {
        if !is_valid_barcode(barcode) {
            warn!("decoded value is not a product barcode; skipping request");
            return Err(LookupError::NotFound);
        }

        let url = self.product_url(barcode);
        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(LookupError::Transport)?;

        let status = res.status();
        if status != StatusCode::OK {
            warn!(%status, "product lookup failed");
            return Err(LookupError::Upstream(status));
        }

        let envelope: ProductEnvelope = res.json().await.map_err(LookupError::Malformed)?;
        match envelope {
            ProductEnvelope {
                status: 1,
                product: Some(product),
            } => {
                debug!(product_name = product.display_name(), "product found");
                Ok(product)
            }
            ProductEnvelope { status, .. } => {
                debug!(upstream_status = status, "product not in database");
                Err(LookupError::NotFound)
            }
        }
    }
}
