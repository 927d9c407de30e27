//! Client for the hosted food catalog (PostgREST-style table endpoint).

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::models::{FoodItem, ServiceErrorBody};
use crate::{Config, Error, Result};

/// Columns selected from the catalog table.
pub const FOOD_COLUMNS: &str = "id,name,price,rating,veg,calories,image_url";

/// Source of the full food item collection.
#[async_trait]
pub trait FoodCatalog: Send + Sync {
    /// Fetch every item, ordered by identifier ascending.
    async fn fetch_all(&self) -> Result<Vec<FoodItem>>;
}

/// Catalog backed by the hosted database's REST interface.
pub struct RestCatalog {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl RestCatalog {
    /// Create a new catalog client.
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: table.into(),
        }
    }

    /// Create from application configuration.
    pub fn from_config(http_client: reqwest::Client, config: &Config) -> Self {
        Self::new(
            http_client,
            config.supabase_url.clone(),
            config.supabase_anon_key.clone(),
            config.food_table.clone(),
        )
    }

    /// URL of the list query.
    pub fn query_url(&self) -> String {
        format!(
            "{}/rest/v1/{}?select={}&order=id.asc",
            self.base_url, self.table, FOOD_COLUMNS
        )
    }
}

#[async_trait]
impl FoodCatalog for RestCatalog {
    async fn fetch_all(&self) -> Result<Vec<FoodItem>> {
        let url = self.query_url();
        debug!(url = %url, "Querying food catalog");

        let response = self
            .http_client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let items = decode_response(status, &body)?;

        info!(count = items.len(), table = %self.table, "Fetched food catalog");
        Ok(items)
    }
}

/// Longest raw error body carried into a user-visible message.
const MAX_ERROR_BODY: usize = 200;

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Decode a catalog response body.
///
/// Non-success statuses are read as the service's error object; if that
/// fails the raw body is used as the message.
pub fn decode_response(status: StatusCode, body: &str) -> Result<Vec<FoodItem>> {
    if !status.is_success() {
        let message = match serde_json::from_str::<ServiceErrorBody>(body) {
            Ok(err) => match err.hint {
                Some(hint) => format!("{} ({})", err.message, hint),
                None => err.message,
            },
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
            Err(_) => truncate(body.trim(), MAX_ERROR_BODY),
        };
        return Err(Error::service(status.as_u16(), message));
    }

    Ok(serde_json::from_str(body)?)
}
