//! Async HTTP client wrapping the dealdesk JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use dealdesk_core::deal::Deal;
use reqwest::Client;
use serde_json::Value;

/// Connection settings for the dealdesk API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the dealdesk JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Map a non-2xx response to an error carrying the response body, so
  /// validation messages reach the terminal verbatim.
  async fn check(resp: reqwest::Response, what: &str) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(anyhow!("{what} → {status}: {body}"))
  }

  /// `GET /api/deals[?status=...][&assigned_to_user_id=...]`
  pub async fn list_deals(
    &self,
    status: Option<&str>,
    assigned_to_user_id: Option<i64>,
  ) -> Result<Vec<Deal>> {
    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(status) = status {
      query.push(("status", status.to_owned()));
    }
    if let Some(user_id) = assigned_to_user_id {
      query.push(("assigned_to_user_id", user_id.to_string()));
    }

    let resp = self
      .client
      .get(self.url("/deals"))
      .query(&query)
      .send()
      .await
      .context("GET /deals failed")?;

    Self::check(resp, "GET /deals")
      .await?
      .json()
      .await
      .context("deserialising deals")
  }

  /// `GET /api/deals/{id}`
  pub async fn get_deal(&self, id: i64) -> Result<Deal> {
    let resp = self
      .client
      .get(self.url(&format!("/deals/{id}")))
      .send()
      .await
      .context("GET /deals/{id} failed")?;

    Self::check(resp, "GET /deals/{id}")
      .await?
      .json()
      .await
      .context("deserialising deal")
  }

  /// `POST /api/deals`
  pub async fn create_deal(&self, body: &Value) -> Result<Deal> {
    let resp = self
      .client
      .post(self.url("/deals"))
      .json(body)
      .send()
      .await
      .context("POST /deals failed")?;

    Self::check(resp, "POST /deals")
      .await?
      .json()
      .await
      .context("deserialising created deal")
  }

  /// `PATCH /api/deals/{id}`
  pub async fn patch_deal(&self, id: i64, body: &Value) -> Result<Deal> {
    let resp = self
      .client
      .patch(self.url(&format!("/deals/{id}")))
      .json(body)
      .send()
      .await
      .context("PATCH /deals/{id} failed")?;

    Self::check(resp, "PATCH /deals/{id}")
      .await?
      .json()
      .await
      .context("deserialising updated deal")
  }

  /// `DELETE /api/deals/{id}`
  pub async fn delete_deal(&self, id: i64) -> Result<()> {
    let resp = self
      .client
      .delete(self.url(&format!("/deals/{id}")))
      .send()
      .await
      .context("DELETE /deals/{id} failed")?;

    Self::check(resp, "DELETE /deals/{id}").await?;
    Ok(())
  }
}
