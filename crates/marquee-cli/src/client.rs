//! Async HTTP client wrapping the marquee JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use marquee_core::{
  history::MergedEventEntry, id::SubjectId, record::RelationshipKind,
  roster::RosterEntry,
};
use reqwest::{Client, Url};

/// Connection settings for the marquee API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the marquee JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
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

  /// `{base}/api` followed by `segments`, each percent-encoded.
  fn url(&self, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(self.config.base_url.trim_end_matches('/'))
      .with_context(|| format!("invalid base URL {:?}", self.config.base_url))?;
    url
      .path_segments_mut()
      .map_err(|()| anyhow!("base URL {:?} cannot take a path", self.config.base_url))?
      .pop_if_empty()
      .push("api")
      .extend(segments);
    Ok(url)
  }

  /// `GET /api/subjects/{id}/history`
  pub async fn history(&self, subject_id: &SubjectId) -> Result<Vec<MergedEventEntry>> {
    let url = self.url(&["subjects", subject_id.as_str(), "history"])?;
    let resp = self
      .client
      .get(url)
      .send()
      .await
      .context("GET /subjects/{id}/history failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /subjects/{subject_id}/history → {}", resp.status()));
    }
    resp.json().await.context("deserialising history")
  }

  /// `GET /api/roster[?limit=..][&kinds=..]`
  pub async fn roster(
    &self,
    limit: Option<usize>,
    kinds: &[RelationshipKind],
  ) -> Result<Vec<RosterEntry>> {
    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(limit) = limit {
      query.push(("limit", limit.to_string()));
    }
    if !kinds.is_empty() {
      let list: Vec<String> = kinds.iter().map(ToString::to_string).collect();
      query.push(("kinds", list.join(",")));
    }

    let resp = self
      .client
      .get(self.url(&["roster"])?)
      .query(&query)
      .send()
      .await
      .context("GET /roster failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /roster → {}", resp.status()));
    }
    resp.json().await.context("deserialising roster")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn client(base: &str) -> ApiClient {
    ApiClient::new(ApiConfig { base_url: base.into() }).unwrap()
  }

  #[test]
  fn urls_are_rooted_under_api() {
    let url = client("http://localhost:8080/").url(&["roster"]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8080/api/roster");
  }

  #[test]
  fn subject_segment_is_encoded() {
    let url = client("http://example.com/admin")
      .url(&["subjects", "48 21", "history"])
      .unwrap();
    assert_eq!(url.as_str(), "http://example.com/admin/api/subjects/48%2021/history");
  }
}
