//! reqwest-backed [`EngineApi`] implementation

use std::time::Duration;

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use pivot_core::prelude::*;
use pivot_core::{
    Asset, AssetDraft, AssetMutation, BatchCommand, MethodologyDetail, MethodologySummary,
    Relationship, RelationshipDraft, Scenario, Stats, TriggerMatch,
};

use crate::engine_api::{check_asset, check_relationship, EngineApi};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for a methodology engine instance
#[derive(Debug, Clone)]
pub struct HttpEngineApi {
    client: reqwest::Client,
    /// Always ends with `/` so relative joins keep any path prefix
    base: Url,
}

impl HttpEngineApi {
    /// Build a client for `base_url` (e.g. `http://127.0.0.1:8000`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = normalize_base(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {e}")))?;

        debug!("Engine API client targeting {}", base);
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve `api/...` segments against the base URL.
    ///
    /// Each segment is pushed individually so ids are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::invalid_base_url(self.base.as_str()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&impl Serialize>,
    ) -> Result<Response> {
        let url = self.endpoint(segments)?;
        trace!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            // `.json()` also sets Content-Type: application/json
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport_error)?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let response = self.send(Method::GET, segments, None::<&()>).await?;
        response.json::<T>().await.map_err(transport_error)
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let response = self.send(method, segments, Some(body)).await?;
        response.json::<T>().await.map_err(transport_error)
    }

    /// Fire-and-forget endpoints: the response body is informational only.
    async fn send_discarding(&self, method: Method, segments: &[&str]) -> Result<()> {
        self.send(method, segments, None::<&()>).await.map(|_| ())
    }
}

impl EngineApi for HttpEngineApi {
    async fn stats(&self) -> Result<Stats> {
        self.get_json(&["api", "stats"]).await
    }

    async fn assets(&self) -> Result<Vec<Asset>> {
        self.get_json(&["api", "assets"]).await
    }

    async fn methodologies(&self) -> Result<Vec<MethodologySummary>> {
        self.get_json(&["api", "methodologies"]).await
    }

    async fn methodology(&self, id: &str) -> Result<MethodologyDetail> {
        self.get_json(&["api", "methodologies", id]).await
    }

    async fn trigger_matches(&self) -> Result<Vec<TriggerMatch>> {
        self.get_json(&["api", "trigger-matches"]).await
    }

    async fn batch_commands(&self) -> Result<Vec<BatchCommand>> {
        self.get_json(&["api", "batch-commands"]).await
    }

    async fn relationships(&self) -> Result<Vec<Relationship>> {
        self.get_json(&["api", "relationships"]).await
    }

    async fn create_asset(&self, draft: &AssetDraft) -> Result<AssetMutation> {
        check_asset(draft)?;
        self.send_json(Method::POST, &["api", "assets"], draft).await
    }

    async fn update_asset(&self, id: &str, draft: &AssetDraft) -> Result<AssetMutation> {
        check_asset(draft)?;
        self.send_json(Method::PUT, &["api", "assets", id], draft).await
    }

    async fn delete_asset(&self, id: &str) -> Result<()> {
        self.send_discarding(Method::DELETE, &["api", "assets", id]).await
    }

    async fn create_relationship(&self, draft: &RelationshipDraft) -> Result<Relationship> {
        check_relationship(draft)?;
        self.send_json(Method::POST, &["api", "relationships"], draft)
            .await
    }

    async fn run_scenario(&self, scenario: Scenario) -> Result<()> {
        self.send_discarding(Method::POST, &["api", "demo", "scenario", scenario.slug()])
            .await
    }

    async fn reset(&self) -> Result<()> {
        self.send_discarding(Method::POST, &["api", "reset"]).await
    }
}

/// Parse and normalize the configured base URL
fn normalize_base(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    let mut url = Url::parse(trimmed).map_err(|_| Error::invalid_base_url(trimmed))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(Error::invalid_base_url(trimmed));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_decode() {
        Error::decode(err.to_string())
    } else if err.is_timeout() {
        Error::transport("request timed out")
    } else {
        Error::transport(err.to_string())
    }
}

async fn error_from_response(response: Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = api_error(status, &body);
    warn!("Engine responded {}: {}", status, err.user_message());
    err
}

/// Build an [`Error::Api`] from a non-2xx response body.
///
/// The engine sends `{"detail": "..."}`; request validation failures carry a
/// list of `{"msg": ...}` objects instead. Anything else falls back to the
/// status line.
pub(crate) fn api_error(status: StatusCode, body: &str) -> Error {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned())
        .and_then(|detail| match detail {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Array(items) => {
                let messages: Vec<_> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        })
        .unwrap_or_else(|| format!("HTTP {status}"));

    Error::api(status.as_u16(), detail)
}
