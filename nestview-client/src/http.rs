use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::{debug, info};
use nestview::allocation::AllocationConfirmation;
use nestview::entities::Layout;
use nestview::io::ext_repr::ExtLayout;
use nestview::io::import;
use reqwest::{Response, StatusCode};
use serde::Serialize;

use crate::api::{Ack, LayoutRequest, NestingApi, OptimizerParameters};

/// Client of the nesting backend's HTTP/JSON API
#[derive(Clone, Debug)]
pub struct HttpNestingApi {
    http: reqwest::Client,
    base_url: String,
}

/// Body of a confirmation, the session id is part of the path
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmBody<'a> {
    container_a: &'a [u64],
    container_b: &'a [u64],
}

impl HttpNestingApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Uses a preconfigured client (e.g. with default headers or timeouts).
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Passes successful responses through, turns all others into an error carrying the status and
/// the message the server gave (if any).
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    bail!("backend responded {status}: {}", server_message(status, &body))
}

fn server_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string())
}

#[async_trait]
impl NestingApi for HttpNestingApi {
    async fn fetch_layout(&self, request: &LayoutRequest) -> Result<Layout> {
        debug!(
            "requesting layout for autoclave {} ({} work orders)",
            request.autoclave_id,
            request.work_order_ids.len()
        );
        let response = self
            .http
            .post(self.url("nesting/layout"))
            .json(request)
            .send()
            .await
            .context("layout request could not be sent")?;
        let ext_layout: ExtLayout = check(response)
            .await?
            .json()
            .await
            .context("layout response is not a valid layout")?;
        import::import_layout(&ext_layout)
            .with_context(|| format!("layout of autoclave {} is invalid", request.autoclave_id))
    }

    async fn confirm_allocation(&self, confirmation: &AllocationConfirmation) -> Result<Ack> {
        info!(
            "confirming allocation of session {}: {} + {} items",
            confirmation.session_id,
            confirmation.container_a.len(),
            confirmation.container_b.len()
        );
        let body = ConfirmBody {
            container_a: &confirmation.container_a,
            container_b: &confirmation.container_b,
        };
        let response = self
            .http
            .post(self.url(&format!(
                "batch-nesting/{}/confirm",
                confirmation.session_id
            )))
            .json(&body)
            .send()
            .await
            .context("confirmation could not be sent")?;
        check(response)
            .await?
            .json()
            .await
            .context("invalid acknowledgment")
    }

    async fn get_optimizer_parameters(&self) -> Result<OptimizerParameters> {
        let response = self
            .http
            .get(self.url("nesting/parameters"))
            .send()
            .await
            .context("parameter request could not be sent")?;
        check(response)
            .await?
            .json()
            .await
            .context("invalid optimizer parameters")
    }

    async fn update_optimizer_parameters(&self, parameters: &OptimizerParameters) -> Result<Ack> {
        let response = self
            .http
            .put(self.url("nesting/parameters"))
            .json(parameters)
            .send()
            .await
            .context("parameter update could not be sent")?;
        check(response)
            .await?
            .json()
            .await
            .context("invalid acknowledgment")
    }
}
