use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::ErrorBody;
use super::*;

/// [`Collaborator`] backed by the Kit engine's JSON-over-HTTP API.
pub struct HttpCollaborator {
    base_url: String,
    workspace_prefix: String,
    client: reqwest::blocking::Client,
}

impl HttpCollaborator {
    pub fn new(base_url: &str, workspace_prefix: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("kitshell")
            .timeout(timeout)
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            workspace_prefix: workspace_prefix.trim_matches('/').to_string(),
            client,
        })
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(super) fn post<B: Serialize>(&self, path: &str, body: &B, label: &str) -> Result<String> {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .with_context(|| format!("{} request", label))?;
        self.read_body(resp, label)
    }

    pub(super) fn get(&self, path: &str, query: &[(&str, &str)], label: &str) -> Result<String> {
        let resp = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .with_context(|| format!("{} request", label))?;
        self.read_body(resp, label)
    }

    /// Returns the body of a 2xx response. Anything else becomes an error whose
    /// text is the engine's own `error` field when it sent one.
    fn read_body(&self, resp: reqwest::blocking::Response, label: &str) -> Result<String> {
        let status = resp.status();
        let body = resp
            .text()
            .with_context(|| format!("read {} response", label))?;
        tracing::debug!(label, status = status.as_u16(), "kit engine response");

        if status.is_success() {
            return Ok(body);
        }
        let engine_error = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .filter(|e| !e.trim().is_empty());
        match engine_error {
            Some(e) => anyhow::bail!("{}", e),
            None => anyhow::bail!("{} failed ({})", label, status),
        }
    }

    pub(super) fn workspace_prefix(&self) -> &str {
        &self.workspace_prefix
    }
}

pub(super) fn parse<T: DeserializeOwned>(body: &str, label: &str) -> Result<T> {
    serde_json::from_str(body).with_context(|| format!("parse {} response", label))
}
