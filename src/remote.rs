use crate::domain::constants::{API_KEY_HEADER, PROJECT_METRICS_PATH, PROJECT_PATH};
use crate::domain::models::{Metrics, Project};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Read-only view of the remote service.
///
/// Each call performs exactly one exchange and surfaces failures as-is; retries
/// belong to the polling layer.
pub trait Catalog {
    fn list_projects(&self) -> Result<Vec<Project>, RemoteError>;
    fn fetch_metrics(&self, uuid: &str) -> Result<Metrics, RemoteError>;
}

#[derive(thiserror::Error, Debug)]
pub enum RemoteError {
    #[error("no server URL configured (use --url or DTRACK_URL)")]
    MissingBaseUrl,
    #[error("no API key configured for {url}")]
    MissingApiKey { url: String },
    #[error("{url} rejected the API key (HTTP {status})")]
    Unauthorized { url: String, status: u16 },
    #[error("{url} not found")]
    NotFound { url: String },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("malformed response from {url}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RemoteError {
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            RemoteError::MissingApiKey { .. } | RemoteError::Unauthorized { .. }
        )
    }
}

pub struct DependencyTrackClient {
    base_url: Option<String>,
    api_key: Option<String>,
    http: reqwest::blocking::Client,
}

impl DependencyTrackClient {
    pub fn new(
        base_url: Option<&str>,
        api_key: Option<&str>,
        timeout_ms: u64,
    ) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            base_url: base_url
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .filter(|u| !u.is_empty()),
            api_key: api_key.map(str::to_string),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> Result<String, RemoteError> {
        let base = self.base_url.as_deref().ok_or(RemoteError::MissingBaseUrl)?;
        Ok(format!("{base}{path}"))
    }

    pub fn projects_url(&self) -> Result<String, RemoteError> {
        self.endpoint(PROJECT_PATH)
    }

    pub fn metrics_url(&self, uuid: &str) -> Result<String, RemoteError> {
        self.endpoint(&PROJECT_METRICS_PATH.replace("{uuid}", uuid))
    }

    fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, RemoteError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(RemoteError::MissingApiKey { url });
        };
        tracing::debug!(%url, "GET");
        let resp = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, key)
            .send()
            .map_err(|source| RemoteError::Request {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(RemoteError::Unauthorized {
                    url,
                    status: status.as_u16(),
                })
            }
            StatusCode::NOT_FOUND => return Err(RemoteError::NotFound { url }),
            s if !s.is_success() => {
                return Err(RemoteError::Status {
                    url,
                    status: s.as_u16(),
                })
            }
            _ => {}
        }

        let body = resp.text().map_err(|source| RemoteError::Request {
            url: url.clone(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| RemoteError::Malformed { url, source })
    }
}

impl Catalog for DependencyTrackClient {
    fn list_projects(&self) -> Result<Vec<Project>, RemoteError> {
        let projects: Vec<Project> = self.get_json(self.projects_url()?)?;
        tracing::debug!(count = projects.len(), "catalog listed");
        Ok(projects)
    }

    fn fetch_metrics(&self, uuid: &str) -> Result<Metrics, RemoteError> {
        self.get_json(self.metrics_url(uuid)?)
    }
}
