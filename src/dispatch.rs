//! Query dispatch: one backend call per search, normalized into
//! [`ResultGroups`] regardless of which endpoint answered.

use crate::config::{BackendConfig, ClientConfig, ModeRoute, ModeRoutes};
use crate::model::{ResultGroups, ResultItem, SearchMode};
use crate::{Locale, encode_component};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("backend answered HTTP {status}")]
    Status { status: u16 },
    #[error("response is not JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Fetches a JSON document. The seam the dispatcher and resolver talk through.
pub trait Transport: Send + Sync {
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(backend: &BackendConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(backend.timeout)
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(TransportError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(TransportError::Request)?;
        serde_json::from_slice(&body).map_err(TransportError::Decode)
    }
}

/// A query that is non-empty after trimming.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// `None` for empty or whitespace-only input; callers skip the search.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Error)]
#[error("{mode} search via {url} failed: {source}")]
pub struct DispatchError {
    pub mode: SearchMode,
    pub url: String,
    #[source]
    pub source: TransportError,
}

/// Result of one search as shown to the user.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub query: String,
    pub mode: SearchMode,
    pub locale: Locale,
    pub source_label: String,
    pub groups: ResultGroups,
    /// Diagnostic message when the backend could not be reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl SearchOutcome {
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

pub struct Dispatcher<T = HttpTransport> {
    transport: T,
    backend: BackendConfig,
    routes: ModeRoutes,
}

impl Dispatcher<HttpTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.backend)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn with_transport(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            backend: config.backend.clone(),
            routes: config.routes.clone(),
        }
    }

    pub fn source_label(&self, mode: SearchMode) -> &str {
        &self.routes.route(mode).source_label
    }

    pub fn request_url(&self, query: &SearchQuery, locale: Locale, mode: SearchMode) -> String {
        format!(
            "{}?query={}&lang={}",
            self.backend.endpoint(&self.routes.route(mode).path),
            encode_component(query.as_str()),
            locale.code()
        )
    }

    /// Issues exactly one request to the mode's endpoint and normalizes the body.
    pub async fn dispatch(
        &self,
        query: &SearchQuery,
        locale: Locale,
        mode: SearchMode,
    ) -> Result<ResultGroups, DispatchError> {
        let url = self.request_url(query, locale, mode);
        info!(%mode, %url, "Dispatching search");
        let body = self
            .transport
            .get_json(&url)
            .await
            .map_err(|source| DispatchError {
                mode,
                url: url.clone(),
                source,
            })?;
        let groups = normalize(mode, &body, self.routes.route(mode));
        debug!(%mode, groups = groups.len(), items = groups.item_count(), "Search normalized");
        Ok(groups)
    }

    /// Like [`Dispatcher::dispatch`], but every failure becomes a single
    /// connectivity-error group, whatever the mode.
    pub async fn search(
        &self,
        query: &SearchQuery,
        locale: Locale,
        mode: SearchMode,
    ) -> SearchOutcome {
        let (groups, failure) = match self.dispatch(query, locale, mode).await {
            Ok(groups) => (groups, None),
            Err(err) => {
                warn!(error = %err, "Search failed");
                (
                    ResultGroups::single(&self.routes.connectivity_error_label, Vec::new()),
                    Some(err.to_string()),
                )
            }
        };
        SearchOutcome {
            query: query.as_str().to_string(),
            mode,
            locale,
            source_label: self.source_label(mode).to_string(),
            groups,
            failure,
        }
    }
}

/// Maps a mode's response body onto the canonical grouping.
pub fn normalize(mode: SearchMode, body: &Value, route: &ModeRoute) -> ResultGroups {
    match mode {
        SearchMode::Combined => normalize_combined(body),
        SearchMode::Online => normalize_results(body, route, |record| {
            let mut item = ResultItem::from_value(record);
            if item.name.is_empty() {
                item.name = crate::model::string_field(record, "name_en").unwrap_or_default();
            }
            item
        }),
        SearchMode::Offline => normalize_results(body, route, |record| ResultItem {
            summary: None,
            ..ResultItem::from_value(record)
        }),
    }
}

fn normalize_combined(body: &Value) -> ResultGroups {
    let mut groups = ResultGroups::new();
    if let Value::Object(map) = body {
        for (label, items) in map {
            let items = items
                .as_array()
                .map(|records| records.iter().map(ResultItem::from_value).collect())
                .unwrap_or_default();
            groups.push(label.clone(), items);
        }
    }
    groups
}

fn normalize_results<F>(body: &Value, route: &ModeRoute, to_item: F) -> ResultGroups
where
    F: Fn(&Value) -> ResultItem,
{
    match body
        .get("results")
        .and_then(Value::as_array)
        .filter(|records| !records.is_empty())
    {
        Some(records) => {
            ResultGroups::single(&route.results_label, records.iter().map(to_item).collect())
        }
        None => ResultGroups::single(&route.empty_label, Vec::new()),
    }
}
