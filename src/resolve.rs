use crate::config::{BackendConfig, ClientConfig};
use crate::dispatch::{HttpTransport, Transport, TransportError};
use crate::model::{Individual, string_field};
use crate::{Locale, encode_component};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Namespace some routes prepend to class tokens.
pub const CLASS_NAMESPACE_PREFIX: &str = "ontology.owx.";

#[derive(Debug, Error)]
#[error("class lookup via {url} failed: {source}")]
pub struct FetchError {
    pub url: String,
    #[source]
    pub source: TransportError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(Individual),
    NotFound,
}

/// Reduces a class token to the bare class name.
///
/// Dotted tokens keep the segment after the last `.`
/// (`ontology.owx.Disease` -> `Disease`); anything else only loses the
/// namespace prefix when it starts with it.
pub fn normalize_class_name(token: &str) -> &str {
    match token.rsplit_once('.') {
        Some((_, last)) => last,
        None => token
            .strip_prefix(CLASS_NAMESPACE_PREFIX)
            .unwrap_or(token),
    }
}

pub struct Resolver<T = HttpTransport> {
    transport: T,
    backend: BackendConfig,
    class_path: String,
}

impl Resolver<HttpTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.backend)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> Resolver<T> {
    pub fn with_transport(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            backend: config.backend.clone(),
            class_path: config.routes.class_path.clone(),
        }
    }

    pub fn request_url(&self, locale: Locale, class_name: &str) -> String {
        format!(
            "{}?query={}&lang={}",
            self.backend.endpoint(&self.class_path),
            encode_component(class_name),
            locale.code()
        )
    }

    /// Looks up the individual whose IRI equals `identifier`.
    ///
    /// Both arguments are expected already percent-decoded, exactly once,
    /// by whoever read them off a URL. Missing parameters return `Ok(None)`
    /// without a request.
    pub async fn fetch(
        &self,
        locale: Locale,
        class_token: &str,
        identifier: &str,
    ) -> Result<Option<Individual>, FetchError> {
        let class_name = normalize_class_name(class_token);
        if class_name.is_empty() || identifier.is_empty() {
            return Ok(None);
        }
        let url = self.request_url(locale, class_name);
        debug!(%url, iri = %identifier, "Resolving individual");
        let body = self
            .transport
            .get_json(&url)
            .await
            .map_err(|source| FetchError {
                url: url.clone(),
                source,
            })?;
        Ok(find_individual(&body, identifier))
    }

    /// One request, no retry. Errors are logged and reported as not found.
    pub async fn resolve(&self, locale: Locale, class_token: &str, identifier: &str) -> Resolution {
        match self.fetch(locale, class_token, identifier).await {
            Ok(Some(individual)) => Resolution::Found(individual),
            Ok(None) => {
                debug!(class = class_token, iri = identifier, "Individual not found");
                Resolution::NotFound
            }
            Err(err) => {
                warn!(error = %err, "Individual lookup failed");
                Resolution::NotFound
            }
        }
    }
}

fn find_individual(body: &Value, iri: &str) -> Option<Individual> {
    body.as_array()?
        .iter()
        .find(|record| string_field(record, "iri").as_deref() == Some(iri))
        .map(Individual::from_value)
}
