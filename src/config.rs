use crate::SearchMode;
use crate::locale::{CatalogError, MessageCatalog};
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Endpoint and display labels for one search mode.
#[derive(Debug, Clone)]
pub struct ModeRoute {
    pub path: String,
    pub source_label: String,
    /// Group label for a non-empty online/offline result list.
    pub results_label: String,
    /// Group label when online/offline returned nothing.
    pub empty_label: String,
}

impl ModeRoute {
    fn new(path: &str, source_label: &str, results_label: &str, empty_label: &str) -> Self {
        Self {
            path: path.to_string(),
            source_label: source_label.to_string(),
            results_label: results_label.to_string(),
            empty_label: empty_label.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModeRoutes {
    pub combined: ModeRoute,
    pub online: ModeRoute,
    pub offline: ModeRoute,
    pub class_path: String,
    pub connectivity_error_label: String,
}

impl ModeRoutes {
    pub fn route(&self, mode: SearchMode) -> &ModeRoute {
        match mode {
            SearchMode::Combined => &self.combined,
            SearchMode::Online => &self.online,
            SearchMode::Offline => &self.offline,
        }
    }
}

impl Default for ModeRoutes {
    fn default() -> Self {
        Self {
            combined: ModeRoute::new(
                "/search",
                "Combinada (Ontologia Local + DBPedia Cache)",
                "Combinada",
                "Sin resultados",
            ),
            online: ModeRoute::new(
                "/searchOnline",
                "DBPedia ONLINE (SPARQL en tiempo real)",
                "DBPedia Online - Resultados en tiempo real",
                "Sin resultados online",
            ),
            offline: ModeRoute::new(
                "/searchOffline",
                "DBPedia OFFLINE (Cache Local - 500 enfermedades)",
                "DBPedia Offline - Cache Local",
                "Sin resultados en cache",
            ),
            class_path: "/searchClass".to_string(),
            connectivity_error_label: "Error: Sin conexion a internet".to_string(),
        }
    }
}

/// Everything the dispatcher and resolver need, passed in at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend: BackendConfig,
    pub routes: ModeRoutes,
    pub catalog: MessageCatalog,
}

impl ClientConfig {
    pub fn new(backend: BackendConfig) -> Result<Self, CatalogError> {
        Ok(Self {
            backend,
            routes: ModeRoutes::default(),
            catalog: MessageCatalog::embedded()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let backend = BackendConfig::new("http://ontology.local:5000/");
        assert_eq!(backend.endpoint("/search"), "http://ontology.local:5000/search");
        assert_eq!(backend.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn each_mode_has_its_own_endpoint() {
        let routes = ModeRoutes::default();
        assert_eq!(routes.route(SearchMode::Combined).path, "/search");
        assert_eq!(routes.route(SearchMode::Online).path, "/searchOnline");
        assert_eq!(routes.route(SearchMode::Offline).path, "/searchOffline");
    }
}
