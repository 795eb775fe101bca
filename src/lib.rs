pub mod config;
pub mod dispatch;
pub mod locale;
pub mod logging;
pub mod model;
pub mod properties;
pub mod render;
pub mod resolve;
pub mod session;
#[cfg(feature = "web")]
pub mod web;

pub use config::{BackendConfig, ClientConfig, ModeRoute, ModeRoutes};
pub use dispatch::{
    DispatchError, Dispatcher, HttpTransport, SearchOutcome, SearchQuery, Transport,
    TransportError,
};
pub use locale::{CatalogError, Locale, MessageBundle, MessageCatalog};
pub use model::{Individual, ResultGroup, ResultGroups, ResultItem, SearchMode};
pub use properties::{
    PropertyEntry, PropertyError, PropertyNode, format_label, format_value, render_properties,
};
pub use render::{ItemLink, ResultsView, is_external, render};
pub use resolve::{FetchError, Resolution, Resolver, normalize_class_name};
pub use session::{SessionState, SessionStore};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left intact by URI component encoding.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a single query value or path segment.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_encoding_matches_uri_component_rules() {
        assert_eq!(encode_component("a b&c"), "a%20b%26c");
        assert_eq!(encode_component("it's-ok_(1).~*!"), "it's-ok_(1).~*!");
        assert_eq!(encode_component("síntoma"), "s%C3%ADntoma");
        assert_eq!(encode_component("100%_pure"), "100%25_pure");
    }
}
