use include_dir::{Dir, include_dir};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

static LOCALE_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/locales");

/// Language codes with a message bundle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
    Fr,
    Pt,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::Es, Locale::En, Locale::Fr, Locale::Pt];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
            Locale::Fr => "fr",
            Locale::Pt => "pt",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Route segments outside the supported set fall back to the default locale.
    pub fn from_route(segment: Option<&str>) -> Self {
        segment.and_then(Self::from_code).unwrap_or_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("message bundle {file} is not valid JSON: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no message bundle for locale {0}")]
    Missing(Locale),
}

/// Static key -> text table for one locale. UI text only.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MessageBundle(BTreeMap<String, String>);

impl MessageBundle {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Unknown keys render as the key itself so a missing translation stays visible.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.0.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    bundles: HashMap<Locale, MessageBundle>,
}

impl MessageCatalog {
    /// Bundles compiled into the binary from `locales/<code>.json`.
    pub fn embedded() -> Result<Self, CatalogError> {
        let mut bundles = HashMap::new();
        for locale in Locale::ALL {
            let file_name = format!("{}.json", locale.code());
            let file = LOCALE_DIR
                .get_file(&file_name)
                .ok_or(CatalogError::Missing(locale))?;
            let bundle: MessageBundle =
                serde_json::from_slice(file.contents()).map_err(|source| CatalogError::Parse {
                    file: file_name.clone(),
                    source,
                })?;
            bundles.insert(locale, bundle);
        }
        Ok(Self { bundles })
    }

    pub fn from_bundles<I>(bundles: I) -> Self
    where
        I: IntoIterator<Item = (Locale, MessageBundle)>,
    {
        Self {
            bundles: bundles.into_iter().collect(),
        }
    }

    pub fn bundle(&self, locale: Locale) -> Option<&MessageBundle> {
        self.bundles.get(&locale)
    }

    pub fn text<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.bundles
            .get(&locale)
            .map(|bundle| bundle.get(key))
            .unwrap_or(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_codes_round_trip_through_routes() {
        assert_eq!(Locale::from_route(Some("fr")), Locale::Fr);
        assert_eq!(Locale::from_route(Some("PT")), Locale::Pt);
        assert_eq!(Locale::from_route(Some("de")), Locale::Es);
        assert_eq!(Locale::from_route(None), Locale::Es);
    }

    #[test]
    fn embedded_catalog_covers_every_locale() {
        let catalog = MessageCatalog::embedded().expect("bundles parse");
        for locale in Locale::ALL {
            let bundle = catalog.bundle(locale).expect("bundle present");
            assert_ne!(bundle.get("app.search-button"), "app.search-button");
            for other in Locale::ALL {
                assert_ne!(bundle.get(other.code()), other.code());
            }
        }
        assert_eq!(catalog.text(Locale::En, "app.search-button"), "Search");
    }

    #[test]
    fn missing_keys_fall_back_to_key() {
        let catalog = MessageCatalog::from_bundles([(
            Locale::En,
            MessageBundle::from_pairs([("greeting", "hello")]),
        )]);
        assert_eq!(catalog.text(Locale::En, "greeting"), "hello");
        assert_eq!(catalog.text(Locale::En, "farewell"), "farewell");
        assert_eq!(catalog.text(Locale::Fr, "greeting"), "greeting");
    }
}
