use crate::dispatch::{Dispatcher, SearchOutcome, SearchQuery, TransportError};
use crate::locale::{Locale, MessageBundle, MessageCatalog};
use crate::model::SearchMode;
use crate::properties::{PropertyNode, format_label, render_properties};
use crate::render::{ResultsView, render, search_path};
use crate::resolve::{Resolution, Resolver};
use crate::session::{SessionState, SessionStore, generate_session_id};
use crate::{ClientConfig, Individual};
use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use cookie::{Cookie, SameSite};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, warn};

type SharedState = Arc<AppState>;
const SESSION_COOKIE: &str = "ontolookup_session";

static EMPTY_BUNDLE: Lazy<MessageBundle> = Lazy::new(MessageBundle::default);

pub struct AppState {
    pub dispatcher: Dispatcher,
    pub resolver: Resolver,
    pub sessions: SessionStore,
    pub catalog: MessageCatalog,
    pub theme: WebTheme,
    pub base_url: String,
}

impl AppState {
    pub fn new(
        client: &ClientConfig,
        theme: WebTheme,
        base_url: impl Into<String>,
    ) -> Result<Self, TransportError> {
        Ok(Self {
            dispatcher: Dispatcher::from_config(client)?,
            resolver: Resolver::from_config(client)?,
            sessions: SessionStore::new(),
            catalog: client.catalog.clone(),
            theme,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn bundle(&self, locale: Locale) -> &MessageBundle {
        self.catalog.bundle(locale).unwrap_or(&EMPTY_BUNDLE)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum WebTheme {
    #[default]
    Bootstrap,
    Tailwind,
}

impl WebTheme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bootstrap" => Some(WebTheme::Bootstrap),
            "tailwind" => Some(WebTheme::Tailwind),
            _ => None,
        }
    }
}

impl fmt::Display for WebTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebTheme::Tailwind => write!(f, "tailwind"),
            WebTheme::Bootstrap => write!(f, "bootstrap"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Chrome {
    use_tailwind: bool,
    use_bootstrap: bool,
    body_class: &'static str,
    main_class: &'static str,
    card_class: &'static str,
    eyebrow_class: &'static str,
    headline_class: &'static str,
    lede_class: &'static str,
    input_class: &'static str,
    button_class: &'static str,
    group_class: &'static str,
    link_class: &'static str,
}

impl Chrome {
    fn new(theme: WebTheme) -> Self {
        match theme {
            WebTheme::Tailwind => Self {
                use_tailwind: true,
                use_bootstrap: false,
                body_class: "bg-slate-800 text-slate-100",
                main_class: "min-h-screen flex flex-col items-center justify-start py-10 px-4",
                card_class: "max-w-4xl w-full space-y-6",
                eyebrow_class: "uppercase tracking-wide text-sm text-slate-400",
                headline_class: "text-3xl font-extrabold tracking-tight",
                lede_class: "text-lg text-slate-300",
                input_class: "flex-1 rounded-l-md px-4 py-2 text-slate-900",
                button_class: "inline-flex items-center rounded-r-md bg-slate-600 px-4 py-2 text-white font-semibold hover:bg-slate-500 transition-colors",
                group_class: "bg-white text-slate-900 shadow rounded p-4",
                link_class: "block py-1 text-blue-700 hover:underline",
            },
            WebTheme::Bootstrap => Self {
                use_tailwind: false,
                use_bootstrap: true,
                body_class: "bg-dark text-light",
                main_class: "container py-5",
                card_class: "mx-auto col-lg-10",
                eyebrow_class: "text-uppercase text-secondary mb-2",
                headline_class: "display-6 fw-bold",
                lede_class: "lead mb-4",
                input_class: "form-control form-control-lg",
                button_class: "btn btn-secondary btn-lg",
                group_class: "card card-body text-dark m-3",
                link_class: "card-subtitle m-2 d-block",
            },
        }
    }
}

#[derive(Clone)]
pub struct WebConfig {
    pub addr: SocketAddr,
    pub theme: WebTheme,
    pub base_url: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            theme: WebTheme::default(),
            base_url: "http://127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum WebError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("backend client: {0}")]
    Transport(#[from] TransportError),
}

pub async fn serve(config: WebConfig, client: ClientConfig) -> Result<(), WebError> {
    let state = Arc::new(AppState::new(&client, config.theme, config.base_url.clone())?);
    let router = build_router(state);
    info!(
        %config.addr,
        theme = %config.theme,
        base = %config.base_url,
        backend = %client.backend.base_url,
        "Binding HTTP listener"
    );
    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server exited");
    Ok(())
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = json!({ "error": self.message });
        (self.status, Json(payload)).into_response()
    }
}

pub fn build_router(state: SharedState) -> Router {
    let api = Router::new()
        .route("/api/search", get(api_search))
        .route("/api/individual", get(api_individual))
        .route("/api/session", get(api_session))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        );
    Router::new()
        .route("/", get(search_root))
        .route("/healthz", get(health))
        .route("/:locale", get(search_localized))
        .route(
            "/:locale/class/:name_class/individual/:individual_iri",
            get(individual_html),
        )
        .merge(api)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CompressionLayer::new())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "ontolookup-web" }))
}

#[derive(Debug, Default, Deserialize)]
struct SearchPageParams {
    q: Option<String>,
    mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiSearchParams {
    q: Option<String>,
    mode: Option<String>,
    lang: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiIndividualParams {
    class: Option<String>,
    iri: Option<String>,
    lang: Option<String>,
}

#[derive(Debug, Serialize)]
struct SearchPayload {
    #[serde(flatten)]
    outcome: SearchOutcome,
    view: ResultsView,
}

#[derive(Debug, Serialize)]
struct IndividualPayload {
    iri: String,
    name: String,
    class: String,
    properties: Vec<PropertyNode>,
}

fn parse_mode(raw: Option<&str>) -> Option<SearchMode> {
    raw.and_then(SearchMode::from_query_value)
}

async fn search_root(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<SearchPageParams>,
) -> Response {
    // The bare root keeps whatever language the session is already using.
    let locale = session_cookie(&headers)
        .and_then(|id| state.sessions.snapshot(&id))
        .map(|session| session.locale)
        .unwrap_or_default();
    search_page(state, locale, params, &headers).await
}

async fn search_localized(
    State(state): State<SharedState>,
    Path(locale): Path<String>,
    headers: HeaderMap,
    Query(params): Query<SearchPageParams>,
) -> Response {
    search_page(state, Locale::from_route(Some(&locale)), params, &headers).await
}

async fn search_page(
    state: SharedState,
    locale: Locale,
    params: SearchPageParams,
    headers: &HeaderMap,
) -> Response {
    let (session_id, is_new) = session_from_headers(headers);
    state.sessions.set_locale(&session_id, locale);
    let requested_mode = parse_mode(params.mode.as_deref());
    let search_mode = requested_mode.unwrap_or_default();

    let started = params
        .q
        .as_deref()
        .and_then(|raw| state.sessions.begin_search(&session_id, raw, search_mode));
    let outcome = match started {
        Some((ticket, query)) => {
            let outcome = state.dispatcher.search(&query, locale, search_mode).await;
            state.sessions.complete_search(&ticket, outcome.clone());
            Some(outcome)
        }
        None => None,
    };
    let session = state.sessions.snapshot(&session_id).unwrap_or_default();
    let loading = outcome.is_none() && session.loading;
    let outcome = outcome.or(session.last_outcome.clone());
    let mode = requested_mode.unwrap_or(session.mode);

    let bundle = state.bundle(locale);
    let chrome = Chrome::new(state.theme);
    let view = outcome
        .as_ref()
        .map(|outcome| render(&outcome.groups, locale))
        .unwrap_or_default();
    let template = SearchTemplate {
        chrome,
        bundle,
        locale: locale.code(),
        canonical_url: format!("{}{}", state.base_url, search_path(locale)),
        query: params
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(&session.query),
        searched: session.searched,
        loading,
        locales: locale_options(bundle, locale),
        modes: mode_options(bundle, mode),
        source: outcome.as_ref().map(|outcome| SourceBadge {
            label: outcome.source_label.clone(),
            class: badge_class(outcome.mode),
        }),
        failure: outcome.as_ref().and_then(|outcome| outcome.failure.clone()),
        view: &view,
    };
    let body = template
        .render()
        .unwrap_or_else(|err| render_error_page(state.theme, err.to_string()));
    with_session_cookie(Html(body).into_response(), &session_id, is_new)
}

async fn individual_html(
    State(state): State<SharedState>,
    Path((locale, name_class, individual_iri)): Path<(String, String, String)>,
) -> impl IntoResponse {
    let locale = Locale::from_route(Some(&locale));
    let bundle = state.bundle(locale);
    let individual = match state
        .resolver
        .resolve(locale, &name_class, &individual_iri)
        .await
    {
        Resolution::Found(individual) => Some(individual_view(individual, &name_class)),
        Resolution::NotFound => None,
    };
    let template = IndividualTemplate {
        chrome: Chrome::new(state.theme),
        bundle,
        locale: locale.code(),
        back_href: search_path(locale),
        individual,
    };
    Html(
        template
            .render()
            .unwrap_or_else(|err| render_error_page(state.theme, err.to_string())),
    )
}

async fn api_search(
    State(state): State<SharedState>,
    Query(params): Query<ApiSearchParams>,
) -> Result<Json<SearchPayload>, ApiError> {
    let query = params
        .q
        .as_deref()
        .and_then(SearchQuery::parse)
        .ok_or_else(|| ApiError::bad_request("Query parameter `q` is required"))?;
    let locale = Locale::from_route(params.lang.as_deref());
    let mode = parse_mode(params.mode.as_deref()).unwrap_or_default();
    let outcome = state.dispatcher.search(&query, locale, mode).await;
    let view = render(&outcome.groups, locale);
    Ok(Json(SearchPayload { outcome, view }))
}

async fn api_individual(
    State(state): State<SharedState>,
    Query(params): Query<ApiIndividualParams>,
) -> Result<Json<IndividualPayload>, ApiError> {
    let (Some(class), Some(iri)) = (params.class, params.iri) else {
        return Err(ApiError::bad_request(
            "Provide both `class` and `iri` query parameters.",
        ));
    };
    let locale = Locale::from_route(params.lang.as_deref());
    match state.resolver.resolve(locale, &class, &iri).await {
        Resolution::Found(individual) => {
            let properties = render_properties(&individual.properties, 0)
                .map_err(|err| ApiError::unprocessable(err.to_string()))?;
            Ok(Json(IndividualPayload {
                iri: individual.iri,
                name: individual.name,
                class: format_label(&class),
                properties,
            }))
        }
        Resolution::NotFound => Err(ApiError::not_found(format!(
            "No individual {iri:?} in class {class:?}"
        ))),
    }
}

async fn api_session(State(state): State<SharedState>, headers: HeaderMap) -> Json<SessionState> {
    let session = session_cookie(&headers)
        .and_then(|id| state.sessions.snapshot(&id))
        .unwrap_or_default();
    Json(session)
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|id| !id.is_empty())
}

fn session_from_headers(headers: &HeaderMap) -> (String, bool) {
    match session_cookie(headers) {
        Some(id) => (id, false),
        None => (generate_session_id(), true),
    }
}

fn with_session_cookie(mut response: Response, session_id: &str, is_new: bool) -> Response {
    if is_new {
        let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

struct LocaleOption {
    code: &'static str,
    label: String,
    href: String,
    active: bool,
}

struct ModeOption {
    value: &'static str,
    label: String,
    checked: bool,
}

struct SourceBadge {
    label: String,
    class: &'static str,
}

struct IndividualView {
    name: String,
    iri: String,
    class_label: String,
    properties_html: Option<String>,
    has_properties: bool,
}

fn locale_options(bundle: &MessageBundle, current: Locale) -> Vec<LocaleOption> {
    Locale::ALL
        .into_iter()
        .map(|locale| LocaleOption {
            code: locale.code(),
            label: bundle.get(locale.code()).to_string(),
            href: search_path(locale),
            active: locale == current,
        })
        .collect()
}

fn mode_options(bundle: &MessageBundle, current: SearchMode) -> Vec<ModeOption> {
    SearchMode::ALL
        .into_iter()
        .map(|mode| ModeOption {
            value: mode.query_value(),
            label: bundle
                .get(match mode {
                    SearchMode::Combined => "app.mode.combined",
                    SearchMode::Online => "app.mode.online",
                    SearchMode::Offline => "app.mode.offline",
                })
                .to_string(),
            checked: mode == current,
        })
        .collect()
}

fn badge_class(mode: SearchMode) -> &'static str {
    match mode {
        SearchMode::Online => "badge bg-success p-2",
        SearchMode::Offline => "badge bg-warning text-dark p-2",
        SearchMode::Combined => "badge bg-secondary p-2",
    }
}

fn individual_view(individual: Individual, name_class: &str) -> IndividualView {
    let (properties_html, has_properties) = match render_properties(&individual.properties, 0) {
        Ok(nodes) => (Some(render_property_list(&nodes, false)), !nodes.is_empty()),
        Err(err) => {
            warn!(error = %err, iri = %individual.iri, "Malformed property tree");
            (None, true)
        }
    };
    IndividualView {
        name: individual.name,
        iri: individual.iri,
        class_label: format_label(name_class),
        properties_html,
        has_properties,
    }
}

fn render_property_list(nodes: &[PropertyNode], nested: bool) -> String {
    let mut html = String::new();
    html.push_str(if nested {
        r#"<ul class="property-list nested">"#
    } else {
        r#"<ul class="property-list">"#
    });
    for node in nodes {
        match node {
            PropertyNode::Field {
                label,
                value,
                depth,
            } => {
                html.push_str(&format!(
                    r#"<li class="property-item depth-{depth}"><span class="property-key">{}:</span> <span class="property-value">{}</span></li>"#,
                    html_escape(label),
                    html_escape(value)
                ));
            }
            PropertyNode::Relation {
                label,
                depth,
                children,
            } => {
                html.push_str(&format!(
                    r#"<li class="property-item depth-{depth}"><span class="property-key">{}</span>"#,
                    html_escape(label)
                ));
                if !children.is_empty() {
                    html.push_str(&render_property_list(children, true));
                }
                html.push_str("</li>");
            }
        }
    }
    html.push_str("</ul>");
    html
}

fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_error_page(theme: WebTheme, message: impl Into<String>) -> String {
    let chrome = Chrome::new(theme);
    let css_tag = match theme {
        WebTheme::Tailwind => {
            r#"<script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4"></script>"#
        }
        WebTheme::Bootstrap => {
            r#"<link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.8/dist/css/bootstrap.min.css" rel="stylesheet" integrity="sha384-sRIl4kxILFvY47J16cr9ZwB07vP4J8+LH7qKQnuqkuIAvNWLzeN8tE5YBujZqJLB" crossorigin="anonymous">"#
        }
    };
    let message = html_escape(&message.into());
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Ontolookup • Error</title>
    {css_tag}
  </head>
  <body class="{body_class}">
    <main class="{main_class}">
      <div class="{card_class}">
        <h1 class="{headline_class}">Something went wrong</h1>
        <p class="{lede_class}">{message}</p>
        <a href="/" class="btn btn-light">Back to search</a>
      </div>
    </main>
  </body>
</html>"#,
        css_tag = css_tag,
        body_class = chrome.body_class,
        main_class = chrome.main_class,
        card_class = chrome.card_class,
        headline_class = chrome.headline_class,
        lede_class = chrome.lede_class,
        message = message,
    )
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="{{ locale }}">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{{ bundle.get("app.title") }}</title>
    {% if chrome.use_tailwind %}
    <script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4"></script>
    {% endif %}
    {% if chrome.use_bootstrap %}
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.8/dist/css/bootstrap.min.css" rel="stylesheet" integrity="sha384-sRIl4kxILFvY47J16cr9ZwB07vP4J8+LH7qKQnuqkuIAvNWLzeN8tE5YBujZqJLB" crossorigin="anonymous">
    {% endif %}
    <link rel="canonical" href="{{ canonical_url }}">
  </head>
  <body class="{{ chrome.body_class }}">
    <main class="{{ chrome.main_class }}">
      <div class="{{ chrome.card_class }}">
        <p class="{{ chrome.eyebrow_class }}">{{ bundle.get("app.title") }}</p>
        <form method="get" action="/{{ locale }}" class="search-form">
          <div class="input-group flex mt-3 mb-2">
            <input type="search" name="q" value="{{ query }}" placeholder="{{ bundle.get("app.placeholder") }}" class="{{ chrome.input_class }}">
            <button type="submit" id="search-button" class="{{ chrome.button_class }}">{{ bundle.get("app.search-button") }}</button>
          </div>
          <div class="mode-switch d-flex flex gap-3 align-items-center items-center mt-3">
            <span class="fw-semibold font-semibold">{{ bundle.get("app.mode") }}</span>
            {% for option in modes %}
            <label class="form-check-label">
              <input class="form-check-input" type="radio" name="mode" value="{{ option.value }}" {% if option.checked %}checked{% endif %}>
              {{ option.label }}
            </label>
            {% endfor %}
          </div>
          <small class="d-block mt-2">{{ bundle.get("app.mode.hint") }}</small>
        </form>

        <nav class="language-select d-flex flex gap-2 mt-3" aria-label="Language">
          {% for option in locales %}
          <a href="{{ option.href }}" hreflang="{{ option.code }}" class="{% if option.active %}fw-bold font-bold{% endif %}">{{ option.label }}</a>
          {% endfor %}
        </nav>

        {% if searched && source.is_some() %}
        <p class="text-center mt-3 mb-2">
          <span class="{{ source.as_ref().unwrap().class }}">{{ bundle.get("app.source") }}: {{ source.as_ref().unwrap().label }}</span>
        </p>
        {% endif %}

        <section class="results-container{% if searched %} show-results{% endif %}">
          {% if loading %}
          <p class="text-center">{{ bundle.get("app.loading") }}</p>
          {% else %}
          {% for group in view.groups %}
          <article class="{{ chrome.group_class }}">
            <header class="card-header"><h5>{{ group.title }} <small>({{ group.count }} {{ bundle.get("app.results-count") }})</small></h5></header>
            {% for item in group.items %}
            {% if item.link.is_external() %}
            <a href="{{ item.link.href() }}" target="_blank" rel="noreferrer" class="{{ chrome.link_class }}">{{ item.name }}</a>
            {% else %}
            <a href="{{ item.link.href() }}" class="{{ chrome.link_class }}">{{ item.name }}</a>
            {% endif %}
            {% if item.summary.is_some() %}
            <p class="small text-muted mx-2">{{ item.summary.as_ref().unwrap() }}</p>
            {% endif %}
            {% endfor %}
          </article>
          {% endfor %}
          {% if searched && view.is_empty() %}
          <div class="text-center">{{ bundle.get("app.no-results") }} “{{ query }}”.</div>
          {% endif %}
          {% if failure.is_some() %}
          <p class="small text-center text-secondary">{{ failure.as_ref().unwrap() }}</p>
          {% endif %}
          {% endif %}
        </section>
      </div>
    </main>
  </body>
</html>"#,
    ext = "html"
)]
struct SearchTemplate<'a> {
    chrome: Chrome,
    bundle: &'a MessageBundle,
    locale: &'static str,
    canonical_url: String,
    query: &'a str,
    searched: bool,
    loading: bool,
    locales: Vec<LocaleOption>,
    modes: Vec<ModeOption>,
    source: Option<SourceBadge>,
    failure: Option<String>,
    view: &'a ResultsView,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="{{ locale }}">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{{ bundle.get("app.title") }}{% if individual.is_some() %} • {{ individual.as_ref().unwrap().name }}{% endif %}</title>
    {% if chrome.use_tailwind %}
    <script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4"></script>
    {% endif %}
    {% if chrome.use_bootstrap %}
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.8/dist/css/bootstrap.min.css" rel="stylesheet" integrity="sha384-sRIl4kxILFvY47J16cr9ZwB07vP4J8+LH7qKQnuqkuIAvNWLzeN8tE5YBujZqJLB" crossorigin="anonymous">
    {% endif %}
    <style>
      .property-list { list-style: none; padding-left: 0; }
      .property-list.nested { padding-left: 1.25rem; border-left: 2px solid rgba(255,255,255,.2); }
      .property-key { font-weight: 600; margin-right: .25rem; }
    </style>
  </head>
  <body class="{{ chrome.body_class }}">
    <main class="{{ chrome.main_class }} instance-page">
      <div class="{{ chrome.card_class }}">
        <a href="{{ back_href }}" class="{{ chrome.eyebrow_class }}">← {{ bundle.get("instance.back") }}</a>
        {% if individual.is_some() %}
        {% let view = individual.as_ref().unwrap() %}
        <section class="instance-card mt-3">
          <div class="d-flex flex align-items-center justify-content-between justify-between flex-wrap gap-2">
            <div>
              <h1 class="{{ chrome.headline_class }} instance-title mb-0">{{ view.name }}</h1>
              <a href="{{ view.iri }}" class="instance-link" target="_blank" rel="noreferrer">{{ view.iri }}</a>
            </div>
            <span class="badge bg-light text-dark instance-badge">{{ view.class_label }}</span>
          </div>
          <hr class="instance-divider" />
          {% if view.properties_html.is_some() %}
          {% if view.has_properties %}
          {{ view.properties_html.as_ref().unwrap()|safe }}
          {% else %}
          <p>{{ bundle.get("instance.no-properties") }}</p>
          {% endif %}
          {% else %}
          <p class="instance-malformed">{{ bundle.get("instance.malformed") }}</p>
          {% endif %}
        </section>
        {% else %}
        <p class="instance-empty text-center mt-4">{{ bundle.get("instance.empty") }}</p>
        {% endif %}
      </div>
    </main>
  </body>
</html>"#,
    ext = "html"
)]
struct IndividualTemplate<'a> {
    chrome: Chrome,
    bundle: &'a MessageBundle,
    locale: &'static str,
    back_href: String,
    individual: Option<IndividualView>,
}
