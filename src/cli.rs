use std::error::Error;
use std::future::Future;
use std::time::Duration;

use atty::Stream;
use clap::{Parser, Subcommand};
use ontolookup_rs::config::{DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT_SECS};
use ontolookup_rs::logging::init_tracing;
use ontolookup_rs::{
    BackendConfig, ClientConfig, Dispatcher, Locale, PropertyNode, ResultsView, Resolver,
    SearchMode, SearchOutcome, SearchQuery, format_label, render, render_properties,
};
use serde_json::json;
use termimad::{FmtText, MadSkin, terminal_size};

#[derive(Parser, Debug)]
#[command(
    name = "ontolookup-rs",
    about = "Search an ontology backend and DBPedia from the terminal",
    version
)]
pub struct Cli {
    /// Emit JSON instead of human-readable output.
    #[arg(long, global = true)]
    json: bool,

    /// Base URL of the search backend.
    #[arg(long, global = true, env = "ONTOLOOKUP_BACKEND", default_value = DEFAULT_BACKEND_URL)]
    backend: String,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Language code sent with every request (es, en, fr, pt).
    #[arg(long, global = true, env = "ONTOLOOKUP_LANG", default_value = "es")]
    lang: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a search against one of the backend modes.
    Search {
        /// Free-text query.
        query: String,
        /// combined, online or offline.
        #[arg(short, long, default_value = "online")]
        mode: String,
    },
    /// Show the properties of one individual of an ontology class.
    Individual {
        /// Class token, optionally namespaced (`ontology.owx.Disease`).
        class: String,
        /// IRI of the individual.
        iri: String,
    },
    /// List the supported interface languages.
    Locales,
    /// Serve the search front end over HTTP.
    #[cfg(feature = "web")]
    Serve {
        /// Address to bind the HTTP listener to.
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: std::net::SocketAddr,
        /// Page theme: bootstrap or tailwind.
        #[arg(long, default_value = "bootstrap")]
        theme: String,
        /// Public base URL used for canonical links.
        #[arg(long)]
        base_url: Option<String>,
    },
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let locale = Locale::from_code(&cli.lang)
        .ok_or_else(|| format!("Unsupported language {:?}; use es, en, fr or pt", cli.lang))?;
    let backend =
        BackendConfig::new(&cli.backend).with_timeout(Duration::from_secs(cli.timeout_secs.max(1)));
    let client = ClientConfig::new(backend)?;

    match cli.command {
        Command::Search { query, mode } => {
            init_tracing("warn");
            handle_search(&client, locale, &query, &mode, cli.json)
        }
        Command::Individual { class, iri } => {
            init_tracing("warn");
            handle_individual(&client, locale, &class, &iri, cli.json)
        }
        Command::Locales => handle_locales(&client, locale, cli.json),
        #[cfg(feature = "web")]
        Command::Serve {
            addr,
            theme,
            base_url,
        } => {
            init_tracing("info,tower_http=info");
            handle_serve(client, addr, &theme, base_url)
        }
    }
}

fn block_on<F: Future>(future: F) -> Result<F::Output, Box<dyn Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

fn handle_search(
    client: &ClientConfig,
    locale: Locale,
    raw_query: &str,
    mode: &str,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let query = SearchQuery::parse(raw_query).ok_or("Search query cannot be empty")?;
    let mode = SearchMode::from_query_value(mode)
        .ok_or_else(|| format!("Unknown mode {mode:?}; use combined, online or offline"))?;
    let dispatcher = Dispatcher::from_config(client)?;
    let outcome = block_on(dispatcher.search(&query, locale, mode))?;
    let view = render(&outcome.groups, locale);

    if as_json {
        let payload = json!({ "outcome": outcome, "view": view });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_outcome(&outcome, &view);
    }
    Ok(())
}

fn handle_individual(
    client: &ClientConfig,
    locale: Locale,
    class: &str,
    iri: &str,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let resolver = Resolver::from_config(client)?;
    let individual = block_on(resolver.fetch(locale, class, iri))??
        .ok_or_else(|| format!("No individual {iri:?} in class {class:?}"))?;
    let properties = render_properties(&individual.properties, 0)?;

    if as_json {
        let payload = json!({
            "iri": individual.iri,
            "name": individual.name,
            "class": format_label(class),
            "properties": properties,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{} [{}]", individual.name, format_label(class));
        println!("{}", individual.iri);
        if properties.is_empty() {
            println!("\n{}", client.catalog.text(locale, "instance.no-properties"));
        } else {
            println!();
            print_property_tree(&properties);
        }
    }
    Ok(())
}

fn handle_locales(client: &ClientConfig, current: Locale, as_json: bool) -> Result<(), Box<dyn Error>> {
    let rows: Vec<(&str, &str)> = Locale::ALL
        .iter()
        .map(|locale| (locale.code(), client.catalog.text(current, locale.code())))
        .collect();
    if as_json {
        let payload: Vec<_> = rows
            .iter()
            .map(|(code, name)| json!({ "code": code, "name": name }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }
    println!("{:<4}  {}", "CODE", "NAME");
    println!("{:-<4}  {}", "", "----------");
    for (code, name) in rows {
        println!("{:<4}  {}", code, name);
    }
    Ok(())
}

#[cfg(feature = "web")]
fn handle_serve(
    client: ClientConfig,
    addr: std::net::SocketAddr,
    theme: &str,
    base_url: Option<String>,
) -> Result<(), Box<dyn Error>> {
    use ontolookup_rs::web::{WebConfig, WebTheme, serve};

    let theme = WebTheme::from_name(theme)
        .ok_or_else(|| format!("Unknown theme {theme:?}; use bootstrap or tailwind"))?;
    let config = WebConfig {
        addr,
        theme,
        base_url: base_url.unwrap_or_else(|| format!("http://{addr}")),
    };
    block_on(serve(config, client))??;
    Ok(())
}

fn print_outcome(outcome: &SearchOutcome, view: &ResultsView) {
    println!("Source: {}", outcome.source_label);
    if view.is_empty() {
        println!("No results for \"{}\".", outcome.query);
        return;
    }
    for group in &view.groups {
        println!("\n{} ({})", group.title, group.count);
        for item in &group.items {
            let marker = if item.link.is_external() { "ext" } else { "int" };
            println!("  [{marker}] {}  {}", item.name, item.link.href());
            if let Some(summary) = item.summary.as_deref() {
                render_markdown_block(summary);
            }
        }
    }
    if let Some(failure) = outcome.failure.as_deref() {
        eprintln!("\n{failure}");
    }
}

fn print_property_tree(nodes: &[PropertyNode]) {
    for node in nodes {
        let indent = "  ".repeat(node.depth());
        match node {
            PropertyNode::Field { label, value, .. } => println!("{indent}{label}: {value}"),
            PropertyNode::Relation { label, children, .. } => {
                println!("{indent}{label}");
                print_property_tree(children);
            }
        }
    }
}

fn stdout_is_tty() -> bool {
    atty::is(Stream::Stdout)
}

fn markdown_width() -> usize {
    let (width, _) = terminal_size();
    width.max(60) as usize
}

fn render_markdown_block(body: &str) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return;
    }
    if stdout_is_tty() {
        let skin = MadSkin::default();
        let formatted = FmtText::from(&skin, trimmed, Some(markdown_width() - 4));
        for line in formatted.to_string().lines() {
            println!("    {line}");
        }
    } else {
        println!("    {trimmed}");
    }
}
