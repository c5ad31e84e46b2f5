//! # newsdesk
//!
//! Command-line front end for the feed curation layer. It loads a snapshot
//! from the content store (or a saved JSON file), assembles one page view
//! and writes it as JSON.
//!
//! ## Usage
//!
//! ```sh
//! newsdesk --origin http://localhost:1337 --language hindi home
//! ```
//!
//! ## Flow
//!
//! 1. **Configuration**: YAML file, then CLI/env overrides
//! 2. **Fetching**: articles and/or archive entries from the store
//! 3. **Curation**: the requested view, optionally localized into cards
//! 4. **Probing**: archive PDFs checked with `HEAD` when `--probe` is set
//! 5. **Output**: pretty JSON to stdout or `--output`

use chrono::{DateTime, Utc};
use clap::Parser;
use serde_json::{Value, json};
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use newsdesk::cli::{Cli, Command};
use newsdesk::config::SiteConfig;
use newsdesk::curation::{ArticleView, FeedCurator, HomeFeed};
use newsdesk::localize::{ArticleCard, category_label};
use newsdesk::models::{Category, Language};
use newsdesk::output::write_view;
use newsdesk::probe::{HttpProbe, probe_archive};
use newsdesk::store::{ContentStore, RestStore, SnapshotStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr; stdout carries the JSON view) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(command = ?args.command, config = ?args.config, snapshot = ?args.snapshot, "Parsed CLI arguments");

    let config = match &args.config {
        Some(path) => SiteConfig::load(path).await?,
        None => SiteConfig::default(),
    }
    .with_overrides(args.origin.clone(), args.language)
    .validated()?;
    info!(origin = %config.origin, language = %config.language, "newsdesk starting up");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    let result = match &args.snapshot {
        Some(path) => {
            let store = SnapshotStore::load(path).await?;
            run(&args, &config, &store, &client).await
        }
        None => {
            let store = RestStore::new(&config.origin, client.clone())?;
            run(&args, &config, &store, &client).await
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Failed to build view");
        return Err(e);
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, millis = elapsed.as_millis() as u64, "Execution complete");
    Ok(())
}

/// Fetch what the requested view needs, assemble it and write it out.
#[instrument(level = "info", skip_all, fields(command = ?args.command))]
async fn run<S: ContentStore>(
    args: &Cli,
    config: &SiteConfig,
    store: &S,
    client: &reqwest::Client,
) -> Result<(), Box<dyn Error>> {
    let curator = FeedCurator::new(config.origin.clone(), config.layout.clone());
    let language = config.language;
    let now = Utc::now();
    let mut rng = rand::rng();
    let output = args.output.as_deref();

    match &args.command {
        Command::Home => {
            let articles = store.list_articles().await?;
            let home = curator.home_feed(&articles);
            if home.hero.is_empty() {
                warn!("No articles available");
            }
            if args.localized {
                write_view(&localized_home(&home, language, now), output).await
            } else {
                write_view(&home, output).await
            }
        }
        Command::Category { name } => {
            if name.parse::<Category>().is_err() {
                warn!(%name, "Not a known category; sections will be empty");
            }
            let articles = store.list_articles().await?;
            let feed = curator.category_feed(&articles, name, &mut rng);
            if feed.is_empty() {
                warn!(%name, "No articles available in category");
            }
            if args.localized {
                let view = json!({
                    "category": feed.category,
                    "label": feed.category.parse::<Category>().ok().map(|c| category_label(c, language)),
                    "top": cards(&feed.top, language, now),
                    "more": cards(&feed.more, language, now),
                    "latest": cards(&feed.latest, language, now),
                    "recommended": cards(&feed.recommended, language, now),
                });
                write_view(&view, output).await
            } else {
                write_view(&feed, output).await
            }
        }
        Command::Article { id } => {
            let Some(article) = store.article(*id).await? else {
                return Err(format!("article {id} not found").into());
            };
            let articles = store.list_articles().await?;
            let page = curator.article_page(&article, &articles, &mut rng);
            if args.localized {
                let view = json!({
                    "article": page.article.card(language, now),
                    "sidebar": cards(&page.sidebar, language, now),
                });
                write_view(&view, output).await
            } else {
                write_view(&page, output).await
            }
        }
        Command::Archive { probe } => {
            let entries = store.list_archive_entries().await?;
            let mut items = curator.archive_list(&entries, language);
            if items.is_empty() {
                warn!("No archives available");
            }
            if *probe {
                let checker = HttpProbe::new(client.clone());
                items = probe_archive(items, &checker, config.probe_concurrency).await;
            }
            write_view(&items, output).await
        }
    }
}

fn cards(views: &[ArticleView<'_>], language: Language, now: DateTime<Utc>) -> Vec<ArticleCard> {
    views.iter().map(|v| v.card(language, now)).collect()
}

fn localized_home(home: &HomeFeed<'_>, language: Language, now: DateTime<Utc>) -> Value {
    let sections: Vec<Value> = home
        .sections
        .iter()
        .map(|section| {
            json!({
                "category": section.category,
                "label": category_label(section.category, language),
                "primary": cards(&section.primary, language, now),
                "secondary": cards(&section.secondary, language, now),
            })
        })
        .collect();

    json!({
        "hero": cards(&home.hero, language, now),
        "sections": sections,
    })
}
