//! Read-only access to the external content store.
//!
//! The curation layer never fetches on its own: callers load a snapshot
//! through a [`ContentStore`] and hand it to [`crate::curation`]. A failed
//! fetch is returned verbatim as a [`FetchError`]; there is no retry and no
//! partial result.
//!
//! # Implementations
//!
//! - [`RestStore`]: The store's REST endpoints over `reqwest`
//! - [`SnapshotStore`]: A JSON snapshot held in memory (offline runs, tests)
//!
//! # Endpoints
//!
//! | Operation | Path |
//! |-----------|------|
//! | [`ContentStore::list_articles`] | `/api/articles` |
//! | [`ContentStore::list_articles_in`] | `/api/articles/category/{category}` |
//! | [`ContentStore::article`] | `/api/articles/{id}` |
//! | [`ContentStore::list_archive_entries`] | `/api/archives` |

use crate::models::{ArchiveEntry, Article};
use crate::utils::truncate_for_log;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, instrument};
use url::Url;

/// Why a snapshot could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid content store address: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error! status: {status}, message: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Source of article and archive snapshots.
pub trait ContentStore {
    /// Every article, across all categories.
    async fn list_articles(&self) -> Result<Vec<Article>, FetchError>;

    /// Articles the store files under `category`.
    async fn list_articles_in(&self, category: &str) -> Result<Vec<Article>, FetchError>;

    /// A single article; `None` when the store does not know the id.
    async fn article(&self, id: u64) -> Result<Option<Article>, FetchError>;

    /// Every archive edition.
    async fn list_archive_entries(&self) -> Result<Vec<ArchiveEntry>, FetchError>;
}

/// Body shapes the store emits: a bare record/array from the custom
/// controllers, or the `{ "data": ... }` envelope of the stock ones.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Wrapped { data: T },
    Bare(T),
}

/// Decode a response body, accepting either payload shape.
pub(crate) fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, FetchError> {
    match serde_json::from_str::<Payload<T>>(body) {
        Ok(Payload::Wrapped { data }) | Ok(Payload::Bare(data)) => Ok(data),
        Err(_) => {
            // Re-parse as the bare shape for a precise error position.
            serde_json::from_str::<T>(body).map_err(|source| {
                error!(%endpoint, body = %truncate_for_log(body, 300), error = %source, "Undecodable response");
                FetchError::Decode {
                    endpoint: endpoint.to_string(),
                    source,
                }
            })
        }
    }
}

/// REST client for the content store at `origin`.
#[derive(Debug, Clone)]
pub struct RestStore {
    origin: Url,
    client: reqwest::Client,
}

impl RestStore {
    pub fn new(origin: &str, client: reqwest::Client) -> Result<Self, FetchError> {
        Ok(Self {
            origin: Url::parse(origin)?,
            client,
        })
    }

    /// Absolute address of an API path.
    pub fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        Ok(self.origin.join(path)?)
    }

    fn category_path(category: &str) -> String {
        format!("/api/articles/category/{}", urlencoding::encode(category))
    }

    /// GET `path`; `Ok(None)` on 404.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, FetchError> {
        let url = self.endpoint(path)?;
        let t0 = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), elapsed_ms = t0.elapsed().as_millis() as u64, "Fetched");

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            error!(%url, status = status.as_u16(), body = %truncate_for_log(&body, 300), "Content store returned an error");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_for_log(&body, 300),
            });
        }
        decode(url.as_str(), &body).map(Some)
    }

    /// GET a collection; a 404 is an error here, not an empty list.
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, FetchError> {
        self.get_json(path).await?.ok_or_else(|| FetchError::Status {
            status: StatusCode::NOT_FOUND.as_u16(),
            body: format!("no collection at {path}"),
        })
    }
}

impl ContentStore for RestStore {
    #[instrument(level = "info", skip(self), fields(origin = %self.origin))]
    async fn list_articles(&self) -> Result<Vec<Article>, FetchError> {
        let articles: Vec<Article> = self.get_list("/api/articles").await?;
        info!(count = articles.len(), "Fetched articles");
        Ok(articles)
    }

    #[instrument(level = "info", skip(self), fields(origin = %self.origin))]
    async fn list_articles_in(&self, category: &str) -> Result<Vec<Article>, FetchError> {
        let articles: Vec<Article> = self.get_list(&Self::category_path(category)).await?;
        info!(count = articles.len(), "Fetched category articles");
        Ok(articles)
    }

    #[instrument(level = "info", skip(self), fields(origin = %self.origin))]
    async fn article(&self, id: u64) -> Result<Option<Article>, FetchError> {
        self.get_json(&format!("/api/articles/{id}")).await
    }

    #[instrument(level = "info", skip(self), fields(origin = %self.origin))]
    async fn list_archive_entries(&self) -> Result<Vec<ArchiveEntry>, FetchError> {
        let entries: Vec<ArchiveEntry> = self.get_list("/api/archives").await?;
        info!(count = entries.len(), "Fetched archive entries");
        Ok(entries)
    }
}

/// A whole-site snapshot kept in memory.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SnapshotStore {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub archives: Vec<ArchiveEntry>,
}

impl SnapshotStore {
    pub fn new(articles: Vec<Article>, archives: Vec<ArchiveEntry>) -> Self {
        Self { articles, archives }
    }

    /// Load a snapshot file of the form `{ "articles": [...], "archives": [...] }`.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let body = tokio::fs::read_to_string(path).await.map_err(|source| FetchError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let snapshot: SnapshotStore = decode(&path.display().to_string(), &body)?;
        info!(
            articles = snapshot.articles.len(),
            archives = snapshot.archives.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }
}

impl ContentStore for SnapshotStore {
    async fn list_articles(&self) -> Result<Vec<Article>, FetchError> {
        Ok(self.articles.clone())
    }

    async fn list_articles_in(&self, category: &str) -> Result<Vec<Article>, FetchError> {
        Ok(self
            .articles
            .iter()
            .filter(|a| a.is_in(category))
            .cloned()
            .collect())
    }

    async fn article(&self, id: u64) -> Result<Option<Article>, FetchError> {
        Ok(self.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn list_archive_entries(&self) -> Result<Vec<ArchiveEntry>, FetchError> {
        Ok(self.archives.clone())
    }
}
