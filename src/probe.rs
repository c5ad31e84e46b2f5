//! Reachability checks for archive PDF documents.
//!
//! Before an archive document is offered as clickable, a metadata-only
//! request (`HEAD`) confirms it exists. A failed check never removes the
//! edition from the listing: it is marked unavailable with the reason, and
//! renderers keep a direct-open link as fallback.
//!
//! # Architecture
//!
//! - [`LinkProbe`]: Core trait for an async existence check
//! - [`HttpProbe`]: `reqwest`-backed implementation
//! - [`probe_archive`]: Checks a prepared archive listing with bounded concurrency

use crate::curation::{ArchiveItem, Availability};
use futures::stream::{self, StreamExt};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Why a document could not be reached.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The server answered with a non-success status.
    #[error("PDF not accessible: {status} {reason}")]
    Status { status: u16, reason: String },
    /// The request itself failed (DNS, TLS, connection, timeout).
    #[error("failed to access PDF: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ProbeError {
    /// HTTP status behind the failure, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProbeError::Status { status, .. } => Some(*status),
            ProbeError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Async existence check for a resolved address.
pub trait LinkProbe {
    /// `Ok(())` if the address answers a metadata request successfully.
    async fn check(&self, url: &str) -> Result<(), ProbeError>;
}

/// Issues `HEAD` requests with a caller-provided client.
///
/// Timeouts and redirects follow whatever the client was built with.
#[derive(Debug, Clone, Default)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl LinkProbe for HttpProbe {
    #[instrument(level = "debug", skip(self))]
    async fn check(&self, url: &str) -> Result<(), ProbeError> {
        let t0 = Instant::now();
        let response = self.client.head(url).send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), elapsed_ms = t0.elapsed().as_millis() as u64, "HEAD completed");

        if status.is_success() {
            Ok(())
        } else {
            Err(ProbeError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            })
        }
    }
}

/// Probe every listed document and record the outcome on its item.
///
/// Order is preserved. Items without a document for the active language
/// stay [`Availability::Missing`] and are not probed. At most `concurrency`
/// checks run at once (minimum 1).
#[instrument(level = "info", skip_all, fields(items = items.len(), concurrency = concurrency))]
pub async fn probe_archive<'a, P>(items: Vec<ArchiveItem<'a>>, probe: &P, concurrency: usize) -> Vec<ArchiveItem<'a>>
where
    P: LinkProbe,
{
    let checked: Vec<ArchiveItem<'a>> = stream::iter(items)
        .map(|mut item| async move {
            if let Some(url) = item.pdf_url.as_deref() {
                item.availability = match probe.check(url).await {
                    Ok(()) => Availability::Available,
                    Err(e) => {
                        warn!(id = item.entry.id, %url, error = %e, "Archive document unreachable");
                        Availability::Unavailable {
                            status: e.status(),
                            reason: e.to_string(),
                        }
                    }
                };
            }
            item
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let unavailable = checked
        .iter()
        .filter(|i| matches!(i.availability, Availability::Unavailable { .. }))
        .count();
    info!(unavailable, "Probed archive documents");
    checked
}
