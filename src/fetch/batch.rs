//! Order-preserving batch fetcher with a bounded in-flight cap
//!
//! One invocation of [`Fetcher::fetch_all`] is one fetch batch: every input
//! URL produces exactly one result slot, in input order, regardless of the
//! order responses arrive in. Requests run in parallel but at most
//! `max_in_flight` of them are on the wire at once; the rest wait for a slot.
//! A failed request fills its own slot with a [`FetchError`] and never
//! disturbs its siblings.

use crate::config::FetcherConfig;
use crate::fetch::client::{build_http_client, select_user_agent};
use reqwest::Client;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use url::Url;

/// A single failed slot in a fetch batch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request for {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Fetch task for {url} did not complete")]
    Canceled { url: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL the page was requested from
    pub url: Url,

    /// HTTP status code of the response
    pub status: u16,

    /// Response body
    pub body: String,
}

/// Batch page fetcher
///
/// Holds the HTTP client and the concurrency cap. Construction picks the
/// User-Agent once from the candidate pool; every request made through this
/// fetcher carries it. The cap is scoped per [`fetch_all`](Self::fetch_all)
/// call, so the book-page batch and each book's author batch get independent
/// in-flight budgets.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    user_agent: &'static str,
    max_in_flight: usize,
}

impl Fetcher {
    /// Creates a new fetcher from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Fetcher configuration (cap and timeouts)
    ///
    /// # Returns
    ///
    /// * `Ok(Fetcher)` - Ready-to-use fetcher
    /// * `Err(FetchError)` - The HTTP client could not be built
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let user_agent = select_user_agent();
        let client = build_http_client(config, user_agent)?;

        Ok(Self {
            client,
            user_agent,
            max_in_flight: config.max_in_flight,
        })
    }

    /// Returns the User-Agent string this fetcher sends
    pub fn user_agent(&self) -> &str {
        self.user_agent
    }

    /// Fetches a batch of URLs in parallel, bounded by the in-flight cap
    ///
    /// Returns one result per input URL, in input order, regardless of
    /// completion order. A network failure or non-success status for one URL
    /// yields a `FetchError` in that slot only; sibling requests in the batch
    /// are unaffected. There are no retries: a failed fetch is final within
    /// the call.
    ///
    /// # Arguments
    ///
    /// * `urls` - The URLs to fetch
    ///
    /// # Returns
    ///
    /// A vector of per-URL results, `results.len() == urls.len()`
    pub async fn fetch_all(&self, urls: &[Url]) -> Vec<Result<FetchedPage, FetchError>> {
        tracing::debug!("Fetching batch of {} URLs", urls.len());

        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));
        let mut handles = Vec::with_capacity(urls.len());

        for url in urls {
            let client = self.client.clone();
            let semaphore = Arc::clone(&semaphore);
            let url = url.clone();

            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return Err(FetchError::Canceled {
                            url: url.to_string(),
                        })
                    }
                };

                fetch_page(&client, url).await
            }));
        }

        // Awaiting the handles in spawn order keeps result slots aligned
        // with input order while the requests themselves overlap.
        let mut results = Vec::with_capacity(handles.len());
        for (handle, url) in handles.into_iter().zip(urls) {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::warn!("Fetch task for {} died: {}", url, e);
                    results.push(Err(FetchError::Canceled {
                        url: url.to_string(),
                    }));
                }
            }
        }

        results
    }
}

/// Performs a single GET request and classifies the outcome
async fn fetch_page(client: &Client, url: Url) -> Result<FetchedPage, FetchError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();

    if !status.is_success() {
        tracing::warn!("GET {} returned status {}", url, status);
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| FetchError::Transport {
        url: url.to_string(),
        source: e,
    })?;

    Ok(FetchedPage {
        url,
        status: status.as_u16(),
        body,
    })
}
