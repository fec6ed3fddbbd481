//! Pipeline orchestrator: the public entry point
//!
//! A [`Pipeline`] owns the validated configuration and a single fetcher.
//! [`Pipeline::run`] drives the whole extraction: one batch fetch over the
//! requested book pages, then one spawned extraction task per fetched book,
//! each of which runs its own author batch. Failures are isolated per book;
//! the caller gets one [`BookOutcome`] per requested URL, in input order.

use crate::config::{self, Config};
use crate::extract::extract_book;
use crate::fetch::Fetcher;
use crate::record::BookRecord;
use crate::site::SiteOrigin;
use crate::HarvestError;
use std::sync::Arc;
use url::Url;

/// The per-book result of one pipeline run
///
/// A failed book is reported with the address it came from and the error
/// that sank it; it is never a record with missing pieces.
#[derive(Debug)]
pub struct BookOutcome {
    /// The book page URL this outcome belongs to
    pub url: Url,

    /// The extracted record, or the failure that ended this book
    pub result: Result<BookRecord, HarvestError>,
}

/// Extraction pipeline over a configured site
pub struct Pipeline {
    fetcher: Arc<Fetcher>,
    origin: SiteOrigin,
}

impl Pipeline {
    /// Creates a pipeline from configuration
    ///
    /// Validates the configuration, resolves the site origin, and builds the
    /// fetcher (which picks its User-Agent once, here).
    ///
    /// # Arguments
    ///
    /// * `config` - The pipeline configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Pipeline)` - Ready-to-run pipeline
    /// * `Err(HarvestError)` - Invalid configuration or client build failure
    pub fn new(config: Config) -> crate::Result<Self> {
        config::validate(&config)?;

        let origin = SiteOrigin::parse(&config.site.origin)?;
        let fetcher = Fetcher::new(&config.fetcher)?;

        Ok(Self {
            fetcher: Arc::new(fetcher),
            origin,
        })
    }

    /// Runs the extraction pipeline over a list of book page URLs
    ///
    /// Fetches all book pages in one bounded batch, then extracts each
    /// successfully fetched book in its own task so the nested author
    /// batches of different books overlap. One book failing, during fetch or
    /// extraction, never aborts its siblings.
    ///
    /// # Arguments
    ///
    /// * `book_urls` - Book page URLs to extract
    ///
    /// # Returns
    ///
    /// One [`BookOutcome`] per input URL, in input order.
    pub async fn run(&self, book_urls: &[Url]) -> Vec<BookOutcome> {
        tracing::info!("Extracting {} book pages", book_urls.len());

        let fetched = self.fetcher.fetch_all(book_urls).await;

        let mut handles = Vec::with_capacity(fetched.len());
        for (url, fetch_result) in book_urls.iter().zip(fetched) {
            let fetcher = Arc::clone(&self.fetcher);
            let origin = self.origin.clone();
            let url = url.clone();

            handles.push(tokio::spawn(async move {
                let result = match fetch_result {
                    Ok(page) => extract_book(&fetcher, &origin, &page.body)
                        .await
                        .map_err(HarvestError::from),
                    Err(e) => Err(HarvestError::from(e)),
                };

                if let Err(e) = &result {
                    tracing::warn!("Book {} failed: {}", url, e);
                }

                BookOutcome { url, result }
            }));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (handle, url) in handles.into_iter().zip(book_urls) {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::error!("Extraction task for {} died: {}", url, e);
                    outcomes.push(BookOutcome {
                        url: url.clone(),
                        result: Err(HarvestError::Task(url.to_string())),
                    });
                }
            }
        }

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        tracing::info!(
            "Extraction finished: {} succeeded, {} failed",
            outcomes.len() - failed,
            failed
        );

        outcomes
    }
}

/// Runs the extraction pipeline once with the given configuration
///
/// Convenience wrapper for one-shot use.
///
/// # Example
///
/// ```no_run
/// use litres_harvest::config::Config;
/// use litres_harvest::pipeline;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let urls = vec![Url::parse("https://litres.ru/book/some-book/")?];
/// let outcomes = pipeline::run(Config::default(), &urls).await?;
/// for outcome in outcomes {
///     match outcome.result {
///         Ok(book) => println!("{}: {}", outcome.url, book.name),
///         Err(e) => eprintln!("{}: {}", outcome.url, e),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run(config: Config, book_urls: &[Url]) -> crate::Result<Vec<BookOutcome>> {
    let pipeline = Pipeline::new(config)?;
    Ok(pipeline.run(book_urls).await)
}
