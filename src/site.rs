//! Site origin handling and URL rewriting
//!
//! The extractors only ever see two kinds of addresses in LitRes markup:
//! absolute URLs and site-relative paths (`/img/cover.jpg`,
//! `/pages/biblio_author/...`). A [`SiteOrigin`] is the validated
//! `scheme + host` pair every relative address is resolved against, plus the
//! author-profile normalization rule: author links point at the author's
//! landing page, while the biography lives under the fixed `ob-avtore/`
//! sub-path.

use crate::SiteError;
use url::Url;

/// Path suffix of an author's profile ("about the author") page
const AUTHOR_PROFILE_SUFFIX: &str = "ob-avtore/";

/// A validated site origin used to absolutize relative addresses
///
/// Holds an absolute http(s) URL reduced to its root (path `/`, no query or
/// fragment), so joining a relative path always resolves against the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOrigin(Url);

impl SiteOrigin {
    /// Parses and validates a site origin string
    ///
    /// # Arguments
    ///
    /// * `origin` - An absolute http(s) URL, e.g. `https://litres.ru`
    ///
    /// # Returns
    ///
    /// * `Ok(SiteOrigin)` - Validated origin, reduced to scheme + host
    /// * `Err(SiteError)` - Malformed URL, non-http(s) scheme, or no host
    pub fn parse(origin: &str) -> Result<Self, SiteError> {
        let mut url = Url::parse(origin).map_err(|e| SiteError::Parse {
            url: origin.to_string(),
            source: e,
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SiteError::InvalidScheme(url.scheme().to_string()));
        }

        if url.host_str().is_none() {
            return Err(SiteError::MissingHost(origin.to_string()));
        }

        url.set_path("/");
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self(url))
    }

    /// Returns the origin URL (scheme + host, root path)
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Rewrites an address to absolute form
    ///
    /// Addresses that already carry an http(s) scheme are returned unchanged;
    /// anything else is resolved against the origin. This is the rewrite rule
    /// for cover images and author photos.
    ///
    /// # Arguments
    ///
    /// * `address` - An absolute URL or a site-relative path
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The absolute form of the address
    /// * `Err(SiteError)` - The address could not be resolved
    pub fn absolutize(&self, address: &str) -> Result<String, SiteError> {
        let address = address.trim();

        if address.starts_with("http://") || address.starts_with("https://") {
            return Ok(address.to_string());
        }

        let url = self.0.join(address).map_err(|e| SiteError::Parse {
            url: address.to_string(),
            source: e,
        })?;

        Ok(url.to_string())
    }

    /// Normalizes an author link into the author's profile page URL
    ///
    /// Author anchors on a book page point at the author's landing page; the
    /// biography we extract lives at the fixed `ob-avtore/` sub-path. The
    /// href is resolved against the origin and the suffix is appended unless
    /// the link already ends with it.
    ///
    /// # Arguments
    ///
    /// * `href` - The raw anchor href, absolute or site-relative
    ///
    /// # Returns
    ///
    /// * `Ok(Url)` - The absolute author profile URL
    /// * `Err(SiteError)` - The href could not be resolved
    pub fn author_profile_url(&self, href: &str) -> Result<Url, SiteError> {
        let mut url = self.0.join(href.trim()).map_err(|e| SiteError::Parse {
            url: href.to_string(),
            source: e,
        })?;

        if !url.path().ends_with(&format!("/{}", AUTHOR_PROFILE_SUFFIX)) {
            let mut path = url.path().to_string();
            if !path.ends_with('/') {
                path.push('/');
            }
            path.push_str(AUTHOR_PROFILE_SUFFIX);
            url.set_path(&path);
        }

        Ok(url)
    }
}
