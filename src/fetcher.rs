use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, UPGRADE_INSECURE_REQUESTS,
    USER_AGENT,
};
use tracing::{debug, info};

use crate::error::FetchError;

const DESKTOP_CHROME_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Anything that can turn a URL into page HTML.
pub trait HtmlFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// The fixed desktop-browser header set sent with every request.
pub fn browser_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(USER_AGENT, HeaderValue::from_static(DESKTOP_CHROME_UA));
    h.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    h.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    h.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    h.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    h.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("none"),
    );
    h.insert(
        HeaderName::from_static("sec-fetch-user"),
        HeaderValue::from_static("?1"),
    );
    h.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    h
}

fn get_text(client: &Client, url: &str) -> Result<String, FetchError> {
    let resp = client.get(url).send().map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let text = resp.text().map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })?;
    debug!(url, %status, len = text.len(), "fetched page");
    Ok(text)
}

/// Plain blocking client: browser headers, no cookie jar.
pub struct PlainClient {
    client: Client,
}

impl PlainClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl HtmlFetcher for PlainClient {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        get_text(&self.client, url)
    }
}

#[cfg(feature = "challenge")]
pub use challenge::ChallengeClient;

#[cfg(feature = "challenge")]
mod challenge {
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::time::Duration;

    use reqwest::blocking::Client;
    use tracing::{debug, warn};
    use url::Url;

    use super::{HtmlFetcher, browser_headers, get_text};
    use crate::error::FetchError;

    /// Session client for sites fronted by a cookie challenge.
    ///
    /// Keeps a cookie jar and visits each origin's root once before the first
    /// real request, so clearance and session cookies are replayed afterwards.
    pub struct ChallengeClient {
        client: Client,
        warmed: RefCell<HashSet<String>>,
    }

    impl ChallengeClient {
        pub fn new(timeout: Duration) -> Result<Self, FetchError> {
            let client = Client::builder()
                .default_headers(browser_headers())
                .cookie_store(true)
                .timeout(timeout)
                .build()
                .map_err(FetchError::Client)?;
            Ok(Self {
                client,
                warmed: RefCell::new(HashSet::new()),
            })
        }

        fn warm_up(&self, url: &str) {
            let Ok(parsed) = Url::parse(url) else {
                return;
            };
            if !matches!(parsed.scheme(), "http" | "https") {
                return;
            }
            let origin = parsed.origin().ascii_serialization();
            if !self.warmed.borrow_mut().insert(origin.clone()) {
                return;
            }

            // Result is irrelevant; only the cookies it leaves behind matter.
            match self.client.get(&origin).send() {
                Ok(r) => {
                    let status = r.status();
                    match r.text() {
                        Ok(body) => {
                            debug!(origin = %origin, %status, len = body.len(), "warm-up hit")
                        }
                        Err(e) => {
                            debug!(origin = %origin, %status, error = %e, "warm-up body unread")
                        }
                    }
                }
                Err(e) => warn!(origin = %origin, error = %e, "warm-up failed"),
            }
        }
    }

    impl HtmlFetcher for ChallengeClient {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.warm_up(url);
            get_text(&self.client, url)
        }
    }
}

#[cfg(feature = "challenge")]
fn challenge_client(timeout: Duration) -> Option<Box<dyn HtmlFetcher>> {
    match ChallengeClient::new(timeout) {
        Ok(c) => Some(Box::new(c)),
        Err(e) => {
            tracing::warn!(error = %e, "challenge client unavailable");
            None
        }
    }
}

#[cfg(not(feature = "challenge"))]
fn challenge_client(_timeout: Duration) -> Option<Box<dyn HtmlFetcher>> {
    None
}

/// Picks the most capable client this build can construct.
pub fn select_client(timeout: Duration) -> Result<Box<dyn HtmlFetcher>, FetchError> {
    if let Some(client) = challenge_client(timeout) {
        info!("using cookie-backed challenge client");
        return Ok(client);
    }
    info!("using plain HTTP client");
    Ok(Box::new(PlainClient::new(timeout)?))
}
