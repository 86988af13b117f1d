use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use tracing::{debug, warn};

use super::models::{FetchError, FetchedPage};

/// Client for the spot price page that embeds the hourly chart
pub struct ElenClient {
    http_client: HttpClient,
    page_url: String,
}

impl ElenClient {
    const USER_AGENT: &'static str = concat!("timpris/", env!("CARGO_PKG_VERSION"));

    /// Create a new client for the given page URL
    pub fn new(page_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            page_url: page_url.into(),
        }
    }

    /// Create default headers
    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(Self::USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
        headers
    }

    /// GET the page
    ///
    /// # Returns
    /// * `Ok(FetchedPage)` - The page URL and HTML body
    /// * `Err(FetchError)` - Transport failure or non-success status
    pub async fn fetch_page(&self) -> Result<FetchedPage, FetchError> {
        debug!("Visiting {}", self.page_url);

        let response = self.http_client
            .get(&self.page_url)
            .headers(Self::create_headers())
            .send()
            .await
            .map_err(|e| FetchError::Request(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Page request returned {}", status);
            return Err(FetchError::Status(status.as_u16(), self.page_url.clone()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(format!("Failed to read page: {}", e)))?;

        debug!("Fetched {} bytes from {}", body.len(), self.page_url);
        Ok(FetchedPage::new(self.page_url.clone(), body))
    }
}
