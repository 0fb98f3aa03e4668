//! Action Network API client.
//!
//! Low-level HTTP client that handles authentication, the discovery
//! handshake, and raw requests. Higher-level operations are implemented via
//! traits on record types and resolve their endpoints through the client's
//! [`LinkIndex`] snapshot.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

use crate::discovery::{DiscoveryDocument, LinkIndex};
use crate::error::{AnError, Result};

const DEFAULT_API_URL: &str = "https://actionnetwork.org/api/v2/";
const USER_AGENT: &str = concat!("anapi/", env!("CARGO_PKG_VERSION"));

/// Header carrying the static API key on every request.
const API_TOKEN_HEADER: &str = "OSDI-API-Token";

/// Low-level Action Network API client.
///
/// Connecting fetches the discovery document once and freezes it into a
/// [`LinkIndex`]; record operations resolve their endpoints through that
/// snapshot. [`refresh_links`](Self::refresh_links) swaps in a fresh
/// snapshot without disturbing readers of the old one.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool and link snapshot.
///
/// # Example
///
/// ```no_run
/// use anapi::AnClient;
///
/// # async fn example() -> anapi::Result<()> {
/// // Create from environment variables
/// let client = AnClient::from_env().await?;
///
/// // Or configure manually
/// let client = AnClient::connect("your-api-key", "https://actionnetwork.org/api/v2/").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AnClient {
    http: Client,
    endpoint: Url,
    token: String,
    links: Arc<LinkIndex>,
}

impl std::fmt::Debug for AnClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl AnClient {
    /// Create a client from environment variables.
    ///
    /// Uses `AN_API_KEY` for authentication and optionally `AN_API_URL`
    /// for the discovery endpoint (defaults to
    /// `https://actionnetwork.org/api/v2/`).
    ///
    /// # Errors
    ///
    /// Returns an error if `AN_API_KEY` is not set or the discovery fetch
    /// fails.
    pub async fn from_env() -> Result<Self> {
        let token = env::var("AN_API_KEY").map_err(|_| {
            AnError::ConfigMissing("AN_API_KEY environment variable not set".to_string())
        })?;

        let endpoint = env::var("AN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::connect(&token, &endpoint).await
    }

    /// Connect with the provided API key and discovery endpoint.
    ///
    /// Fetches the discovery document and builds the initial [`LinkIndex`]
    /// snapshot before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid or the discovery
    /// fetch fails.
    pub async fn connect(api_key: &str, endpoint: &str) -> Result<Self> {
        // Ensure the endpoint ends with / so joins behave
        let endpoint_str = if endpoint.ends_with('/') {
            endpoint.to_string()
        } else {
            format!("{endpoint}/")
        };
        let endpoint = Url::parse(&endpoint_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(AnError::HttpError)?;

        let links = fetch_links(&http, &endpoint, api_key).await?;

        Ok(Self {
            http,
            endpoint,
            token: api_key.to_string(),
            links: Arc::new(links),
        })
    }

    /// The current link-index snapshot.
    ///
    /// The returned `Arc` stays valid even if the client refreshes; callers
    /// holding it keep resolving against the snapshot they started with.
    pub fn links(&self) -> Arc<LinkIndex> {
        Arc::clone(&self.links)
    }

    /// Resolve a logical resource name against the current snapshot.
    pub fn resolve(&self, resource: &str) -> Result<Url> {
        self.links.resolve(resource).cloned()
    }

    /// The API base URL, as reported by the discovery document.
    pub fn base_url(&self) -> &Url {
        self.links.base_url()
    }

    /// Message of the day from the discovery document, if any.
    pub fn motd(&self) -> Option<&str> {
        self.links.motd()
    }

    /// Re-fetch the discovery document and replace the link snapshot.
    ///
    /// The old snapshot is superseded, not mutated; clones of the client
    /// and `Arc`s handed out by [`links`](Self::links) are unaffected.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_links(&mut self) -> Result<()> {
        let links = fetch_links(&self.http, &self.endpoint, &self.token).await?;
        self.links = Arc::new(links);
        Ok(())
    }

    /// Fetch a resource endpoint by logical name and return the raw JSON
    /// body.
    #[tracing::instrument(skip(self))]
    pub async fn get_resource(&self, resource: &str) -> Result<serde_json::Value> {
        let url = self.resolve(resource)?;
        let response = self.get(url).await?;
        response.json().await.map_err(AnError::HttpError)
    }

    /// Make a GET request to an absolute URL.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, url: Url) -> Result<Response> {
        let response = self
            .http
            .get(url)
            .header(API_TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(AnError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        url: Url,
        query: &Q,
    ) -> Result<Response> {
        let response = self
            .http
            .get(url)
            .header(API_TOKEN_HEADER, &self.token)
            .query(query)
            .send()
            .await
            .map_err(AnError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a POST request with a JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<Response> {
        let response = self
            .http
            .post(url)
            .header(API_TOKEN_HEADER, &self.token)
            .json(body)
            .send()
            .await
            .map_err(AnError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a PUT request with a JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<Response> {
        let response = self
            .http
            .put(url)
            .header(API_TOKEN_HEADER, &self.token)
            .json(body)
            .send()
            .await
            .map_err(AnError::HttpError)?;

        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting (the service allows 4 requests per second)
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(AnError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(AnError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract an error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // Try to parse as JSON and extract a message field
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        body
    }
}

async fn fetch_links(http: &Client, endpoint: &Url, token: &str) -> Result<LinkIndex> {
    let response = http
        .get(endpoint.clone())
        .header(API_TOKEN_HEADER, token)
        .send()
        .await
        .map_err(AnError::HttpError)?;
    let response = AnClient::check_response(response).await?;

    let document: DiscoveryDocument = response.json().await.map_err(AnError::HttpError)?;
    Ok(LinkIndex::from_document(document))
}
