//! HTTP transport for the Threads.net web API
//!
//! Wraps two cookie-bearing `reqwest` clients sharing one cookie jar: one
//! configured with the headers the web app sends on API calls, one with the
//! headers of a top-level page navigation. Session-wide headers are fixed
//! when the clients are built; each request adds its own per-call headers,
//! so nothing shared is mutated and the client can be used concurrently.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, ThreadScrapeError};
use crate::operations::{Operation, text_post_form};
use crate::response::{DEFAULT_EXPECTED_STATUS, validate_response};
use crate::types::Credentials;
use crate::url::{BASE_URL, build_graphql_url, build_text_post_url};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";
const ACCEPT_LANGUAGE: &str = "en,en-US;q=0.9,en-IN;q=0.8";
const SEC_CH_UA: &str =
    r#""Chromium";v="116", "Not)A;Brand";v="24", "Google Chrome";v="116""#;
const SEC_CH_UA_FULL_VERSION_LIST: &str = r#""Chromium";v="116.0.5845.180", "Not)A;Brand";v="24.0.0.0", "Google Chrome";v="116.0.5845.180""#;
const DOCUMENT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

const FRIENDLY_NAME_HEADER: &str = "x-fb-friendly-name";
const CSRF_HEADER: &str = "x-csrftoken";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin all requests are sent to (default: `https://www.threads.net`)
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Value of the `x-fb-lsd` header
    pub lsd_token: String,
    /// Value of the `x-ig-app-id` header
    pub app_id: String,
    /// Value of the `x-asbd-id` header
    pub asbd_id: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout_secs: 30,
            lsd_token: "AVqw_XEyRAI".to_string(),
            app_id: "238260118697367".to_string(),
            asbd_id: "129477".to_string(),
        }
    }
}

/// Authenticated HTTP client for Threads.net
///
/// Handles all HTTP communication, including:
/// - The `sessionid` cookie scoped to the configured origin
/// - Browser fingerprint headers for API calls
/// - Document-style headers for profile and post page fetches
pub struct ThreadsClient {
    api: reqwest::Client,
    pages: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

impl ThreadsClient {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `InvalidUrl` if `base_url` cannot be parsed
    /// - `InvalidCredentials` if the session ID cannot be sent as a cookie
    /// - `InvalidArgument` if a configured header value is not valid
    /// - `HttpError` if the underlying client cannot be built
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let origin = Url::parse(&base_url)
            .map_err(|e| ThreadScrapeError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        if credentials.session_id().contains(';') {
            return Err(ThreadScrapeError::InvalidCredentials(
                "sessionid cannot contain ';'".to_string(),
            ));
        }
        let jar = Arc::new(Jar::default());
        jar.add_cookie_str(&format!("sessionid={}", credentials.session_id()), &origin);

        let timeout = Duration::from_secs(config.timeout_secs);
        let api = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .cookie_provider(Arc::clone(&jar))
            .default_headers(api_headers(&config, &base_url)?)
            .build()
            .map_err(ThreadScrapeError::HttpError)?;
        let pages = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .cookie_provider(jar)
            .default_headers(document_headers())
            .build()
            .map_err(ThreadScrapeError::HttpError)?;

        Ok(Self {
            api,
            pages,
            credentials,
            base_url,
        })
    }

    /// Origin this client sends requests to, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Fetch an HTML page the way a browser navigation would
    ///
    /// # Errors
    /// - `HttpError` - Network errors
    /// - `UnexpectedStatus` - Any status other than 200
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");

        let response = self.pages.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%status, url, "page fetch failed");
            return Err(ThreadScrapeError::UnexpectedStatus {
                status,
                context: format!("Error fetching {}", url),
            });
        }

        Ok(response.text().await?)
    }

    /// Run a persisted GraphQL operation
    ///
    /// # Arguments
    /// * `operation` - Document ID and friendly name to send
    /// * `variables` - Serialized into the `variables` form field
    /// * `context` - Message attached to status errors
    ///
    /// # Returns
    /// The validated JSON response, unchanged
    pub async fn graphql<V: Serialize>(
        &self,
        operation: &Operation,
        variables: &V,
        context: &str,
    ) -> Result<Value> {
        let form = operation.form(self.credentials.fb_dtsg(), variables)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(FRIENDLY_NAME_HEADER),
            HeaderValue::from_static(operation.friendly_name),
        );

        let url = build_graphql_url(&self.base_url);
        debug!(operation = operation.friendly_name, doc_id = operation.doc_id, "sending GraphQL request");

        let response = self
            .api
            .post(&url)
            .headers(headers)
            .form(&form)
            .send()
            .await?;

        validate_response(response, context, DEFAULT_EXPECTED_STATUS).await
    }

    /// Publish a text-only post
    ///
    /// This is the only request that carries the CSRF token.
    pub async fn post_text(&self, text: &str, context: &str) -> Result<Value> {
        let csrf = HeaderValue::from_str(self.credentials.csrf_token()).map_err(|_| {
            ThreadScrapeError::InvalidCredentials(
                "x-csrftoken is not a valid header value".to_string(),
            )
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(CSRF_HEADER), csrf);

        let url = build_text_post_url(&self.base_url);
        debug!(url = %url, "sending text post");

        let response = self
            .api
            .post(&url)
            .headers(headers)
            .form(&text_post_form(text))
            .send()
            .await?;

        validate_response(response, context, DEFAULT_EXPECTED_STATUS).await
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ThreadScrapeError::InvalidArgument(format!("Invalid value for {}", name)))
}

/// Headers sent with every API call unless overridden per request
fn api_headers(config: &ClientConfig, base_url: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE));
    headers.insert(header::ORIGIN, header_value("origin", base_url)?);
    headers.insert("dpr", HeaderValue::from_static("1.5"));
    headers.insert("sec-ch-prefers-color-scheme", HeaderValue::from_static("dark"));
    headers.insert("sec-ch-ua", HeaderValue::from_static(SEC_CH_UA));
    headers.insert(
        "sec-ch-ua-full-version-list",
        HeaderValue::from_static(SEC_CH_UA_FULL_VERSION_LIST),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-model", HeaderValue::from_static(r#""""#));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static(r#""Windows""#));
    headers.insert(
        "sec-ch-ua-platform-version",
        HeaderValue::from_static(r#""15.0.0""#),
    );
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-origin"));
    headers.insert("x-asbd-id", header_value("x-asbd-id", &config.asbd_id)?);
    headers.insert("x-fb-lsd", header_value("x-fb-lsd", &config.lsd_token)?);
    headers.insert("x-ig-app-id", header_value("x-ig-app-id", &config.app_id)?);
    Ok(headers)
}

/// Headers of a top-level page navigation
fn document_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(DOCUMENT_ACCEPT));
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert("dpr", HeaderValue::from_static("1.5"));
    headers.insert("sec-ch-prefers-color-scheme", HeaderValue::from_static("dark"));
    headers.insert("sec-ch-ua", HeaderValue::from_static(SEC_CH_UA));
    headers.insert(
        "sec-ch-ua-full-version-list",
        HeaderValue::from_static(SEC_CH_UA_FULL_VERSION_LIST),
    );
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert("viewport-width", HeaderValue::from_static("1280"));
    headers
}
