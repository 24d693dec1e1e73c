//! HTTP client for Directus communication.
//!
//! This module provides the [`HttpClient`] type that performs exactly one
//! authenticated exchange per call and classifies its outcome.

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;

use crate::clients::errors::{HttpError, UnexpectedStatusError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{DirectusConfig, InstanceUrl};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to a Directus instance.
///
/// The client handles:
/// - URL construction from the configured instance URL
/// - Default headers including User-Agent and the bearer token
/// - Response classification into success or [`HttpError`]
/// - Cancellation through a [`CancellationToken`]
///
/// No retries and no timeouts are applied.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and is meant to be shared behind an `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// use directus_api::clients::{HttpClient, HttpMethod, HttpRequest};
/// use tokio_util::sync::CancellationToken;
///
/// let client = HttpClient::new(&config)?;
/// let request = HttpRequest::builder(HttpMethod::Get, "/server/info").build()?;
/// let response = client.request(&CancellationToken::new(), request).await?;
/// ```
pub struct HttpClient {
    client: reqwest::Client,
    instance: InstanceUrl,
    default_headers: HashMap<String, String>,
    body_logging: bool,
}

// Headers are left out: they carry the access token.
impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("instance", &self.instance)
            .field("body_logging", &self.body_logging)
            .finish_non_exhaustive()
    }
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g. TLS initialization failure).
    pub fn new(config: &DirectusConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Directus API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", config.token().as_ref()),
        );

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            instance: config.instance().clone(),
            default_headers,
            body_logging: config.body_logging(),
        })
    }

    /// Returns the instance URL requests are sent to.
    #[must_use]
    pub const fn instance(&self) -> &InstanceUrl {
        &self.instance
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends one request to Directus and classifies the reply.
    ///
    /// Classification, in priority order:
    /// 1. 200 is a success.
    /// 2. 204 on DELETE is a success.
    /// 3. 400 with a non-empty `errors` array is [`HttpError::Validation`].
    /// 4. 204 on POST or PATCH is [`HttpError::Empty`].
    /// 5. Anything else is [`HttpError::UnexpectedStatus`].
    ///
    /// # Errors
    ///
    /// Besides the classification above, returns [`HttpError::Cancelled`] if
    /// `cancel` fires before the exchange completes, and the local failure
    /// variants when the request cannot be built or sent.
    pub async fn request(
        &self,
        cancel: &CancellationToken,
        request: HttpRequest,
    ) -> Result<HttpResponse, HttpError> {
        request.verify()?;
        if cancel.is_cancelled() {
            return Err(HttpError::Cancelled);
        }

        let url = self.instance.join(&request.path);
        let mut req_builder = self.client.request(request.http_method.as_reqwest(), url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            let payload = serde_json::to_string(body).map_err(HttpError::Encode)?;
            if self.body_logging {
                tracing::debug!(body = %payload, "directus request body");
            }
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(payload);
        }

        let req = req_builder.build()?;
        let url = req.url().to_string();
        tracing::debug!(method = %request.http_method, url = %url, "directus request");

        let exchange = async {
            let res = self.client.execute(req).await?;
            let code = res.status().as_u16();
            let body = res.bytes().await?;
            Ok::<_, reqwest::Error>((code, body.to_vec()))
        };

        let (code, body) = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(HttpError::Cancelled),
            result = exchange => result?,
        };

        tracing::debug!(status = code, "directus reply");
        if self.body_logging {
            tracing::debug!(body = %String::from_utf8_lossy(&body), "directus reply body");
        }

        Self::classify(HttpResponse::new(request.http_method, url, code, body))
    }

    fn classify(response: HttpResponse) -> Result<HttpResponse, HttpError> {
        match (response.method, response.code) {
            (_, 200) | (HttpMethod::Delete, 204) => Ok(response),
            (_, 400) => match response.first_error() {
                Some(error) => Err(HttpError::Validation(error)),
                None => Err(Self::unexpected(response)),
            },
            (HttpMethod::Post | HttpMethod::Patch, 204) => Err(HttpError::Empty {
                method: response.method,
                url: response.url,
            }),
            _ => Err(Self::unexpected(response)),
        }
    }

    fn unexpected(response: HttpResponse) -> HttpError {
        HttpError::UnexpectedStatus(UnexpectedStatusError {
            status: response.code,
            url: response.url,
        })
    }
}
