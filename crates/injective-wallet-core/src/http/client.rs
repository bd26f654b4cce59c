/*
[INPUT]:  HTTP configuration (base URL, timeouts, retry backoff)
[OUTPUT]: Configured reqwest client ready for REST calls
[POS]:    HTTP layer - core client implementation shared by token and price lookups
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::http::{Result, WalletError};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Base unit multiplied by the error's retry delay between attempts
    pub retry_backoff: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// JSON REST client bound to one base URL
#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: Client,
    base_url: Url,
    config: ClientConfig,
}

impl RestClient {
    /// Create a new client with default configuration
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default(), base_url)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
            config,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an endpoint relative to the base URL
    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Build request builder for an endpoint
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and decode a JSON body, mapping non-2xx to `WalletError::Api`
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WalletError::api_error(status, body));
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Like `send_json`, but a 404 yields `None`
    pub(crate) async fn send_optional_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>> {
        match self.send_json(builder).await {
            Ok(value) => Ok(Some(value)),
            Err(WalletError::Api { code, .. }) if code == StatusCode::NOT_FOUND.as_u16() as i32 => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// GET with query parameters, retrying retryable failures up to `retries` extra times
    pub async fn get_json_with_retry<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        retries: u32,
    ) -> Result<Option<T>> {
        let mut attempt = 0;
        loop {
            let builder = self.request(Method::GET, endpoint)?.query(query);
            match self.send_optional_json(builder).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < retries && err.is_retryable() => {
                    attempt += 1;
                    let delay = self.config.retry_backoff * err.retry_delay().unwrap_or(1) as u32;
                    warn!(endpoint, attempt, error = %err, "retrying request");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    debug!(endpoint, attempt, error = %err, "request failed");
                    return Err(err);
                }
            }
        }
    }
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    let base_url = base_url.trim();
    if base_url.ends_with('/') {
        Ok(Url::parse(base_url)?)
    } else {
        Ok(Url::parse(&format!("{base_url}/"))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_config() -> ClientConfig {
        ClientConfig {
            retry_backoff: Duration::from_millis(1),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let client = RestClient::new("https://example.com/api").unwrap();
        assert_eq!(
            client.url("/v1/tokens").unwrap().as_str(),
            "https://example.com/api/v1/tokens"
        );
    }

    #[tokio::test]
    async fn test_get_json_with_retry_recovers_from_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/tokens"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/tokens"))
            .and(query_param("denom", "inj"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = RestClient::with_config(fast_config(), &server.uri()).unwrap();
        let value: Option<serde_json::Value> = client
            .get_json_with_retry("/v1/tokens", &[("denom", "inj")], 2)
            .await
            .unwrap();

        assert_eq!(value, Some(serde_json::json!({"ok": true})));
    }

    #[tokio::test]
    async fn test_get_json_with_retry_maps_not_found_to_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/tokens"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = RestClient::with_config(fast_config(), &server.uri()).unwrap();
        let value: Option<serde_json::Value> = client
            .get_json_with_retry("/v1/tokens", &[("denom", "nope")], 3)
            .await
            .unwrap();

        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/tokens"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad denom"))
            .expect(1)
            .mount(&server)
            .await;

        let client = RestClient::with_config(fast_config(), &server.uri()).unwrap();
        let err = client
            .get_json_with_retry::<serde_json::Value>("/v1/tokens", &[], 3)
            .await
            .unwrap_err();

        match err {
            WalletError::Api { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "bad denom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
