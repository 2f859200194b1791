//! Aikido API client
//!
//! Thin JSON client over reqwest. Every error is converted into
//! [`ac_core::Error`], with request failures carried as [`HttpFailure`].

use std::time::Duration;

use ac_core::{Error, HttpFailure, ResolvedConfig, Result};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::classify::{classify, status_failure};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const API_KEY_HEADER: &str = "X-AIK-API-SECRET";
const USER_AGENT: &str = concat!("aikido-cli/", env!("CARGO_PKG_VERSION"));

/// Client for the Aikido API
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    api_key: String,
    client: Client,
}

impl ApiClient {
    /// Create a client for `base_url` authenticating with `api_key`
    ///
    /// A path prefix on `base_url` (e.g. `http://proxy/aikido`) is kept for
    /// every request.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            api_key: api_key.into(),
            client: build_client(DEFAULT_TIMEOUT)?,
        })
    }

    /// Replace the request timeout
    fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Create a client from resolved configuration
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        Self::new(&config.base_url, config.api_key.clone())
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `path` and decode the JSON response
    pub async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.endpoint(path)?;
        self.send(self.client.get(url)).await
    }

    /// POST `body` as JSON to `path` and decode the JSON response
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let url = self.endpoint(path)?;
        self.send(self.client.post(url).json(body)).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| classify(&e))?;

        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "API response");

        if !status.is_success() {
            return Err(status_failure(response).await.into());
        }

        let body = response.text().await.map_err(|e| classify(&e))?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(Error::from)
    }
}

fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| {
            HttpFailure::Other {
                message: e.to_string(),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), "AIK_CI_test").unwrap()
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ApiClient::new("not a url", "key");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_endpoint_joins_path() {
        let client = ApiClient::new("https://app.aikido.dev", "key").unwrap();
        let url = client.endpoint("/api/integrations/continuous_integration/scan").unwrap();
        assert_eq!(
            url.as_str(),
            "https://app.aikido.dev/api/integrations/continuous_integration/scan"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = ApiClient::new("http://localhost:8080/aikido", "key").unwrap();
        assert_eq!(
            client.endpoint("/api/ping").unwrap().as_str(),
            "http://localhost:8080/aikido/api/ping"
        );

        let client = ApiClient::new("http://localhost:8080/aikido/", "key").unwrap();
        assert_eq!(
            client.endpoint("api/ping").unwrap().as_str(),
            "http://localhost:8080/aikido/api/ping"
        );
    }

    #[tokio::test]
    async fn test_base_path_prefix_reaches_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/aikido/api/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&format!("{}/aikido", server.uri()), "key").unwrap();
        let value = client.get_json("/api/ping").await.unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn test_slow_server_is_no_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = client_for(&server)
            .await
            .with_timeout(Duration::from_millis(100))
            .unwrap();
        let err = client.get_json("/api/ping").await.unwrap_err();
        assert!(
            matches!(err.as_http(), Some(HttpFailure::NoResponse { .. })),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn test_get_json_sends_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .and(header(API_KEY_HEADER, "AIK_CI_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let value = client_for(&server).await.get_json("/api/ping").await.unwrap();
        assert_eq!(value, serde_json::json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_post_json_sends_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/scan"))
            .and(body_json(serde_json::json!({"repository_id": 42})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"scan_id": 7})))
            .mount(&server)
            .await;

        let value = client_for(&server)
            .await
            .post_json("/api/scan", &serde_json::json!({"repository_id": 42}))
            .await
            .unwrap();
        assert_eq!(value["scan_id"], 7);
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let value = client_for(&server).await.get_json("/api/empty").await.unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_status_failure_captures_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(401)
                    .insert_header("x-request-id", "req-1")
                    .set_body_string("invalid key"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_json("/api/ping").await.unwrap_err();
        match err.as_http() {
            Some(HttpFailure::Status(failure)) => {
                assert_eq!(failure.status, 401);
                assert_eq!(failure.status_text, "Unauthorized");
                assert_eq!(failure.body.as_deref(), Some("invalid key"));
                assert_eq!(
                    failure.headers.get("x-request-id").map(String::as_str),
                    Some("req-1")
                );
            }
            other => panic!("expected status failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_json("/").await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&format!("http://{addr}"), "key").unwrap();
        let err = client.get_json("/api/ping").await.unwrap_err();
        assert!(matches!(
            err.as_http(),
            Some(HttpFailure::ConnectionRefused { .. })
        ));
    }
}
