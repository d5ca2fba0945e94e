//! API client implementation.

use async_trait::async_trait;
use console_config::ConsoleSettings;
use console_forms::options::{
    ACTIVE_ETHEREUM_NODES, EthereumNodeSummary, IPFS_PEERS, IpfsPeerSummary,
};
use console_forms::{Deployment, GatewayError, OptionSets, Payload, ResourceGateway, ResourceKind};
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::{ApiClientConfig, ClientError, Result};

/// Client for the deployment API.
///
/// Creates with `POST <base><path>`, updates with `PUT <base><path>/<name>`
/// and deletes with `DELETE <base><path>/<name>`. Non-success responses carry
/// their message in the body's `error` field.
#[derive(Clone)]
pub struct ApiClient {
    inner: reqwest::Client,
    config: Arc<ApiClientConfig>,
}

impl ApiClient {
    /// Create a new API client with the given configuration.
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        Url::parse(&config.base_url)?;

        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Create a client from loaded console settings.
    pub fn from_settings(settings: &ConsoleSettings) -> Result<Self> {
        Self::new(ApiClientConfig::from(settings))
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Absolute URL of an API path.
    pub fn url(&self, path: &str) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", base, path))?)
    }

    /// GET a path and decode its unwrapped body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.send(Method::GET, path, None).await?;
        decode(body)
    }

    /// Ethereum nodes and IPFS peers, as the option sets the forms select
    /// endpoints from.
    pub async fn option_sets(&self) -> Result<OptionSets> {
        let (nodes, peers) = tokio::try_join!(
            self.get::<Vec<EthereumNodeSummary>>(ResourceKind::EthereumNode.api_path()),
            self.get::<Vec<IpfsPeerSummary>>(ResourceKind::IpfsPeer.api_path()),
        )?;

        Ok(OptionSets::new()
            .with(ACTIVE_ETHEREUM_NODES, OptionSets::ethereum_rpc_endpoints(&nodes))
            .with(IPFS_PEERS, OptionSets::ipfs_peer_endpoints(&peers)))
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Payload>) -> Result<Value> {
        let url = self.url(path)?;
        debug!(method = %method, url = %url, "Sending API request");

        let mut request = self.inner.request(method.clone(), url);
        for (name, value) in &self.config.default_headers {
            request = request.header(name, value);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = error_message(status, &bytes);
            warn!(method = %method, path, status = status.as_u16(), error = %message, "API request rejected");
            return Err(ClientError::Response {
                status: status.as_u16(),
                message,
            });
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Json(e.to_string()))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

#[async_trait]
impl ResourceGateway for ApiClient {
    async fn create(&self, kind: ResourceKind, payload: &Payload) -> std::result::Result<Deployment, GatewayError> {
        let body = self.send(Method::POST, kind.api_path(), Some(payload)).await?;
        Ok(decode(body)?)
    }

    async fn update(
        &self,
        kind: ResourceKind,
        name: &str,
        payload: &Payload,
    ) -> std::result::Result<Deployment, GatewayError> {
        let body = self
            .send(Method::PUT, &kind.resource_path(name), Some(payload))
            .await?;
        Ok(decode(body)?)
    }

    async fn delete(&self, kind: ResourceKind, name: &str) -> std::result::Result<(), GatewayError> {
        self.send(Method::DELETE, &kind.resource_path(name), None).await?;
        Ok(())
    }
}

/// Responses wrap their content in one key named after the resource,
/// e.g. `{"node": {...}}` or `{"beaconnode": {...}}`.
fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.len() == 1 => {
            let is_wrapped = map
                .values()
                .next()
                .is_some_and(|inner| inner.is_object() || inner.is_array());
            match map.keys().next().cloned() {
                Some(key) if is_wrapped => map.remove(&key).unwrap_or(Value::Null),
                _ => Value::Object(map),
            }
        }
        other => other,
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T> {
    serde_json::from_value(unwrap_envelope(body)).map_err(|e| ClientError::Json(e.to_string()))
}

fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_client_with_config() {
        let config = ApiClientConfig::builder()
            .base_url("http://console-api:5000/api/v1/")
            .timeout(Duration::from_secs(60))
            .build();

        let client = ApiClient::new(config).unwrap();
        assert_eq!(client.config().timeout, Duration::from_secs(60));
        assert_eq!(
            client.url("/ethereum/nodes").unwrap().as_str(),
            "http://console-api:5000/api/v1/ethereum/nodes"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ApiClientConfig::builder().base_url("not a url").build();
        assert!(matches!(ApiClient::new(config), Err(ClientError::UrlParse(_))));
    }

    #[test]
    fn test_unwrap_envelope() {
        assert_eq!(
            unwrap_envelope(json!({"node": {"name": "geth-1"}})),
            json!({"name": "geth-1"})
        );
        assert_eq!(unwrap_envelope(json!({"name": "geth-1"})), json!({"name": "geth-1"}));
        assert_eq!(unwrap_envelope(json!([{"name": "a"}])), json!([{"name": "a"}]));
    }

    #[test]
    fn test_error_message() {
        let body = br#"{"error": "node by name geth-1 already exist"}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "node by name geth-1 already exist"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, b"oops"),
            "Internal Server Error"
        );
    }
}
