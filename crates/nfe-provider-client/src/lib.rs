//! # nfe-provider-client: Typed Client for the WebmaniaBR NFe API
//!
//! Wraps the five provider operations behind one [`NfeClient`]: issuance,
//! consultation, cancellation, certificate validity, and SEFAZ availability.
//! Every call is a single attempt; the provider is the sole source of truth
//! for invoice state, so retry policy belongs to the caller, if anywhere.
//!
//! Provider responses are opaque (`serde_json::Value`): the gateway echoes
//! them without interpreting fields. The one exception is `url_notificacao`
//! on successful issuance, which is overwritten with the configured callback
//! URL so the provider's status notifications reach this deployment.
//!
//! ## Authentication
//!
//! Two schemes are in production use, selected by [`AuthMode`]:
//! - `Basic` (default): HTTP Basic with the consumer key/secret per request.
//! - `Headers`: the four credentials as default `X-*` headers on the client.

pub mod config;
pub mod error;

pub use config::{AuthMode, ConfigError, ProviderConfig};
pub use error::ProviderError;

use std::time::Duration;

use nfe_core::{CancelRequest, IssuanceRequest};
use serde_json::Value;

/// Client for the WebmaniaBR NFe API.
#[derive(Debug, Clone)]
pub struct NfeClient {
    http: reqwest::Client,
    config: ProviderConfig,
    base_url: String,
}

impl NfeClient {
    /// Create a new provider client from configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));

        if config.auth_mode == AuthMode::Headers {
            builder = builder.default_headers(credential_headers(&config)?);
        }

        let http = builder.build().map_err(|e| ProviderError::Http {
            endpoint: "client_init".into(),
            source: e,
        })?;

        let mut base_url = config.base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            http,
            config,
            base_url,
        })
    }

    /// Issue an invoice.
    ///
    /// Calls `POST {base_url}` with the full request payload. On success the
    /// result's `url_notificacao` is overwritten with the configured callback
    /// URL, when one is set.
    pub async fn issue(&self, request: &IssuanceRequest) -> Result<Value, ProviderError> {
        let endpoint = "POST /";
        let mut result = self
            .send(self.http.post(&self.base_url).json(request), endpoint)
            .await?;

        if let Some(url) = self.config.notification_url.as_deref() {
            if let Value::Object(map) = &mut result {
                map.insert(
                    "url_notificacao".to_string(),
                    Value::String(url.to_string()),
                );
            }
        }

        Ok(result)
    }

    /// Consult an issued invoice by its access key.
    ///
    /// Calls `GET {base_url}consulta/{chave}`.
    pub async fn lookup(&self, chave: &str) -> Result<Value, ProviderError> {
        let endpoint = format!("GET /consulta/{chave}");
        let url = format!("{}consulta/{chave}", self.base_url);
        self.send(self.http.get(&url), &endpoint).await
    }

    /// Cancel an issued invoice, providing the mandatory reason.
    ///
    /// Calls `PUT {base_url}cancelar/{chave}` with the `{"motivo": ...}` body.
    pub async fn cancel(
        &self,
        chave: &str,
        request: &CancelRequest,
    ) -> Result<Value, ProviderError> {
        let endpoint = format!("PUT /cancelar/{chave}");
        let url = format!("{}cancelar/{chave}", self.base_url);
        self.send(self.http.put(&url).json(request), &endpoint).await
    }

    /// Check how long the account's digital certificate remains valid.
    ///
    /// Calls `GET {base_url}certificado`.
    pub async fn certificate_status(&self) -> Result<Value, ProviderError> {
        let url = format!("{}certificado", self.base_url);
        self.send(self.http.get(&url), "GET /certificado").await
    }

    /// Check SEFAZ availability as reported by the provider.
    ///
    /// Calls `GET {base_url}status`.
    pub async fn sefaz_status(&self) -> Result<Value, ProviderError> {
        let url = format!("{}status", self.base_url);
        self.send(self.http.get(&url), "GET /status").await
    }

    /// Send a request and handle errors consistently: transport failures,
    /// timeouts, non-2xx statuses (body preserved), and malformed bodies.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<Value, ProviderError> {
        let request = match self.config.auth_mode {
            AuthMode::Basic => request.basic_auth(
                &self.config.consumer_key,
                Some(&self.config.consumer_secret),
            ),
            AuthMode::Headers => request,
        };

        tracing::debug!(endpoint, "dispatching provider request");

        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    endpoint: endpoint.to_string(),
                    elapsed_ms: self.config.timeout_secs * 1000,
                }
            } else {
                ProviderError::Http {
                    endpoint: endpoint.to_string(),
                    source: e,
                }
            }
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            return Err(ProviderError::Api {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| ProviderError::Decode {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }
}

fn credential_headers(
    config: &ProviderConfig,
) -> Result<reqwest::header::HeaderMap, ConfigError> {
    let mut headers = reqwest::header::HeaderMap::new();
    for (name, value) in [
        ("x-consumer-key", &config.consumer_key),
        ("x-consumer-secret", &config.consumer_secret),
        ("x-access-token", &config.access_token),
        ("x-access-token-secret", &config.access_token_secret),
    ] {
        headers.insert(
            reqwest::header::HeaderName::from_static(name),
            reqwest::header::HeaderValue::from_str(value)
                .map_err(|_| ConfigError::InvalidCredential(name.to_string()))?,
        );
    }
    Ok(headers)
}
