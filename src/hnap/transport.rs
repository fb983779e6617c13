use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::redirect::Policy;
use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::config;
use crate::error::TransportError;
use crate::hnap::digest::RequestSignature;

pub const SOAP_ACTION_HEADER: &str = "SOAPAction";
pub const HNAP_AUTH_HEADER: &str = "HNAP_AUTH";

/// One HNAP call, fully prepared.
///
/// The cookies travel with the request rather than living in a shared jar so a
/// request always carries the cookies of the session that signed it.
#[derive(Debug, Clone)]
pub struct HnapRequest {
    pub soap_action: String,
    pub auth: Option<String>,
    pub cookies: Vec<(&'static str, String)>,
    pub body: Value,
}

impl HnapRequest {
    pub fn new(soap_action: impl Into<String>, body: Value) -> Self {
        Self {
            soap_action: soap_action.into(),
            auth: None,
            cookies: Vec::new(),
            body,
        }
    }

    pub fn signed(mut self, signature: &RequestSignature) -> Self {
        self.auth = Some(signature.to_string());
        self
    }

    pub fn cookie(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.cookies.push((name, value.into()));
        self
    }

    /// Value for the `Cookie` header, if any cookies are attached.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    #[cfg(test)]
    pub fn cookie_value(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HnapResponse {
    pub status: u16,
    pub body: String,
}

impl HnapResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends HNAP calls to the modem.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HnapRequest) -> Result<HnapResponse, TransportError>;
}

/// reqwest-backed transport posting to a single HNAP endpoint.
pub struct HttpTransport {
    http_client: HttpClient,
    endpoint: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &config::ModemConfig) -> Result<Self, TransportError> {
        let timeout = config.timeout();
        if config.insecure_skip_verify {
            tracing::warn!(endpoint = %config.url, "TLS certificate verification disabled");
        }

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .danger_accept_invalid_certs(config.insecure_skip_verify)
            .build()
            .map_err(TransportError::Request)?;

        Ok(Self {
            http_client,
            endpoint: config.url.clone(),
            timeout,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HnapRequest) -> Result<HnapResponse, TransportError> {
        let mut builder = self
            .http_client
            .post(&self.endpoint)
            .header(SOAP_ACTION_HEADER, &request.soap_action)
            .header(ACCEPT, "application/json")
            .json(&request.body);
        if let Some(auth) = &request.auth {
            builder = builder.header(HNAP_AUTH_HEADER, auth);
        }
        if let Some(cookie) = request.cookie_header() {
            builder = builder.header(COOKIE, cookie);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(e, self.timeout))?;

        tracing::trace!(soap_action = %request.soap_action, status, "HNAP call completed");
        Ok(HnapResponse { status, body })
    }
}
