// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Twilio-compatible Messages API.
//!
//! Provides [`TwilioClient`] which handles request construction, basic-auth
//! credentials, and error decoding. Send attempts are not retried; a failed
//! attempt is recorded as a FAILED message row by the dispatcher and the
//! pipeline moves on.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use zapcast_config::model::ProviderConfig;
use zapcast_core::types::{AdapterType, HealthStatus, MessageSid, SendRequest};
use zapcast_core::{PluginAdapter, ProviderClient, ZapcastError};

use crate::types::{ApiErrorResponse, MessageCreatedResponse};

/// Base URL for the Twilio REST API.
const API_BASE_URL: &str = "https://api.twilio.com";

/// HTTP client for provider API communication.
#[derive(Debug, Clone)]
pub struct TwilioClient {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    base_url: String,
}

impl TwilioClient {
    /// Creates a new provider client with the given credentials.
    pub fn new(account_sid: String, auth_token: String) -> Result<Self, ZapcastError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ZapcastError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            account_sid,
            auth_token,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Builds a client from the provider section of the config file.
    ///
    /// Both credentials must be present; validation normally catches a
    /// half-configured section before this point.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ZapcastError> {
        let account_sid = config
            .account_sid
            .clone()
            .ok_or_else(|| ZapcastError::Config("provider.account_sid is not set".to_string()))?;
        let auth_token = config
            .auth_token
            .clone()
            .ok_or_else(|| ZapcastError::Config("provider.auth_token is not set".to_string()))?;
        let mut client = Self::new(account_sid, auth_token)?;
        if let Some(base_url) = &config.base_url {
            client.base_url = base_url.clone();
        }
        Ok(client)
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        )
    }
}

#[async_trait]
impl PluginAdapter for TwilioClient {
    fn name(&self) -> &str {
        "twilio"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, ZapcastError> {
        // Credentials are not verified against the API here; a bad token
        // surfaces as a send failure with the provider's own message.
        if self.account_sid.is_empty() || self.auth_token.is_empty() {
            return Ok(HealthStatus::Unhealthy("missing credentials".to_string()));
        }
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ZapcastError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderClient for TwilioClient {
    async fn send(&self, request: &SendRequest) -> Result<MessageSid, ZapcastError> {
        let mut form: Vec<(&str, String)> = vec![
            ("To", request.to.clone()),
            ("From", request.from.clone()),
            ("ContentSid", request.template_id.clone()),
        ];
        if !request.variables.is_empty() {
            let variables =
                serde_json::to_string(&request.variables).map_err(|e| ZapcastError::Provider {
                    message: format!("failed to encode content variables: {e}"),
                    source: Some(Box::new(e)),
                })?;
            form.push(("ContentVariables", variables));
        }

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| ZapcastError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, to = %request.to, "message create response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                match api_err.code {
                    Some(code) => format!("provider returned {status} (code {code}): {}", api_err.message),
                    None => format!("provider returned {status}: {}", api_err.message),
                }
            } else {
                format!("provider returned {status}: {body}")
            };
            return Err(ZapcastError::Provider {
                message,
                source: None,
            });
        }

        let created: MessageCreatedResponse =
            response.json().await.map_err(|e| ZapcastError::Provider {
                message: format!("failed to decode provider response: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(MessageSid(created.sid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> TwilioClient {
        TwilioClient::new("ACtest".into(), "token".into())
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    fn test_request(variables: BTreeMap<String, String>) -> SendRequest {
        SendRequest {
            to: "+5511912345678".to_string(),
            from: "whatsapp:+14155238886".to_string(),
            template_id: "HX0123".to_string(),
            variables,
        }
    }

    #[tokio::test]
    async fn send_success_returns_sid() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/ACtest/Messages.json"))
            .and(body_string_contains("ContentSid=HX0123"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"sid": "SM123", "status": "queued"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let sid = client.send(&test_request(BTreeMap::new())).await.unwrap();
        assert_eq!(sid.0, "SM123");
    }

    #[tokio::test]
    async fn send_includes_content_variables_when_present() {
        let server = MockServer::start().await;

        // Form-encoded JSON: {"1":"Ana"} with braces and quotes percent-escaped.
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/ACtest/Messages.json"))
            .and(body_string_contains("ContentVariables="))
            .and(body_string_contains("%221%22%3A%22Ana%22"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"sid": "SM124"})),
            )
            .mount(&server)
            .await;

        let mut variables = BTreeMap::new();
        variables.insert("1".to_string(), "Ana".to_string());
        let client = test_client(&server.uri());
        let sid = client.send(&test_request(variables)).await.unwrap();
        assert_eq!(sid.0, "SM124");
    }

    #[tokio::test]
    async fn send_omits_content_variables_when_empty() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/ACtest/Messages.json"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"sid": "SM125"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.send(&test_request(BTreeMap::new())).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8(requests[0].body.clone()).unwrap();
        assert!(!body.contains("ContentVariables"));
    }

    #[tokio::test]
    async fn send_surfaces_provider_error_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": 21211,
                "message": "The 'To' number is not valid.",
                "status": 400
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.send(&test_request(BTreeMap::new())).await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("21211"), "error should carry provider code: {text}");
        assert!(text.contains("not valid"), "error should carry provider message: {text}");
    }

    #[tokio::test]
    async fn send_does_not_retry_on_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.send(&test_request(BTreeMap::new())).await.is_err());
    }

    #[tokio::test]
    async fn from_config_requires_both_credentials() {
        let config = ProviderConfig {
            account_sid: Some("ACtest".to_string()),
            auth_token: None,
            base_url: None,
        };
        assert!(TwilioClient::from_config(&config).is_err());
    }
}
