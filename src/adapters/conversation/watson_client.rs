//! Watson Conversation Client - Implementation of ConversationService over HTTP.
//!
//! Calls the v1 message API:
//!
//! ```text
//! POST {url}/v1/workspaces/{workspace_id}/message?version={version_date}
//! Authorization: Basic ...
//! {"input": {...}, "context": {...}}
//! ```
//!
//! # Configuration
//!
//! ```ignore
//! let config = WatsonConfig::new("https://gateway.watsonplatform.net/conversation/api")
//!     .with_credentials("user", "pass")
//!     .with_version_date("2017-04-21");
//!
//! let client = WatsonConversationClient::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::domain::{ConversationRequest, ConversationResponse, JsonObject};
use crate::ports::{ConversationError, ConversationService};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configuration for the Watson conversation client.
#[derive(Debug, Clone)]
pub struct WatsonConfig {
    /// Service base URL.
    pub url: String,
    /// Basic-auth user name.
    pub username: Option<String>,
    /// Basic-auth password.
    password: Option<Secret<String>>,
    /// API version date.
    pub version_date: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl WatsonConfig {
    /// Creates a new configuration for the given base URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
            version_date: "2017-04-21".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets basic-auth credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(Secret::new(password.into()));
        self
    }

    /// Sets basic-auth credentials from an already protected password.
    pub fn with_secret_credentials(
        mut self,
        username: impl Into<String>,
        password: Secret<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password);
        self
    }

    /// Sets the API version date.
    pub fn with_version_date(mut self, version_date: impl Into<String>) -> Self {
        self.version_date = version_date.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether requests will be authenticated.
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

/// Conversation service client.
pub struct WatsonConversationClient {
    config: WatsonConfig,
    base_url: Url,
    client: Client,
}

impl WatsonConversationClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: WatsonConfig) -> Result<Self, ConversationError> {
        let base_url = Url::parse(&config.url)
            .map_err(|e| ConversationError::network(format!("Invalid service URL: {}", e)))?;

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConversationError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Builds the message endpoint URL for a workspace.
    fn message_url(&self, workspace_id: &str) -> Result<Url, ConversationError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConversationError::network("Service URL cannot be a base"))?
            .pop_if_empty()
            .extend(["v1", "workspaces", workspace_id, "message"]);
        url.query_pairs_mut()
            .append_pair("version", &self.config.version_date);
        Ok(url)
    }

    /// Sends a request and handles transport failures.
    async fn send_request(&self, request: &ConversationRequest) -> Result<Response, ConversationError> {
        let url = self.message_url(request.workspace_id.as_str())?;
        let body = WatsonMessageRequest {
            input: &request.input,
            context: &request.context,
        };

        let mut builder = self.client.post(url).json(&body);
        if let (Some(username), Some(password)) = (&self.config.username, &self.config.password) {
            builder = builder.basic_auth(username, Some(password.expose_secret()));
        }

        builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ConversationError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                ConversationError::network(format!("Connection failed: {}", e))
            } else {
                ConversationError::network(e.to_string())
            }
        })
    }

    /// Parses the API response, surfacing error documents as they are.
    async fn parse_response(&self, response: Response) -> Result<ConversationResponse, ConversationError> {
        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ConversationError::upstream(
                status.as_u16(),
                error_document(status.as_u16(), &error_body),
            ));
        }

        response
            .json::<ConversationResponse>()
            .await
            .map_err(|e| ConversationError::parse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ConversationService for WatsonConversationClient {
    async fn message(
        &self,
        request: ConversationRequest,
    ) -> Result<ConversationResponse, ConversationError> {
        tracing::debug!(workspace_id = %request.workspace_id, "Sending message to conversation service");

        let response = self.send_request(&request).await?;
        let result = self.parse_response(response).await;

        if let Err(ref err) = result {
            tracing::warn!(status = err.status_code(), "Conversation service call failed: {}", err);
        }
        result
    }
}

/// The upstream error body as JSON, or wrapped when it is not JSON.
fn error_document(status: u16, body: &str) -> Value {
    match serde_json::from_str::<Value>(body) {
        Ok(document) if document.is_object() => document,
        _ => json!({
            "error": if body.is_empty() { "Unknown error" } else { body },
            "code": status,
        }),
    }
}

#[derive(Debug, Serialize)]
struct WatsonMessageRequest<'a> {
    input: &'a JsonObject,
    context: &'a JsonObject,
}
