//! Conversation service configuration
//!
//! Besides the `COUNTRY_CHAT__CONVERSATION__*` variables, the settings honour the
//! variables used by existing deployments of the chat UI:
//!
//! - `WORKSPACE_ID` when no workspace is configured
//! - `CONVERSATION_USERNAME` / `CONVERSATION_PASSWORD` / `CONVERSATION_URL`
//! - the `conversation` binding in `VCAP_SERVICES` (Cloud Foundry)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::TIMEOUT_RANGE;
use crate::domain::{WorkspaceError, WorkspaceId};

/// Conversation service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationConfig {
    /// Workspace the dialog runs in
    pub workspace_id: Option<String>,

    /// Service base URL
    pub url: Option<String>,

    /// Basic-auth user name
    pub username: Option<String>,

    /// Basic-auth password
    pub password: Option<Secret<String>>,

    /// API version date sent with every request
    #[serde(default = "default_version_date")]
    pub version_date: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Where and as whom to call the conversation service.
#[derive(Debug, Clone)]
pub struct ConversationEndpoint {
    pub url: String,
    pub credentials: Option<ServiceCredentials>,
}

/// Basic-auth credentials for the conversation service.
#[derive(Debug, Clone)]
pub struct ServiceCredentials {
    pub username: String,
    pub password: Secret<String>,
}

impl ServiceCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Secret::new(password.into()),
        }
    }
}

#[derive(Deserialize)]
struct VcapServices {
    #[serde(default)]
    conversation: Vec<VcapBinding>,
}

#[derive(Deserialize)]
struct VcapBinding {
    credentials: VcapCredentials,
}

#[derive(Deserialize)]
struct VcapCredentials {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

impl ConversationConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the workspace from configuration, then `WORKSPACE_ID`.
    pub fn workspace(&self) -> Result<WorkspaceId, WorkspaceError> {
        self.workspace_from(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::workspace`] with an explicit variable source.
    pub fn workspace_from(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<WorkspaceId, WorkspaceError> {
        let raw = non_empty(self.workspace_id.clone()).or_else(|| env("WORKSPACE_ID"));
        WorkspaceId::parse(raw.as_deref())
    }

    /// Resolve URL and credentials from configuration, then the legacy
    /// variables, then the `VCAP_SERVICES` binding.
    pub fn endpoint(&self) -> Result<ConversationEndpoint, ValidationError> {
        self.endpoint_from(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::endpoint`] with an explicit variable source.
    pub fn endpoint_from(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ConversationEndpoint, ValidationError> {
        let binding = match non_empty(env("VCAP_SERVICES")) {
            Some(raw) => parse_vcap(&raw)?,
            None => None,
        };

        let url = non_empty(self.url.clone())
            .or_else(|| non_empty(env("CONVERSATION_URL")))
            .or_else(|| binding.as_ref().and_then(|b| non_empty(b.url.clone())))
            .unwrap_or_else(default_url);

        let from_config = match (non_empty(self.username.clone()), &self.password) {
            (Some(username), Some(password)) if !password.expose_secret().is_empty() => {
                Some(ServiceCredentials {
                    username,
                    password: password.clone(),
                })
            }
            _ => None,
        };

        let credentials = from_config
            .or_else(|| {
                match (
                    non_empty(env("CONVERSATION_USERNAME")),
                    non_empty(env("CONVERSATION_PASSWORD")),
                ) {
                    (Some(username), Some(password)) => {
                        Some(ServiceCredentials::new(username, password))
                    }
                    _ => None,
                }
            })
            .or_else(|| {
                let binding = binding.as_ref()?;
                match (
                    non_empty(binding.username.clone()),
                    non_empty(binding.password.clone()),
                ) {
                    (Some(username), Some(password)) => {
                        Some(ServiceCredentials::new(username, password))
                    }
                    _ => None,
                }
            });

        Ok(ConversationEndpoint { url, credentials })
    }

    /// Validate conversation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = non_empty(self.url.clone()) {
            if !is_http_url(&url) {
                return Err(ValidationError::InvalidConversationUrl);
            }
        }
        if !TIMEOUT_RANGE.contains(&self.timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            workspace_id: None,
            url: None,
            username: None,
            password: None,
            version_date: default_version_date(),
            timeout_secs: default_timeout(),
        }
    }
}

fn parse_vcap(raw: &str) -> Result<Option<VcapCredentials>, ValidationError> {
    let services: VcapServices = serde_json::from_str(raw)
        .map_err(|e| ValidationError::InvalidServiceBinding(e.to_string()))?;
    Ok(services
        .conversation
        .into_iter()
        .next()
        .map(|binding| binding.credentials))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(super) fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_url() -> String {
    "https://gateway.watsonplatform.net/conversation/api".to_string()
}

fn default_version_date() -> String {
    "2017-04-21".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_conversation_config_defaults() {
        let config = ConversationConfig::default();
        assert_eq!(config.version_date, "2017-04-21");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_workspace_prefers_configured_value() {
        let config = ConversationConfig {
            workspace_id: Some("from-config".to_string()),
            ..Default::default()
        };
        let workspace = config
            .workspace_from(env_of(&[("WORKSPACE_ID", "from-env")]))
            .unwrap();
        assert_eq!(workspace.as_str(), "from-config");
    }

    #[test]
    fn test_workspace_falls_back_to_legacy_variable() {
        let config = ConversationConfig::default();
        let workspace = config
            .workspace_from(env_of(&[("WORKSPACE_ID", "from-env")]))
            .unwrap();
        assert_eq!(workspace.as_str(), "from-env");
    }

    #[test]
    fn test_workspace_missing_or_placeholder() {
        let config = ConversationConfig::default();
        assert_eq!(
            config.workspace_from(env_of(&[])),
            Err(WorkspaceError::Missing)
        );
        assert_eq!(
            config.workspace_from(env_of(&[("WORKSPACE_ID", "<workspace-id>")])),
            Err(WorkspaceError::Placeholder)
        );
    }

    #[test]
    fn test_endpoint_defaults_without_credentials() {
        let endpoint = ConversationConfig::default()
            .endpoint_from(env_of(&[]))
            .unwrap();
        assert_eq!(
            endpoint.url,
            "https://gateway.watsonplatform.net/conversation/api"
        );
        assert!(endpoint.credentials.is_none());
    }

    #[test]
    fn test_endpoint_prefers_configured_credentials() {
        let config = ConversationConfig {
            url: Some("https://conversation.example.com/api".to_string()),
            username: Some("config-user".to_string()),
            password: Some(Secret::new("config-pass".to_string())),
            ..Default::default()
        };
        let endpoint = config
            .endpoint_from(env_of(&[
                ("CONVERSATION_USERNAME", "env-user"),
                ("CONVERSATION_PASSWORD", "env-pass"),
            ]))
            .unwrap();

        let credentials = endpoint.credentials.unwrap();
        assert_eq!(endpoint.url, "https://conversation.example.com/api");
        assert_eq!(credentials.username, "config-user");
        assert_eq!(credentials.password.expose_secret(), "config-pass");
    }

    #[test]
    fn test_endpoint_falls_back_to_legacy_variables() {
        let endpoint = ConversationConfig::default()
            .endpoint_from(env_of(&[
                ("CONVERSATION_USERNAME", "env-user"),
                ("CONVERSATION_PASSWORD", "env-pass"),
                ("CONVERSATION_URL", "https://env.example.com/api"),
            ]))
            .unwrap();

        assert_eq!(endpoint.url, "https://env.example.com/api");
        assert_eq!(endpoint.credentials.unwrap().username, "env-user");
    }

    #[test]
    fn test_endpoint_falls_back_to_service_binding() {
        let vcap = r#"{
            "conversation": [{
                "name": "conversation-service",
                "credentials": {
                    "url": "https://bound.example.com/conversation/api",
                    "username": "bound-user",
                    "password": "bound-pass"
                }
            }]
        }"#;
        let endpoint = ConversationConfig::default()
            .endpoint_from(env_of(&[("VCAP_SERVICES", vcap)]))
            .unwrap();

        let credentials = endpoint.credentials.unwrap();
        assert_eq!(endpoint.url, "https://bound.example.com/conversation/api");
        assert_eq!(credentials.username, "bound-user");
        assert_eq!(credentials.password.expose_secret(), "bound-pass");
    }

    #[test]
    fn test_endpoint_rejects_malformed_service_binding() {
        let result = ConversationConfig::default()
            .endpoint_from(env_of(&[("VCAP_SERVICES", "{not json")]));
        assert!(matches!(
            result,
            Err(ValidationError::InvalidServiceBinding(_))
        ));
    }

    #[test]
    fn test_password_is_redacted_in_debug_output() {
        let credentials = ServiceCredentials::new("user", "hunter2");
        assert!(!format!("{:?}", credentials).contains("hunter2"));
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = ConversationConfig {
            url: Some("ftp://conversation.example.com".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let config = ConversationConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
