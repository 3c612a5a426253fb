//! Workspace identifier - selects which trained conversation model answers.

use std::fmt;

use thiserror::Error;

/// Placeholder shipped in sample configuration; never a real workspace.
pub const WORKSPACE_PLACEHOLDER: &str = "<workspace-id>";

/// Text returned to the caller when no usable workspace is configured.
pub const WORKSPACE_NOT_CONFIGURED: &str = "The app has not been configured with a <b>WORKSPACE_ID</b> environment variable. \
Please refer to the <a href=\"https://github.com/watson-developer-cloud/conversation-simple\">README</a> \
documentation on how to set this variable. <br>\
Once a workspace has been defined the intents may be imported from \
<a href=\"https://github.com/watson-developer-cloud/conversation-simple/blob/master/training/car_workspace.json\">here</a> \
in order to get a working application.";

/// Why a workspace identifier was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("workspace id is not configured")]
    Missing,

    #[error("workspace id is still the placeholder value")]
    Placeholder,
}

/// A validated, non-placeholder workspace identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkspaceId(String);

impl WorkspaceId {
    /// Validates a raw configured value.
    ///
    /// Surrounding whitespace is ignored; an empty value counts as missing.
    pub fn parse(raw: Option<&str>) -> Result<Self, WorkspaceError> {
        let value = raw.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Err(WorkspaceError::Missing);
        }
        if value == WORKSPACE_PLACEHOLDER {
            return Err(WorkspaceError::Placeholder);
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_real_identifier() {
        let id = WorkspaceId::parse(Some("9f2c1e4a-workspace")).unwrap();
        assert_eq!(id.as_str(), "9f2c1e4a-workspace");
    }

    #[test]
    fn parse_trims_whitespace() {
        let id = WorkspaceId::parse(Some("  abc  ")).unwrap();
        assert_eq!(id.to_string(), "abc");
    }

    #[test]
    fn parse_rejects_missing_and_empty() {
        assert_eq!(WorkspaceId::parse(None), Err(WorkspaceError::Missing));
        assert_eq!(WorkspaceId::parse(Some("")), Err(WorkspaceError::Missing));
        assert_eq!(WorkspaceId::parse(Some("   ")), Err(WorkspaceError::Missing));
    }

    #[test]
    fn parse_rejects_placeholder() {
        assert_eq!(
            WorkspaceId::parse(Some(WORKSPACE_PLACEHOLDER)),
            Err(WorkspaceError::Placeholder)
        );
    }

    #[test]
    fn not_configured_message_names_the_variable() {
        assert!(WORKSPACE_NOT_CONFIGURED.contains("WORKSPACE_ID"));
    }
}
