use std::fmt;

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SilenceBoardError>;

/// Pipeline step an upstream failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListSilences,
    ResolveTeam,
    ListDiscussions,
    RenderSection,
    CreateDiscussion,
    UpdateDiscussion,
}

impl Operation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListSilences => "list silences",
            Self::ResolveTeam => "resolve team",
            Self::ListDiscussions => "list discussions",
            Self::RenderSection => "render section",
            Self::CreateDiscussion => "create discussion",
            Self::UpdateDiscussion => "update discussion",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum SilenceBoardError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid silence comment filter: {0}")]
    InvalidFilter(#[from] regex::Error),

    #[error("org not found: {org}")]
    OrgNotFound { org: String },

    #[error("team {team} not found in org {org}, only found teams [{}]", available.join(", "))]
    TeamNotFound {
        org: String,
        team: String,
        available: Vec<String>,
    },

    #[error("{operation} failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} failed with status {status}: {body}")]
    Upstream {
        operation: Operation,
        status: StatusCode,
        body: String,
    },

    #[error("render section failed: {0}")]
    Render(#[from] fmt::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl SilenceBoardError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "INVALID_CONFIG",
            Self::InvalidFilter(_) => "INVALID_FILTER",
            Self::OrgNotFound { .. } => "ORG_NOT_FOUND",
            Self::TeamNotFound { .. } => "TEAM_NOT_FOUND",
            Self::Transport { .. } => "TRANSPORT_ERROR",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::Render(_) => "RENDER_ERROR",
            Self::Http(_) => "HTTP_ERROR",
        }
    }

    /// Step that failed, when the error came from a pipeline call.
    pub const fn operation(&self) -> Option<Operation> {
        match self {
            Self::Transport { operation, .. } | Self::Upstream { operation, .. } => {
                Some(*operation)
            }
            Self::OrgNotFound { .. } | Self::TeamNotFound { .. } => Some(Operation::ResolveTeam),
            Self::Render(_) => Some(Operation::RenderSection),
            Self::Config(_) | Self::InvalidFilter(_) | Self::Http(_) => None,
        }
    }

    pub(crate) fn transport(operation: Operation) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Self::Transport { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_not_found_lists_available_slugs() {
        let err = SilenceBoardError::TeamNotFound {
            org: "acme".to_string(),
            team: "sre".to_string(),
            available: vec!["core".to_string(), "platform".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "team sre not found in org acme, only found teams [core, platform]"
        );
        assert_eq!(err.operation(), Some(Operation::ResolveTeam));
        assert_eq!(err.code(), "TEAM_NOT_FOUND");
    }

    #[test]
    fn upstream_error_names_the_failed_step() {
        let err = SilenceBoardError::Upstream {
            operation: Operation::UpdateDiscussion,
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: "validation failed".to_string(),
        };
        let message = err.to_string();
        assert!(message.starts_with("update discussion failed with status 422"));
        assert!(message.ends_with("validation failed"));
    }

    #[test]
    fn config_errors_carry_no_operation() {
        let err = SilenceBoardError::Config("empty name".to_string());
        assert_eq!(err.operation(), None);
        assert_eq!(err.code(), "INVALID_CONFIG");
    }
}
