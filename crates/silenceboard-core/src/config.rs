use reqwest::Url;

use crate::error::{Result, SilenceBoardError};
use crate::silences::CommentFilter;

pub const DEFAULT_ALERTMANAGER_ADDR: &str = "http://localhost:9093";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com/";
pub const DEFAULT_GITHUB_ORG: &str = "org";
pub const DEFAULT_GITHUB_TEAM: &str = "team";
pub const DEFAULT_DISCUSSION_TITLE: &str = "Silence Overview";
pub const DEFAULT_SECTION_NAME: &str = "default";
pub const DEFAULT_COMMENT_FILTER: &str = "automated silence|silenced our tenants";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertmanagerConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub insecure_skip_tls_verify: bool,
}

impl Default for AlertmanagerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ALERTMANAGER_ADDR.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            insecure_skip_tls_verify: false,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct GithubConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout_ms: u64,
    pub insecure_skip_tls_verify: bool,
}

impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_ms", &self.timeout_ms)
            .field("insecure_skip_tls_verify", &self.insecure_skip_tls_verify)
            .finish()
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
            token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            insecure_skip_tls_verify: false,
        }
    }
}

/// Org, team slug and title that identify the target discussion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionScope {
    pub org: String,
    pub team: String,
    pub title: String,
}

impl Default for DiscussionScope {
    fn default() -> Self {
        Self {
            org: DEFAULT_GITHUB_ORG.to_string(),
            team: DEFAULT_GITHUB_TEAM.to_string(),
            title: DEFAULT_DISCUSSION_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub alertmanager: AlertmanagerConfig,
    pub github: GithubConfig,
    pub discussion: DiscussionScope,
    /// Section header and marker identity.
    pub section_name: String,
    pub comment_filter: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            alertmanager: AlertmanagerConfig::default(),
            github: GithubConfig::default(),
            discussion: DiscussionScope::default(),
            section_name: DEFAULT_SECTION_NAME.to_string(),
            comment_filter: DEFAULT_COMMENT_FILTER.to_string(),
        }
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<()> {
        parse_http_endpoint(&self.alertmanager.base_url, "alertmanager address")
            .map_err(SilenceBoardError::Config)?;
        parse_http_endpoint(&self.github.api_url, "github api url")
            .map_err(SilenceBoardError::Config)?;
        if self.alertmanager.timeout_ms == 0 || self.github.timeout_ms == 0 {
            return Err(SilenceBoardError::Config(
                "request timeout must be >= 1 ms".to_string(),
            ));
        }
        for (label, value) in [
            ("github org", &self.discussion.org),
            ("github team", &self.discussion.team),
            ("discussion title", &self.discussion.title),
        ] {
            if value.trim().is_empty() {
                return Err(SilenceBoardError::Config(format!("{label} must not be empty")));
            }
        }
        validate_section_name(&self.section_name).map_err(SilenceBoardError::Config)?;
        CommentFilter::new(&self.comment_filter)?;
        Ok(())
    }
}

pub fn parse_http_endpoint(raw: &str, label: &str) -> std::result::Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|err| format!("invalid {label}: {err}"))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported {label} scheme: {other}")),
    }
    if url.host_str().is_none() {
        return Err(format!("{label} host is missing"));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(format!("{label} must not include credentials"));
    }
    Ok(url)
}

pub fn validate_section_name(name: &str) -> std::result::Result<(), String> {
    if name.trim().is_empty() {
        return Err("alertmanager name must not be empty".to_string());
    }
    if name.contains(['\r', '\n']) {
        return Err("alertmanager name must be a single line".to_string());
    }
    if name.contains("-->") {
        return Err(format!(
            "alertmanager name must not contain '-->', got: {name}"
        ));
    }
    Ok(())
}

pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
