use clap::Parser;
use silenceboard_core::config::{
    DEFAULT_ALERTMANAGER_ADDR, DEFAULT_COMMENT_FILTER, DEFAULT_DISCUSSION_TITLE,
    DEFAULT_GITHUB_API_URL, DEFAULT_GITHUB_ORG, DEFAULT_GITHUB_TEAM, DEFAULT_SECTION_NAME,
    DEFAULT_TIMEOUT_MS,
};

mod parsers;

#[cfg(test)]
mod tests;

use self::parsers::parse_min_one_u64;

#[derive(Debug, Parser)]
#[command(name = "silenceboard")]
#[command(
    about = "Publish active Alertmanager silences into a GitHub team discussion",
    version
)]
pub struct Cli {
    /// Address of the Alertmanager to read silences from.
    #[arg(long, env = "SILENCEBOARD_ALERTMANAGER_ADDR", default_value = DEFAULT_ALERTMANAGER_ADDR)]
    pub alertmanager_addr: String,

    /// GitHub REST API base URL (GitHub Enterprise: `https://<host>/api/v3/`).
    #[arg(long, env = "SILENCEBOARD_GITHUB_API_URL", default_value = DEFAULT_GITHUB_API_URL)]
    pub github_api_url: String,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[arg(long, env = "SILENCEBOARD_GITHUB_ORG", default_value = DEFAULT_GITHUB_ORG)]
    pub github_org: String,

    /// Team slug that owns the discussion.
    #[arg(long, env = "SILENCEBOARD_GITHUB_TEAM", default_value = DEFAULT_GITHUB_TEAM)]
    pub github_team: String,

    #[arg(long, env = "SILENCEBOARD_DISCUSSION_TITLE", default_value = DEFAULT_DISCUSSION_TITLE)]
    pub github_discussion_title: String,

    /// Section header and marker identity inside the discussion body.
    #[arg(long, env = "SILENCEBOARD_ALERTMANAGER_NAME", default_value = DEFAULT_SECTION_NAME)]
    pub github_alertmanager_name: String,

    /// Silences whose comment matches this regular expression are left out.
    #[arg(
        long,
        env = "SILENCEBOARD_COMMENT_FILTER",
        default_value = DEFAULT_COMMENT_FILTER,
        allow_hyphen_values = true
    )]
    pub silence_comment_filter: String,

    /// Request timeout applied to every outbound call.
    #[arg(
        long,
        env = "SILENCEBOARD_TIMEOUT_MS",
        default_value_t = DEFAULT_TIMEOUT_MS,
        value_parser = parse_min_one_u64
    )]
    pub timeout_ms: u64,

    /// Accept invalid TLS certificates from both upstreams.
    #[arg(long, default_value_t = false)]
    pub insecure_skip_tls_verify: bool,

    /// Print the merged discussion body instead of publishing it.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, default_value_t = false)]
    pub log_json: bool,
}
