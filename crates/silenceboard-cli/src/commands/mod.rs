use anyhow::{Context, Result};
use chrono::Utc;
use silenceboard_core::config::{AlertmanagerConfig, DiscussionScope, GithubConfig};
use silenceboard_core::{SilenceBoard, SyncConfig};

use crate::cli::Cli;

mod support;

#[cfg(test)]
mod tests;

use self::support::{print_body, print_json};

pub(crate) fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli);
    tracing::debug!(?config, "resolved configuration");
    let board = SilenceBoard::new(config).context("failed to initialize silence sync")?;

    let prepared = board
        .prepare(Utc::now())
        .context("failed to prepare silence overview")?;
    if cli.dry_run {
        tracing::info!(discussion = ?prepared.target, "dry run, discussion left unchanged");
        return print_body(&prepared.body);
    }

    let outcome = board
        .publish(prepared)
        .context("failed to publish silence overview")?;
    print_json(&outcome)
}

pub(crate) fn build_config(cli: &Cli) -> SyncConfig {
    SyncConfig {
        alertmanager: AlertmanagerConfig {
            base_url: cli.alertmanager_addr.clone(),
            timeout_ms: cli.timeout_ms,
            insecure_skip_tls_verify: cli.insecure_skip_tls_verify,
        },
        github: GithubConfig {
            api_url: cli.github_api_url.clone(),
            token: cli.github_token.clone().filter(|token| !token.trim().is_empty()),
            timeout_ms: cli.timeout_ms,
            insecure_skip_tls_verify: cli.insecure_skip_tls_verify,
        },
        discussion: DiscussionScope {
            org: cli.github_org.clone(),
            team: cli.github_team.clone(),
            title: cli.github_discussion_title.clone(),
        },
        section_name: cli.github_alertmanager_name.clone(),
        comment_filter: cli.silence_comment_filter.clone(),
    }
}
