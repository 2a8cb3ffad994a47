use super::*;
use clap::Parser;

#[test]
fn defaults_match_single_deployment_target() {
    let cli = Cli::try_parse_from(["silenceboard"]).expect("parse");
    assert_eq!(cli.alertmanager_addr, "http://localhost:9093");
    assert_eq!(cli.github_api_url, "https://api.github.com/");
    assert_eq!(cli.github_discussion_title, "Silence Overview");
    assert_eq!(cli.github_alertmanager_name, "default");
    assert_eq!(
        cli.silence_comment_filter,
        "automated silence|silenced our tenants"
    );
    assert_eq!(cli.timeout_ms, 10_000);
    assert!(!cli.dry_run);
    assert!(!cli.insecure_skip_tls_verify);
}

#[test]
fn every_target_flag_is_overridable() {
    let cli = Cli::try_parse_from([
        "silenceboard",
        "--alertmanager-addr",
        "https://am.example.com",
        "--github-api-url",
        "https://ghe.example.com/api/v3/",
        "--github-token",
        "t0ken",
        "--github-org",
        "c445",
        "--github-team",
        "core-platform",
        "--github-discussion-title",
        "Silences",
        "--github-alertmanager-name",
        "c01p005",
        "--silence-comment-filter",
        "automated silence",
        "--timeout-ms",
        "2500",
        "--insecure-skip-tls-verify",
        "--dry-run",
    ])
    .expect("parse");
    assert_eq!(cli.alertmanager_addr, "https://am.example.com");
    assert_eq!(cli.github_token.as_deref(), Some("t0ken"));
    assert_eq!(cli.github_org, "c445");
    assert_eq!(cli.github_team, "core-platform");
    assert_eq!(cli.github_alertmanager_name, "c01p005");
    assert_eq!(cli.silence_comment_filter, "automated silence");
    assert_eq!(cli.timeout_ms, 2500);
    assert!(cli.insecure_skip_tls_verify);
    assert!(cli.dry_run);
}

#[test]
fn zero_timeout_is_rejected() {
    let parsed = Cli::try_parse_from(["silenceboard", "--timeout-ms", "0"]);
    assert!(parsed.is_err(), "zero timeout must be rejected");
}

#[test]
fn positional_arguments_are_rejected() {
    let parsed = Cli::try_parse_from(["silenceboard", "sync"]);
    assert!(parsed.is_err(), "the job takes no subcommands");
}
