use clap::Parser;

use super::*;

#[test]
fn build_config_applies_timeout_and_tls_flag_to_both_clients() {
    let cli = Cli::try_parse_from([
        "silenceboard",
        "--timeout-ms",
        "1500",
        "--insecure-skip-tls-verify",
    ])
    .expect("parse");
    let config = build_config(&cli);
    assert_eq!(config.alertmanager.timeout_ms, 1500);
    assert_eq!(config.github.timeout_ms, 1500);
    assert!(config.alertmanager.insecure_skip_tls_verify);
    assert!(config.github.insecure_skip_tls_verify);
}

#[test]
fn build_config_maps_name_to_section_identity() {
    let cli = Cli::try_parse_from([
        "silenceboard",
        "--github-alertmanager-name",
        "c01p005",
        "--github-team",
        "core-platform",
    ])
    .expect("parse");
    let config = build_config(&cli);
    assert_eq!(config.section_name, "c01p005");
    assert_eq!(config.discussion.team, "core-platform");
    config.validate().expect("valid config");
}

#[test]
fn build_config_treats_blank_token_as_absent() {
    let cli = Cli::try_parse_from(["silenceboard", "--github-token", "  "]).expect("parse");
    assert_eq!(build_config(&cli).github.token, None);
}

#[test]
fn run_rejects_invalid_filter_before_network_io() {
    let cli = Cli::try_parse_from([
        "silenceboard",
        "--alertmanager-addr",
        "http://127.0.0.1:9",
        "--silence-comment-filter",
        "(unclosed",
    ])
    .expect("parse");
    let err = run(&cli).expect_err("invalid filter");
    assert!(format!("{err:#}").contains("invalid silence comment filter"));
}
