//! Tests for command-line parsing into `Config`.

use clap::Parser;
use domain_hosts::config::{BackendKind, Config, LogFormat, LogLevel};
use std::path::PathBuf;

#[test]
fn test_defaults_without_arguments() {
    let config = Config::try_parse_from(["domain_hosts"]).expect("Should parse without args");

    assert_eq!(config.file, None);
    assert_eq!(config.output, PathBuf::from("hosts"));
    assert_eq!(config.worker_count, None);
    assert_eq!(config.timeout_seconds, 3.0);
    assert_eq!(config.fallback_timeout_seconds, 1.0);
    assert_eq!(config.max_fallback_candidates, 10);
    assert!(config.enable_fallback);
    assert!(!config.backup_system_hosts);
    assert!(!config.append_to_system);
    assert_eq!(
        config.backends,
        vec![
            BackendKind::System,
            BackendKind::Google,
            BackendKind::Cloudflare
        ]
    );
    assert!(matches!(config.log_level, LogLevel::Info));
    assert!(matches!(config.log_format, LogFormat::Plain));
}

#[test]
fn test_full_argument_set() {
    let config = Config::try_parse_from([
        "domain_hosts",
        "blocked.txt",
        "-o",
        "out/hosts",
        "--worker-count",
        "25",
        "--timeout-seconds",
        "1.5",
        "--backends",
        "google,cloudflare",
        "--enable-fallback",
        "false",
        "--max-fallback-candidates",
        "4",
        "--fallback-timeout-seconds",
        "0.25",
        "--max-attempts-per-domain",
        "12",
        "--reference-file",
        "known.txt",
        "--backup-system-hosts",
        "--append-to-system",
        "--system-hosts",
        "/tmp/hosts",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ])
    .expect("Should parse full argument set");

    assert_eq!(config.file, Some(PathBuf::from("blocked.txt")));
    assert_eq!(config.output, PathBuf::from("out/hosts"));
    assert_eq!(config.worker_count, Some(25));
    assert_eq!(config.timeout_seconds, 1.5);
    assert_eq!(config.backends, vec![BackendKind::Google, BackendKind::Cloudflare]);
    assert!(!config.enable_fallback);
    assert_eq!(config.max_fallback_candidates, 4);
    assert_eq!(config.fallback_timeout_seconds, 0.25);
    assert_eq!(config.max_attempts_per_domain, Some(12));
    assert_eq!(config.reference_file, Some(PathBuf::from("known.txt")));
    assert!(config.backup_system_hosts);
    assert!(config.append_to_system);
    assert_eq!(config.system_hosts, Some(PathBuf::from("/tmp/hosts")));
    assert!(matches!(config.log_level, LogLevel::Debug));
    assert!(matches!(config.log_format, LogFormat::Json));
    assert!(config.validate().is_ok());
}

#[test]
fn test_unknown_backend_rejected() {
    let result = Config::try_parse_from(["domain_hosts", "--backends", "quad9"]);
    assert!(result.is_err());
}

#[test]
fn test_non_numeric_timeout_rejected() {
    let result = Config::try_parse_from(["domain_hosts", "--timeout-seconds", "soon"]);
    assert!(result.is_err());
}

#[test]
fn test_zero_workers_parse_but_fail_validation() {
    let config = Config::try_parse_from(["domain_hosts", "--worker-count", "0"])
        .expect("clap accepts zero");
    assert!(config.validate().is_err());
}
