use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_apply_without_args_or_env() {
    let config = resolve_startup_config(Args::default(), env_from(&[]));
    assert_eq!(config, StartupConfig::default());
    assert_eq!(config.server_url, "http://127.0.0.1:8080");
    assert_eq!(config.request_timeout, Duration::from_secs(10));
}

#[test]
fn dedicated_env_var_beats_prefixed_one() {
    let config = resolve_startup_config(
        Args::default(),
        env_from(&[
            ("APP__SERVER_URL", "http://prefixed:1"),
            ("FULFILLMENT_SERVER_URL", "http://dedicated:2"),
        ]),
    );
    assert_eq!(config.server_url, "http://dedicated:2");
}

#[test]
fn args_beat_env() {
    let args = Args {
        server_url: Some("http://cli:3/".to_string()),
        request_timeout_secs: Some(2),
        log_filter: Some("debug".to_string()),
    };
    let config = resolve_startup_config(
        args,
        env_from(&[
            ("FULFILLMENT_SERVER_URL", "http://env:4"),
            ("APP__REQUEST_TIMEOUT_SECS", "30"),
        ]),
    );
    assert_eq!(config.server_url, "http://cli:3");
    assert_eq!(config.request_timeout, Duration::from_secs(2));
    assert_eq!(config.log_filter, "debug");
}

#[test]
fn unparsable_timeout_keeps_default() {
    let config = resolve_startup_config(
        Args::default(),
        env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]),
    );
    assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
}

#[test]
fn zero_timeout_keeps_default() {
    let from_env = resolve_startup_config(
        Args::default(),
        env_from(&[("APP__REQUEST_TIMEOUT_SECS", "0")]),
    );
    assert_eq!(from_env.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

    let args = Args {
        request_timeout_secs: Some(0),
        ..Args::default()
    };
    let from_args = resolve_startup_config(args, env_from(&[("APP__REQUEST_TIMEOUT_SECS", "7")]));
    assert_eq!(from_args.request_timeout, Duration::from_secs(7));
}

#[test]
fn blank_server_url_falls_back_to_default() {
    let config = resolve_startup_config(
        Args::default(),
        env_from(&[("FULFILLMENT_SERVER_URL", "   ")]),
    );
    assert_eq!(config.server_url, DEFAULT_SERVER_URL);
}

#[test]
fn parses_command_line_flags() {
    let args = Args::try_parse_from([
        "desktop_gui",
        "--server-url",
        "https://fulfil.example",
        "--request-timeout-secs",
        "5",
    ])
    .expect("valid flags");
    assert_eq!(args.server_url.as_deref(), Some("https://fulfil.example"));
    assert_eq!(args.request_timeout_secs, Some(5));
    assert_eq!(args.log_filter, None);
}
