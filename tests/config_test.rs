use std::{collections::HashMap, path::PathBuf};

use postkeeper::config::{Args, Config, ConfigError, DEFAULT_POLL_TIMEOUT_S};

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_from_environment() {
    let config = Config::resolve(
        Args::default(),
        env(&[("BOT_TOKEN", "123:abc"), ("CHANNEL_USERNAME", "@BotTesterss, news ")]),
    )
    .unwrap();

    assert_eq!(config.token, "123:abc");
    assert_eq!(config.posts_dir, PathBuf::from("./posts"));
    assert_eq!(config.db_path, PathBuf::from("channels.db"));
    assert_eq!(config.channels, vec!["bottesterss", "news"]);
    assert_eq!(config.poll_timeout_s, DEFAULT_POLL_TIMEOUT_S);
}

#[test]
fn flags_override_environment() {
    let args = Args {
        token: Some("flag-token".into()),
        posts_dir: Some("/tmp/archive".into()),
        db: Some("/tmp/db.sqlite".into()),
        channel: vec!["Chan_One".into()],
        poll_timeout: Some(5),
    };

    let config = Config::resolve(
        args,
        env(&[
            ("BOT_TOKEN", "env-token"),
            ("POSTS_FOLDER", "/env/posts"),
            ("CHANNEL_USERNAME", "other"),
            ("POLL_TIMEOUT", "30"),
        ]),
    )
    .unwrap();

    assert_eq!(config.token, "flag-token");
    assert_eq!(config.posts_dir, PathBuf::from("/tmp/archive"));
    assert_eq!(config.db_path, PathBuf::from("/tmp/db.sqlite"));
    assert_eq!(config.channels, vec!["chan_one"]);
    assert_eq!(config.poll_timeout_s, 5);
}

#[test]
fn telegram_token_fallback() {
    let config = Config::resolve(
        Args::default(),
        env(&[("BOT_TOKEN", " "), ("TELEGRAM_TOKEN", "fallback")]),
    )
    .unwrap();

    assert_eq!(config.token, "fallback");
    assert!(config.channels.is_empty());
}

#[test]
fn missing_token_is_an_error() {
    let err = Config::resolve(Args::default(), env(&[])).unwrap_err();
    assert_eq!(err, ConfigError::MissingToken);
}

#[test]
fn bad_poll_timeout_is_an_error() {
    let err = Config::resolve(
        Args::default(),
        env(&[("BOT_TOKEN", "t"), ("POLL_TIMEOUT", "soon")]),
    )
    .unwrap_err();
    assert_eq!(err, ConfigError::InvalidTimeout("soon".into()));
}
