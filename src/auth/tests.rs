//! Tests for the auth module

use super::*;
use crate::error::Error;

#[test]
fn test_token_is_trimmed() {
    let token = ApiToken::new("  pat-na1-abc \n").unwrap();
    assert_eq!(token.as_str(), "pat-na1-abc");
}

#[test]
fn test_blank_token_rejected() {
    assert!(matches!(ApiToken::new("   "), Err(Error::MissingToken)));
    assert!(matches!(ApiToken::new(""), Err(Error::MissingToken)));
}

#[test]
fn test_token_debug_is_redacted() {
    let token = ApiToken::new("secret-value").unwrap();
    let debug = format!("{token:?}");
    assert!(!debug.contains("secret-value"));
    assert!(debug.contains("redacted"));
}

#[test]
fn test_apply_sets_headers() {
    let token = ApiToken::new(" my-token ").unwrap();
    let client = reqwest::Client::new();
    let req = token.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer my-token"
    );
    assert_eq!(
        built.headers().get("Content-Type").unwrap(),
        "application/json"
    );
}

#[test]
fn test_resolver_prefers_flag() {
    let (token, source) = TokenResolver::new(Some("flag".into()), Some("env".into()))
        .resolve(|| panic!("prompt should not be called"))
        .unwrap();
    assert_eq!(token.as_str(), "flag");
    assert_eq!(source, TokenSource::Flag);
}

#[test]
fn test_resolver_falls_back_to_env() {
    let (token, source) = TokenResolver::new(Some("  ".into()), Some("env-key".into()))
        .resolve(|| panic!("prompt should not be called"))
        .unwrap();
    assert_eq!(token.as_str(), "env-key");
    assert_eq!(source, TokenSource::Environment);
}

#[test]
fn test_resolver_prompts_last() {
    let (token, source) = TokenResolver::new(None, None)
        .resolve(|| Ok("typed-key\n".to_string()))
        .unwrap();
    assert_eq!(token.as_str(), "typed-key");
    assert_eq!(source, TokenSource::Prompt);
}

#[test]
fn test_resolver_non_interactive_without_token() {
    let result = TokenResolver::new(None, Some(String::new()))
        .interactive(false)
        .resolve(|| Ok("never".to_string()));
    assert!(matches!(result, Err(Error::MissingToken)));
}

#[test]
fn test_resolver_empty_prompt_answer() {
    let result = TokenResolver::new(None, None).resolve(|| Ok("\n".to_string()));
    assert!(matches!(result, Err(Error::MissingToken)));
}
