#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Behavioral tests for configuration loading, translation and toasts

use std::time::Duration;

use super::harness::CannedFetch;
use crate::config::{AppConfig, CONFIG_URL};
use crate::i18n::Translator;
use crate::toast::Toasts;

// ============================================================================
// CONFIGURATION BEHAVIORS
// ============================================================================

#[tokio::test]
async fn given_no_config_file_when_loading_then_defaults_used() {
    let fetch = CannedFetch::default();

    let config = AppConfig::load(&fetch).await;

    assert_eq!(config, AppConfig::default());
    assert_eq!(fetch.requests(), vec![CONFIG_URL]);
}

#[tokio::test]
async fn given_partial_config_file_when_loading_then_missing_keys_defaulted() {
    let fetch = CannedFetch::new(&[(
        CONFIG_URL,
        r#"{"title": "Campus", "courses": ["a", "b"], "router": {"hashBang": true}}"#,
    )]);

    let config = AppConfig::load(&fetch).await;

    assert_eq!(config.title, "Campus");
    assert_eq!(config.courses, vec!["a", "b"]);
    assert!(config.router.hash_bang);
    assert_eq!(config.home, AppConfig::default().home);
}

#[tokio::test]
async fn given_malformed_config_file_when_loading_then_defaults_used() {
    let fetch = CannedFetch::new(&[(CONFIG_URL, "{ not json")]);

    let config = AppConfig::load(&fetch).await;

    assert_eq!(config, AppConfig::default());
}

// ============================================================================
// TRANSLATION BEHAVIORS
// ============================================================================

#[test]
fn given_german_browser_when_no_language_configured_then_course_messages_translated() {
    let translator = Translator::new("", &["de-DE".to_string(), "en".to_string()]);

    assert_eq!(translator.language(), "de");
    assert_eq!(
        translator.translate_with(
            "The course definition could not be loaded. (Technical error: ${error})",
            &[("error", "timeout")]
        ),
        "Die Kursdefinition konnte nicht geladen werden. (Technischer Fehler: timeout)"
    );
}

#[test]
fn given_configured_language_when_browser_differs_then_config_wins() {
    let translator = Translator::new("en", &["de".to_string()]);
    assert_eq!(translator.translate("Page not found"), "Page not found");
}

// ============================================================================
// TOAST BEHAVIORS
// ============================================================================

#[test]
fn given_zero_timeout_when_toasts_shown_then_kept_until_dismissed() {
    let toasts = Toasts::new(Duration::ZERO);

    let first = toasts.error("one");
    let second = toasts.success("two");
    toasts.dismiss(first);

    let remaining = toasts.messages().get();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second);
}
