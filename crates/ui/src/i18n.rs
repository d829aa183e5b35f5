//! Translation of UI messages
//!
//! English is the source language: messages are written in English in the
//! code and looked up verbatim in the catalog of the current language.
//! Placeholders use the `${name}` syntax and are filled after translation.

use std::collections::HashMap;

use buzz_router::Observable;
use tracing::{debug, info};

/// Languages with a message catalog, plus the source language.
pub const LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("de", "Deutsch")];

const SOURCE_LANGUAGE: &str = "en";

const ENGLISH: &[(&str, &str)] = &[];

const GERMAN: &[(&str, &str)] = &[
    ("Start page", "Startseite"),
    ("Language", "Sprache"),
    ("Website", "Webseite"),
    ("Page not found", "Seite nicht gefunden"),
    (
        "We are sorry, but the requested page could not be found.",
        "Es tut uns Leid, aber die gesuchte Seite konnte nicht gefunden werden.",
    ),
    ("Internal error", "Interner Fehler"),
    (
        "Please excuse the bad picture.",
        "Wir bitten das schlechte Bild zu entschuldigen.",
    ),
    (
        "Our technicans already work on it.",
        "Unsere Techniker arbeiten bereits daran.",
    ),
    (
        "The course definition could not be loaded. (Technical error: ${error})",
        "Die Kursdefinition konnte nicht geladen werden. (Technischer Fehler: ${error})",
    ),
    ("Error in the course definition.", "Fehler in der Kursdefinition."),
    (
        "Page ${pagePath} is neither defined for language ${language} nor the fallback language.",
        "Die Seite ${pagePath} ist weder für die Sprache ${language} noch für die Standardsprache definiert.",
    ),
    ("Unknown page type: ${pageType}", "Unbekannter Seitentyp: ${pageType}"),
    (
        "No subpage defined for page type ${pageType}.",
        "Keine Unterseite für Seitentyp ${pageType} definiert.",
    ),
    (
        "Page type ${pageType} does not support subpages.",
        "Seitentyp ${pageType} unterstützt keine Unterseiten.",
    ),
    (
        "Definition of sub page ${subpagePath} of page ${pagePath} is missing.",
        "Die Definition der Unterseite ${subpagePath} der Seite ${pagePath} fehlt.",
    ),
    (
        "The page content could not be loaded. (Technical error: ${error})",
        "Der Seiteninhalt konnte nicht geladen werden. (Technischer Fehler: ${error})",
    ),
    ("Previous", "Zurück"),
    ("Next", "Weiter"),
];

fn catalog(language: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match language {
        "de" => Some(GERMAN),
        SOURCE_LANGUAGE => Some(ENGLISH),
        _ => None,
    }
}

/// Primary subtag of a language tag, lowercased: `de-AT` → `de`.
fn primary_subtag(tag: &str) -> String {
    tag.split(['-', '_'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Replace every `${name}` in `template` with its value.
#[must_use]
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("${{{name}}}"), value)
        })
}

/// Message translator with an observable current language.
#[derive(Debug)]
pub struct Translator {
    language: Observable<String>,
    messages: std::cell::RefCell<HashMap<&'static str, &'static str>>,
}

impl Translator {
    /// Pick the first supported language among `preferred` (from the
    /// configuration) or else `browser`, falling back to English.
    #[must_use]
    pub fn new(preferred: &str, browser: &[String]) -> Self {
        let translator = Self {
            language: Observable::new(String::new()),
            messages: std::cell::RefCell::new(HashMap::new()),
        };

        let candidates: Vec<&str> = if preferred.is_empty() {
            browser.iter().map(String::as_str).collect()
        } else {
            vec![preferred]
        };

        let chosen = candidates
            .into_iter()
            .chain(std::iter::once(SOURCE_LANGUAGE))
            .find(|candidate| translator.switch_language(candidate));
        info!(language = ?chosen, "Language selected");
        translator
    }

    /// Switch to `language` if a catalog exists for it. Returns whether the
    /// switch happened. Views pick up the change on their next render.
    pub fn switch_language(&self, language: &str) -> bool {
        let language = primary_subtag(language);
        let Some(entries) = catalog(&language) else {
            debug!(language = %language, "No catalog for language");
            return false;
        };

        *self.messages.borrow_mut() = entries.iter().copied().collect();
        self.language.set(language);
        true
    }

    /// Current language code.
    #[must_use]
    pub fn language(&self) -> String {
        self.language.get()
    }

    #[must_use]
    pub fn language_handle(&self) -> Observable<String> {
        self.language.clone()
    }

    /// Translated `text`, or `text` itself without a catalog entry.
    #[must_use]
    pub fn translate(&self, text: &str) -> String {
        self.messages
            .borrow()
            .get(text)
            .map_or_else(|| text.to_string(), |translated| (*translated).to_string())
    }

    /// Translate `template` and fill its placeholders.
    #[must_use]
    pub fn translate_with(&self, template: &str, values: &[(&str, &str)]) -> String {
        fill(&self.translate(template), values)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn browser(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn given_configured_language_then_browser_ignored() {
        let translator = Translator::new("de", &browser(&["en-US"]));
        assert_eq!(translator.language(), "de");
        assert_eq!(translator.translate("Page not found"), "Seite nicht gefunden");
    }

    #[test]
    fn given_browser_region_tag_then_primary_subtag_used() {
        let translator = Translator::new("", &browser(&["fr-FR", "de-AT", "en"]));
        assert_eq!(translator.language(), "de");
    }

    #[test]
    fn given_unsupported_languages_then_english() {
        let translator = Translator::new("", &browser(&["fr", "it"]));
        assert_eq!(translator.language(), "en");
        assert_eq!(translator.translate("Page not found"), "Page not found");
    }

    #[test]
    fn given_unknown_message_then_source_text_returned() {
        let translator = Translator::new("de", &[]);
        assert_eq!(translator.translate("Not in catalog"), "Not in catalog");
    }

    #[test]
    fn given_placeholders_then_filled_after_translation() {
        let translator = Translator::new("de", &[]);
        assert_eq!(
            translator.translate_with("Unknown page type: ${pageType}", &[("pageType", "slides")]),
            "Unbekannter Seitentyp: slides"
        );
    }

    #[test]
    fn given_unsupported_switch_then_language_kept() {
        let translator = Translator::new("de", &[]);
        assert!(!translator.switch_language("fr"));
        assert_eq!(translator.language(), "de");
        assert!(translator.switch_language("EN"));
        assert_eq!(translator.translate("Page not found"), "Page not found");
    }

    #[test]
    fn test_fill_replaces_every_occurrence() {
        assert_eq!(fill("${a} and ${a}, ${b}", &[("a", "x"), ("b", "y")]), "x and x, y");
        assert_eq!(fill("no placeholders", &[("a", "x")]), "no placeholders");
    }
}
