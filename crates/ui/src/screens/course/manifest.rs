//! Course manifest (`course.json`)
//!
//! A manifest maps language codes to a display name and a page tree:
//!
//! ```json
//! {
//!     "language": {
//!         "": { "name": "Example", "pages": { "": "index.html", "intro": { "file": "intro.html", "name": "Intro" } } },
//!         "de": { "name": "Beispiel" }
//!     }
//! }
//! ```
//!
//! Pages may be written as a bare file name or as an object with `file`,
//! `name`, `type` and nested `pages`. Parsing irons these variants out:
//! every page ends up with all four fields and every page key is relative
//! with a trailing slash (the empty key stays empty). The `""` language is
//! the fallback for every lookup.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::{Result, UiError};
use crate::i18n::Translator;

/// Page type given when a page has none.
pub const DEFAULT_PAGE_TYPE: &str = "single";

/// The fallback language section.
pub const FALLBACK_LANGUAGE: &str = "";

// ============================================================================
// Page tree
// ============================================================================

/// A cleaned page entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub file: String,
    pub name: String,
    pub page_type: String,
    /// Sub-pages keyed by normalised path, in manifest order.
    pub pages: Vec<(String, Page)>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            file: String::new(),
            name: String::new(),
            page_type: DEFAULT_PAGE_TYPE.to_string(),
            pages: Vec::new(),
        }
    }
}

impl Page {
    #[must_use]
    pub fn file(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Whether the page has sub-pages of its own.
    #[must_use]
    pub fn is_container(&self) -> bool {
        !self.pages.is_empty()
    }

    #[must_use]
    pub fn subpage(&self, key: &str) -> Option<&Page> {
        lookup(&self.pages, key)
    }
}

/// Pages and display name of one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSection {
    pub name: Option<String>,
    pub pages: Vec<(String, Page)>,
}

impl LanguageSection {
    #[must_use]
    pub fn page(&self, key: &str) -> Option<&Page> {
        lookup(&self.pages, key)
    }
}

fn lookup<'a>(pages: &'a [(String, Page)], key: &str) -> Option<&'a Page> {
    pages.iter().find(|(k, _)| k == key).map(|(_, page)| page)
}

/// Insert or replace in place, so a later duplicate key keeps the position
/// of the first.
fn upsert(pages: &mut Vec<(String, Page)>, key: String, page: Page) {
    match pages.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = page,
        None => pages.push((key, page)),
    }
}

/// Strip one leading slash and ensure a trailing slash unless empty.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    let key = key.strip_prefix('/').unwrap_or(key);
    if key.is_empty() || key.ends_with('/') {
        key.to_string()
    } else {
        format!("{key}/")
    }
}

// ============================================================================
// Manifest
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Language sections in manifest order.
    pub languages: Vec<(String, LanguageSection)>,
}

impl Manifest {
    /// Parse and clean a `course.json` document.
    ///
    /// # Errors
    /// Returns `UiError::Manifest` if the document is not JSON or a page
    /// entry is neither a string nor an object.
    pub fn parse(course_id: &str, json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| UiError::manifest(course_id, e.to_string()))?;
        Self::from_value(course_id, &value)
    }

    /// # Errors
    /// See [`Manifest::parse`].
    pub fn from_value(course_id: &str, value: &Value) -> Result<Self> {
        let root = value
            .as_object()
            .ok_or_else(|| UiError::manifest(course_id, "document is not an object"))?;

        let mut languages = Vec::new();
        let Some(sections) = root.get("language").and_then(Value::as_object) else {
            return Ok(Self { languages });
        };

        for (language, section) in sections {
            let name = section.get("name").and_then(Value::as_str).map(str::to_string);
            let pages = match section.get("pages").and_then(Value::as_object) {
                Some(pages) => clean_pages(course_id, pages)?,
                None => Vec::new(),
            };
            languages.push((language.clone(), LanguageSection { name, pages }));
        }

        Ok(Self { languages })
    }

    #[must_use]
    pub fn section(&self, language: &str) -> Option<&LanguageSection> {
        self.languages
            .iter()
            .find(|(code, _)| code == language)
            .map(|(_, section)| section)
    }

    /// Page definition for `language`, else for the fallback language.
    #[must_use]
    pub fn page(&self, language: &str, key: &str) -> Option<&Page> {
        self.section(language)
            .and_then(|section| section.page(key))
            .or_else(|| self.section(FALLBACK_LANGUAGE)?.page(key))
    }

    /// Display name for `language`, else for the fallback language.
    #[must_use]
    pub fn course_name(&self, language: &str) -> Option<&str> {
        self.section(language)
            .and_then(|section| section.name.as_deref())
            .or_else(|| self.section(FALLBACK_LANGUAGE)?.name.as_deref())
    }

    /// Every addressable `(page, sub-page)` pair, across all languages.
    ///
    /// A leaf page yields `(page, "")`; a container yields one pair per
    /// sub-page. A page key is only expanded for the first language that
    /// defines it.
    #[must_use]
    pub fn route_targets(&self) -> Vec<(String, String)> {
        let mut seen: Vec<&str> = Vec::new();
        let mut targets = Vec::new();

        for (_, section) in &self.languages {
            for (key, page) in &section.pages {
                if seen.contains(&key.as_str()) {
                    continue;
                }
                seen.push(key);

                if page.is_container() {
                    targets.extend(
                        page.pages
                            .iter()
                            .map(|(sub, _)| (key.clone(), sub.clone())),
                    );
                } else {
                    targets.push((key.clone(), String::new()));
                }
            }
        }

        targets
    }
}

fn clean_pages(course_id: &str, raw: &Map<String, Value>) -> Result<Vec<(String, Page)>> {
    let mut pages = Vec::with_capacity(raw.len());
    for (key, value) in raw {
        let page = clean_page(course_id, key, value)?;
        upsert(&mut pages, normalize_key(key), page);
    }
    Ok(pages)
}

fn clean_page(course_id: &str, key: &str, value: &Value) -> Result<Page> {
    let entry = match value {
        Value::String(file) => return Ok(Page::file(file.clone())),
        Value::Object(entry) => entry,
        _ => {
            return Err(UiError::manifest(
                course_id,
                format!("page '{key}' must be a file name or an object"),
            ))
        }
    };

    let text = |field: &str| {
        entry
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let page_type = match text("type") {
        t if t.is_empty() => DEFAULT_PAGE_TYPE.to_string(),
        t => t,
    };

    let pages = match entry.get("pages").and_then(Value::as_object) {
        Some(pages) => clean_pages(course_id, pages)?,
        None => Vec::new(),
    };

    Ok(Page {
        file: text("file"),
        name: text("name"),
        page_type,
        pages,
    })
}

// ============================================================================
// Course
// ============================================================================

/// Rendering variant of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageType {
    /// One HTML fragment, no sub-pages.
    Single,
    /// Sub-pages shown as tabs.
    Tabs,
}

impl PageType {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "single" => Some(Self::Single),
            "tabs" => Some(Self::Tabs),
            _ => None,
        }
    }

    #[must_use]
    pub const fn has_subpages(self) -> bool {
        matches!(self, Self::Tabs)
    }
}

/// Inconsistency between a route and the manifest it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("page '{page}' is defined neither for language '{language}' nor the fallback language")]
    MissingPage { page: String, language: String },

    #[error("definition of sub page '{subpage}' of page '{page}' is missing")]
    MissingSubpage { page: String, subpage: String },

    #[error("unknown page type '{0}'")]
    UnknownType(String),

    #[error("page type '{0}' requires a sub page")]
    SubpageRequired(String),

    #[error("page type '{0}' does not support sub pages")]
    SubpagesUnsupported(String),
}

impl DefinitionError {
    /// Translated message for the user.
    #[must_use]
    pub fn message(&self, translator: &Translator) -> String {
        match self {
            Self::MissingPage { page, language } => translator.translate_with(
                "Page ${pagePath} is neither defined for language ${language} nor the fallback language.",
                &[("pagePath", page.as_str()), ("language", language.as_str())],
            ),
            Self::MissingSubpage { page, subpage } => translator.translate_with(
                "Definition of sub page ${subpagePath} of page ${pagePath} is missing.",
                &[("pagePath", page.as_str()), ("subpagePath", subpage.as_str())],
            ),
            Self::UnknownType(page_type) => translator.translate_with(
                "Unknown page type: ${pageType}",
                &[("pageType", page_type.as_str())],
            ),
            Self::SubpageRequired(page_type) => translator.translate_with(
                "No subpage defined for page type ${pageType}.",
                &[("pageType", page_type.as_str())],
            ),
            Self::SubpagesUnsupported(page_type) => translator.translate_with(
                "Page type ${pageType} does not support subpages.",
                &[("pageType", page_type.as_str())],
            ),
        }
    }
}

/// What a course route shows, resolved for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTarget {
    pub page_type: PageType,
    pub page: Page,
    pub subpage: Option<Page>,
    pub title: String,
}

impl PageTarget {
    /// Fragment rendered in the content area.
    #[must_use]
    pub fn content_file(&self) -> &str {
        self.subpage.as_ref().map_or(&self.page.file, |sub| &sub.file)
    }
}

/// A loaded course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub manifest: Manifest,
    /// Directory of the course artifacts, with trailing slash.
    pub content_url: String,
    /// In-app URL prefix of every course page.
    pub course_url: String,
}

impl Course {
    pub fn new(id: impl Into<String>, manifest: Manifest, content_url: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            course_url: Self::url(&id),
            id,
            manifest,
            content_url: content_url.into(),
        }
    }

    #[must_use]
    pub fn url(id: &str) -> String {
        format!("/course/{id}/")
    }

    /// Route id shared by every route of the course.
    #[must_use]
    pub fn route_id(id: &str) -> String {
        format!("course {id}")
    }

    /// Display name, falling back to the course id.
    #[must_use]
    pub fn name(&self, language: &str) -> String {
        self.manifest
            .course_name(language)
            .unwrap_or(&self.id)
            .to_string()
    }

    /// Resolve and validate a page for `language`.
    ///
    /// # Errors
    /// Returns a [`DefinitionError`] if the page or sub-page is missing or
    /// the page type does not fit.
    pub fn target(
        &self,
        language: &str,
        page_key: &str,
        subpage_key: &str,
    ) -> std::result::Result<PageTarget, DefinitionError> {
        let page = self
            .manifest
            .page(language, page_key)
            .ok_or_else(|| DefinitionError::MissingPage {
                page: page_key.to_string(),
                language: language.to_string(),
            })?;

        let subpage = if subpage_key.is_empty() {
            None
        } else {
            let subpage = page
                .subpage(subpage_key)
                .ok_or_else(|| DefinitionError::MissingSubpage {
                    page: page_key.to_string(),
                    subpage: subpage_key.to_string(),
                })?;
            Some(subpage.clone())
        };

        let page_type = PageType::parse(&page.page_type)
            .ok_or_else(|| DefinitionError::UnknownType(page.page_type.clone()))?;

        match (page_type.has_subpages(), subpage.is_some()) {
            (true, false) => return Err(DefinitionError::SubpageRequired(page.page_type.clone())),
            (false, true) => {
                return Err(DefinitionError::SubpagesUnsupported(page.page_type.clone()))
            }
            _ => {}
        }

        let title = [subpage.as_ref().map(|s| s.name.as_str()), Some(page.name.as_str())]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .map_or_else(|| self.name(language), str::to_string);

        Ok(PageTarget {
            page_type,
            page: page.clone(),
            subpage,
            title,
        })
    }
}
