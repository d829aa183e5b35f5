#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Behavioral tests for course loading, route expansion and collapse

use buzz_router::CrumbTitle;

use super::harness::{CannedFetch, Harness};
use crate::config::AppConfig;
use crate::pages::{NavLink, SubpageNav};
use crate::screens::course::COURSE_PAGE_COMPONENT;
use crate::screens::not_found::NOT_FOUND_COMPONENT;
use crate::toast::ToastLevel;

const UNEXPANDED: [&str; 3] = ["^/$", "^/course/example/.*", "^/course/.*"];

fn unexpanded() -> Vec<String> {
    UNEXPANDED
        .iter()
        .map(|p| (*p).to_string())
        .chain(std::iter::once(".*".to_string()))
        .collect()
}

// ============================================================================
// ROUTE REGISTRATION BEHAVIORS
// ============================================================================

#[test]
fn given_configured_courses_when_routes_registered_then_catch_alls_precede_course_404() {
    let config = AppConfig {
        courses: vec!["example".to_string(), "rust-101".to_string()],
        ..AppConfig::default()
    };
    let harness = Harness::new(config, CannedFetch::default());

    assert_eq!(
        harness.patterns(),
        vec![
            "^/$",
            "^/course/example/.*",
            "^/course/rust\\-101/.*",
            "^/course/.*",
            ".*"
        ]
    );
}

#[test]
fn given_course_catch_all_when_inspected_then_carries_course_route_id() {
    let harness = Harness::example();
    let routes = harness.router.routes();

    assert_eq!(routes[1].id(), Some("course example"));
    assert_eq!(routes[2].id(), None);
}

// ============================================================================
// EXPANSION BEHAVIORS
// ============================================================================

#[tokio::test]
async fn given_course_page_url_when_visited_then_routes_expanded_in_place() {
    let harness = Harness::example();

    let navigation = harness.router.goto("/course/example/intro/").await.unwrap();

    assert_eq!(navigation.path, "/course/example/intro/");
    assert_eq!(
        harness.patterns(),
        vec![
            "^/$",
            "^/course/example/$",
            "^/course/example/intro/$",
            "^/course/example/topics/first/$",
            "^/course/example/topics/second/$",
            "^/course/example/broken/$",
            "^/course/example/extra/$",
            "^/course/example/.*",
            "^/course/.*",
            ".*",
        ]
    );
    let ids: Vec<Option<String>> = harness
        .router
        .routes()
        .iter()
        .map(|route| route.id().map(str::to_string))
        .collect();
    assert!(ids[1..8]
        .iter()
        .all(|id| id.as_deref() == Some("course example")));
}

#[tokio::test]
async fn given_course_page_url_when_visited_then_page_content_mounted_with_title() {
    let harness = Harness::example();

    harness.router.goto("/course/example/intro/").await.unwrap();

    assert_eq!(harness.mounted(), vec![COURSE_PAGE_COMPONENT]);
    assert!(harness.context.registry.contains(COURSE_PAGE_COMPONENT));
    assert_eq!(harness.router.current_title(), "Introduction");
    assert_eq!(
        harness.fetch.requests(),
        vec!["courses/example/course.json", "courses/example/intro.html"]
    );
}

#[tokio::test]
async fn given_course_root_when_visited_then_title_falls_back_to_course_name() {
    let harness = Harness::example();

    harness.router.goto("/course/example/").await.unwrap();

    assert_eq!(harness.router.current_title(), "Example");
    assert_eq!(harness.mounted(), vec![COURSE_PAGE_COMPONENT]);
}

#[tokio::test]
async fn given_tab_subpage_when_visited_then_subpage_fetched_and_breadcrumb_complete() {
    let harness = Harness::example();

    harness
        .router
        .goto("/course/example/topics/second/")
        .await
        .unwrap();

    assert_eq!(harness.router.current_title(), "Second");
    assert!(harness
        .fetch
        .requests()
        .contains(&"courses/example/second.html".to_string()));

    let crumbs = harness.router.state().breadcrumb.get();
    let titles: Vec<String> = crumbs.iter().map(|crumb| crumb.title.text()).collect();
    let paths: Vec<&str> = crumbs.iter().map(|crumb| crumb.path.as_str()).collect();
    assert_eq!(titles, vec!["Example", "Topics", "Second"]);
    assert_eq!(
        paths,
        vec![
            "/course/example/",
            "/course/example/topics/",
            "/course/example/topics/second/"
        ]
    );
    assert!(matches!(crumbs[0].title, CrumbTitle::Static(_)));
}

#[tokio::test]
async fn given_expanded_course_when_navigating_inside_then_manifest_not_reloaded() {
    let harness = Harness::example();

    harness.router.goto("/course/example/intro/").await.unwrap();
    harness.router.goto("/course/example/").await.unwrap();

    let manifest_loads = harness
        .fetch
        .requests()
        .iter()
        .filter(|url| url.ends_with("course.json"))
        .count();
    assert_eq!(manifest_loads, 1);
    assert_eq!(harness.patterns().len(), 10);
    assert_eq!(harness.mounted(), vec![COURSE_PAGE_COMPONENT]);
}

// ============================================================================
// SUB-PAGE NAVIGATION BEHAVIORS
// ============================================================================

#[tokio::test]
async fn given_first_subpage_then_only_next_link_to_sibling() {
    let harness = Harness::example();
    let course = harness.courses().load_course("example").await.unwrap();

    let nav = harness
        .courses()
        .subpage_nav(&course, "", "topics/", "first/");

    assert_eq!(nav.previous, None);
    assert_eq!(
        nav.next,
        Some(NavLink {
            href: "/course/example/topics/second/".to_string(),
            label: "Next: Second".to_string(),
        })
    );
}

#[tokio::test]
async fn given_last_subpage_then_only_previous_link_to_sibling() {
    let harness = Harness::example();
    let course = harness.courses().load_course("example").await.unwrap();

    let nav = harness
        .courses()
        .subpage_nav(&course, "", "topics/", "second/");

    assert_eq!(
        nav.previous,
        Some(NavLink {
            href: "/course/example/topics/first/".to_string(),
            label: "Previous: First".to_string(),
        })
    );
    assert_eq!(nav.next, None);
}

#[tokio::test]
async fn given_german_language_when_subpage_nav_built_then_labels_translated() {
    let harness = Harness::example();
    harness.context.translator.switch_language("de");
    let course = harness.courses().load_course("example").await.unwrap();

    let nav = harness
        .courses()
        .subpage_nav(&course, "de", "topics/", "second/");

    assert_eq!(nav.previous.unwrap().label, "Zurück: First");
}

#[tokio::test]
async fn given_page_without_subpages_then_no_subpage_nav() {
    let harness = Harness::example();
    let course = harness.courses().load_course("example").await.unwrap();

    let nav = harness.courses().subpage_nav(&course, "", "intro/", "");

    assert_eq!(nav, SubpageNav::default());
}

// ============================================================================
// COLLAPSE BEHAVIORS
// ============================================================================

#[tokio::test]
async fn given_expanded_course_when_leaving_course_then_catch_all_restored() {
    let harness = Harness::example();

    harness.router.goto("/course/example/intro/").await.unwrap();
    harness.router.goto("/somewhere/else/").await.unwrap();

    assert_eq!(harness.patterns(), unexpanded());
    assert!(!harness.context.registry.contains(COURSE_PAGE_COMPONENT));
    assert_eq!(harness.mounted(), vec![NOT_FOUND_COMPONENT]);
}

#[tokio::test]
async fn given_collapsed_course_when_revisited_then_expanded_again() {
    let harness = Harness::example();

    harness.router.goto("/course/example/intro/").await.unwrap();
    harness.router.goto("/elsewhere/").await.unwrap();
    harness.router.goto("/course/example/").await.unwrap();

    assert_eq!(harness.patterns().len(), 10);
    assert_eq!(harness.mounted(), vec![COURSE_PAGE_COMPONENT]);
}

#[tokio::test]
async fn given_course_when_collapsed_directly_then_route_returns_to_same_index() {
    let harness = Harness::example();
    harness.router.goto("/course/example/intro/").await.unwrap();

    harness.courses().remove_course_routes("example").unwrap();

    assert_eq!(harness.patterns(), unexpanded());
}

// ============================================================================
// FAILURE BEHAVIORS
// ============================================================================

#[tokio::test]
async fn given_unreachable_manifest_when_course_visited_then_error_toast_and_404() {
    let harness = Harness::new(AppConfig::default(), CannedFetch::default());

    let navigation = harness.router.goto("/course/example/intro/").await.unwrap();

    assert_eq!(navigation.path, "/course/example/intro/");
    assert_eq!(harness.mounted(), vec![NOT_FOUND_COMPONENT]);
    assert_eq!(harness.patterns(), unexpanded());

    let toasts = harness.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Error);
    assert_eq!(
        toasts[0].content,
        "The course definition could not be loaded. (Technical error: 404 Not Found)"
    );
}

#[tokio::test]
async fn given_unknown_page_when_visited_then_course_local_404() {
    let harness = Harness::example();

    harness.router.goto("/course/example/nope/").await.unwrap();

    assert_eq!(harness.mounted(), vec![NOT_FOUND_COMPONENT]);
    assert_eq!(harness.patterns().len(), 10);
    assert!(harness.toasts().is_empty());
}

#[tokio::test]
async fn given_unconfigured_course_when_visited_then_404_without_fetch() {
    let harness = Harness::example();

    harness.router.goto("/course/other/").await.unwrap();

    assert_eq!(harness.mounted(), vec![NOT_FOUND_COMPONENT]);
    assert!(harness.fetch.requests().is_empty());
}

#[tokio::test]
async fn given_missing_page_file_when_visited_then_error_toast_and_empty_surface() {
    let harness = Harness::example();

    harness.router.goto("/course/example/broken/").await.unwrap();

    assert!(harness.mounted().is_empty());
    assert_eq!(
        harness.toasts()[0].content,
        "The page content could not be loaded. (Technical error: 404 Not Found)"
    );
}

#[tokio::test]
async fn given_page_defined_only_for_other_language_when_visited_then_definition_error_toast() {
    let harness = Harness::example();

    harness.router.goto("/course/example/extra/").await.unwrap();

    assert!(harness.mounted().is_empty());
    assert_eq!(
        harness.toasts()[0].content,
        "Error in the course definition. Page extra/ is neither defined for language en nor the fallback language."
    );
}
