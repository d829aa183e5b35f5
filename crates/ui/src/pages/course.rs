//! Course content page components
//!
//! Page bodies are HTML fragments shipped with the course and inserted
//! verbatim.

use leptos::prelude::*;

/// One tab of a tabbed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabLink {
    pub href: String,
    pub title: String,
    pub active: bool,
}

/// Link to a neighbouring sub-page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

/// Previous and next links below a sub-page. Either side is missing at the
/// ends of the sub-page list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubpageNav {
    pub previous: Option<NavLink>,
    pub next: Option<NavLink>,
}

/// A single page.
#[component]
pub fn CoursePage(html: String) -> impl IntoView {
    view! { <article class="course-page" inner_html=html></article> }
}

#[component]
pub fn SubpageNavButtons(nav: SubpageNav, link_class: String) -> impl IntoView {
    let previous = nav
        .previous
        .map(|link| nav_button(link, format!("btn subpage-prev {link_class}")));
    let next = nav
        .next
        .map(|link| nav_button(link, format!("btn subpage-next {link_class}")));

    view! { <nav class="subpage-nav">{previous}{next}</nav> }
}

fn nav_button(link: NavLink, class: String) -> impl IntoView {
    view! {
        <a class=class href=link.href>
            {link.label}
        </a>
    }
}

/// A container page showing its sub-pages as tabs, with the active
/// sub-page below them followed by links to its neighbours.
#[component]
pub fn CourseTabs(
    tabs: Vec<TabLink>,
    nav: SubpageNav,
    link_class: String,
    html: String,
) -> impl IntoView {
    let nav_class = link_class.clone();
    view! {
        <div class="course-tabs">
            <ul class="tab tab-block">
                {tabs
                    .into_iter()
                    .map(|tab| {
                        let class = if tab.active { "tab-item active" } else { "tab-item" };
                        view! {
                            <li class=class>
                                <a class=link_class.clone() href=tab.href>{tab.title}</a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <article class="course-page course-subpage" inner_html=html></article>
            <SubpageNavButtons nav=nav link_class=nav_class />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_components_exist() {
        let _page = CoursePage;
        let _tabs = CourseTabs;
        let _nav = SubpageNavButtons;
    }
}
