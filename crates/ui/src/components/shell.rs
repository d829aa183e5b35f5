//! Application shell: header with breadcrumb, the main surface and toasts
//!
//! The shell is mounted once and lives for the whole page. Router and toast
//! state are plain observables; the shell mirrors them into signals so the
//! view reacts to them.

use buzz_router::{history, Crumb, NavigationState, RouterConfig};
use leptos::prelude::*;

use super::MAIN_SURFACE;
use crate::context::AppContext;
use crate::toast::Toast;

/// A breadcrumb entry ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrumbLink {
    pub href: String,
    pub title: String,
}

impl CrumbLink {
    /// Links for a route breadcrumb.
    #[must_use]
    pub fn from_crumbs(crumbs: &[Crumb], config: &RouterConfig) -> Vec<Self> {
        crumbs
            .iter()
            .map(|crumb| Self {
                href: history::url_for(config, &crumb.path),
                title: crumb.title.text(),
            })
            .collect()
    }
}

#[component]
pub fn Breadcrumb(items: ReadSignal<Vec<CrumbLink>>, link_class: String) -> impl IntoView {
    view! {
        <ul class="breadcrumb">
            <For
                each=move || items.get()
                key=|item| item.href.clone()
                children=move |item| {
                    view! {
                        <li class="breadcrumb-item">
                            <a class=link_class.clone() href=item.href>{item.title}</a>
                        </li>
                    }
                }
            />
        </ul>
    }
}

#[component]
pub fn ToastList(messages: ReadSignal<Vec<Toast>>, on_dismiss: WriteSignal<Option<u64>>) -> impl IntoView {
    view! {
        <div class="toasts">
            <For
                each=move || messages.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let classes = toast.classes();
                    view! {
                        <div class=classes on:click=move |_| on_dismiss.set(Some(id))>
                            {toast.content}
                        </div>
                    }
                }
            />
        </div>
    }
}

#[component]
pub fn AppShell(
    site_title: String,
    home_href: String,
    link_class: String,
    page_title: ReadSignal<String>,
    crumbs: ReadSignal<Vec<CrumbLink>>,
    toasts: ReadSignal<Vec<Toast>>,
    on_dismiss: WriteSignal<Option<u64>>,
) -> impl IntoView {
    view! {
        <div class="app-container">
            <header class="app-header navbar">
                <section class="navbar-section">
                    <a class=format!("navbar-brand {link_class}") href=home_href>
                        {site_title}
                    </a>
                </section>
                <section class="navbar-section">
                    <Breadcrumb items=crumbs link_class=link_class.clone() />
                </section>
                <section class="navbar-section page-title">
                    {move || page_title.get()}
                </section>
            </header>
            <main class="app-main">
                <div id=MAIN_SURFACE></div>
            </main>
            <ToastList messages=toasts on_dismiss=on_dismiss />
        </div>
    }
}

/// Mount the shell into the document body.
///
/// Must run before the main surface is registered with the router, which
/// only manages surfaces present in the document.
pub fn mount_shell(context: &AppContext, state: &NavigationState) {
    let site_title = context.config.title.clone();
    let home_href = context.href("/");
    let link_class = context.link_class();
    let router_config = context.config.router.clone();
    let toasts = std::rc::Rc::clone(&context.toasts);
    let state = state.clone();

    mount_to_body(move || {
        let (page_title, set_page_title) = signal(state.current_title.get());
        state
            .current_title
            .subscribe(move |title: &String| set_page_title.set(title.clone()))
            .forget();

        let (crumbs, set_crumbs) = signal(CrumbLink::from_crumbs(
            &state.breadcrumb.get(),
            &router_config,
        ));
        state
            .breadcrumb
            .subscribe(move |crumbs: &Vec<Crumb>| {
                set_crumbs.set(CrumbLink::from_crumbs(crumbs, &router_config));
            })
            .forget();

        let (messages, set_messages) = signal(toasts.messages().get());
        toasts
            .messages()
            .subscribe(move |list: &Vec<Toast>| set_messages.set(list.clone()))
            .forget();

        let (dismissed, set_dismissed) = signal(None::<u64>);
        Effect::new(move |_| {
            if let Some(id) = dismissed.get() {
                toasts.dismiss(id);
            }
        });

        view! {
            <AppShell
                site_title=site_title
                home_href=home_href
                link_class=link_class
                page_title=page_title
                crumbs=crumbs
                toasts=messages
                on_dismiss=set_dismissed
            />
        }
    });
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_shell_components_exist() {
        let _shell = AppShell;
        let _breadcrumb = Breadcrumb;
        let _toasts = ToastList;
    }

    #[test]
    fn given_hash_addressing_when_building_crumbs_then_fragment_links() {
        let config = RouterConfig::new().with_hash_bang(true);
        let links = CrumbLink::from_crumbs(
            &[
                Crumb::new("/course/example/", "Example"),
                Crumb::new("/course/example/intro/", "Intro"),
            ],
            &config,
        );

        assert_eq!(
            links,
            vec![
                CrumbLink {
                    href: "#/course/example/".to_string(),
                    title: "Example".to_string(),
                },
                CrumbLink {
                    href: "#/course/example/intro/".to_string(),
                    title: "Intro".to_string(),
                },
            ]
        );
    }
}
