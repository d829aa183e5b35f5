//! 404 Not Found page component

use leptos::prelude::*;

/// 404 Not Found page component
#[component]
pub fn NotFound(
    title: String,
    message: String,
    home_href: String,
    home_label: String,
    link_class: String,
) -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"404 - " {title}</h1>
            <p>{message}</p>
            <a class=link_class href=home_href>{home_label}</a>
        </div>
    }
}
