//! 500 Internal Error page component

use leptos::prelude::*;

#[component]
pub fn InternalError(title: String, lines: Vec<String>) -> impl IntoView {
    view! {
        <div class="internal-error-page">
            <h1>"500 - " {title}</h1>
            {lines.into_iter().map(|line| view! { <p>{line}</p> }).collect_view()}
        </div>
    }
}
