//! Failure Page

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

#[component]
pub fn FailurePage() -> impl IntoView {
    let query = use_query_map();
    let error = move || query.read().get("error");

    view! {
        <div class="result result-failure">
            <h1>"Payment Failed"</h1>
            <p>"We were unable to process your payment."</p>

            <Show when=move || error().is_some()>
                <div class="error-banner">{error}</div>
            </Show>

            <p>"Please check your payment details and try again."</p>
            <div class="cta">
                <a href="/checkout" class="btn btn-primary">"Try Again"</a>
                <a href="/" class="btn">"Back to Home"</a>
            </div>
        </div>
    }
}
