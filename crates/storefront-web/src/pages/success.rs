//! Success Page

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

#[component]
pub fn SuccessPage() -> impl IntoView {
    let query = use_query_map();
    let payment_id = move || query.read().get("paymentId");

    view! {
        <div class="result result-success">
            <h1>"Payment Successful!"</h1>
            <p>"Your payment has been processed successfully."</p>

            <Show when=move || payment_id().is_some()>
                <div class="payment-id">
                    <p>"Payment ID:"</p>
                    <p class="mono">{payment_id}</p>
                </div>
            </Show>

            <p>"You will receive a confirmation email shortly."</p>
            <div class="cta">
                <a href="/checkout" class="btn btn-primary">"Make Another Payment"</a>
                <a href="/" class="btn">"Back to Home"</a>
            </div>
        </div>
    }
}
