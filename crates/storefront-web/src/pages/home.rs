//! Home Page

use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home">
            <header class="hero">
                <h1>"storefront"</h1>
                <p class="tagline">"A demo store with an embedded checkout flow"</p>
                <div class="cta">
                    <a href="/checkout" class="btn btn-primary">"Buy Now"</a>
                </div>
            </header>

            <section class="features">
                <div class="feature">
                    <h3>"🔒 Secure"</h3>
                    <p>"Card entry runs inside the processor's widget. No card data touches this server."</p>
                </div>
                <div class="feature">
                    <h3>"🧪 Sandbox"</h3>
                    <p>"Runs against the processor's sandbox environment with test cards."</p>
                </div>
            </section>
        </div>
    }
}
