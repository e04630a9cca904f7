//! UI Components

use leptos::prelude::*;

use crate::flow::BillingForm;

/// One billing form field bound to the shared form signal
#[component]
pub fn BillingField(
    label: &'static str,
    name: &'static str,
    billing: RwSignal<BillingForm>,
    #[prop(optional)] required: bool,
    #[prop(optional)] placeholder: &'static str,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    view! {
        <div class="field">
            <label for=name>{label} {required.then_some(" *")}</label>
            <input
                type=input_type
                id=name
                name=name
                placeholder=placeholder
                required=required
                prop:value=move || billing.with(|b| b.field(name).to_string())
                on:input=move |ev| {
                    billing.update(|b| b.set_field(name, event_target_value(&ev)));
                }
            />
        </div>
    }
}

/// Inline error banner, hidden while there is nothing to report
#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="error-banner">
                {move || message.get().unwrap_or_default()}
            </div>
        </Show>
    }
}
