//! Checkout Page
//!
//! Drives the two-step flow: the billing form gates entry to the payment
//! step, which loads the vendor script, creates a payment session, and
//! mounts the processor's flow component.

use leptos::prelude::*;

use crate::api;
use crate::components::{BillingField, ErrorBanner};
use crate::flow::{BillingForm, CheckoutFlow, CheckoutStep};
use crate::widget;

/// Demo product: S$100.00 in cents
const PAYMENT_AMOUNT: i64 = 10_000;
const CURRENCY: &str = "SGD";

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let billing = RwSignal::new(BillingForm::new());
    let flow = RwSignal::new(CheckoutFlow::new());
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(false);

    let on_billing_step = move || flow.with(|f| f.step() == CheckoutStep::CollectingBilling);
    let on_payment_step = move || flow.with(|f| f.step() == CheckoutStep::AwaitingPayment);
    let can_go_back = move || flow.with(|f| !f.widget_mounted());

    let proceed = move |_| {
        let form = billing.get_untracked();
        let mut gate = Ok(());
        flow.update(|f| gate = f.proceed_to_payment(&form));

        match gate {
            Err(message) => set_error.set(Some(message)),
            Ok(()) => {
                set_error.set(None);
                set_loading.set(true);
                leptos::task::spawn_local(async move {
                    if let Err(message) = initialize_checkout(form, flow, set_error).await {
                        set_error.set(Some(message));
                    }
                    set_loading.set(false);
                });
            }
        }
    };

    let back = move |_| {
        flow.update(|f| {
            let _ = f.back_to_billing();
        });
        set_error.set(None);
    };

    view! {
        <div class="checkout">
            <h1>"Secure Checkout"</h1>

            <div class="product-summary">
                <div>
                    <h3>"Premium Running Shoes"</h3>
                    <p>"Color: Black | Size: US 10"</p>
                    <p>"SKU: SHOES-001"</p>
                </div>
                <div class="price">
                    <p>"S$100.00"</p>
                    <p>"SGD"</p>
                </div>
            </div>

            <ErrorBanner message=error />

            <Show when=on_billing_step>
                <section class="billing">
                    <h2>"Billing Information"</h2>
                    <div class="form-grid">
                        <BillingField label="First Name" name="firstName" billing=billing required=true />
                        <BillingField label="Last Name" name="lastName" billing=billing required=true />
                        <BillingField label="Email Address" name="email" billing=billing required=true input_type="email" />
                        <BillingField label="Phone Number" name="phone" billing=billing input_type="tel" placeholder="e.g., +65 1234 5678" />
                        <BillingField label="Address Line 1" name="addressLine1" billing=billing required=true placeholder="e.g., 123 Marina Bay Street" />
                        <BillingField label="Address Line 2" name="addressLine2" billing=billing />
                        <BillingField label="City" name="city" billing=billing required=true />
                        <BillingField label="State/Region" name="state" billing=billing />
                        <BillingField label="Postal Code" name="zip" billing=billing required=true />
                        <div class="field">
                            <label for="country">"Country"</label>
                            <select
                                id="country"
                                name="country"
                                prop:value=move || billing.with(|b| b.field("country").to_string())
                                on:change=move |ev| {
                                    billing.update(|b| b.set_field("country", event_target_value(&ev)));
                                }
                            >
                                <option value="SG">"Singapore"</option>
                                <option value="US">"United States"</option>
                                <option value="GB">"United Kingdom"</option>
                                <option value="AU">"Australia"</option>
                                <option value="CA">"Canada"</option>
                                <option value="MY">"Malaysia"</option>
                                <option value="TH">"Thailand"</option>
                                <option value="ID">"Indonesia"</option>
                            </select>
                        </div>
                    </div>

                    <div class="actions">
                        <button
                            class="btn btn-primary"
                            disabled=move || !billing.with(BillingForm::is_complete)
                            on:click=proceed
                        >
                            "Proceed to Payment"
                        </button>
                    </div>
                </section>
            </Show>

            <Show when=on_payment_step>
                <section class="payment">
                    <Show when=can_go_back>
                        <button class="btn-link" on:click=back>
                            "← Back to Billing Information"
                        </button>
                    </Show>

                    <Show when=move || loading.get()>
                        <div class="loading">
                            <div class="spinner"></div>
                            <p>"Loading checkout..."</p>
                        </div>
                    </Show>

                    <div class="flow-frame">
                        <div id="flow-container"></div>
                    </div>
                </section>
            </Show>

            <footer class="notice">
                <p>"🔒 Your payment is secured by Checkout.com"</p>
                <p>"This is a sandbox environment for testing purposes"</p>
            </footer>
        </div>
    }
}

/// Everything that happens after the billing gate passes: script readiness,
/// session creation, widget mount.
async fn initialize_checkout(
    billing: BillingForm,
    flow: RwSignal<CheckoutFlow>,
    set_error: WriteSignal<Option<String>>,
) -> Result<(), String> {
    widget::load_vendor_script().await?;

    let config = api::fetch_checkout_config().await?;
    let public_key = config
        .public_key
        .ok_or("Checkout public key is not configured")?;

    let session = api::create_payment_session(PAYMENT_AMOUNT, CURRENCY, &billing).await?;

    // The user may have navigated back while the session call was in
    // flight; an in-flight call cannot be cancelled, only abandoned.
    if flow.with_untracked(|f| f.step()) != CheckoutStep::AwaitingPayment {
        return Ok(());
    }

    let callbacks = widget::FlowCallbacks {
        on_completed: Box::new(|payment_id| {
            if let Some(window) = web_sys::window() {
                let _ = window
                    .location()
                    .set_href(&format!("/success?paymentId={payment_id}"));
            }
        }),
        // Widget failure is surfaced in place, no navigation, so the user
        // can retry inside the widget.
        on_failed: Box::new(move |message| set_error.set(Some(message))),
    };

    widget::mount_flow(
        &session,
        &public_key,
        &config.environment,
        "flow-container",
        callbacks,
    )
    .await?;

    flow.update(CheckoutFlow::mark_widget_mounted);
    Ok(())
}
