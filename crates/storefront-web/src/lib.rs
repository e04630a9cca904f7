//! storefront-checkout Web Frontend
//!
//! Leptos-based WASM frontend for the two-step checkout flow: collect
//! billing details, then mount the processor's payment widget.

mod api;
mod app;
mod components;
mod flow;
mod pages;
mod widget;

pub use app::App;
pub use flow::{BillingForm, CheckoutFlow, CheckoutStep};

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
