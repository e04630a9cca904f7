//! Vendor Widget Bridge
//!
//! Talks to the processor's `CheckoutWebComponents` global: loads the
//! bootstrap script, initializes the component factory with an opaque
//! payment session, and mounts the "flow" component. Flow logic never sees
//! the vendor's callback registration; it injects a [`FlowCallbacks`] pair
//! and this module wires it up.

use js_sys::{Function, Object, Promise, Reflect, JSON};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

const VENDOR_SCRIPT_URL: &str = "https://checkout-web-components.checkout.com/index.js";
const VENDOR_GLOBAL: &str = "CheckoutWebComponents";

/// Completion/failure capabilities injected into the widget.
///
/// `on_completed` receives the processor-issued payment identifier;
/// `on_failed` receives the processor's error message.
pub struct FlowCallbacks {
    pub on_completed: Box<dyn Fn(String) + 'static>,
    pub on_failed: Box<dyn Fn(String) + 'static>,
}

/// Whether the vendor bootstrap script has installed its global
pub fn vendor_script_ready() -> bool {
    web_sys::window()
        .and_then(|w| Reflect::get(&w, &JsValue::from_str(VENDOR_GLOBAL)).ok())
        .is_some_and(|v| v.is_function())
}

/// Load the vendor bootstrap script, resolving once it is ready.
///
/// Idempotent: returns immediately when the global is already installed.
/// A load failure is an error; the flow must not proceed without it.
pub async fn load_vendor_script() -> Result<(), String> {
    if vendor_script_ready() {
        return Ok(());
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document available")?;

    let script: web_sys::HtmlScriptElement = document
        .create_element("script")
        .map_err(|_| "Failed to create script element")?
        .dyn_into()
        .map_err(|_| "Failed to create script element")?;
    script.set_src(VENDOR_SCRIPT_URL);

    let loaded = Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });

    document
        .head()
        .ok_or("No document head")?
        .append_child(&script)
        .map_err(|_| "Failed to attach script element")?;

    JsFuture::from(loaded)
        .await
        .map_err(|_| "Failed to load checkout script".to_string())?;

    if vendor_script_ready() {
        Ok(())
    } else {
        Err("Checkout script loaded but did not initialize".into())
    }
}

/// Initialize the vendor factory with the opaque session and mount the
/// "flow" component into the container element.
pub async fn mount_flow(
    session: &serde_json::Value,
    public_key: &str,
    environment: &str,
    container_id: &str,
    callbacks: FlowCallbacks,
) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window available")?;

    let factory: Function = Reflect::get(&window, &JsValue::from_str(VENDOR_GLOBAL))
        .map_err(|_| "Checkout script is not loaded")?
        .dyn_into()
        .map_err(|_| "Checkout script is not loaded")?;

    // The session stays opaque: re-parse the exact JSON the processor sent.
    let payment_session = JSON::parse(&session.to_string())
        .map_err(|_| "Payment session is not valid JSON")?;

    let options = Object::new();
    set(&options, "publicKey", &JsValue::from_str(public_key))?;
    set(&options, "environment", &JsValue::from_str(environment))?;
    set(&options, "paymentSession", &payment_session)?;

    let on_completed = callbacks.on_completed;
    let completed =
        Closure::<dyn Fn(JsValue, JsValue)>::new(move |_component: JsValue, response: JsValue| {
            let payment_id = string_field(&response, "id").unwrap_or_default();
            on_completed(payment_id);
        });
    set(&options, "onPaymentCompleted", completed.as_ref())?;
    completed.forget();

    let on_failed = callbacks.on_failed;
    let failed =
        Closure::<dyn Fn(JsValue, JsValue)>::new(move |_component: JsValue, error: JsValue| {
            let message =
                string_field(&error, "message").unwrap_or_else(|| "Payment failed".into());
            on_failed(message);
        });
    set(&options, "onPaymentFailed", failed.as_ref())?;
    failed.forget();

    // CheckoutWebComponents(options) resolves to the checkout handle
    let pending: Promise = factory
        .call1(&JsValue::NULL, &options)
        .map_err(|_| "Failed to initialize checkout components")?
        .dyn_into()
        .map_err(|_| "Failed to initialize checkout components")?;
    let checkout = JsFuture::from(pending)
        .await
        .map_err(|e| js_error(&e, "Failed to initialize checkout components"))?;

    // checkout.create("flow")
    let create: Function = Reflect::get(&checkout, &JsValue::from_str("create"))
        .map_err(|_| "Checkout handle has no create()")?
        .dyn_into()
        .map_err(|_| "Checkout handle has no create()")?;
    let component = create
        .call1(&checkout, &JsValue::from_str("flow"))
        .map_err(|e| js_error(&e, "Failed to create flow component"))?;

    // component.mount(container)
    let container = window
        .document()
        .and_then(|d| d.get_element_by_id(container_id))
        .ok_or("Flow container element is missing")?;
    let mount: Function = Reflect::get(&component, &JsValue::from_str("mount"))
        .map_err(|_| "Flow component has no mount()")?
        .dyn_into()
        .map_err(|_| "Flow component has no mount()")?;
    mount
        .call1(&component, &container)
        .map_err(|e| js_error(&e, "Failed to mount flow component"))?;

    Ok(())
}

fn set(obj: &Object, key: &str, value: &JsValue) -> Result<(), String> {
    Reflect::set(obj, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|_| format!("Failed to set widget option {key}"))
}

fn string_field(value: &JsValue, key: &str) -> Option<String> {
    Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
        .filter(|s| !s.is_empty())
}

fn js_error(err: &JsValue, fallback: &str) -> String {
    string_field(err, "message").unwrap_or_else(|| fallback.to_string())
}
