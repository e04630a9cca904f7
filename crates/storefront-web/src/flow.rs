//! Checkout Flow State Machine
//!
//! The two user-facing phases of checkout as an explicit state type:
//! collect billing details, then hand over to the payment widget. Kept free
//! of any DOM or Leptos types so the gating rules test natively.

use serde::Serialize;

/// Fields that must be non-blank before leaving the billing step
pub const REQUIRED_FIELDS: [&str; 6] =
    ["firstName", "lastName", "email", "addressLine1", "city", "zip"];

/// The billing form as the user fills it in.
///
/// Serializes with camelCase keys, matching the `billingInfo` object the
/// payment-session API expects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl BillingForm {
    /// Fresh form with the deployment's default country preselected
    pub fn new() -> Self {
        Self {
            country: "SG".into(),
            ..Self::default()
        }
    }

    /// Set a field by its form name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "firstName" => self.first_name = value,
            "lastName" => self.last_name = value,
            "email" => self.email = value,
            "phone" => self.phone = value,
            "addressLine1" => self.address_line1 = value,
            "addressLine2" => self.address_line2 = value,
            "city" => self.city = value,
            "state" => self.state = value,
            "zip" => self.zip = value,
            "country" => self.country = value,
            _ => {}
        }
    }

    /// Read a field by its form name
    pub fn field(&self, name: &str) -> &str {
        match name {
            "firstName" => &self.first_name,
            "lastName" => &self.last_name,
            "email" => &self.email,
            "phone" => &self.phone,
            "addressLine1" => &self.address_line1,
            "addressLine2" => &self.address_line2,
            "city" => &self.city,
            "state" => &self.state,
            "zip" => &self.zip,
            "country" => &self.country,
            _ => "",
        }
    }

    /// Required fields that are still blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .filter(|name| self.field(name).trim().is_empty())
            .collect()
    }

    /// Validation gate for the billing → payment transition
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Current phase of the checkout flow
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckoutStep {
    #[default]
    CollectingBilling,
    AwaitingPayment,
}

/// Single-pass checkout state machine.
///
/// Terminal success/failure states are separate pages and not modeled here.
#[derive(Clone, Debug, Default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    widget_mounted: bool,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Whether the vendor widget has finished mounting
    pub fn widget_mounted(&self) -> bool {
        self.widget_mounted
    }

    /// Attempt the billing → payment transition.
    ///
    /// Invalid submission is a no-op: the flow stays in the billing step and
    /// the returned message is shown to the user.
    pub fn proceed_to_payment(&mut self, billing: &BillingForm) -> Result<(), String> {
        if self.step != CheckoutStep::CollectingBilling {
            return Ok(());
        }
        if !billing.is_complete() {
            return Err("Please fill in all required billing information fields".into());
        }
        self.step = CheckoutStep::AwaitingPayment;
        Ok(())
    }

    /// Back-navigation is allowed any time before the widget mounts.
    pub fn back_to_billing(&mut self) -> bool {
        if self.step == CheckoutStep::AwaitingPayment && !self.widget_mounted {
            self.step = CheckoutStep::CollectingBilling;
            true
        } else {
            false
        }
    }

    /// Record that the vendor widget finished mounting
    pub fn mark_widget_mounted(&mut self) {
        self.widget_mounted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> BillingForm {
        let mut form = BillingForm::new();
        form.set_field("firstName", "Jane".into());
        form.set_field("lastName", "Doe".into());
        form.set_field("email", "jane@x.com".into());
        form.set_field("addressLine1", "1 Main St".into());
        form.set_field("city", "Singapore".into());
        form.set_field("zip", "123456".into());
        form
    }

    #[test]
    fn test_incomplete_form_blocks_transition() {
        let mut form = complete_form();
        form.set_field("city", "".into());

        let mut flow = CheckoutFlow::new();
        let err = flow.proceed_to_payment(&form).unwrap_err();
        assert_eq!(flow.step(), CheckoutStep::CollectingBilling);
        assert!(err.contains("required"));
        assert_eq!(form.missing_fields(), vec!["city"]);
    }

    #[test]
    fn test_whitespace_only_field_counts_as_blank() {
        let mut form = complete_form();
        form.set_field("email", "   ".into());
        assert!(!form.is_complete());
    }

    #[test]
    fn test_complete_form_proceeds() {
        let mut flow = CheckoutFlow::new();
        assert!(flow.proceed_to_payment(&complete_form()).is_ok());
        assert_eq!(flow.step(), CheckoutStep::AwaitingPayment);
    }

    #[test]
    fn test_back_navigation_before_widget_mount() {
        let mut flow = CheckoutFlow::new();
        flow.proceed_to_payment(&complete_form()).unwrap();

        assert!(flow.back_to_billing());
        assert_eq!(flow.step(), CheckoutStep::CollectingBilling);
    }

    #[test]
    fn test_back_navigation_blocked_after_widget_mount() {
        let mut flow = CheckoutFlow::new();
        flow.proceed_to_payment(&complete_form()).unwrap();
        flow.mark_widget_mounted();

        assert!(!flow.back_to_billing());
        assert_eq!(flow.step(), CheckoutStep::AwaitingPayment);
    }

    #[test]
    fn test_retry_after_back_navigation() {
        let mut flow = CheckoutFlow::new();
        let form = complete_form();

        flow.proceed_to_payment(&form).unwrap();
        assert!(flow.back_to_billing());
        assert!(flow.proceed_to_payment(&form).is_ok());
        assert_eq!(flow.step(), CheckoutStep::AwaitingPayment);
    }

    #[test]
    fn test_form_serializes_camel_case() {
        let json = serde_json::to_value(complete_form()).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["addressLine1"], "1 Main St");
        assert_eq!(json["country"], "SG");
    }
}
