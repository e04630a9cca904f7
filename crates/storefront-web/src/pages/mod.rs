//! Page Components

mod checkout;
mod failure;
mod home;
mod success;

pub use checkout::CheckoutPage;
pub use failure::FailurePage;
pub use home::HomePage;
pub use success::SuccessPage;
