//! Checkout form validation and the simulated purchase flow.

mod model;
mod schema;
mod service;

pub use model::{
    CheckoutErrors, CheckoutField, CheckoutForm, CheckoutReceipt, FieldError, ValidatedCheckout,
};
pub use schema::{validate_checkout, validate_checkout_at};
pub use service::{CheckoutService, CheckoutServiceTrait};
