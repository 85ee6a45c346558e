use log::{debug, info};

use super::model::{CheckoutErrors, CheckoutForm, CheckoutReceipt};
use super::schema::{validate_checkout, validate_checkout_at};
use crate::constants::CHECKOUT_SUCCESS_MESSAGE;

pub trait CheckoutServiceTrait: Send + Sync {
    fn submit(&self, form: &CheckoutForm) -> Result<CheckoutReceipt, CheckoutErrors>;
}

/// Simulated purchase flow. Nothing is charged; a valid form produces a
/// receipt and the attempt is logged with the card number masked.
#[derive(Debug, Default, Clone)]
pub struct CheckoutService {
    /// Overrides the calendar year used for expiry checks
    fixed_year: Option<i32>,
}

impl CheckoutService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(year: i32) -> Self {
        Self {
            fixed_year: Some(year),
        }
    }
}

impl CheckoutServiceTrait for CheckoutService {
    fn submit(&self, form: &CheckoutForm) -> Result<CheckoutReceipt, CheckoutErrors> {
        let result = match self.fixed_year {
            Some(year) => validate_checkout_at(form, year),
            None => validate_checkout(form),
        };

        let validated = match result {
            Ok(validated) => validated,
            Err(errors) => {
                debug!("Checkout rejected: {}", errors);
                return Err(errors);
            }
        };

        let masked = validated.masked_card_number();
        info!(
            "Checkout accepted for card {} (country {})",
            masked, validated.country
        );

        Ok(CheckoutReceipt {
            message: CHECKOUT_SUCCESS_MESSAGE.to_string(),
            masked_card_number: masked,
            email: validated.email,
        })
    }
}
