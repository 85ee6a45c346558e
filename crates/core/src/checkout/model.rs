use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw checkout form input, exactly as typed. Fields left out of a
/// submission are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckoutForm {
    pub card_number: String,
    /// `MMYY`
    pub expiry_date: String,
    pub cvv: String,
    pub name: String,
    pub email: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutField {
    CardNumber,
    ExpiryDate,
    Cvv,
    Name,
    Email,
    Country,
}

impl CheckoutField {
    /// Fields in form order.
    pub const ALL: [CheckoutField; 6] = [
        Self::CardNumber,
        Self::ExpiryDate,
        Self::Cvv,
        Self::Name,
        Self::Email,
        Self::Country,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CardNumber => "cardNumber",
            Self::ExpiryDate => "expiryDate",
            Self::Cvv => "cvv",
            Self::Name => "name",
            Self::Email => "email",
            Self::Country => "country",
        }
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First failed rule for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: CheckoutField,
    pub message: String,
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default, thiserror::Error)]
#[error("{} checkout field(s) failed validation", .errors.len())]
pub struct CheckoutErrors {
    pub errors: Vec<FieldError>,
}

impl CheckoutErrors {
    pub fn for_field(&self, field: CheckoutField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Form input that passed every rule, with the card number normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedCheckout {
    /// 16 digits, spaces removed
    pub card_number: String,
    pub expiry_month: u32,
    /// Two-digit year
    pub expiry_year: u32,
    pub cvv: String,
    pub name: String,
    pub email: String,
    pub country: String,
}

impl ValidatedCheckout {
    /// Card number with all but the last four digits hidden.
    pub fn masked_card_number(&self) -> String {
        let last4 = &self.card_number[self.card_number.len().saturating_sub(4)..];
        format!("**** **** **** {}", last4)
    }
}

/// Confirmation of a simulated purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub message: String,
    pub masked_card_number: String,
    pub email: String,
}
