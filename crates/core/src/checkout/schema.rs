//! Checkout field rules.
//!
//! Each field reports only its first failing rule so the form can show one
//! message per input.

use chrono::{Datelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use super::model::{
    CheckoutErrors, CheckoutField, CheckoutForm, FieldError, ValidatedCheckout,
};

const CARD_NUMBER_LENGTH: usize = 16;
const EXPIRY_LENGTH: usize = 4;
const CVV_LENGTH: usize = 3;
const MIN_NAME_LENGTH: usize = 3;

lazy_static! {
    /// Digits and whitespace only
    static ref CARD_CHARS_REGEX: Regex =
        Regex::new(r"^[0-9\s]+$").expect("Invalid regex pattern");

    static ref DIGITS_REGEX: Regex =
        Regex::new(r"^[0-9]+$").expect("Invalid regex pattern");

    /// ASCII letters and whitespace only
    static ref NAME_REGEX: Regex =
        Regex::new(r"^[a-zA-Z\s]+$").expect("Invalid regex pattern");

    /// local@label.tld; the local part ends in `[A-Za-z0-9_+-]` and each
    /// domain label starts with a letter or digit
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
    )
    .expect("Invalid regex pattern");
}

type FieldResult<T> = std::result::Result<T, &'static str>;

fn check_card_number(raw: &str) -> FieldResult<String> {
    if !CARD_CHARS_REGEX.is_match(raw) {
        return Err("Card number must contain only digits and spaces");
    }
    let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() != CARD_NUMBER_LENGTH {
        return Err("Card number must be 16 digits");
    }
    Ok(digits)
}

/// Returns `(month, two_digit_year)`.
fn check_expiry(raw: &str, current_year: i32) -> FieldResult<(u32, u32)> {
    if raw.chars().count() != EXPIRY_LENGTH {
        return Err("Expiry date must be 4 digits (MMYY)");
    }
    if !DIGITS_REGEX.is_match(raw) {
        return Err("Expiry date must contain only digits");
    }

    let month: u32 = raw[..2].parse().map_err(|_| "Invalid month")?;
    if !(1..=12).contains(&month) {
        return Err("Invalid month");
    }

    let year: u32 = raw[2..].parse().map_err(|_| "Card has expired")?;
    let current_two_digit = current_year.rem_euclid(100) as u32;
    if year < current_two_digit {
        return Err("Card has expired");
    }

    Ok((month, year))
}

fn check_cvv(raw: &str) -> FieldResult<String> {
    if raw.chars().count() != CVV_LENGTH {
        return Err("CVV must be 3 digits");
    }
    if !DIGITS_REGEX.is_match(raw) {
        return Err("CVV must contain only digits");
    }
    Ok(raw.to_string())
}

fn check_name(raw: &str) -> FieldResult<String> {
    if raw.chars().count() < MIN_NAME_LENGTH {
        return Err("Name must be at least 3 characters");
    }
    if !NAME_REGEX.is_match(raw) {
        return Err("Name must contain only letters and spaces");
    }
    Ok(raw.to_string())
}

fn check_email(raw: &str) -> FieldResult<String> {
    if !EMAIL_REGEX.is_match(raw) || raw.starts_with('.') || raw.contains("..") {
        return Err("Invalid email address");
    }
    Ok(raw.to_string())
}

fn check_country(raw: &str) -> FieldResult<String> {
    if raw.is_empty() {
        return Err("Please select a country");
    }
    Ok(raw.to_string())
}

/// Validate a checkout form against the rules, with expiry years compared
/// to `current_year` (four-digit calendar year).
pub fn validate_checkout_at(
    form: &CheckoutForm,
    current_year: i32,
) -> Result<ValidatedCheckout, CheckoutErrors> {
    let mut errors = Vec::new();
    let mut record = |field: CheckoutField, message: &'static str| {
        errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    };

    let card_number = check_card_number(&form.card_number)
        .map_err(|m| record(CheckoutField::CardNumber, m))
        .ok();
    let expiry = check_expiry(&form.expiry_date, current_year)
        .map_err(|m| record(CheckoutField::ExpiryDate, m))
        .ok();
    let cvv = check_cvv(&form.cvv)
        .map_err(|m| record(CheckoutField::Cvv, m))
        .ok();
    let name = check_name(&form.name)
        .map_err(|m| record(CheckoutField::Name, m))
        .ok();
    let email = check_email(&form.email)
        .map_err(|m| record(CheckoutField::Email, m))
        .ok();
    let country = check_country(&form.country)
        .map_err(|m| record(CheckoutField::Country, m))
        .ok();

    match (card_number, expiry, cvv, name, email, country) {
        (
            Some(card_number),
            Some((expiry_month, expiry_year)),
            Some(cvv),
            Some(name),
            Some(email),
            Some(country),
        ) => Ok(ValidatedCheckout {
            card_number,
            expiry_month,
            expiry_year,
            cvv,
            name,
            email,
            country,
        }),
        _ => Err(CheckoutErrors { errors }),
    }
}

/// Validate a checkout form against today's date.
pub fn validate_checkout(form: &CheckoutForm) -> Result<ValidatedCheckout, CheckoutErrors> {
    validate_checkout_at(form, Utc::now().year())
}
