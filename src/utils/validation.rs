//! Validation helpers
//!
//! Custom validators plugged into `#[derive(Validate)]` request bodies.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::ValidationError;

/// A date range where the end does not precede the start
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        let mut error = ValidationError::new("date_range");
        error.add_param("startdatum".into(), &start.to_string());
        error.add_param("enddatum".into(), &end.to_string());
        error.message = Some("enddatum darf nicht vor startdatum liegen".into());
        return Err(error);
    }
    Ok(())
}

/// Largest amount a `NUMERIC(10, 2)` column holds
pub const MAX_MONEY: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Money amounts lie between zero and `MAX_MONEY`
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    if *value > MAX_MONEY {
        let mut error = ValidationError::new("money_range");
        error.add_param("value".into(), &value.to_string());
        error.add_param("max".into(), &MAX_MONEY.to_string());
        return Err(error);
    }
    Ok(())
}

/// Basic phone number check: 6 to 15 digits, optional separators and leading `+`
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '-' | '/' | '(' | ')' | '+');
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !value.chars().all(allowed) || !(6..=15).contains(&digits) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}
