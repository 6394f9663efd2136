use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{Buchung, BuchungsStatus};
use crate::utils::validation::{validate_date_range, validate_money};

/// Body for creating or replacing a booking
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_buchung_zeitraum"))]
pub struct BuchungRequest {
    pub startdatum: NaiveDate,
    pub enddatum: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom = "validate_money")]
    pub gesamtpreis: Decimal,
    #[serde(default)]
    pub buchungsstatus: BuchungsStatus,
    pub kunde_id: i64,
    pub fahrzeug_id: i64,
}

fn validate_buchung_zeitraum(request: &BuchungRequest) -> Result<(), ValidationError> {
    validate_date_range(request.startdatum, request.enddatum)
}

impl BuchungRequest {
    pub fn into_buchung(self, id: i64) -> Buchung {
        Buchung {
            id,
            startdatum: self.startdatum,
            enddatum: self.enddatum,
            gesamtpreis: self.gesamtpreis,
            buchungsstatus: self.buchungsstatus,
            kunde_id: self.kunde_id,
            fahrzeug_id: self.fahrzeug_id,
        }
    }
}

/// Body for the availability check
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_verfuegbarkeit_zeitraum"))]
pub struct VerfuegbarkeitRequest {
    pub fahrzeug_id: i64,
    pub startdatum: NaiveDate,
    pub enddatum: NaiveDate,
}

fn validate_verfuegbarkeit_zeitraum(request: &VerfuegbarkeitRequest) -> Result<(), ValidationError> {
    validate_date_range(request.startdatum, request.enddatum)
}

#[derive(Debug, Serialize)]
pub struct VerfuegbarkeitResponse {
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_before_start_is_invalid() {
        let request: BuchungRequest = serde_json::from_str(
            r#"{"startdatum": "2024-06-10", "enddatum": "2024-06-01",
                "gesamtpreis": 10, "kundeId": 1, "fahrzeugId": 1}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_status_defaults_to_angelegt() {
        let request: BuchungRequest = serde_json::from_str(
            r#"{"startdatum": "2024-06-01", "enddatum": "2024-06-03",
                "gesamtpreis": 249.90, "kundeId": 1, "fahrzeugId": 1}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());

        let buchung = request.into_buchung(5);
        assert_eq!(buchung.buchungsstatus, BuchungsStatus::Angelegt);
        assert_eq!(buchung.gesamtpreis, Decimal::new(24990, 2));
    }
}
