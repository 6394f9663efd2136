use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::models::Kunde;
use crate::utils::validation::validate_phone;

/// Body for creating or replacing a customer
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct KundeRequest {
    #[validate(length(max = 100))]
    pub vorname: Option<String>,

    #[validate(length(max = 100))]
    pub nachname: Option<String>,

    pub geburtsdatum: Option<NaiveDate>,

    #[validate(length(max = 255))]
    pub adresse: Option<String>,

    #[validate(length(max = 50), custom = "validate_phone")]
    pub telefonnummer: Option<String>,

    #[validate(email, length(max = 255))]
    pub email: Option<String>,
}

impl KundeRequest {
    pub fn into_kunde(self, id: i64) -> Kunde {
        Kunde {
            id,
            vorname: self.vorname,
            nachname: self.nachname,
            geburtsdatum: self.geburtsdatum,
            adresse: self.adresse,
            telefonnummer: self.telefonnummer,
            email: self.email,
        }
    }
}
