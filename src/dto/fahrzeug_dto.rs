use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::Fahrzeug;
use crate::utils::validation::validate_money;

/// Body for creating or replacing a vehicle
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FahrzeugRequest {
    #[validate(length(min = 1, max = 100))]
    pub marke: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub modell: Option<String>,

    #[validate(length(max = 100))]
    pub typ: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub baujahr: Option<i32>,

    #[validate(length(max = 50))]
    pub farbe: Option<String>,

    /// Missing means available
    pub verfuegbar: Option<bool>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(custom = "validate_money")]
    pub preis: Option<Decimal>,

    pub standort_id: Option<i64>,
}

impl FahrzeugRequest {
    pub fn into_fahrzeug(self, id: i64) -> Fahrzeug {
        Fahrzeug {
            id,
            marke: self.marke,
            modell: self.modell,
            typ: self.typ,
            baujahr: self.baujahr,
            farbe: self.farbe,
            verfuegbar: self.verfuegbar.unwrap_or(true),
            preis: self.preis,
            standort_id: self.standort_id,
        }
    }
}
