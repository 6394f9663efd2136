//! Fahrzeug model
//!
//! Maps to the `fahrzeuge` table. `standort_id` is the owning location.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Entity;

/// Rental vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Fahrzeug {
    pub id: i64,
    pub marke: Option<String>,
    pub modell: Option<String>,
    pub typ: Option<String>,
    pub baujahr: Option<i32>,
    pub farbe: Option<String>,
    pub verfuegbar: bool,
    /// Price per rental day
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub preis: Option<Decimal>,
    pub standort_id: Option<i64>,
}

impl Default for Fahrzeug {
    fn default() -> Self {
        Self {
            id: 0,
            marke: None,
            modell: None,
            typ: None,
            baujahr: None,
            farbe: None,
            verfuegbar: true,
            preis: None,
            standort_id: None,
        }
    }
}

impl Entity for Fahrzeug {
    const NAME: &'static str = "Fahrzeug";

    fn id(&self) -> i64 {
        self.id
    }

    fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }
}
