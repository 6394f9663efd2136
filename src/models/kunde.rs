//! Kunde model
//!
//! Maps to the `kunden` table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Entity;

/// Customer of the rental company
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Kunde {
    pub id: i64,
    pub vorname: Option<String>,
    pub nachname: Option<String>,
    pub geburtsdatum: Option<NaiveDate>,
    pub adresse: Option<String>,
    pub telefonnummer: Option<String>,
    pub email: Option<String>,
}

impl Entity for Kunde {
    const NAME: &'static str = "Kunde";

    fn id(&self) -> i64 {
        self.id
    }

    fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }
}
