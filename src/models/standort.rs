use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Entity;

/// Rental location, maps to the `standorte` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Standort {
    pub id: i64,
    pub name: Option<String>,
    pub adresse: Option<String>,
    pub telefonnummer: Option<String>,
}

impl Entity for Standort {
    const NAME: &'static str = "Standort";

    fn id(&self) -> i64 {
        self.id
    }

    fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }
}
