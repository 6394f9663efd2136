use serde::Deserialize;
use validator::Validate;

use crate::models::Standort;
use crate::utils::validation::validate_phone;

/// Body for creating or replacing a location
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StandortRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 255))]
    pub adresse: Option<String>,

    #[validate(length(max = 50), custom = "validate_phone")]
    pub telefonnummer: Option<String>,
}

impl StandortRequest {
    pub fn into_standort(self, id: i64) -> Standort {
        Standort {
            id,
            name: self.name,
            adresse: self.adresse,
            telefonnummer: self.telefonnummer,
        }
    }
}
