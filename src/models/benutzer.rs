//! Login user
//!
//! Maps to the `benutzer` table. The password is only ever stored as a
//! bcrypt hash and never serialized.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Benutzer {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl super::Entity for Benutzer {
    const NAME: &'static str = "Benutzer";

    fn id(&self) -> i64 {
        self.id
    }

    fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }
}
