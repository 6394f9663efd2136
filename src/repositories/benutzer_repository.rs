use async_trait::async_trait;
use sqlx::PgPool;

use super::BenutzerRepository;
use crate::models::Benutzer;
use crate::utils::errors::AppResult;

pub struct PgBenutzerRepository {
    pool: PgPool,
}

impl PgBenutzerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BenutzerRepository for PgBenutzerRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Benutzer>> {
        let benutzer = sqlx::query_as::<_, Benutzer>("SELECT * FROM benutzer WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(benutzer)
    }

    async fn create(&self, username: &str, password_hash: &str) -> AppResult<Benutzer> {
        let benutzer = sqlx::query_as::<_, Benutzer>(
            "INSERT INTO benutzer (username, password_hash) VALUES ($1, $2) RETURNING *",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(benutzer)
    }
}
