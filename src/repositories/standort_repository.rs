use async_trait::async_trait;
use sqlx::PgPool;

use super::{sync_id_sequence, CrudRepository};
use crate::models::Standort;
use crate::utils::errors::{not_found_error, AppResult};

pub struct PgStandortRepository {
    pool: PgPool,
}

impl PgStandortRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<Standort> for PgStandortRepository {
    async fn create(&self, standort: Standort) -> AppResult<Standort> {
        let standort = sqlx::query_as::<_, Standort>(
            "INSERT INTO standorte (name, adresse, telefonnummer) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(standort.name)
        .bind(standort.adresse)
        .bind(standort.telefonnummer)
        .fetch_one(&self.pool)
        .await?;

        Ok(standort)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Standort> {
        sqlx::query_as::<_, Standort>("SELECT * FROM standorte WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found_error("Standort", id))
    }

    async fn find_all(&self) -> AppResult<Vec<Standort>> {
        let standorte = sqlx::query_as::<_, Standort>("SELECT * FROM standorte ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(standorte)
    }

    async fn save(&self, standort: Standort) -> AppResult<Standort> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, Standort>(
            r#"
            INSERT INTO standorte (id, name, adresse, telefonnummer)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name, adresse = EXCLUDED.adresse,
                telefonnummer = EXCLUDED.telefonnummer
            RETURNING *
            "#,
        )
        .bind(standort.id)
        .bind(standort.name)
        .bind(standort.adresse)
        .bind(standort.telefonnummer)
        .fetch_one(&mut *tx)
        .await?;

        sync_id_sequence(&mut *tx, "standorte").await?;
        tx.commit().await?;

        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM standorte WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Standort", id));
        }
        Ok(())
    }

    async fn exists(&self, id: i64) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM standorte WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}
