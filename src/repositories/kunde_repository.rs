use async_trait::async_trait;
use sqlx::PgPool;

use super::{sync_id_sequence, CrudRepository};
use crate::models::Kunde;
use crate::utils::errors::{not_found_error, AppResult};

pub struct PgKundeRepository {
    pool: PgPool,
}

impl PgKundeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<Kunde> for PgKundeRepository {
    async fn create(&self, kunde: Kunde) -> AppResult<Kunde> {
        let kunde = sqlx::query_as::<_, Kunde>(
            r#"
            INSERT INTO kunden (vorname, nachname, geburtsdatum, adresse, telefonnummer, email)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(kunde.vorname)
        .bind(kunde.nachname)
        .bind(kunde.geburtsdatum)
        .bind(kunde.adresse)
        .bind(kunde.telefonnummer)
        .bind(kunde.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(kunde)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Kunde> {
        sqlx::query_as::<_, Kunde>("SELECT * FROM kunden WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found_error("Kunde", id))
    }

    async fn find_all(&self) -> AppResult<Vec<Kunde>> {
        let kunden = sqlx::query_as::<_, Kunde>("SELECT * FROM kunden ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(kunden)
    }

    async fn save(&self, kunde: Kunde) -> AppResult<Kunde> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, Kunde>(
            r#"
            INSERT INTO kunden (id, vorname, nachname, geburtsdatum, adresse, telefonnummer, email)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET vorname = EXCLUDED.vorname, nachname = EXCLUDED.nachname,
                geburtsdatum = EXCLUDED.geburtsdatum, adresse = EXCLUDED.adresse,
                telefonnummer = EXCLUDED.telefonnummer, email = EXCLUDED.email
            RETURNING *
            "#,
        )
        .bind(kunde.id)
        .bind(kunde.vorname)
        .bind(kunde.nachname)
        .bind(kunde.geburtsdatum)
        .bind(kunde.adresse)
        .bind(kunde.telefonnummer)
        .bind(kunde.email)
        .fetch_one(&mut *tx)
        .await?;

        sync_id_sequence(&mut *tx, "kunden").await?;
        tx.commit().await?;

        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM kunden WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Kunde", id));
        }
        Ok(())
    }

    async fn exists(&self, id: i64) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM kunden WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}
