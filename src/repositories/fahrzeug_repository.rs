use async_trait::async_trait;
use sqlx::PgPool;

use super::{sync_id_sequence, CrudRepository, FahrzeugRepository};
use crate::models::Fahrzeug;
use crate::utils::errors::{not_found_error, AppResult};

pub struct PgFahrzeugRepository {
    pool: PgPool,
}

impl PgFahrzeugRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<Fahrzeug> for PgFahrzeugRepository {
    async fn create(&self, fahrzeug: Fahrzeug) -> AppResult<Fahrzeug> {
        let fahrzeug = sqlx::query_as::<_, Fahrzeug>(
            r#"
            INSERT INTO fahrzeuge (marke, modell, typ, baujahr, farbe, verfuegbar, preis, standort_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(fahrzeug.marke)
        .bind(fahrzeug.modell)
        .bind(fahrzeug.typ)
        .bind(fahrzeug.baujahr)
        .bind(fahrzeug.farbe)
        .bind(fahrzeug.verfuegbar)
        .bind(fahrzeug.preis)
        .bind(fahrzeug.standort_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(fahrzeug)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Fahrzeug> {
        sqlx::query_as::<_, Fahrzeug>("SELECT * FROM fahrzeuge WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found_error("Fahrzeug", id))
    }

    async fn find_all(&self) -> AppResult<Vec<Fahrzeug>> {
        let fahrzeuge = sqlx::query_as::<_, Fahrzeug>("SELECT * FROM fahrzeuge ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(fahrzeuge)
    }

    async fn save(&self, fahrzeug: Fahrzeug) -> AppResult<Fahrzeug> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, Fahrzeug>(
            r#"
            INSERT INTO fahrzeuge (id, marke, modell, typ, baujahr, farbe, verfuegbar, preis, standort_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE
            SET marke = EXCLUDED.marke, modell = EXCLUDED.modell, typ = EXCLUDED.typ,
                baujahr = EXCLUDED.baujahr, farbe = EXCLUDED.farbe,
                verfuegbar = EXCLUDED.verfuegbar, preis = EXCLUDED.preis,
                standort_id = EXCLUDED.standort_id
            RETURNING *
            "#,
        )
        .bind(fahrzeug.id)
        .bind(fahrzeug.marke)
        .bind(fahrzeug.modell)
        .bind(fahrzeug.typ)
        .bind(fahrzeug.baujahr)
        .bind(fahrzeug.farbe)
        .bind(fahrzeug.verfuegbar)
        .bind(fahrzeug.preis)
        .bind(fahrzeug.standort_id)
        .fetch_one(&mut *tx)
        .await?;

        sync_id_sequence(&mut *tx, "fahrzeuge").await?;
        tx.commit().await?;

        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM fahrzeuge WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Fahrzeug", id));
        }
        Ok(())
    }

    async fn exists(&self, id: i64) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM fahrzeuge WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}

#[async_trait]
impl FahrzeugRepository for PgFahrzeugRepository {
    async fn find_by_standort(&self, standort_id: i64) -> AppResult<Vec<Fahrzeug>> {
        let fahrzeuge = sqlx::query_as::<_, Fahrzeug>(
            "SELECT * FROM fahrzeuge WHERE standort_id = $1 ORDER BY id",
        )
        .bind(standort_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(fahrzeuge)
    }
}
