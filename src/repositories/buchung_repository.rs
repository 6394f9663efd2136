use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgExecutor, PgPool};

use super::{overlap_error, sync_id_sequence, BuchungRepository, CrudRepository};
use crate::models::Buchung;
use crate::utils::errors::{missing_reference_error, not_found_error, AppResult};

const INSERT_BUCHUNG: &str = r#"
    INSERT INTO buchungen (startdatum, enddatum, gesamtpreis, buchungsstatus, kunde_id, fahrzeug_id)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING *
"#;

const UPSERT_BUCHUNG: &str = r#"
    INSERT INTO buchungen (id, startdatum, enddatum, gesamtpreis, buchungsstatus, kunde_id, fahrzeug_id)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    ON CONFLICT (id) DO UPDATE
    SET startdatum = EXCLUDED.startdatum, enddatum = EXCLUDED.enddatum,
        gesamtpreis = EXCLUDED.gesamtpreis, buchungsstatus = EXCLUDED.buchungsstatus,
        kunde_id = EXCLUDED.kunde_id, fahrzeug_id = EXCLUDED.fahrzeug_id
    RETURNING *
"#;

async fn insert<'e>(executor: impl PgExecutor<'e>, buchung: &Buchung) -> Result<Buchung, sqlx::Error> {
    sqlx::query_as::<_, Buchung>(INSERT_BUCHUNG)
        .bind(buchung.startdatum)
        .bind(buchung.enddatum)
        .bind(buchung.gesamtpreis)
        .bind(buchung.buchungsstatus)
        .bind(buchung.kunde_id)
        .bind(buchung.fahrzeug_id)
        .fetch_one(executor)
        .await
}

async fn upsert(conn: &mut PgConnection, buchung: &Buchung) -> Result<Buchung, sqlx::Error> {
    let saved = sqlx::query_as::<_, Buchung>(UPSERT_BUCHUNG)
        .bind(buchung.id)
        .bind(buchung.startdatum)
        .bind(buchung.enddatum)
        .bind(buchung.gesamtpreis)
        .bind(buchung.buchungsstatus)
        .bind(buchung.kunde_id)
        .bind(buchung.fahrzeug_id)
        .fetch_one(&mut *conn)
        .await?;

    sync_id_sequence(conn, "buchungen").await?;
    Ok(saved)
}

async fn overlapping<'e>(
    executor: impl PgExecutor<'e>,
    fahrzeug_id: i64,
    start: NaiveDate,
    end: NaiveDate,
    exclude_id: Option<i64>,
) -> Result<Vec<Buchung>, sqlx::Error> {
    sqlx::query_as::<_, Buchung>(
        r#"
        SELECT * FROM buchungen
        WHERE fahrzeug_id = $1
          AND buchungsstatus <> 'storniert'
          AND startdatum <= $3
          AND $2 <= enddatum
          AND ($4::BIGINT IS NULL OR id <> $4)
        ORDER BY startdatum, id
        "#,
    )
    .bind(fahrzeug_id)
    .bind(start)
    .bind(end)
    .bind(exclude_id)
    .fetch_all(executor)
    .await
}

/// Locks the vehicle row so that bookings of one vehicle are written one
/// at a time, then checks for overlaps inside the same transaction.
async fn lock_and_check(
    conn: &mut PgConnection,
    buchung: &Buchung,
    exclude_id: Option<i64>,
) -> AppResult<()> {
    let locked: Option<(i64,)> = sqlx::query_as("SELECT id FROM fahrzeuge WHERE id = $1 FOR UPDATE")
        .bind(buchung.fahrzeug_id)
        .fetch_optional(&mut *conn)
        .await?;
    if locked.is_none() {
        return Err(missing_reference_error("Fahrzeug", buchung.fahrzeug_id));
    }

    if !buchung.buchungsstatus.blocks_vehicle() {
        return Ok(());
    }

    let existing = overlapping(
        &mut *conn,
        buchung.fahrzeug_id,
        buchung.startdatum,
        buchung.enddatum,
        exclude_id,
    )
    .await?;
    match existing.first() {
        Some(existing) => Err(overlap_error(existing)),
        None => Ok(()),
    }
}

pub struct PgBuchungRepository {
    pool: PgPool,
}

impl PgBuchungRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository<Buchung> for PgBuchungRepository {
    async fn create(&self, buchung: Buchung) -> AppResult<Buchung> {
        Ok(insert(&self.pool, &buchung).await?)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Buchung> {
        sqlx::query_as::<_, Buchung>("SELECT * FROM buchungen WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found_error("Buchung", id))
    }

    async fn find_all(&self) -> AppResult<Vec<Buchung>> {
        let buchungen = sqlx::query_as::<_, Buchung>("SELECT * FROM buchungen ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(buchungen)
    }

    async fn save(&self, buchung: Buchung) -> AppResult<Buchung> {
        let mut tx = self.pool.begin().await?;
        let saved = upsert(&mut *tx, &buchung).await?;
        tx.commit().await?;

        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM buchungen WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Buchung", id));
        }
        Ok(())
    }

    async fn exists(&self, id: i64) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM buchungen WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}

#[async_trait]
impl BuchungRepository for PgBuchungRepository {
    async fn find_by_kunde(&self, kunde_id: i64) -> AppResult<Vec<Buchung>> {
        let buchungen = sqlx::query_as::<_, Buchung>(
            "SELECT * FROM buchungen WHERE kunde_id = $1 ORDER BY startdatum, id",
        )
        .bind(kunde_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(buchungen)
    }

    async fn find_by_fahrzeug(&self, fahrzeug_id: i64) -> AppResult<Vec<Buchung>> {
        let buchungen = sqlx::query_as::<_, Buchung>(
            "SELECT * FROM buchungen WHERE fahrzeug_id = $1 ORDER BY startdatum, id",
        )
        .bind(fahrzeug_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(buchungen)
    }

    async fn find_overlapping(
        &self,
        fahrzeug_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<i64>,
    ) -> AppResult<Vec<Buchung>> {
        Ok(overlapping(&self.pool, fahrzeug_id, start, end, exclude_id).await?)
    }

    async fn create_unless_overlapping(&self, buchung: Buchung) -> AppResult<Buchung> {
        let mut tx = self.pool.begin().await?;
        lock_and_check(&mut *tx, &buchung, None).await?;
        let created = insert(&mut *tx, &buchung).await?;
        tx.commit().await?;

        Ok(created)
    }

    async fn save_unless_overlapping(&self, buchung: Buchung) -> AppResult<Buchung> {
        let mut tx = self.pool.begin().await?;
        lock_and_check(&mut *tx, &buchung, Some(buchung.id)).await?;
        let saved = upsert(&mut *tx, &buchung).await?;
        tx.commit().await?;

        Ok(saved)
    }
}
