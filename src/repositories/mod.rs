//! Persistence layer
//!
//! One storage interface per entity type. `CrudRepository<T>` covers the
//! operations every entity shares; the entity specific traits add the
//! explicit relationship queries. Each trait has a PostgreSQL
//! implementation and an in-memory one.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{Benutzer, Buchung, Entity, Fahrzeug};
use crate::utils::errors::{AppError, AppResult};

pub mod benutzer_repository;
pub mod buchung_repository;
pub mod fahrzeug_repository;
pub mod kunde_repository;
pub mod memory;
pub mod standort_repository;

pub use benutzer_repository::PgBenutzerRepository;
pub use buchung_repository::PgBuchungRepository;
pub use fahrzeug_repository::PgFahrzeugRepository;
pub use kunde_repository::PgKundeRepository;
pub use memory::InMemoryStore;
pub use standort_repository::PgStandortRepository;

#[async_trait]
pub trait CrudRepository<T: Entity>: Send + Sync {
    /// Stores a new record under a freshly assigned id; the incoming id is ignored.
    async fn create(&self, record: T) -> AppResult<T>;

    async fn find_by_id(&self, id: i64) -> AppResult<T>;

    /// All records ordered by id
    async fn find_all(&self) -> AppResult<Vec<T>>;

    /// Upsert keyed by the record's id.
    async fn save(&self, record: T) -> AppResult<T>;

    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    async fn exists(&self, id: i64) -> AppResult<bool>;
}

#[async_trait]
pub trait FahrzeugRepository: CrudRepository<Fahrzeug> {
    async fn find_by_standort(&self, standort_id: i64) -> AppResult<Vec<Fahrzeug>>;
}

#[async_trait]
pub trait BuchungRepository: CrudRepository<Buchung> {
    async fn find_by_kunde(&self, kunde_id: i64) -> AppResult<Vec<Buchung>>;

    async fn find_by_fahrzeug(&self, fahrzeug_id: i64) -> AppResult<Vec<Buchung>>;

    /// Non-cancelled bookings of the vehicle whose inclusive date range
    /// intersects `[start, end]`, skipping `exclude_id`.
    async fn find_overlapping(
        &self,
        fahrzeug_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<i64>,
    ) -> AppResult<Vec<Buchung>>;

    /// `create`, refused with Conflict when a blocking booking of the same
    /// vehicle overlaps. Check and insert happen atomically.
    async fn create_unless_overlapping(&self, buchung: Buchung) -> AppResult<Buchung>;

    /// `save`, refused with Conflict when another blocking booking of the
    /// same vehicle overlaps. Check and write happen atomically.
    async fn save_unless_overlapping(&self, buchung: Buchung) -> AppResult<Buchung>;
}

/// Conflict raised when `existing` already occupies the vehicle
pub(crate) fn overlap_error(existing: &Buchung) -> AppError {
    AppError::Conflict(format!(
        "Fahrzeug mit id '{}' ist von {} bis {} bereits gebucht (Buchung {})",
        existing.fahrzeug_id, existing.startdatum, existing.enddatum, existing.id
    ))
}

#[async_trait]
pub trait BenutzerRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Benutzer>>;

    async fn create(&self, username: &str, password_hash: &str) -> AppResult<Benutzer>;
}

/// Moves the table's id sequence past the largest stored id, so that an
/// upsert with an explicit id never collides with a later `create`. The
/// sequence only moves forward; ids of deleted rows are not handed out again.
pub(crate) async fn sync_id_sequence(
    conn: &mut sqlx::PgConnection,
    table: &'static str,
) -> Result<(), sqlx::Error> {
    let statement = format!(
        "SELECT setval(seq, GREATEST((SELECT MAX(id) FROM {table}), pg_sequence_last_value(seq), 1)) \
         FROM (SELECT pg_get_serial_sequence('{table}', 'id')::regclass AS seq) s"
    );
    sqlx::query(&statement).execute(conn).await?;
    Ok(())
}
