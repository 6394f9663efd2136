//! In-memory storage
//!
//! A mutex guarded table per entity type, used by the `memory` storage
//! backend and by tests. Ids start at 1 and are never reused.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{overlap_error, BenutzerRepository, BuchungRepository, CrudRepository, FahrzeugRepository};
use crate::models::{Benutzer, Buchung, Entity, Fahrzeug};
use crate::utils::errors::{not_found_error, AppError, AppResult};

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T: Entity> Table<T> {
    fn insert_new(&mut self, record: T) -> T {
        let id = self.next_id;
        self.next_id += 1;

        let record = record.with_id(id);
        self.rows.insert(id, record.clone());
        record
    }

    fn upsert(&mut self, record: T) -> T {
        let id = record.id();
        self.next_id = self.next_id.max(id + 1);
        self.rows.insert(id, record.clone());
        record
    }
}

impl Table<Buchung> {
    fn overlapping(
        &self,
        fahrzeug_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<i64>,
    ) -> Vec<Buchung> {
        let mut buchungen: Vec<Buchung> = self
            .rows
            .values()
            .filter(|b| {
                b.fahrzeug_id == fahrzeug_id
                    && b.buchungsstatus.blocks_vehicle()
                    && b.overlaps(start, end)
                    && Some(b.id) != exclude_id
            })
            .cloned()
            .collect();
        buchungen.sort_by_key(|b| (b.startdatum, b.id));
        buchungen
    }

    fn check_free(&self, buchung: &Buchung, exclude_id: Option<i64>) -> AppResult<()> {
        if !buchung.buchungsstatus.blocks_vehicle() {
            return Ok(());
        }
        let existing = self.overlapping(
            buchung.fahrzeug_id,
            buchung.startdatum,
            buchung.enddatum,
            exclude_id,
        );
        match existing.first() {
            Some(existing) => Err(overlap_error(existing)),
            None => Ok(()),
        }
    }
}

pub struct InMemoryStore<T> {
    table: Mutex<Table<T>>,
}

impl<T: Entity> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Table<T>>> {
        self.table
            .lock()
            .map_err(|_| AppError::Internal(format!("{} store lock poisoned", T::NAME)))
    }

    fn filter(&self, predicate: impl Fn(&T) -> bool) -> AppResult<Vec<T>> {
        let table = self.lock()?;
        Ok(table.rows.values().filter(|r| predicate(*r)).cloned().collect())
    }
}

impl<T: Entity> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> CrudRepository<T> for InMemoryStore<T> {
    async fn create(&self, record: T) -> AppResult<T> {
        Ok(self.lock()?.insert_new(record))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<T> {
        let table = self.lock()?;
        table
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found_error(T::NAME, id))
    }

    async fn find_all(&self) -> AppResult<Vec<T>> {
        let table = self.lock()?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn save(&self, record: T) -> AppResult<T> {
        Ok(self.lock()?.upsert(record))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut table = self.lock()?;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found_error(T::NAME, id))
    }

    async fn exists(&self, id: i64) -> AppResult<bool> {
        let table = self.lock()?;
        Ok(table.rows.contains_key(&id))
    }
}

#[async_trait]
impl FahrzeugRepository for InMemoryStore<Fahrzeug> {
    async fn find_by_standort(&self, standort_id: i64) -> AppResult<Vec<Fahrzeug>> {
        self.filter(|f| f.standort_id == Some(standort_id))
    }
}

#[async_trait]
impl BuchungRepository for InMemoryStore<Buchung> {
    async fn find_by_kunde(&self, kunde_id: i64) -> AppResult<Vec<Buchung>> {
        let mut buchungen = self.filter(|b| b.kunde_id == kunde_id)?;
        buchungen.sort_by_key(|b| (b.startdatum, b.id));
        Ok(buchungen)
    }

    async fn find_by_fahrzeug(&self, fahrzeug_id: i64) -> AppResult<Vec<Buchung>> {
        let mut buchungen = self.filter(|b| b.fahrzeug_id == fahrzeug_id)?;
        buchungen.sort_by_key(|b| (b.startdatum, b.id));
        Ok(buchungen)
    }

    async fn find_overlapping(
        &self,
        fahrzeug_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<i64>,
    ) -> AppResult<Vec<Buchung>> {
        Ok(self.lock()?.overlapping(fahrzeug_id, start, end, exclude_id))
    }

    async fn create_unless_overlapping(&self, buchung: Buchung) -> AppResult<Buchung> {
        let mut table = self.lock()?;
        table.check_free(&buchung, None)?;
        Ok(table.insert_new(buchung))
    }

    async fn save_unless_overlapping(&self, buchung: Buchung) -> AppResult<Buchung> {
        let mut table = self.lock()?;
        table.check_free(&buchung, Some(buchung.id))?;
        Ok(table.upsert(buchung))
    }
}

#[async_trait]
impl BenutzerRepository for InMemoryStore<Benutzer> {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Benutzer>> {
        let table = self.lock()?;
        Ok(table.rows.values().find(|b| b.username == username).cloned())
    }

    async fn create(&self, username: &str, password_hash: &str) -> AppResult<Benutzer> {
        let mut table = self.lock()?;
        if table.rows.values().any(|b| b.username == username) {
            return Err(AppError::Conflict(format!(
                "Benutzer '{}' existiert bereits",
                username
            )));
        }

        Ok(table.insert_new(Benutzer {
            id: 0,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BuchungsStatus, Kunde};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn buchung(fahrzeug_id: i64, start: NaiveDate, end: NaiveDate) -> Buchung {
        Buchung {
            id: 0,
            startdatum: start,
            enddatum: end,
            gesamtpreis: Decimal::ZERO,
            buchungsstatus: BuchungsStatus::Angelegt,
            kunde_id: 1,
            fahrzeug_id,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = InMemoryStore::<Kunde>::new();
        let first = store
            .create(Kunde {
                id: 77,
                vorname: Some("Tim".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let second = store.create(Kunde::default()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.find_by_id(1).await.unwrap().vorname.as_deref(), Some("Tim"));
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let store = InMemoryStore::<Kunde>::new();
        assert!(matches!(store.find_by_id(5).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.delete_by_id(5).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_save_is_upsert_and_advances_ids() {
        let store = InMemoryStore::<Kunde>::new();
        store
            .save(Kunde {
                id: 10,
                ..Default::default()
            })
            .await
            .unwrap();
        let created = store.create(Kunde::default()).await.unwrap();
        assert_eq!(created.id, 11);

        store
            .save(Kunde {
                id: 10,
                nachname: Some("Freund".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(store.find_all().await.unwrap().len(), 2);
        assert_eq!(
            store.find_by_id(10).await.unwrap().nachname.as_deref(),
            Some("Freund")
        );
    }

    #[tokio::test]
    async fn test_second_delete_is_not_found() {
        let store = InMemoryStore::<Kunde>::new();
        let kunde = store.create(Kunde::default()).await.unwrap();
        store.delete_by_id(kunde.id).await.unwrap();
        assert!(matches!(
            store.delete_by_id(kunde.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_overlapping_skips_cancelled_and_excluded() {
        let store = InMemoryStore::<Buchung>::new();
        let a = store
            .create(buchung(1, date(2024, 6, 1), date(2024, 6, 5)))
            .await
            .unwrap();
        let mut cancelled = buchung(1, date(2024, 6, 3), date(2024, 6, 4));
        cancelled.buchungsstatus = BuchungsStatus::Storniert;
        store.create(cancelled).await.unwrap();
        store
            .create(buchung(2, date(2024, 6, 1), date(2024, 6, 5)))
            .await
            .unwrap();

        let hits = store
            .find_overlapping(1, date(2024, 6, 4), date(2024, 6, 8), None)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, a.id);

        let hits = store
            .find_overlapping(1, date(2024, 6, 4), date(2024, 6, 8), Some(a.id))
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = InMemoryStore::<Benutzer>::new();
        BenutzerRepository::create(&store, "admin", "hash").await.unwrap();
        let second = BenutzerRepository::create(&store, "admin", "other").await;
        assert!(matches!(second, Err(AppError::Conflict(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_usernames_stay_unique() {
        let store = std::sync::Arc::new(InMemoryStore::<Benutzer>::new());
        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { BenutzerRepository::create(&*store, "admin", "hash").await })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_unless_overlapping() {
        let store = InMemoryStore::<Buchung>::new();
        store
            .create_unless_overlapping(buchung(1, date(2024, 6, 1), date(2024, 6, 5)))
            .await
            .unwrap();

        let clash = store
            .create_unless_overlapping(buchung(1, date(2024, 6, 5), date(2024, 6, 6)))
            .await;
        assert!(matches!(clash, Err(AppError::Conflict(_))));

        let mut cancelled = buchung(1, date(2024, 6, 2), date(2024, 6, 3));
        cancelled.buchungsstatus = BuchungsStatus::Storniert;
        store.create_unless_overlapping(cancelled).await.unwrap();
        store
            .create_unless_overlapping(buchung(2, date(2024, 6, 1), date(2024, 6, 5)))
            .await
            .unwrap();
        assert_eq!(store.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_save_unless_overlapping_ignores_itself() {
        let store = InMemoryStore::<Buchung>::new();
        let first = store
            .create_unless_overlapping(buchung(1, date(2024, 6, 1), date(2024, 6, 5)))
            .await
            .unwrap();
        let second = store
            .create_unless_overlapping(buchung(1, date(2024, 6, 10), date(2024, 6, 12)))
            .await
            .unwrap();

        let moved = Buchung {
            enddatum: date(2024, 6, 7),
            ..first.clone()
        };
        store.save_unless_overlapping(moved).await.unwrap();

        let onto_first = Buchung {
            startdatum: date(2024, 6, 4),
            ..second
        };
        assert!(matches!(
            store.save_unless_overlapping(onto_first).await,
            Err(AppError::Conflict(_))
        ));
    }
}
