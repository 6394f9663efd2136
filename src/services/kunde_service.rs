use std::sync::Arc;

use validator::Validate;

use crate::dto::kunde_dto::KundeRequest;
use crate::models::{Buchung, Kunde};
use crate::repositories::{BuchungRepository, CrudRepository};
use crate::utils::errors::{not_found_error, referenced_error, AppResult};

pub struct KundeService {
    kunden: Arc<dyn CrudRepository<Kunde>>,
    buchungen: Arc<dyn BuchungRepository>,
}

impl KundeService {
    pub fn new(kunden: Arc<dyn CrudRepository<Kunde>>, buchungen: Arc<dyn BuchungRepository>) -> Self {
        Self { kunden, buchungen }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Kunde>> {
        self.kunden.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Kunde> {
        self.kunden.find_by_id(id).await
    }

    pub async fn create(&self, request: KundeRequest) -> AppResult<Kunde> {
        request.validate()?;
        let kunde = self.kunden.create(request.into_kunde(0)).await?;
        tracing::info!(kunde_id = kunde.id, "✅ Kunde angelegt");
        Ok(kunde)
    }

    /// Replaces the customer stored under `id`; the path id always wins.
    pub async fn update(&self, id: i64, request: KundeRequest) -> AppResult<Kunde> {
        request.validate()?;
        if !self.kunden.exists(id).await? {
            return Err(not_found_error("Kunde", id));
        }
        self.kunden.save(request.into_kunde(id)).await
    }

    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        if !self.buchungen.find_by_kunde(id).await?.is_empty() {
            return Err(referenced_error("Kunde", id, "Buchungen"));
        }
        self.kunden.delete_by_id(id).await?;
        tracing::info!(kunde_id = id, "🗑️ Kunde gelöscht");
        Ok(())
    }

    /// Bookings of one customer
    pub async fn find_buchungen(&self, id: i64) -> AppResult<Vec<Buchung>> {
        if !self.kunden.exists(id).await? {
            return Err(not_found_error("Kunde", id));
        }
        self.buchungen.find_by_kunde(id).await
    }
}
