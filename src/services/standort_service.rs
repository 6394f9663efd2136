use std::sync::Arc;

use validator::Validate;

use crate::dto::standort_dto::StandortRequest;
use crate::models::Standort;
use crate::repositories::{CrudRepository, FahrzeugRepository};
use crate::utils::errors::{not_found_error, referenced_error, AppResult};

pub struct StandortService {
    standorte: Arc<dyn CrudRepository<Standort>>,
    fahrzeuge: Arc<dyn FahrzeugRepository>,
}

impl StandortService {
    pub fn new(
        standorte: Arc<dyn CrudRepository<Standort>>,
        fahrzeuge: Arc<dyn FahrzeugRepository>,
    ) -> Self {
        Self { standorte, fahrzeuge }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Standort>> {
        self.standorte.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Standort> {
        self.standorte.find_by_id(id).await
    }

    pub async fn create(&self, request: StandortRequest) -> AppResult<Standort> {
        request.validate()?;
        let standort = self.standorte.create(request.into_standort(0)).await?;
        tracing::info!(standort_id = standort.id, "✅ Standort angelegt");
        Ok(standort)
    }

    pub async fn update(&self, id: i64, request: StandortRequest) -> AppResult<Standort> {
        request.validate()?;
        if !self.standorte.exists(id).await? {
            return Err(not_found_error("Standort", id));
        }
        self.standorte.save(request.into_standort(id)).await
    }

    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        if !self.fahrzeuge.find_by_standort(id).await?.is_empty() {
            return Err(referenced_error("Standort", id, "Fahrzeugen"));
        }
        self.standorte.delete_by_id(id).await?;
        tracing::info!(standort_id = id, "🗑️ Standort gelöscht");
        Ok(())
    }
}
