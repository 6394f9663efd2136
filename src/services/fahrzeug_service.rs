use std::sync::Arc;

use validator::Validate;

use crate::dto::fahrzeug_dto::FahrzeugRequest;
use crate::models::{Fahrzeug, Standort};
use crate::repositories::{BuchungRepository, CrudRepository, FahrzeugRepository};
use crate::utils::errors::{missing_reference_error, not_found_error, referenced_error, AppResult};

pub struct FahrzeugService {
    fahrzeuge: Arc<dyn FahrzeugRepository>,
    standorte: Arc<dyn CrudRepository<Standort>>,
    buchungen: Arc<dyn BuchungRepository>,
}

impl FahrzeugService {
    pub fn new(
        fahrzeuge: Arc<dyn FahrzeugRepository>,
        standorte: Arc<dyn CrudRepository<Standort>>,
        buchungen: Arc<dyn BuchungRepository>,
    ) -> Self {
        Self {
            fahrzeuge,
            standorte,
            buchungen,
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Fahrzeug>> {
        self.fahrzeuge.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Fahrzeug> {
        self.fahrzeuge.find_by_id(id).await
    }

    pub async fn create(&self, request: FahrzeugRequest) -> AppResult<Fahrzeug> {
        request.validate()?;
        self.check_standort(request.standort_id).await?;

        let fahrzeug = self.fahrzeuge.create(request.into_fahrzeug(0)).await?;
        tracing::info!(fahrzeug_id = fahrzeug.id, "✅ Fahrzeug angelegt");
        Ok(fahrzeug)
    }

    pub async fn update(&self, id: i64, request: FahrzeugRequest) -> AppResult<Fahrzeug> {
        request.validate()?;
        if !self.fahrzeuge.exists(id).await? {
            return Err(not_found_error("Fahrzeug", id));
        }
        self.check_standort(request.standort_id).await?;

        self.fahrzeuge.save(request.into_fahrzeug(id)).await
    }

    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        if !self.buchungen.find_by_fahrzeug(id).await?.is_empty() {
            return Err(referenced_error("Fahrzeug", id, "Buchungen"));
        }
        self.fahrzeuge.delete_by_id(id).await?;
        tracing::info!(fahrzeug_id = id, "🗑️ Fahrzeug gelöscht");
        Ok(())
    }

    /// Vehicles stationed at one location
    pub async fn find_by_standort(&self, standort_id: i64) -> AppResult<Vec<Fahrzeug>> {
        if !self.standorte.exists(standort_id).await? {
            return Err(not_found_error("Standort", standort_id));
        }
        self.fahrzeuge.find_by_standort(standort_id).await
    }

    async fn check_standort(&self, standort_id: Option<i64>) -> AppResult<()> {
        match standort_id {
            Some(id) if !self.standorte.exists(id).await? => Err(missing_reference_error("Standort", id)),
            _ => Ok(()),
        }
    }
}
