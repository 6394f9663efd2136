//! Booking service
//!
//! Besides the CRUD pass-through this is where the booking rules live:
//! referenced customer and vehicle must exist, the date range must be
//! ordered, and a vehicle can only be booked while it is flagged available
//! and not already booked for an overlapping period. The overlap check runs
//! inside the repository write so concurrent bookings cannot both succeed.

use std::sync::Arc;

use validator::Validate;

use crate::dto::buchung_dto::{BuchungRequest, VerfuegbarkeitRequest, VerfuegbarkeitResponse};
use crate::models::{Buchung, BuchungDetails, BuchungsStatus, Fahrzeug, Kunde};
use crate::repositories::{BuchungRepository, CrudRepository, FahrzeugRepository};
use crate::utils::errors::{missing_reference_error, not_found_error, AppError, AppResult};

pub struct BuchungService {
    buchungen: Arc<dyn BuchungRepository>,
    kunden: Arc<dyn CrudRepository<Kunde>>,
    fahrzeuge: Arc<dyn FahrzeugRepository>,
}

impl BuchungService {
    pub fn new(
        buchungen: Arc<dyn BuchungRepository>,
        kunden: Arc<dyn CrudRepository<Kunde>>,
        fahrzeuge: Arc<dyn FahrzeugRepository>,
    ) -> Self {
        Self {
            buchungen,
            kunden,
            fahrzeuge,
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Buchung>> {
        self.buchungen.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Buchung> {
        self.buchungen.find_by_id(id).await
    }

    pub async fn create(&self, request: BuchungRequest) -> AppResult<Buchung> {
        request.validate()?;
        let buchung = request.into_buchung(0);
        self.check_bookable(&buchung).await?;

        let buchung = self.buchungen.create_unless_overlapping(buchung).await?;
        tracing::info!(
            buchung_id = buchung.id,
            fahrzeug_id = buchung.fahrzeug_id,
            gesamtpreis = %buchung.gesamtpreis,
            "✅ Buchung angelegt"
        );
        Ok(buchung)
    }

    /// Replaces the booking stored under `id`; the path id always wins.
    pub async fn update(&self, id: i64, request: BuchungRequest) -> AppResult<Buchung> {
        request.validate()?;
        if !self.buchungen.exists(id).await? {
            return Err(not_found_error("Buchung", id));
        }

        let buchung = request.into_buchung(id);
        self.check_bookable(&buchung).await?;

        self.buchungen.save_unless_overlapping(buchung).await
    }

    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.buchungen.delete_by_id(id).await?;
        tracing::info!(buchung_id = id, "🗑️ Buchung gelöscht");
        Ok(())
    }

    /// Booking with its customer and vehicle looked up explicitly
    pub async fn find_details(&self, id: i64) -> AppResult<BuchungDetails> {
        let buchung = self.buchungen.find_by_id(id).await?;
        let kunde = self.kunden.find_by_id(buchung.kunde_id).await?;
        let fahrzeug = self.fahrzeuge.find_by_id(buchung.fahrzeug_id).await?;

        Ok(BuchungDetails {
            buchung,
            kunde,
            fahrzeug,
        })
    }

    pub async fn check_availability(
        &self,
        request: VerfuegbarkeitRequest,
    ) -> AppResult<VerfuegbarkeitResponse> {
        request.validate()?;
        let fahrzeug = self.fahrzeuge.find_by_id(request.fahrzeug_id).await?;

        let available = fahrzeug.verfuegbar
            && self
                .buchungen
                .find_overlapping(fahrzeug.id, request.startdatum, request.enddatum, None)
                .await?
                .is_empty();

        Ok(VerfuegbarkeitResponse { available })
    }

    /// Reference and availability flag checks; overlaps are left to the
    /// repository write.
    async fn check_bookable(&self, buchung: &Buchung) -> AppResult<()> {
        if !self.kunden.exists(buchung.kunde_id).await? {
            return Err(missing_reference_error("Kunde", buchung.kunde_id));
        }
        let fahrzeug = self.referenced_fahrzeug(buchung.fahrzeug_id).await?;

        if buchung.buchungsstatus == BuchungsStatus::Storniert {
            return Ok(());
        }

        if !fahrzeug.verfuegbar {
            return Err(AppError::Conflict(format!(
                "Fahrzeug mit id '{}' ist nicht verfügbar",
                fahrzeug.id
            )));
        }
        Ok(())
    }

    async fn referenced_fahrzeug(&self, fahrzeug_id: i64) -> AppResult<Fahrzeug> {
        match self.fahrzeuge.find_by_id(fahrzeug_id).await {
            Err(AppError::NotFound(_)) => Err(missing_reference_error("Fahrzeug", fahrzeug_id)),
            other => other,
        }
    }
}
