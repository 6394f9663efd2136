//! Buchung model
//!
//! Maps to the `buchungen` table. A booking references one customer and
//! one vehicle through plain foreign keys.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use super::{Entity, Fahrzeug, Kunde};

/// Booking status, maps to the `buchungsstatus` enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "buchungsstatus", rename_all = "lowercase")]
pub enum BuchungsStatus {
    #[default]
    Angelegt,
    Bestaetigt,
    Storniert,
    Abgeschlossen,
}

impl BuchungsStatus {
    /// Cancelled bookings do not block the vehicle
    pub fn blocks_vehicle(self) -> bool {
        self != BuchungsStatus::Storniert
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Buchung {
    pub id: i64,
    pub startdatum: NaiveDate,
    pub enddatum: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub gesamtpreis: Decimal,
    pub buchungsstatus: BuchungsStatus,
    pub kunde_id: i64,
    pub fahrzeug_id: i64,
}

impl Buchung {
    /// Inclusive date range intersection
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.startdatum <= end && start <= self.enddatum
    }
}

impl Entity for Buchung {
    const NAME: &'static str = "Buchung";

    fn id(&self) -> i64 {
        self.id
    }

    fn with_id(self, id: i64) -> Self {
        Self { id, ..self }
    }
}

/// Booking with its customer and vehicle resolved
#[derive(Debug, Clone, Serialize)]
pub struct BuchungDetails {
    pub buchung: Buchung,
    pub kunde: Kunde,
    pub fahrzeug: Fahrzeug,
}
