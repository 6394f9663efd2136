//! Domain models
//!
//! Records that map one to one onto the PostgreSQL tables. Relationships
//! are plain foreign key fields; resolving them is an explicit repository
//! or service call.

pub mod benutzer;
pub mod buchung;
pub mod fahrzeug;
pub mod kunde;
pub mod standort;

pub use benutzer::Benutzer;
pub use buchung::{Buchung, BuchungDetails, BuchungsStatus};
pub use fahrzeug::Fahrzeug;
pub use kunde::Kunde;
pub use standort::Standort;

/// A persisted record with a server-assigned identity.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human readable name used in error messages
    const NAME: &'static str;

    fn id(&self) -> i64;

    fn with_id(self, id: i64) -> Self;
}
