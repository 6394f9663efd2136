//! Services module
//!
//! Business logic between the HTTP handlers and the repositories. Every
//! service receives its repositories as constructor arguments.

pub mod auth_service;
pub mod buchung_service;
pub mod fahrzeug_service;
pub mod kunde_service;
pub mod seed_service;
pub mod standort_service;

pub use auth_service::AuthService;
pub use buchung_service::BuchungService;
pub use fahrzeug_service::FahrzeugService;
pub use kunde_service::KundeService;
pub use standort_service::StandortService;
