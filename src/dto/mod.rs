//! Request and response bodies
//!
//! Incoming bodies never carry an authoritative id: create assigns one and
//! replace takes it from the path.

pub mod auth_dto;
pub mod buchung_dto;
pub mod fahrzeug_dto;
pub mod kunde_dto;
pub mod standort_dto;
