//! WheelsConnect
//!
//! REST backend for a small vehicle rental: customers, locations,
//! vehicles and bookings over PostgreSQL or an in-memory store.

pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
