//! Shared application state
//!
//! The services wired to one storage backend, handed to every handler
//! through axum's `State` extractor.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::models::{Benutzer, Buchung, Fahrzeug, Kunde, Standort};
use crate::repositories::{
    BenutzerRepository, BuchungRepository, CrudRepository, FahrzeugRepository, InMemoryStore,
    PgBenutzerRepository, PgBuchungRepository, PgFahrzeugRepository, PgKundeRepository,
    PgStandortRepository,
};
use crate::services::{AuthService, BuchungService, FahrzeugService, KundeService, StandortService};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub kunde_service: Arc<KundeService>,
    pub standort_service: Arc<StandortService>,
    pub fahrzeug_service: Arc<FahrzeugService>,
    pub buchung_service: Arc<BuchungService>,
    pub auth_service: Arc<AuthService>,
    pub auth_required: bool,
}

/// The repositories one backend provides
struct Repositories {
    kunden: Arc<dyn CrudRepository<Kunde>>,
    standorte: Arc<dyn CrudRepository<Standort>>,
    fahrzeuge: Arc<dyn FahrzeugRepository>,
    buchungen: Arc<dyn BuchungRepository>,
    benutzer: Arc<dyn BenutzerRepository>,
}

impl AppState {
    /// State backed by PostgreSQL
    pub fn postgres(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self::build(
            Repositories {
                kunden: Arc::new(PgKundeRepository::new(pool.clone())),
                standorte: Arc::new(PgStandortRepository::new(pool.clone())),
                fahrzeuge: Arc::new(PgFahrzeugRepository::new(pool.clone())),
                buchungen: Arc::new(PgBuchungRepository::new(pool.clone())),
                benutzer: Arc::new(PgBenutzerRepository::new(pool)),
            },
            config,
        )
    }

    /// State backed by process memory; nothing survives a restart.
    pub fn in_memory(config: &EnvironmentConfig) -> Self {
        Self::build(
            Repositories {
                kunden: Arc::new(InMemoryStore::<Kunde>::new()),
                standorte: Arc::new(InMemoryStore::<Standort>::new()),
                fahrzeuge: Arc::new(InMemoryStore::<Fahrzeug>::new()),
                buchungen: Arc::new(InMemoryStore::<Buchung>::new()),
                benutzer: Arc::new(InMemoryStore::<Benutzer>::new()),
            },
            config,
        )
    }

    fn build(repos: Repositories, config: &EnvironmentConfig) -> Self {
        let auth_service = AuthService::new(repos.benutzer, JwtConfig::from(config))
            .with_bcrypt_cost(config.bcrypt_cost);

        Self {
            kunde_service: Arc::new(KundeService::new(
                repos.kunden.clone(),
                repos.buchungen.clone(),
            )),
            standort_service: Arc::new(StandortService::new(
                repos.standorte.clone(),
                repos.fahrzeuge.clone(),
            )),
            fahrzeug_service: Arc::new(FahrzeugService::new(
                repos.fahrzeuge.clone(),
                repos.standorte,
                repos.buchungen.clone(),
            )),
            buchung_service: Arc::new(BuchungService::new(
                repos.buchungen,
                repos.kunden,
                repos.fahrzeuge,
            )),
            auth_service: Arc::new(auth_service),
            auth_required: config.auth_required,
        }
    }
}
