//! Startup data
//!
//! Creates the initial login user and, on request, a small demo data set
//! (one customer, location, vehicle and booking).

use chrono::Utc;
use rust_decimal::Decimal;

use crate::config::environment::EnvironmentConfig;
use crate::dto::{
    buchung_dto::BuchungRequest, fahrzeug_dto::FahrzeugRequest, kunde_dto::KundeRequest,
    standort_dto::StandortRequest,
};
use crate::models::BuchungsStatus;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub async fn run(state: &AppState, config: &EnvironmentConfig) -> AppResult<()> {
    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
        state.auth_service.ensure_user(username, password).await?;
    }

    if config.seed_demo_data {
        seed_demo_data(state).await?;
    }
    Ok(())
}

/// Inserts the demo records unless customers already exist. Returns
/// whether anything was written.
pub async fn seed_demo_data(state: &AppState) -> AppResult<bool> {
    if !state.kunde_service.find_all().await?.is_empty() {
        tracing::info!("🌱 Demo-Daten übersprungen, Datenbank ist nicht leer");
        return Ok(false);
    }

    let kunde = state
        .kunde_service
        .create(KundeRequest {
            vorname: Some("Tim".to_string()),
            nachname: Some("Freund".to_string()),
            ..Default::default()
        })
        .await?;

    let standort = state
        .standort_service
        .create(StandortRequest {
            name: Some("Tim Freund".to_string()),
            adresse: Some("Friedrichsfelde Ost".to_string()),
            telefonnummer: Some("017638142915".to_string()),
        })
        .await?;

    let fahrzeug = state
        .fahrzeug_service
        .create(FahrzeugRequest {
            marke: Some("Mercedes".to_string()),
            modell: Some("S Klasse".to_string()),
            typ: Some("Limousine".to_string()),
            baujahr: Some(2022),
            farbe: Some("weiß".to_string()),
            verfuegbar: Some(true),
            preis: Some(Decimal::new(24990, 2)),
            standort_id: Some(standort.id),
        })
        .await?;

    let today = Utc::now().date_naive();
    let buchung = state
        .buchung_service
        .create(BuchungRequest {
            startdatum: today,
            enddatum: today,
            gesamtpreis: Decimal::new(24990, 2),
            buchungsstatus: BuchungsStatus::Angelegt,
            kunde_id: kunde.id,
            fahrzeug_id: fahrzeug.id,
        })
        .await?;

    tracing::info!(
        kunde_id = kunde.id,
        standort_id = standort.id,
        fahrzeug_id = fahrzeug.id,
        buchung_id = buchung.id,
        "🌱 Demo-Daten angelegt"
    );
    Ok(true)
}
