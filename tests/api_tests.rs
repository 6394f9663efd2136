//! End-to-end tests against the router over the in-memory store.

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use wheels_connect::config::EnvironmentConfig;
use wheels_connect::routes::create_router;
use wheels_connect::state::AppState;

fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        bcrypt_cost: 4,
        ..EnvironmentConfig::default()
    }
}

fn create_test_app() -> Router {
    let config = test_config();
    create_router(AppState::in_memory(&config), &config)
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
    raw: Vec<u8>,
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let raw = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    let body = serde_json::from_slice(&raw).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
        raw,
    }
}

async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::POST, uri, Some(body), None).await
}

async fn put(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::PUT, uri, Some(body), None).await
}

async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::DELETE, uri, None, None).await
}

/// Creates Standort 1, Fahrzeug 1 and Kunde 1
async fn seed_fleet(app: &Router) {
    let standort = post(
        app,
        "/api/standorte",
        json!({"name": "Tim Freund", "adresse": "Friedrichsfelde Ost", "telefonnummer": "017638142915"}),
    )
    .await;
    assert_eq!(standort.status, StatusCode::CREATED);

    let fahrzeug = post(
        app,
        "/api/fahrzeuge",
        json!({
            "marke": "Mercedes",
            "modell": "S Klasse",
            "typ": "Limousine",
            "baujahr": 2022,
            "farbe": "weiß",
            "preis": 249.90,
            "standortId": 1
        }),
    )
    .await;
    assert_eq!(fahrzeug.status, StatusCode::CREATED);

    let kunde = post(app, "/api/kunden", json!({"vorname": "Tim", "nachname": "Freund"})).await;
    assert_eq!(kunde.status, StatusCode::CREATED);
}

fn buchung_body(start: &str, end: &str, preis: f64) -> Value {
    json!({
        "startdatum": start,
        "enddatum": end,
        "gesamtpreis": preis,
        "kundeId": 1,
        "fahrzeugId": 1
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = get(&app, "/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["timestamp"].is_string());
}

#[tokio::test]
async fn test_create_and_get_kunde() {
    let app = create_test_app();

    let created = post(&app, "/api/kunden", json!({"vorname": "Tim", "nachname": "Freund"})).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["id"], 1);
    assert_eq!(
        created.headers.get(header::LOCATION).unwrap(),
        "/api/kunden/1"
    );

    let fetched = get(&app, "/api/kunden/1").await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["vorname"], "Tim");
    assert_eq!(fetched.body["nachname"], "Freund");

    let all = get(&app, "/api/kunden").await;
    assert_eq!(all.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = create_test_app();

    for uri in [
        "/api/kunden/99",
        "/api/fahrzeuge/99",
        "/api/standorte/99",
        "/api/buchungen/99",
        "/buchungen/99",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(response.body["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = create_test_app();
    let response = get(&app, "/api/kunden/abc").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_update_uses_path_id() {
    let app = create_test_app();
    post(&app, "/api/kunden", json!({"vorname": "Tim"})).await;

    let updated = put(
        &app,
        "/api/kunden/1",
        json!({"id": 42, "vorname": "Tim", "email": "tim@example.de"}),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["id"], 1);
    assert_eq!(updated.body["email"], "tim@example.de");

    assert_eq!(get(&app, "/api/kunden/42").await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        put(&app, "/api/kunden/7", json!({"vorname": "Niemand"})).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_delete_twice_yields_not_found() {
    let app = create_test_app();
    post(&app, "/api/standorte", json!({"name": "Mitte"})).await;

    let first = delete(&app, "/api/standorte/1").await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(first.raw.is_empty());

    let second = delete(&app, "/api/standorte/1").await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_price_update() {
    let app = create_test_app();
    seed_fleet(&app).await;

    let created = post(&app, "/api/buchungen", buchung_body("2024-05-01", "2024-05-01", 249.90)).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(
        created.headers.get(header::LOCATION).unwrap(),
        "/api/buchungen/1"
    );
    assert_eq!(created.body["buchungsstatus"], "Angelegt");
    let preis = created.body["gesamtpreis"].as_f64().unwrap();
    assert!((preis - 249.90).abs() < 1e-9);

    let updated = put(&app, "/api/buchungen/1", buchung_body("2024-05-01", "2024-05-01", 0.0)).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["gesamtpreis"].as_f64().unwrap(), 0.0);

    let fetched = get(&app, "/buchungen/1").await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["gesamtpreis"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn test_booking_end_before_start_is_rejected() {
    let app = create_test_app();
    seed_fleet(&app).await;

    let response = post(&app, "/api/buchungen", buchung_body("2024-05-10", "2024-05-01", 100.0)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_booking_with_unknown_kunde_is_rejected() {
    let app = create_test_app();
    seed_fleet(&app).await;

    let mut body = buchung_body("2024-05-01", "2024-05-02", 100.0);
    body["kundeId"] = json!(99);
    let response = post(&app, "/api/buchungen", body).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_overlapping_booking_is_conflict() {
    let app = create_test_app();
    seed_fleet(&app).await;

    let first = post(&app, "/api/buchungen", buchung_body("2024-05-01", "2024-05-05", 500.0)).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let overlapping = post(&app, "/api/buchungen", buchung_body("2024-05-05", "2024-05-08", 300.0)).await;
    assert_eq!(overlapping.status, StatusCode::CONFLICT);
    assert_eq!(overlapping.body["code"], "CONFLICT");

    let after = post(&app, "/api/buchungen", buchung_body("2024-05-06", "2024-05-08", 300.0)).await;
    assert_eq!(after.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_check_availability() {
    let app = create_test_app();
    seed_fleet(&app).await;
    post(&app, "/api/buchungen", buchung_body("2024-05-01", "2024-05-05", 500.0)).await;

    let busy = post(
        &app,
        "/api/buchungen/check-availability",
        json!({"fahrzeugId": 1, "startdatum": "2024-05-03", "enddatum": "2024-05-04"}),
    )
    .await;
    assert_eq!(busy.status, StatusCode::OK);
    assert_eq!(busy.body["available"], false);

    let free = post(
        &app,
        "/api/buchungen/check-availability",
        json!({"fahrzeugId": 1, "startdatum": "2024-06-01", "enddatum": "2024-06-03"}),
    )
    .await;
    assert_eq!(free.body["available"], true);
}

#[tokio::test]
async fn test_booking_details_and_relations() {
    let app = create_test_app();
    seed_fleet(&app).await;
    post(&app, "/api/buchungen", buchung_body("2024-05-01", "2024-05-02", 249.90)).await;

    let details = get(&app, "/api/buchungen/1/details").await;
    assert_eq!(details.status, StatusCode::OK);
    assert_eq!(details.body["kunde"]["vorname"], "Tim");
    assert_eq!(details.body["fahrzeug"]["marke"], "Mercedes");

    let kunde_buchungen = get(&app, "/api/kunden/1/buchungen").await;
    assert_eq!(kunde_buchungen.body.as_array().unwrap().len(), 1);

    let fahrzeuge = get(&app, "/api/standorte/1/fahrzeuge").await;
    assert_eq!(fahrzeuge.body.as_array().unwrap().len(), 1);
    assert_eq!(fahrzeuge.body[0]["standortId"], 1);

    assert_eq!(
        get(&app, "/api/standorte/9/fahrzeuge").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_delete_referenced_records_is_conflict() {
    let app = create_test_app();
    seed_fleet(&app).await;
    post(&app, "/api/buchungen", buchung_body("2024-05-01", "2024-05-02", 100.0)).await;

    assert_eq!(delete(&app, "/api/kunden/1").await.status, StatusCode::CONFLICT);
    assert_eq!(delete(&app, "/api/fahrzeuge/1").await.status, StatusCode::CONFLICT);
    assert_eq!(delete(&app, "/api/standorte/1").await.status, StatusCode::CONFLICT);

    assert_eq!(delete(&app, "/api/buchungen/1").await.status, StatusCode::OK);
    assert_eq!(delete(&app, "/api/kunden/1").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = create_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/kunden")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let app = create_test_app();
    let response = post(&app, "/api/kunden", json!({"email": "keine-mail"})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_with_unknown_user_is_unauthorized() {
    let app = create_test_app();
    let response = post(&app, "/login", json!({"username": "niemand", "password": "x"})).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_auth_guard() {
    let config = EnvironmentConfig {
        auth_required: true,
        ..test_config()
    };
    let state = AppState::in_memory(&config);
    state
        .auth_service
        .ensure_user("admin", "geheim123")
        .await
        .unwrap();
    let app = create_router(state, &config);

    assert_eq!(get(&app, "/api/kunden").await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(get(&app, "/health").await.status, StatusCode::OK);

    let login = post(&app, "/login", json!({"username": "admin", "password": "geheim123"})).await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["success"], true);
    assert_eq!(login.body["message"], "Logged in successfully");
    assert_eq!(login.body["expiresIn"], 900);
    let token = login.body["token"].as_str().unwrap().to_string();

    let authorized = send(&app, Method::GET, "/api/kunden", None, Some(&token)).await;
    assert_eq!(authorized.status, StatusCode::OK);

    let forged = send(&app, Method::GET, "/api/kunden", None, Some("not.a.token")).await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_values_beyond_column_limits_are_rejected() {
    let app = create_test_app();
    seed_fleet(&app).await;

    let preis = post(&app, "/api/fahrzeuge", json!({"marke": "Mercedes", "preis": 1e9})).await;
    assert_eq!(preis.status, StatusCode::BAD_REQUEST);
    assert_eq!(preis.body["code"], "VALIDATION_ERROR");

    let telefon = format!("0176{}38142915", " ".repeat(60));
    let kunde = post(&app, "/api/kunden", json!({"telefonnummer": telefon})).await;
    assert_eq!(kunde.status, StatusCode::BAD_REQUEST);
    assert_eq!(kunde.body["code"], "VALIDATION_ERROR");

    let standort = post(&app, "/api/standorte", json!({"name": "Mitte", "telefonnummer": telefon})).await;
    assert_eq!(standort.status, StatusCode::BAD_REQUEST);

    let email = format!("{}@example.de", "a".repeat(250));
    let kunde = post(&app, "/api/kunden", json!({"email": email})).await;
    assert_eq!(kunde.status, StatusCode::BAD_REQUEST);

    let buchung = post(&app, "/api/buchungen", buchung_body("2024-05-01", "2024-05-01", 1e9)).await;
    assert_eq!(buchung.status, StatusCode::BAD_REQUEST);
    assert_eq!(buchung.body["code"], "VALIDATION_ERROR");

    let highest = post(&app, "/api/buchungen", buchung_body("2024-05-01", "2024-05-01", 99_999_999.0)).await;
    assert_eq!(highest.status, StatusCode::CREATED);

    assert_eq!(get(&app, "/api/kunden").await.body.as_array().unwrap().len(), 1);
}
