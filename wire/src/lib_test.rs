use super::*;
use serde_json::json;

fn sample_user() -> UserRecord {
    UserRecord {
        id: "1".to_owned(),
        email: "usuario@ejemplo.com".to_owned(),
        display_name: "Usuario de Prueba".to_owned(),
    }
}

// =============================================================================
// Credentials
// =============================================================================

#[test]
fn credentials_complete_requires_both_fields() {
    assert!(Credentials::new("a@b.co", "secret").is_complete());
    assert!(!Credentials::new("", "secret").is_complete());
    assert!(!Credentials::new("a@b.co", "").is_complete());
}

#[test]
fn credentials_debug_redacts_password() {
    let rendered = format!("{:?}", Credentials::new("a@b.co", "hunter22"));
    assert!(rendered.contains("a@b.co"));
    assert!(!rendered.contains("hunter22"));
}

#[test]
fn credentials_serialize_as_login_request_body() {
    let body = serde_json::to_value(Credentials::new("a@b.co", "secret")).unwrap();
    assert_eq!(body, json!({ "email": "a@b.co", "password": "secret" }));
}

// =============================================================================
// Map seed wire shape
// =============================================================================

#[test]
fn default_seed_has_single_marker_at_center() {
    let seed = MapSeed::default_seed();
    assert_eq!(seed.zoom, 15);
    assert_eq!(seed.markers.len(), 1);
    let marker = &seed.markers[0];
    assert!((marker.latitude - 19.432_608).abs() < f64::EPSILON);
    assert!((marker.longitude - -99.133_209).abs() < f64::EPSILON);
    assert!((seed.center_latitude - marker.latitude).abs() < f64::EPSILON);
}

#[test]
fn map_seed_serializes_under_initial_location() {
    let value = serde_json::to_value(MapSeed::default_seed()).unwrap();
    assert_eq!(value["initialLocation"]["zoom"], json!(15));
    assert_eq!(value["initialLocation"]["latitude"], json!(19.432_608));
    assert_eq!(value["markers"][0]["id"], json!("1"));
    assert_eq!(value["markers"][0]["title"], json!("Marcador de ejemplo"));
    assert!(value.get("center_latitude").is_none());
}

#[test]
fn marker_id_accepts_numeric_form() {
    let data = json!({
        "initialLocation": { "latitude": 1.5, "longitude": 2.5, "zoom": 12 },
        "markers": [{ "id": 7, "latitude": 1.5, "longitude": 2.5, "title": "t" }]
    });
    let seed: MapSeed = serde_json::from_value(data).unwrap();
    assert_eq!(seed.zoom, 12);
    assert_eq!(seed.markers[0].id, "7");
}

#[test]
fn marker_id_rejects_non_scalar() {
    let data = json!({
        "initialLocation": { "latitude": 1.5, "longitude": 2.5, "zoom": 12 },
        "markers": [{ "id": [1], "latitude": 1.5, "longitude": 2.5, "title": "t" }]
    });
    assert!(serde_json::from_value::<MapSeed>(data).is_err());
}

#[test]
fn map_seed_without_markers_defaults_to_empty() {
    let data = json!({ "initialLocation": { "latitude": 0.0, "longitude": 0.0, "zoom": 3 } });
    let seed: MapSeed = serde_json::from_value(data).unwrap();
    assert!(seed.markers.is_empty());
}

// =============================================================================
// Envelopes
// =============================================================================

#[test]
fn failure_reasons_render_client_messages() {
    assert_eq!(
        FailureReason::MissingFields.to_string(),
        "Por favor, proporcione correo electrónico y contraseña"
    );
    assert_eq!(FailureReason::InvalidCredentials.to_string(), "Credenciales inválidas");
}

#[test]
fn success_envelope_carries_user_and_map_data() {
    let value = serde_json::to_value(ApiResponse::success(sample_user(), MapSeed::default_seed())).unwrap();
    assert_eq!(value["success"], json!(true));
    assert_eq!(value["message"], json!(MSG_LOGIN_OK));
    assert_eq!(value["user"], json!({ "id": "1", "email": "usuario@ejemplo.com", "name": "Usuario de Prueba" }));
    assert!(value["mapData"].is_object());
    assert!(value.get("error").is_none());
}

#[test]
fn failure_envelope_omits_optional_fields() {
    let value = serde_json::to_value(ApiResponse::failure(MSG_ROUTE_NOT_FOUND)).unwrap();
    assert_eq!(value, json!({ "success": false, "message": "Ruta no encontrada" }));
}

#[test]
fn with_error_attaches_detail() {
    let value = serde_json::to_value(ApiResponse::failure("x").with_error(json!({}))).unwrap();
    assert_eq!(value["error"], json!({}));
}

#[test]
fn auth_result_converts_to_envelope() {
    let failure: ApiResponse = AuthResult::Failure { reason: FailureReason::InvalidCredentials }.into();
    assert!(!failure.success);
    assert_eq!(failure.message, "Credenciales inválidas");

    let success: ApiResponse =
        AuthResult::Success { user: sample_user(), map_seed: MapSeed::default_seed() }.into();
    assert!(success.success);
    assert_eq!(success.user, Some(sample_user()));
}

#[test]
fn envelope_parses_minimal_client_view() {
    let body = r#"{"success":true,"message":"ok","user":{"id":"1","email":"e@x.io","name":"N"}}"#;
    let parsed: ApiResponse = serde_json::from_str(body).unwrap();
    assert!(parsed.success);
    assert_eq!(parsed.user.unwrap().display_name, "N");
    assert!(parsed.map_data.is_none());
}
