use super::*;
use crate::net::config::ClientTimeouts;

const USER_BODY: &str = r#"{"id":"1","email":"usuario@ejemplo.com","name":"Usuario de Prueba"}"#;

fn success_body(with_map: bool) -> String {
    let map = if with_map {
        r#","mapData":{"initialLocation":{"latitude":19.432608,"longitude":-99.133209,"zoom":15},"markers":[{"id":1,"latitude":19.432608,"longitude":-99.133209,"title":"Marcador de ejemplo"}]}"#
    } else {
        ""
    };
    format!(r#"{{"success":true,"message":"Inicio de sesión exitoso","user":{USER_BODY}{map}}}"#)
}

// =============================================================================
// classify_reply: success
// =============================================================================

#[test]
fn ok_reply_yields_user_and_map_seed() {
    let success = classify_reply(200, "OK", &success_body(true)).unwrap();
    assert_eq!(success.user.email, "usuario@ejemplo.com");
    assert_eq!(success.user.display_name, "Usuario de Prueba");
    let seed = success.map_seed.unwrap();
    assert_eq!(seed.zoom, 15);
    assert_eq!(seed.markers[0].id, "1");
}

#[test]
fn ok_reply_without_map_data_is_still_success() {
    let success = classify_reply(200, "OK", &success_body(false)).unwrap();
    assert!(success.map_seed.is_none());
}

#[test]
fn ok_reply_with_success_false_is_invalid_credentials() {
    let err = classify_reply(200, "OK", r#"{"success":false,"message":"no"}"#).unwrap_err();
    assert_eq!(err, LoginError::InvalidCredentials { message: "no".into() });
}

#[test]
fn ok_reply_without_user_is_transport_fault() {
    let err = classify_reply(200, "OK", r#"{"success":true,"message":"ok"}"#).unwrap_err();
    assert_eq!(err, LoginError::Transport("Respuesta vacía del servidor".into()));
}

#[test]
fn ok_reply_with_garbage_body_is_transport_fault() {
    let err = classify_reply(200, "OK", "<html>").unwrap_err();
    assert!(err.is_transport());
    assert!(err.to_string().starts_with("respuesta inválida del servidor"));
}

// =============================================================================
// classify_reply: failures
// =============================================================================

#[test]
fn status_400_is_missing_fields_with_server_message() {
    let body = r#"{"success":false,"message":"Por favor, proporcione correo electrónico y contraseña"}"#;
    let err = classify_reply(400, "Bad Request", body).unwrap_err();
    assert_eq!(
        err,
        LoginError::MissingFields { message: "Por favor, proporcione correo electrónico y contraseña".into() }
    );
}

#[test]
fn status_401_is_invalid_credentials() {
    let err = classify_reply(401, "Unauthorized", r#"{"success":false,"message":"Credenciales inválidas"}"#)
        .unwrap_err();
    assert_eq!(err.to_string(), "Credenciales inválidas");
    assert!(matches!(err, LoginError::InvalidCredentials { .. }));
}

#[test]
fn status_500_is_server_internal() {
    let body = r#"{"success":false,"message":"Error en el servidor","error":"Error interno"}"#;
    let err = classify_reply(500, "Internal Server Error", body).unwrap_err();
    assert_eq!(err, LoginError::ServerInternal { message: "Error en el servidor".into() });
}

#[test]
fn unparseable_error_body_falls_back_to_status_line() {
    let err = classify_reply(401, "Unauthorized", "").unwrap_err();
    assert_eq!(err, LoginError::InvalidCredentials { message: "Error: 401 - Unauthorized".into() });

    let err = classify_reply(503, "Service Unavailable", "upstream down").unwrap_err();
    assert_eq!(err, LoginError::ServerInternal { message: "Error: 503 - Service Unavailable".into() });
}

#[test]
fn other_statuses_are_transport_faults() {
    let err = classify_reply(404, "Not Found", r#"{"success":false,"message":"Ruta no encontrada"}"#).unwrap_err();
    assert_eq!(err, LoginError::Transport("Error: 404 - Not Found".into()));
}

// =============================================================================
// LoginError
// =============================================================================

#[test]
fn blank_transport_message_becomes_unknown_error() {
    assert_eq!(LoginError::transport(""), LoginError::Transport("Error desconocido".into()));
    assert_eq!(LoginError::transport("  "), LoginError::Transport("Error desconocido".into()));
    assert_eq!(LoginError::transport("refused"), LoginError::Transport("refused".into()));
}

// =============================================================================
// HttpAuthApi
// =============================================================================

#[tokio::test]
async fn unreachable_server_is_transport_fault() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpAuthApi::new(ClientConfig::new(&format!("http://{addr}"))).unwrap();
    let err = api.login(&Credentials::new("usuario@ejemplo.com", "123456")).await.unwrap_err();
    assert!(err.is_transport(), "expected transport fault, got {err:?}");
}

#[tokio::test]
async fn stalled_server_is_transport_fault_after_timeout() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = ClientConfig::new(&format!("http://{addr}"))
        .with_timeouts(ClientTimeouts { connect_secs: 1, request_secs: 1 });
    let api = HttpAuthApi::new(config).unwrap();

    let started = std::time::Instant::now();
    let err = api.login(&Credentials::new("usuario@ejemplo.com", "123456")).await.unwrap_err();
    assert!(err.is_transport(), "expected transport fault, got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn client_keeps_configured_base_url() {
    let api = HttpAuthApi::new(ClientConfig::new("http://example.test/")).unwrap();
    assert_eq!(api.config().base_url, "http://example.test");
}
