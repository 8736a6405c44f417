use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

const EMAIL: &str = "usuario@ejemplo.com";
const PASSWORD: &str = "123456";

fn default_store() -> StaticCredentialStore {
    StaticCredentialStore::new(Credentials::new(EMAIL, PASSWORD))
}

/// Wraps the static store and counts lookups.
struct CountingStore {
    inner: StaticCredentialStore,
    calls: AtomicUsize,
}

impl CountingStore {
    fn new() -> Self {
        Self { inner: default_store(), calls: AtomicUsize::new(0) }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CredentialStore for CountingStore {
    async fn lookup(&self, email: &str, password: &str) -> Result<Option<UserRecord>, CredentialStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(email, password).await
    }
}

struct BrokenStore;

#[async_trait::async_trait]
impl CredentialStore for BrokenStore {
    async fn lookup(&self, _email: &str, _password: &str) -> Result<Option<UserRecord>, CredentialStoreError> {
        Err(CredentialStoreError::Unavailable("connection reset".into()))
    }
}

// =============================================================================
// Missing fields
// =============================================================================

#[tokio::test]
async fn empty_fields_fail_without_consulting_store() {
    let store = CountingStore::new();
    for (email, password) in [("", PASSWORD), (EMAIL, ""), ("", "")] {
        let result = authenticate(&store, email, password).await.unwrap();
        assert_eq!(result, AuthResult::Failure { reason: FailureReason::MissingFields });
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn missing_fields_win_over_store_failure() {
    let result = authenticate(&BrokenStore, "", PASSWORD).await.unwrap();
    assert_eq!(result, AuthResult::Failure { reason: FailureReason::MissingFields });
}

// =============================================================================
// Matching
// =============================================================================

#[tokio::test]
async fn configured_pair_succeeds_with_map_seed() {
    let result = authenticate(&default_store(), EMAIL, PASSWORD).await.unwrap();
    let AuthResult::Success { user, map_seed } = result else {
        panic!("expected success");
    };
    assert_eq!(user.email, EMAIL);
    assert_eq!(user.id, "1");
    assert_eq!(user.display_name, "Usuario de Prueba");
    assert_eq!(map_seed.zoom, 15);
    let first = &map_seed.markers[0];
    assert!((first.latitude - 19.432_608).abs() < f64::EPSILON);
    assert!((first.longitude - -99.133_209).abs() < f64::EPSILON);
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let result = authenticate(&default_store(), EMAIL, "wrong").await.unwrap();
    assert_eq!(result, AuthResult::Failure { reason: FailureReason::InvalidCredentials });
}

#[tokio::test]
async fn comparison_is_exact() {
    let store = default_store();
    for (email, password) in [
        ("USUARIO@ejemplo.com", PASSWORD),
        (" usuario@ejemplo.com", PASSWORD),
        (EMAIL, "123456 "),
        ("otro@ejemplo.com", PASSWORD),
    ] {
        let result = authenticate(&store, email, password).await.unwrap();
        assert_eq!(
            result,
            AuthResult::Failure { reason: FailureReason::InvalidCredentials },
            "expected rejection for {email:?}/{password:?}"
        );
    }
}

#[tokio::test]
async fn repeated_success_is_identical() {
    let store = default_store();
    let first = authenticate(&store, EMAIL, PASSWORD).await.unwrap();
    let second = authenticate(&store, EMAIL, PASSWORD).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn store_failure_propagates() {
    let err = authenticate(&BrokenStore, EMAIL, PASSWORD).await.unwrap_err();
    assert!(err.to_string().contains("connection reset"));
}
