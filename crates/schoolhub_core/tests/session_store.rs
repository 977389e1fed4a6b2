use schoolhub_core::{
    CredentialDirectory, Identity, SessionStore, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD,
};

fn two_user_directory() -> CredentialDirectory {
    CredentialDirectory::builder()
        .user(
            Identity::new("1", "admin@school.com", "Admin User", "Administrator"),
            "admin123",
        )
        .user(
            Identity::new("2", "clerk@school.com", "Front Desk", "Clerk"),
            "desk-pass",
        )
        .build()
        .unwrap()
}

#[test]
fn login_with_valid_pair_sets_current_identity() {
    let mut store = SessionStore::new(two_user_directory());

    assert!(store.login("clerk@school.com", "desk-pass"));
    let identity = store.current_identity().unwrap();
    assert_eq!(identity.id, "2");
    assert_eq!(identity.email, "clerk@school.com");
    assert_eq!(identity.name, "Front Desk");
    assert_eq!(identity.role, "Clerk");
    assert!(store.is_authenticated());
}

#[test]
fn every_directory_pair_logs_in() {
    let mut store = SessionStore::new(two_user_directory());
    for (email, password) in [
        ("admin@school.com", "admin123"),
        ("clerk@school.com", "desk-pass"),
    ] {
        assert!(store.login(email, password));
        assert_eq!(store.current_identity().unwrap().email, email);
    }
}

#[test]
fn login_rejects_non_verbatim_pairs_without_creating_session() {
    let mut store = SessionStore::new(two_user_directory());

    for (email, password) in [
        ("ADMIN@school.com", "admin123"),
        ("admin@school.com", "ADMIN123"),
        ("admin@school.com ", "admin123"),
        ("admin@school.com", "desk-pass"),
        ("nobody@school.com", "admin123"),
        ("", ""),
    ] {
        assert!(!store.login(email, password), "{email}/{password} must fail");
        assert!(store.current_identity().is_none());
    }
}

#[test]
fn failed_login_keeps_existing_session() {
    let mut store = SessionStore::new(two_user_directory());
    assert!(store.login("admin@school.com", "admin123"));
    let session_id = store.current_session().unwrap().session_id();

    assert!(!store.login("clerk@school.com", "wrong"));
    assert_eq!(store.current_identity().unwrap().id, "1");
    assert_eq!(store.current_session().unwrap().session_id(), session_id);
}

#[test]
fn successful_login_replaces_existing_session() {
    let mut store = SessionStore::new(two_user_directory());
    assert!(store.login("admin@school.com", "admin123"));
    assert!(store.login("clerk@school.com", "desk-pass"));
    assert_eq!(store.current_identity().unwrap().id, "2");
}

#[test]
fn logout_always_clears_and_is_idempotent() {
    let mut store = SessionStore::new(CredentialDirectory::demo());

    store.logout();
    assert!(store.current_identity().is_none());

    assert!(store.login(DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD));
    store.logout();
    assert!(store.current_identity().is_none());
    store.logout();
    assert!(!store.is_authenticated());
}

#[test]
fn current_identity_serializes_without_password_material() {
    let mut store = SessionStore::new(CredentialDirectory::demo());
    assert!(store.login(DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD));

    let json = serde_json::to_value(store.current_identity().unwrap()).unwrap();
    let object = json.as_object().unwrap();
    let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["email", "id", "name", "role"]);
    assert!(!json.to_string().contains(DEMO_ADMIN_PASSWORD));
}
