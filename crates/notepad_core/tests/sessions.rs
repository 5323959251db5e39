use chrono::{DateTime, Duration, TimeZone, Utc};
use notepad_core::db::open_db_in_memory;
use notepad_core::{
    AuthError, FixedClock, IdentityProvider, SessionIdentityProvider, SessionRepository,
    SqliteSessionRepository,
};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

#[test]
fn issued_session_resolves_to_its_user() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::try_new(&conn).unwrap();
    let session = repo.create_session("user-7", base_time()).unwrap();
    assert_eq!(session.expires_at, base_time() + Duration::hours(24));

    let provider = SessionIdentityProvider::new(repo, FixedClock(base_time()));
    let user = provider.current_user(Some(&session.token)).unwrap();
    assert_eq!(user.map(|user| user.id).as_deref(), Some("user-7"));
}

#[test]
fn missing_blank_and_unknown_tokens_are_anonymous() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::try_new(&conn).unwrap();
    let provider = SessionIdentityProvider::new(repo, FixedClock(base_time()));

    assert_eq!(provider.current_user(None).unwrap(), None);
    assert_eq!(provider.current_user(Some("   ")).unwrap(), None);
    assert_eq!(provider.current_user(Some("not-a-token")).unwrap(), None);
    assert!(matches!(
        provider.require_user(None),
        Err(AuthError::Unauthenticated)
    ));
}

#[test]
fn expired_session_does_not_authenticate() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::with_lifetime(&conn, Duration::minutes(30)).unwrap();
    let session = repo.create_session("user-7", base_time()).unwrap();

    let later = base_time() + Duration::minutes(31);
    assert_eq!(repo.validate_session(&session.token, later).unwrap(), None);
    assert_eq!(repo.purge_expired(later).unwrap(), 1);
}

#[test]
fn validation_slides_expiry_forward() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::with_lifetime(&conn, Duration::minutes(30)).unwrap();
    let session = repo.create_session("user-7", base_time()).unwrap();

    let touched_at = base_time() + Duration::minutes(20);
    let refreshed = repo
        .validate_session(&session.token, touched_at)
        .unwrap()
        .expect("session still active");
    assert_eq!(refreshed.expires_at, touched_at + Duration::minutes(30));

    let after_original_expiry = base_time() + Duration::minutes(40);
    assert!(repo
        .validate_session(&session.token, after_original_expiry)
        .unwrap()
        .is_some());
}

#[test]
fn deleted_session_stops_resolving() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::try_new(&conn).unwrap();
    let session = repo.create_session("user-7", base_time()).unwrap();

    assert!(repo.delete_session(&session.token).unwrap());
    assert!(!repo.delete_session(&session.token).unwrap());
    assert_eq!(repo.validate_session(&session.token, base_time()).unwrap(), None);
}

#[test]
fn blank_user_id_cannot_get_a_session() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSessionRepository::try_new(&conn).unwrap();
    assert!(repo.create_session("  ", base_time()).is_err());
}
