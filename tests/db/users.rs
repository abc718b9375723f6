//! Users and API keys.

#[path = "../common/mod.rs"]
mod common;

use common::*;
use stockyard::error::AppError;

fn new_user(email: &str, is_admin: bool) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        name: "Test".to_string(),
        is_admin,
    }
}

#[test]
fn test_api_key_resolves_to_user() {
    let conn = setup_test_db();
    let user = queries::create_user(&conn, &new_user("admin@test.com", true)).unwrap();
    let (key, plaintext) = queries::create_api_key(&conn, &user.id).unwrap();

    assert!(plaintext.starts_with("sy_"));
    assert!(plaintext.starts_with(&key.key_prefix));
    assert_ne!(key.key_hash, plaintext);

    let (found, found_key) = queries::get_user_by_api_key(&conn, &plaintext)
        .unwrap()
        .expect("key should resolve");
    assert_eq!(found.id, user.id);
    assert!(found.is_admin);
    assert_eq!(found_key.id, key.id);
}

#[test]
fn test_unknown_and_revoked_keys_do_not_resolve() {
    let conn = setup_test_db();
    let user = queries::create_user(&conn, &new_user("admin@test.com", true)).unwrap();
    let (key, plaintext) = queries::create_api_key(&conn, &user.id).unwrap();

    assert!(queries::get_user_by_api_key(&conn, "sy_not_a_real_key").unwrap().is_none());

    assert!(queries::revoke_api_key(&conn, &key.id).unwrap());
    assert!(queries::get_user_by_api_key(&conn, &plaintext).unwrap().is_none());
    // Already revoked
    assert!(!queries::revoke_api_key(&conn, &key.id).unwrap());
}

#[test]
fn test_revoke_by_secret_leaves_other_keys_alone() {
    let conn = setup_test_db();
    let user = queries::create_user(&conn, &new_user("admin@test.com", true)).unwrap();
    let (first, first_plain) = queries::create_api_key(&conn, &user.id).unwrap();
    let (_, second_plain) = queries::create_api_key(&conn, &user.id).unwrap();

    let revoked = queries::revoke_api_key_by_secret(&conn, &first_plain)
        .unwrap()
        .expect("key should be revoked");
    assert_eq!(revoked.id, first.id);

    assert!(queries::get_user_by_api_key(&conn, &first_plain).unwrap().is_none());
    assert!(queries::get_user_by_api_key(&conn, &second_plain).unwrap().is_some());

    // Unknown or already revoked
    assert!(queries::revoke_api_key_by_secret(&conn, &first_plain).unwrap().is_none());
    assert!(queries::revoke_api_key_by_secret(&conn, "sy_nope").unwrap().is_none());
}

#[test]
fn test_email_is_unique_case_insensitively() {
    let conn = setup_test_db();
    queries::create_user(&conn, &new_user("Admin@Test.com", true)).unwrap();

    let err = queries::create_user(&conn, &new_user("admin@test.com", false)).unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let found = queries::get_user_by_email(&conn, "ADMIN@test.com").unwrap().unwrap();
    assert_eq!(found.email, "admin@test.com");
}

#[test]
fn test_count_admins() {
    let conn = setup_test_db();
    assert_eq!(queries::count_admins(&conn).unwrap(), 0);
    queries::create_user(&conn, &new_user("a@test.com", true)).unwrap();
    queries::create_user(&conn, &new_user("b@test.com", false)).unwrap();
    assert_eq!(queries::count_admins(&conn).unwrap(), 1);
}
