use super::*;

// =============================================================================
// normalize_email
// =============================================================================

#[test]
fn normalize_email_accepts_basic_address() {
    assert_eq!(normalize_email("  USER@Example.com "), Some("user@example.com".to_owned()));
}

#[test]
fn normalize_email_rejects_invalid_values() {
    assert_eq!(normalize_email(""), None);
    assert_eq!(normalize_email("user"), None);
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("user@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
}

// =============================================================================
// validate_password
// =============================================================================

#[test]
fn validate_password_bounds() {
    assert!(matches!(validate_password("short"), Err(AuthError::WeakPassword)));
    assert!(validate_password("exactly8").is_ok());
    assert!(validate_password(&"x".repeat(MAX_PASSWORD_LEN)).is_ok());
    assert!(matches!(
        validate_password(&"x".repeat(MAX_PASSWORD_LEN + 1)),
        Err(AuthError::WeakPassword)
    ));
}

#[test]
fn validate_password_counts_characters_not_bytes() {
    // Four two-byte characters: eight bytes but only four characters.
    assert!(validate_password("éééé").is_err());
}

// =============================================================================
// hashing
// =============================================================================

#[test]
fn hash_password_is_salted_bcrypt() {
    let a = hash_password("correct horse").unwrap();
    let b = hash_password("correct horse").unwrap();
    assert!(a.starts_with("$2"));
    assert_ne!(a, b);
    assert!(!a.contains("correct horse"));
}

#[test]
fn verify_password_accepts_only_the_original() {
    let stored = hash_password("correct horse").unwrap();
    assert!(verify_password("correct horse", &stored).unwrap());
    assert!(!verify_password("correct horsf", &stored).unwrap());
    assert!(!verify_password("", &stored).unwrap());
}

#[test]
fn verify_password_rejects_garbage_hash() {
    assert!(matches!(verify_password("whatever", "not-a-hash"), Err(AuthError::Hash(_))));
}

// =============================================================================
// live database
// =============================================================================

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn sign_up_then_sign_in() {
    let pool = crate::db::integration_pool().await;
    let email = format!("{}@auth.test", Uuid::new_v4());

    let id = sign_up(&pool, &email, "hunter2hunter2").await.expect("sign_up");
    let signed_in = sign_in(&pool, &email.to_uppercase(), "hunter2hunter2")
        .await
        .expect("sign_in");
    assert_eq!(id, signed_in);

    assert!(matches!(
        sign_in(&pool, &email, "wrong-password").await,
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        sign_up(&pool, &email, "another-password").await,
        Err(AuthError::EmailTaken)
    ));
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn sign_in_unknown_email_is_invalid_credentials() {
    let pool = crate::db::integration_pool().await;
    let email = format!("{}@nobody.test", Uuid::new_v4());
    assert!(matches!(
        sign_in(&pool, &email, "whatever-pass").await,
        Err(AuthError::InvalidCredentials)
    ));
}
