//! Integration tests for the admin gate.

#![allow(clippy::unwrap_used)]

use zenplay_admin::AuthError;
use zenplay_integration_tests::{ADMIN_PASSWORD, TestContext};

#[test]
fn test_login_persists_across_reopen() {
    let ctx = TestContext::new();
    ctx.admin().gate().login(ADMIN_PASSWORD).unwrap();

    assert!(ctx.admin().gate().is_logged_in());
    assert!(ctx.data_dir().join("session").join("zenplay_admin_logged.json").exists());

    ctx.admin().gate().logout().unwrap();
    assert!(!ctx.admin().gate().is_logged_in());
}

#[test]
fn test_wrong_password_is_rejected() {
    let ctx = TestContext::new();
    let admin = ctx.admin();

    let result = admin.gate().login("not-the-password1");
    assert!(matches!(result, Err(AuthError::InvalidPassword)));
    assert!(!admin.gate().is_logged_in());
}

#[test]
fn test_logout_ends_session() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    admin.gate().login(ADMIN_PASSWORD).unwrap();
    admin.gate().logout().unwrap();

    assert!(!ctx.admin().gate().is_logged_in());
}

#[test]
fn test_session_is_separate_from_order_data() {
    let ctx = TestContext::new();
    ctx.admin().gate().login(ADMIN_PASSWORD).unwrap();

    assert!(!ctx.data_dir().join("zenplay_admin_logged.json").exists());
}
