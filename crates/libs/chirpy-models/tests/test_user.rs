use chirpy_models::user::{User, UserCreate};
use serial_test::serial;
use uuid::Uuid;

use common::DbTestContext;

mod common;

fn create(ctx: &DbTestContext, email: &str) -> User {
    UserCreate::new(String::from(email), String::from("$argon2id$v=19$fake"))
        .save(&ctx.db)
        .expect("Failed to create user")
}

#[test]
#[serial]
#[ignore = "requires TEST_DATABASE_URL"]
fn test_create_and_fetch_user() {
    let ctx = DbTestContext::from_env();
    let user = create(&ctx, "saul@bettercall.com");

    assert_eq!(user.email, "saul@bettercall.com");
    assert_eq!(user.created_at, user.updated_at);
    assert_eq!(User::fetch_by_id(&user.id, &ctx.db).unwrap(), user);
    assert_eq!(
        User::fetch_by_email("saul@bettercall.com", &ctx.db).unwrap(),
        user
    );
}

#[test]
#[serial]
#[ignore = "requires TEST_DATABASE_URL"]
fn test_duplicate_email_is_unique_violation() {
    let ctx = DbTestContext::from_env();
    create(&ctx, "walt@breakingbad.com");

    let err = UserCreate::new(
        String::from("walt@breakingbad.com"),
        String::from("$argon2id$v=19$other"),
    )
    .save(&ctx.db)
    .unwrap_err();

    assert!(err.is_unique_violation());
}

#[test]
#[serial]
#[ignore = "requires TEST_DATABASE_URL"]
fn test_unknown_user_is_not_found() {
    let ctx = DbTestContext::from_env();

    assert!(
        User::fetch_by_id(&Uuid::new_v4(), &ctx.db)
            .unwrap_err()
            .is_not_found()
    );
    assert!(
        User::fetch_by_email("nobody@example.com", &ctx.db)
            .unwrap_err()
            .is_not_found()
    );
}

#[test]
#[serial]
#[ignore = "requires TEST_DATABASE_URL"]
fn test_delete_all_users() {
    let ctx = DbTestContext::from_env();
    create(&ctx, "a@example.com");
    create(&ctx, "b@example.com");

    assert_eq!(User::delete_all(&ctx.db).unwrap(), 2);
    assert_eq!(User::delete_all(&ctx.db).unwrap(), 0);
}
