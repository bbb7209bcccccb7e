//! Repository-level tests for user soft-delete behaviour and the
//! email-uniqueness rule.

use sqlx::PgPool;

use lockstash_db::models::user::{CreateUser, UpdateUser, UserStatus};
use lockstash_db::repositories::UserRepo;

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: "ab".repeat(64),
        name: "Lifecycle Test".to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_email_lookup_is_case_insensitive(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("Mixed.Case@Test.com"))
        .await
        .unwrap();

    let found = UserRepo::find_active_by_email(&pool, "mixed.case@test.com")
        .await
        .unwrap()
        .expect("case-insensitive match");
    assert_eq!(found.id, user.id);

    assert!(UserRepo::email_exists(&pool, "MIXED.CASE@TEST.COM").await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_active_email_violates_unique_index(pool: PgPool) {
    UserRepo::create(&pool, &new_user("dupe@test.com")).await.unwrap();

    let result = UserRepo::create(&pool, &new_user("DUPE@test.com")).await;
    let err = result.expect_err("second active row must violate uq_users_email_active");
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_users_email_active"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_frees_the_email(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("recycle@test.com")).await.unwrap();
    assert_eq!(user.status, UserStatus::Active);

    assert!(UserRepo::soft_delete(&pool, user.id).await.unwrap());

    // Hidden from the active-email lookup, still reachable by id for audit.
    assert!(UserRepo::find_active_by_email(&pool, "recycle@test.com")
        .await
        .unwrap()
        .is_none());
    let row = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(row.status, UserStatus::Deleted);
    assert!(row.deleted_at.is_some());

    // The address can be registered again.
    let replacement = UserRepo::create(&pool, &new_user("recycle@test.com")).await;
    assert!(replacement.is_ok());

    // Soft delete is guarded: a second call is a no-op.
    assert!(!UserRepo::soft_delete(&pool, user.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_keeps_other_fields(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("partial@test.com")).await.unwrap();

    let updated = UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            email: None,
            name: Some("Renamed".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.email, "partial@test.com");
    assert_eq!(updated.password_hash, user.password_hash);
}
