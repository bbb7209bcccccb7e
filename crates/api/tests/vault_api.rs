//! HTTP-level integration tests for folders, records, and settings.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, login_user, patch_json_auth, post_json_auth,
    register_and_login, FINGERPRINT,
};
use serde_json::json;
use sqlx::PgPool;

async fn create_folder(app: axum::Router, token: &str, name: &str) -> serde_json::Value {
    let response = post_json_auth(
        app,
        "/api/v1/folders",
        json!({ "name": name, "parent_folder_id": null }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Folders
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_folder_crud(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (access, _) = register_and_login(app.clone(), "folders@test.com", "test_password_123").await;

    let parent = create_folder(app.clone(), &access, "Work").await;
    let parent_id = parent["id"].as_i64().unwrap();

    // Child under parent.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/folders",
        json!({ "name": "Servers", "parent_folder_id": parent_id }),
        &access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let child = body_json(response).await;
    assert_eq!(child["parent_folder_id"], parent_id);

    // Unknown parent is a 404 with the id in additional_info.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/folders",
        json!({ "name": "Orphan", "parent_folder_id": 999_999 }),
        &access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error_code"], "FOLDER_NOT_FOUND");
    assert_eq!(body["additional_info"]["folder_id"], 999_999);

    // Rename.
    let uri = format!("/api/v1/folders/{parent_id}");
    let response = patch_json_auth(app.clone(), &uri, json!({ "name": "Work stuff" }), &access).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Work stuff");

    // A folder cannot become its own parent.
    let response = patch_json_auth(
        app.clone(),
        &uri,
        json!({ "parent_folder_id": parent_id }),
        &access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Listing is paginated.
    let response = get_auth(app.clone(), "/api/v1/folders?limit=1&page=2", &access).await;
    let page = body_json(response).await;
    assert_eq!(page["total_items"], 2);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);

    // Deleting the parent cascades to the child.
    let response = delete_auth(app.clone(), &uri, &access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(
        app,
        &format!("/api/v1/folders/{}", child["id"].as_i64().unwrap()),
        &access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_folders_are_owner_scoped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (access_a, _) = register_and_login(app.clone(), "fa@test.com", "test_password_123").await;
    let (access_b, _) = register_and_login(app.clone(), "fb@test.com", "test_password_123").await;

    let folder = create_folder(app.clone(), &access_a, "Private").await;
    let uri = format!("/api/v1/folders/{}", folder["id"].as_i64().unwrap());

    // Another user sees 404, not 403: existence is not revealed.
    let response = get_auth(app.clone(), &uri, &access_b).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = delete_auth(app.clone(), &uri, &access_b).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // B cannot attach a folder under A's folder either.
    let response = post_json_auth(
        app,
        "/api/v1/folders",
        json!({ "name": "Sneaky", "parent_folder_id": folder["id"] }),
        &access_b,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_round_trip_with_encryption(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (access, _) = register_and_login(app.clone(), "records@test.com", "test_password_123").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/records",
        json!({
            "record_type": "login",
            "title": "Email account",
            "content": "user / hunter2",
            "is_favorite": true,
        }),
        &access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let record = body_json(response).await;
    let record_id = record["id"].as_i64().unwrap();
    // The create response echoes the plaintext back.
    assert_eq!(record["content"], "user / hunter2");

    // The database row holds ciphertext, not plaintext.
    let stored: (String,) = sqlx::query_as("SELECT content FROM records WHERE id = $1")
        .bind(record_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(stored.0, "user / hunter2");
    assert!(!stored.0.contains("hunter2"));

    // Reading decrypts under the session key.
    let response = get_auth(app.clone(), &format!("/api/v1/records/{record_id}"), &access).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["content"], "user / hunter2");
    assert_eq!(fetched["record_type"], "login");

    // Listings omit content.
    let response = get_auth(app.clone(), "/api/v1/records", &access).await;
    let page = body_json(response).await;
    assert_eq!(page["total_items"], 1);
    assert!(page["items"][0]["content"].is_null());

    // A refreshed session (same password) can still decrypt.
    let tokens = login_user(
        app.clone(),
        "records@test.com",
        "test_password_123",
        FINGERPRINT,
    )
    .await;
    let second_access = tokens["access_token"].as_str().unwrap();
    let response = get_auth(
        app,
        &format!("/api/v1/records/{record_id}"),
        second_access,
    )
    .await;
    assert_eq!(body_json(response).await["content"], "user / hunter2");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_update_and_filters(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (access, _) = register_and_login(app.clone(), "filters@test.com", "test_password_123").await;

    let folder = create_folder(app.clone(), &access, "Cards").await;
    let folder_id = folder["id"].as_i64().unwrap();

    for (title, record_type, in_folder) in [
        ("Visa", "card", true),
        ("Shopping note", "note", false),
        ("Bank login", "login", false),
    ] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/records",
            json!({
                "record_type": record_type,
                "title": title,
                "content": format!("{title} secret"),
                "folder_id": if in_folder { Some(folder_id) } else { None },
            }),
            &access,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Filter by type.
    let response = get_auth(app.clone(), "/api/v1/records?record_type=card", &access).await;
    let page = body_json(response).await;
    assert_eq!(page["total_items"], 1);
    assert_eq!(page["items"][0]["title"], "Visa");

    // Filter by folder.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/records?folder_id={folder_id}"),
        &access,
    )
    .await;
    assert_eq!(body_json(response).await["total_items"], 1);

    // Update content and favorite flag.
    let response = get_auth(app.clone(), "/api/v1/records?record_type=note", &access).await;
    let note_id = body_json(response).await["items"][0]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/records/{note_id}");
    let response = patch_json_auth(
        app.clone(),
        &uri,
        json!({ "content": "updated secret", "is_favorite": true }),
        &access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["content"], "updated secret");
    assert_eq!(updated["is_favorite"], true);

    // Favorite filter now matches the note.
    let response = get_auth(app.clone(), "/api/v1/records?is_favorite=true", &access).await;
    assert_eq!(body_json(response).await["total_items"], 1);

    // Deleting the folder cascades to the record inside it.
    let response = delete_auth(app.clone(), &format!("/api/v1/folders/{folder_id}"), &access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(app, "/api/v1/records", &access).await;
    assert_eq!(body_json(response).await["total_items"], 2);
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Changing the expiration window affects sessions created afterwards, not
/// the running one.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settings_expiration_applies_to_new_sessions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (access, _) = register_and_login(app.clone(), "expiry@test.com", "test_password_123").await;

    let response = patch_json_auth(
        app.clone(),
        "/api/v1/settings",
        json!({ "auth_session_expiration": 1440 }),
        &access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["auth_session_expiration"], 1440);

    // Out-of-range values are rejected.
    let response = patch_json_auth(
        app.clone(),
        "/api/v1/settings",
        json!({ "auth_session_expiration": 1 }),
        &access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // A new login picks up the window.
    let tokens = login_user(app, "expiry@test.com", "test_password_123", FINGERPRINT).await;
    assert_eq!(tokens["refresh_token_expires_in"], 1440);
}
