//! Integration tests for the usage-limits endpoint.

mod common;

use axum::http::StatusCode;
use common::{expect_json, get_auth, post_json, seed_user, token_for};
use serde_json::json;
use sqlx::PgPool;
use verdant_core::limits::month_key;
use verdant_db::repositories::AiUsageRepo;

#[sqlx::test(migrations = "../db/migrations")]
async fn fresh_user_has_both_quotas_available(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    let token = token_for(user_id);
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/usage-limits", &token).await;
    let json = expect_json(response, StatusCode::OK).await;

    let ai = &json["data"]["ai_generations"];
    assert_eq!(ai["allowed"], true);
    assert_eq!(ai["used"], 0);
    assert_eq!(ai["limit"], 20);
    assert!(ai["resets_on"].is_string(), "resets_on must be a date");

    let plants = &json["data"]["plants"];
    assert_eq!(plants["allowed"], true);
    assert_eq!(plants["used"], 0);
    assert_eq!(plants["limit"], 100);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ai_quota_blocks_at_the_monthly_limit(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    let token = token_for(user_id);

    // Burn the whole monthly budget.
    let month = month_key(chrono::Utc::now());
    for _ in 0..20 {
        AiUsageRepo::increment(&pool, user_id, &month).await.unwrap();
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/usage-limits", &token).await;
    let json = expect_json(response, StatusCode::OK).await;

    let ai = &json["data"]["ai_generations"];
    assert_eq!(ai["allowed"], false);
    assert_eq!(ai["used"], 20);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn plant_quota_counts_existing_plants(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    let token = token_for(user_id);
    let app = common::build_test_app(pool);

    for i in 0..3 {
        let response = post_json(
            app.clone(),
            "/api/v1/plants",
            &token,
            json!({ "name": format!("Plant {i}"), "watering_frequency_days": 7 }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(app, "/api/v1/usage-limits", &token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["plants"]["used"], 3);
    assert_eq!(json["data"]["plants"]["allowed"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unreadable_counters_fail_open(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;

    // A closed pool makes every read fail, standing in for counter
    // store trouble. The checks must allow the user through instead
    // of erroring.
    pool.close().await;

    let ai = verdant_api::handlers::limits::check_ai_generation_limit(&pool, user_id).await;
    assert!(ai.status.allowed);
    assert_eq!(ai.status.used, 0);

    let plants = verdant_api::handlers::limits::check_plant_limit(&pool, user_id).await;
    assert!(plants.allowed);
    assert_eq!(plants.used, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn quotas_are_per_user(pool: PgPool) {
    let alice = seed_user(&pool, "alice@example.com").await;
    let bob = seed_user(&pool, "bob@example.com").await;

    let month = month_key(chrono::Utc::now());
    for _ in 0..20 {
        AiUsageRepo::increment(&pool, alice, &month).await.unwrap();
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/usage-limits", &token_for(bob)).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["ai_generations"]["allowed"], true);
    assert_eq!(json["data"]["ai_generations"]["used"], 0);
}
