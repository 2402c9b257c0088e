//! Integration tests for the AI usage counter repository.

use sqlx::PgPool;
use verdant_db::repositories::{AiUsageRepo, UserRepo};

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(pool, email, "Test User").await.unwrap().id
}

#[sqlx::test]
async fn missing_counter_reads_as_none(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;

    let usage = AiUsageRepo::find(&pool, user_id, "2025-06").await.unwrap();
    assert!(usage.is_none());
}

#[sqlx::test]
async fn increment_creates_the_row_on_first_use(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;

    let usage = AiUsageRepo::increment(&pool, user_id, "2025-06").await.unwrap();
    assert_eq!(usage.generation_count, 1);
    assert_eq!(usage.month, "2025-06");
}

#[sqlx::test]
async fn increment_is_cumulative(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;

    for _ in 0..3 {
        AiUsageRepo::increment(&pool, user_id, "2025-06").await.unwrap();
    }

    let usage = AiUsageRepo::find(&pool, user_id, "2025-06")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(usage.generation_count, 3);
}

#[sqlx::test]
async fn concurrent_increments_do_not_lose_updates(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;

    // The upsert is a single atomic statement, so racing increments
    // must all land.
    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            AiUsageRepo::increment(&pool, user_id, "2025-06").await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let usage = AiUsageRepo::find(&pool, user_id, "2025-06")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(usage.generation_count, 8);
}

#[sqlx::test]
async fn months_are_independent_counters(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;

    AiUsageRepo::increment(&pool, user_id, "2025-06").await.unwrap();
    AiUsageRepo::increment(&pool, user_id, "2025-07").await.unwrap();
    AiUsageRepo::increment(&pool, user_id, "2025-07").await.unwrap();

    let june = AiUsageRepo::find(&pool, user_id, "2025-06").await.unwrap().unwrap();
    let july = AiUsageRepo::find(&pool, user_id, "2025-07").await.unwrap().unwrap();
    assert_eq!(june.generation_count, 1);
    assert_eq!(july.generation_count, 2);
}
