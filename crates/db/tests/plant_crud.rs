//! Integration tests for the plant and room repositories.
//!
//! Exercises the repository layer against a real database:
//! - Ownership scoping on every lookup
//! - Watering-history cascade on plant delete
//! - Room delete leaving plants unassigned
//! - The derived `last_watered_at` column

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use verdant_db::models::plant::{CreatePlant, UpdatePlant};
use verdant_db::repositories::{PlantRepo, RoomRepo, UserRepo, WateringRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_plant(name: &str) -> CreatePlant {
    CreatePlant {
        name: name.to_string(),
        room_id: None,
        photo_url: None,
        watering_frequency_days: 7,
        species: None,
        care_summary: None,
        care_instructions: None,
        ai_created: false,
    }
}

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(pool, email, "Test User").await.unwrap().id
}

// ---------------------------------------------------------------------------
// Plant CRUD
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn create_and_find_plant(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;

    let created = PlantRepo::create(&pool, user_id, &new_plant("Monstera"))
        .await
        .unwrap();
    assert_eq!(created.name, "Monstera");
    assert_eq!(created.watering_frequency_days, 7);
    assert!(!created.ai_created);
    assert_eq!(created.last_watered_at, None);

    let found = PlantRepo::find_by_id(&pool, user_id, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
}

#[sqlx::test]
async fn plants_are_scoped_to_their_owner(pool: PgPool) {
    let alice = seed_user(&pool, "alice@example.com").await;
    let bob = seed_user(&pool, "bob@example.com").await;

    let plant = PlantRepo::create(&pool, alice, &new_plant("Fern")).await.unwrap();

    // Bob cannot see, update, or delete Alice's plant.
    assert!(PlantRepo::find_by_id(&pool, bob, plant.id).await.unwrap().is_none());
    let update = UpdatePlant {
        name: Some("Stolen".into()),
        ..Default::default()
    };
    assert!(PlantRepo::update(&pool, bob, plant.id, &update).await.unwrap().is_none());
    assert!(!PlantRepo::delete(&pool, bob, plant.id).await.unwrap());

    // Alice still owns it untouched.
    let found = PlantRepo::find_by_id(&pool, alice, plant.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Fern");
}

#[sqlx::test]
async fn update_applies_only_provided_fields(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    let plant = PlantRepo::create(&pool, user_id, &new_plant("Pothos")).await.unwrap();

    let update = UpdatePlant {
        watering_frequency_days: Some(14),
        ..Default::default()
    };
    let updated = PlantRepo::update(&pool, user_id, plant.id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Pothos");
    assert_eq!(updated.watering_frequency_days, 14);
}

#[sqlx::test]
async fn count_by_user_counts_only_that_user(pool: PgPool) {
    let alice = seed_user(&pool, "alice@example.com").await;
    let bob = seed_user(&pool, "bob@example.com").await;

    for i in 0..3 {
        PlantRepo::create(&pool, alice, &new_plant(&format!("Plant {i}")))
            .await
            .unwrap();
    }
    PlantRepo::create(&pool, bob, &new_plant("Cactus")).await.unwrap();

    assert_eq!(PlantRepo::count_by_user(&pool, alice).await.unwrap(), 3);
    assert_eq!(PlantRepo::count_by_user(&pool, bob).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Watering history
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn last_watered_at_tracks_newest_event(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    let plant = PlantRepo::create(&pool, user_id, &new_plant("Calathea")).await.unwrap();

    // Whole-second timestamps round-trip exactly through TIMESTAMPTZ.
    let old: DateTime<Utc> = "2025-06-01T10:00:00Z".parse().unwrap();
    let recent: DateTime<Utc> = "2025-06-09T10:00:00Z".parse().unwrap();
    WateringRepo::create(&pool, plant.id, old).await.unwrap();
    WateringRepo::create(&pool, plant.id, recent).await.unwrap();

    let found = PlantRepo::find_by_id(&pool, user_id, plant.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.last_watered_at, Some(recent));

    let latest = WateringRepo::latest_for_plant(&pool, plant.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.watered_at, recent);
}

#[sqlx::test]
async fn history_lists_newest_first_with_pagination(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    let plant = PlantRepo::create(&pool, user_id, &new_plant("Basil")).await.unwrap();

    let base: DateTime<Utc> = "2025-05-01T08:00:00Z".parse().unwrap();
    for day in 0..5 {
        WateringRepo::create(&pool, plant.id, base + Duration::days(day))
            .await
            .unwrap();
    }

    let page = WateringRepo::list_for_plant(&pool, plant.id, 2, 0).await.unwrap();
    assert_eq!(page.len(), 2);
    assert!(page[0].watered_at > page[1].watered_at);

    let rest = WateringRepo::list_for_plant(&pool, plant.id, 10, 2).await.unwrap();
    assert_eq!(rest.len(), 3);
}

#[sqlx::test]
async fn deleting_a_plant_cascades_its_history(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    let plant = PlantRepo::create(&pool, user_id, &new_plant("Ivy")).await.unwrap();
    WateringRepo::create(&pool, plant.id, Utc::now()).await.unwrap();

    assert!(PlantRepo::delete(&pool, user_id, plant.id).await.unwrap());

    let history = WateringRepo::list_for_plant(&pool, plant.id, 10, 0).await.unwrap();
    assert!(history.is_empty());
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn deleting_a_room_unassigns_its_plants(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    let room = RoomRepo::create(&pool, user_id, "Kitchen").await.unwrap();

    let mut input = new_plant("Herb pot");
    input.room_id = Some(room.id);
    let plant = PlantRepo::create(&pool, user_id, &input).await.unwrap();
    assert_eq!(plant.room_id, Some(room.id));

    assert!(RoomRepo::delete(&pool, user_id, room.id).await.unwrap());

    let found = PlantRepo::find_by_id(&pool, user_id, plant.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.room_id, None);
}

#[sqlx::test]
async fn list_by_user_filters_by_room(pool: PgPool) {
    let user_id = seed_user(&pool, "a@example.com").await;
    let room = RoomRepo::create(&pool, user_id, "Office").await.unwrap();

    let mut in_room = new_plant("Desk cactus");
    in_room.room_id = Some(room.id);
    PlantRepo::create(&pool, user_id, &in_room).await.unwrap();
    PlantRepo::create(&pool, user_id, &new_plant("Hall fern")).await.unwrap();

    let all = PlantRepo::list_by_user(&pool, user_id, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let office = PlantRepo::list_by_user(&pool, user_id, Some(room.id)).await.unwrap();
    assert_eq!(office.len(), 1);
    assert_eq!(office[0].name, "Desk cactus");
}
