//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every query that
//! touches user-owned data is scoped by `user_id` so ownership is
//! enforced at the SQL level.

pub mod ai_usage_repo;
pub mod plant_repo;
pub mod room_repo;
pub mod user_repo;
pub mod watering_repo;
pub mod wizard_session_repo;

pub use ai_usage_repo::AiUsageRepo;
pub use plant_repo::PlantRepo;
pub use room_repo::RoomRepo;
pub use user_repo::UserRepo;
pub use watering_repo::WateringRepo;
pub use wizard_session_repo::WizardSessionRepo;
