pub mod ai_usage;
pub mod plant;
pub mod room;
pub mod user;
pub mod watering_event;
pub mod wizard_session;
