pub mod limits;
pub mod plants;
pub mod rooms;
pub mod watering;
pub mod wizard;
