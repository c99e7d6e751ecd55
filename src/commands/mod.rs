pub mod settings;
pub mod trips;
pub mod users;
