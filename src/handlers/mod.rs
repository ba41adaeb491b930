pub mod auth;
pub mod forms;
pub mod items;
pub mod profile;
