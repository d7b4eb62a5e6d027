pub mod database;
pub mod geo;
pub mod notifications;
pub mod repositories;
pub mod security;
