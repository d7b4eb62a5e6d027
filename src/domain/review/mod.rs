pub mod entity;
pub mod moderation;
pub mod repository;
