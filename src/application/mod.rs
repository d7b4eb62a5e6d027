pub mod accounts;
pub mod admin;
pub mod posts;
pub mod reviews;
