pub mod admin;
pub mod admin_blocked_ips;
pub mod admin_posts;
pub mod admin_reviews;
pub mod auth;
pub mod health;
pub mod posts;
pub mod reviews;
