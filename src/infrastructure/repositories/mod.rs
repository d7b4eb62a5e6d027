pub mod sqlx_blocklist_repository;
pub mod sqlx_post_repository;
pub mod sqlx_review_repository;
pub mod sqlx_tracker_repository;
pub mod sqlx_user_repository;
