pub mod admin;
pub mod blocked_ip;
pub mod client_ip;
pub mod rate_limit;
pub mod request_id;
pub mod tracker;
pub mod user;
