pub mod blocklist;
pub mod post;
pub mod review;
pub mod shared;
pub mod tracker;
pub mod user;
