pub mod content_filter;
pub mod rate_limiter;
pub mod sanitizer;
