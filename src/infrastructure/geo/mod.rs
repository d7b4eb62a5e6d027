pub mod request_origin;
