pub mod config;
pub mod movie;
pub mod platform;
pub mod review;
pub mod section;
