pub mod application;
pub mod job;
pub mod notification;
pub mod resume;
pub mod user;
