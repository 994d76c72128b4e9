pub mod extract;
pub mod handlers;
pub mod jwt;
pub mod password;
