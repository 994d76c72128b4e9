pub mod ats;
pub mod handlers;
