pub mod plant;
pub mod user;
