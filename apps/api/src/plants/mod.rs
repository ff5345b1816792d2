// Plant records: validation, persistence, CRUD handlers, species prediction
// and photo upload. Every query is scoped by the owning user_id.

pub mod handlers;
pub mod photos;
pub mod store;
pub mod validation;
