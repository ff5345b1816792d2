// User profiles. Every plant, photo and reminder route is scoped by the
// `user_id` query parameter defined here.

pub mod handlers;
pub mod store;
pub mod validation;

use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}
