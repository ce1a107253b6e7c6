//! User entity <-> model mapper

use souq_core::entities::{User, UserRole};
use souq_core::value_objects::Snowflake;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            phone: model.phone,
            role: model.role.parse().unwrap_or(UserRole::UserIndividual),
            is_active: model.is_active,
            is_banned: model.is_banned,
            created_at: model.created_at,
        }
    }
}
