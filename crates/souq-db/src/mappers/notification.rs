//! Notification entity <-> model mapper

use souq_core::entities::{Notification, NotificationType};
use souq_core::value_objects::Snowflake;

use crate::models::NotificationModel;

/// Convert NotificationModel to Notification entity
impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            notification_type: model
                .notification_type
                .parse()
                .unwrap_or(NotificationType::System),
            title: model.title,
            body: model.body,
            metadata: model.metadata,
            dedup_key: model.dedup_key,
            is_read: model.is_read,
            read_at: model.read_at,
            created_at: model.created_at,
        }
    }
}
