//! Notification service
//!
//! Writes in-app notification rows and hands delivery to a [`PushSender`].
//! Delivery is fire-and-forget: a failed push never fails the operation that
//! produced the notification.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value as JsonValue;
use tracing::{debug, instrument, warn};

use souq_core::entities::{Notification, NotificationType};
use souq_core::traits::Page;
use souq_core::Snowflake;

use crate::dto::{NotificationResponse, PaginatedResponse, UnreadCountResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Outbound push delivery seam
///
/// The production wiring points this at the mobile push provider; tests and
/// the default wiring use [`LogPushSender`].
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send(&self, user_id: Snowflake, title: &str, body: &str) -> anyhow::Result<()>;
}

/// Push sender that only logs, for local development and tests
#[derive(Debug, Clone, Default)]
pub struct LogPushSender;

#[async_trait]
impl PushSender for LogPushSender {
    async fn send(&self, user_id: Snowflake, title: &str, body: &str) -> anyhow::Result<()> {
        debug!(user_id = %user_id, title = %title, body = %body, "Push (log only)");
        Ok(())
    }
}

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn build(
        &self,
        user_id: Snowflake,
        notification_type: NotificationType,
        title: String,
        body: String,
        metadata: Option<JsonValue>,
        dedup_key: Option<String>,
    ) -> Notification {
        Notification {
            id: self.ctx.generate_id(),
            user_id,
            notification_type,
            title,
            body,
            metadata,
            dedup_key,
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    async fn push(&self, user_id: Snowflake, title: &str, body: &str) {
        if let Err(err) = self.ctx.push_sender().send(user_id, title, body).await {
            warn!(user_id = %user_id, error = %err, "Push delivery failed");
        }
    }

    /// Write a notification row and push it
    #[instrument(skip(self, title, body, metadata))]
    pub async fn notify(
        &self,
        user_id: Snowflake,
        notification_type: NotificationType,
        title: impl Into<String> + Send,
        body: impl Into<String> + Send,
        metadata: Option<JsonValue>,
    ) -> ServiceResult<()> {
        let title = title.into();
        let body = body.into();
        let notification = self.build(
            user_id,
            notification_type,
            title.clone(),
            body.clone(),
            metadata,
            None,
        );
        self.ctx.notification_repo().create(&notification).await?;
        self.push(user_id, &title, &body).await;
        Ok(())
    }

    /// Write a notification unless its dedup key was already written
    ///
    /// Returns whether a row was inserted; the push only goes out for a
    /// fresh row, so a re-run of the same sweep stays silent.
    #[instrument(skip(self, title, body, metadata))]
    pub async fn notify_deduped(
        &self,
        user_id: Snowflake,
        notification_type: NotificationType,
        title: impl Into<String> + Send,
        body: impl Into<String> + Send,
        metadata: Option<JsonValue>,
        dedup_key: String,
    ) -> ServiceResult<bool> {
        let title = title.into();
        let body = body.into();
        let notification = self.build(
            user_id,
            notification_type,
            title.clone(),
            body.clone(),
            metadata,
            Some(dedup_key),
        );
        let inserted = self
            .ctx
            .notification_repo()
            .create_deduped(&notification)
            .await?;
        if inserted {
            self.push(user_id, &title, &body).await;
        }
        Ok(inserted)
    }

    /// Fan a notification out to every admin account
    #[instrument(skip(self, title, body, metadata))]
    pub async fn notify_admins(
        &self,
        notification_type: NotificationType,
        title: impl Into<String> + Send,
        body: impl Into<String> + Send,
        metadata: Option<JsonValue>,
    ) -> ServiceResult<()> {
        let title = title.into();
        let body = body.into();
        let admin_ids = self.ctx.user_repo().find_admin_ids().await?;
        for admin_id in admin_ids {
            let notification = self.build(
                admin_id,
                notification_type,
                title.clone(),
                body.clone(),
                metadata.clone(),
                None,
            );
            self.ctx.notification_repo().create(&notification).await?;
            self.push(admin_id, &title, &body).await;
        }
        Ok(())
    }

    /// A user's notifications, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: Snowflake,
        page: Page,
    ) -> ServiceResult<PaginatedResponse<NotificationResponse>> {
        let (notifications, total) = self
            .ctx
            .notification_repo()
            .find_by_user(user_id, page)
            .await?;
        Ok(PaginatedResponse::new(
            notifications
                .into_iter()
                .map(NotificationResponse::from)
                .collect(),
            page,
            total,
        ))
    }

    /// Count of unread notifications
    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: Snowflake) -> ServiceResult<UnreadCountResponse> {
        let count = self.ctx.notification_repo().unread_count(user_id).await?;
        Ok(UnreadCountResponse { count })
    }

    /// Mark one notification read
    #[instrument(skip(self))]
    pub async fn mark_read(&self, user_id: Snowflake, id: Snowflake) -> ServiceResult<()> {
        self.ctx.notification_repo().mark_read(user_id, id).await?;
        Ok(())
    }

    /// Mark all of the user's notifications read
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx.notification_repo().mark_all_read(user_id).await?;
        Ok(())
    }
}
