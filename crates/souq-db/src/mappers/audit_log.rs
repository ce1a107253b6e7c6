//! Audit log entity <-> model mapper

use souq_core::entities::{AuditAction, AuditLogEntry};
use souq_core::value_objects::Snowflake;

use crate::models::AuditLogModel;

/// Convert AuditLogModel to AuditLogEntry entity
impl From<AuditLogModel> for AuditLogEntry {
    fn from(model: AuditLogModel) -> Self {
        AuditLogEntry {
            id: Snowflake::new(model.id),
            actor_id: Snowflake::new(model.actor_id),
            action: model
                .action
                .parse()
                .unwrap_or(AuditAction::ListingApproved),
            entity_type: model.entity_type,
            entity_id: Snowflake::new(model.entity_id),
            before: model.before,
            after: model.after,
            created_at: model.created_at,
        }
    }
}
