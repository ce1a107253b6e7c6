//! User read model
//!
//! Authentication lives outside the core; this entity carries only what the
//! marketplace needs for ownership checks, role gating, and admin fan-out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Account role driving gating rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    UserIndividual,
    UserShowroom,
    Admin,
    SuperAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserIndividual => "USER_INDIVIDUAL",
            Self::UserShowroom => "USER_SHOWROOM",
            Self::Admin => "ADMIN",
            Self::SuperAdmin => "SUPER_ADMIN",
        }
    }

    /// Showroom accounts are subject to subscription quotas
    #[inline]
    pub fn is_merchant(&self) -> bool {
        matches!(self, Self::UserShowroom)
    }

    /// Admins and super-admins can moderate and review payments
    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl std::str::FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER_INDIVIDUAL" => Ok(Self::UserIndividual),
            "USER_SHOWROOM" => Ok(Self::UserShowroom),
            "ADMIN" => Ok(Self::Admin),
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marketplace user as seen by the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [
            UserRole::UserIndividual,
            UserRole::UserShowroom,
            UserRole::Admin,
            UserRole::SuperAdmin,
        ] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_only_showrooms_are_merchants() {
        assert!(UserRole::UserShowroom.is_merchant());
        assert!(!UserRole::UserIndividual.is_merchant());
        assert!(!UserRole::Admin.is_merchant());
    }
}
