//! Contract models for training service
//!
//! These models are transport-agnostic and shared by the domain, storage and
//! REST layers. NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};

/// Prefix of employee codes minted for administrators
pub const ADMIN_CODE_PREFIX: &str = "ADM";

/// Prefix of employee codes minted for regular employees
pub const EMPLOYEE_CODE_PREFIX: &str = "EMP";

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Employee,
    Admin,
}

impl Role {
    /// Storage / wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Admin => "admin",
        }
    }

    /// Parse a stored role; anything unknown is a regular employee
    pub fn parse(value: &str) -> Self {
        Self::try_parse(value).unwrap_or(Role::Employee)
    }

    /// Strict parse for role changes requested over the API
    pub fn try_parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "employee" => Some(Role::Employee),
            _ => None,
        }
    }

    /// Employee code prefix used when numbering codes per role
    pub fn code_prefix(self) -> &'static str {
        match self {
            Role::Admin => ADMIN_CODE_PREFIX,
            Role::Employee => EMPLOYEE_CODE_PREFIX,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Active user (employee or administrator)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    /// Human-readable employee code ("agent ID"), e.g. `EMP007`
    pub employee_id: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// User together with the stored password hash, only used for login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Fully resolved user row ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub employee_id: String,
    pub role: Role,
}

/// Raw user creation input as received from an administrator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub employee_id: Option<String>,
    pub role: Option<String>,
}

/// Partial profile update; `None` leaves the field untouched.
///
/// `role` is honoured for administrators only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
}

/// Validated profile changes handed to the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    /// `Some(None)` clears the stored value
    pub phone: Option<Option<String>>,
    pub department: Option<Option<String>>,
    pub role: Option<Role>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.department.is_none()
            && self.role.is_none()
    }
}

/// Self-service password change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Immutable record written when a user is deleted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Termination {
    pub id: i32,
    pub user_id: i32,
    pub username: String,
    pub name: String,
    pub email: String,
    /// Employee code the user held, eligible for recycling
    pub employee_id: Option<String>,
    pub terminated_by: i32,
    pub terminated_at: DateTime<Utc>,
    pub reason: String,
}

/// Result of computing the next agent ID without persisting it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentIdPreview {
    pub agent_id: String,
    pub is_recycled: bool,
    /// Every currently recyclable code, in store order (empty when minting)
    pub recyclable_ids: Vec<String>,
}

/// Result of assigning an agent ID to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentIdAssignment {
    pub user_id: i32,
    pub agent_id: String,
    pub is_recycled: bool,
}

/// Training video metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: i32,
    pub title: String,
    pub duration: String,
    pub category: String,
    /// Chapter label, matched by equality
    pub section: String,
    /// Module label, unique within a section once reconciled
    pub module: Option<String>,
    pub description: String,
    pub thumbnail: Option<String>,
    pub video_path: Option<String>,
    pub file_size_mb: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Video creation input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewVideo {
    pub title: String,
    pub duration: String,
    pub category: String,
    pub section: String,
    pub module: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub video_path: Option<String>,
    pub file_size_mb: Option<f64>,
}

/// Partial video update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoPatch {
    pub title: Option<String>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub section: Option<String>,
    pub module: Option<String>,
    pub description: Option<String>,
}

impl VideoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.duration.is_none()
            && self.category.is_none()
            && self.section.is_none()
            && self.module.is_none()
            && self.description.is_none()
    }
}

/// Minimal projection of a video used for module reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSlot {
    pub id: i32,
    pub module: Option<String>,
}

/// A single module rename produced by reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRename {
    pub id: i32,
    pub module: String,
}

/// A video the user has marked as watched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoProgress {
    pub video_id: i32,
    pub completed_at: DateTime<Utc>,
}
