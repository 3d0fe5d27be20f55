//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{progress, termination, user, video};
use crate::contract::{
    NewUser, NewVideo, ProfileUpdate, Role, Termination, User, UserCredentials, Video,
    VideoProgress,
};
use chrono::Utc;

// ===== User Conversions =====

impl From<user::Model> for User {
    fn from(entity: user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            department: entity.department,
            employee_id: entity.employee_id,
            role: Role::parse(&entity.role),
            created_at: entity.created_at,
            last_login: entity.last_login,
        }
    }
}

impl From<user::Model> for UserCredentials {
    fn from(mut entity: user::Model) -> Self {
        let password_hash = std::mem::take(&mut entity.password_hash);
        Self {
            user: entity.into(),
            password_hash,
        }
    }
}

impl From<&NewUser> for user::ActiveModel {
    fn from(model: &NewUser) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: NotSet,
            username: Set(model.username.clone()),
            name: Set(model.name.clone()),
            email: Set(model.email.clone()),
            password_hash: Set(model.password_hash.clone()),
            phone: Set(model.phone.clone()),
            department: Set(model.department.clone()),
            employee_id: Set(Some(model.employee_id.clone())),
            role: Set(model.role.as_str().to_string()),
            created_at: Set(Utc::now()),
            last_login: Set(None),
        }
    }
}

/// Copy the requested profile changes onto a loaded user row
pub fn apply_profile_update(active: &mut user::ActiveModel, update: &ProfileUpdate) {
    use sea_orm::ActiveValue::Set;

    if let Some(username) = &update.username {
        active.username = Set(username.clone());
    }
    if let Some(name) = &update.name {
        active.name = Set(name.clone());
    }
    if let Some(email) = &update.email {
        active.email = Set(email.clone());
    }
    if let Some(phone) = &update.phone {
        active.phone = Set(phone.clone());
    }
    if let Some(department) = &update.department {
        active.department = Set(department.clone());
    }
    if let Some(role) = update.role {
        active.role = Set(role.as_str().to_string());
    }
}

// ===== Termination Conversions =====

impl From<termination::Model> for Termination {
    fn from(entity: termination::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            username: entity.username,
            name: entity.name,
            email: entity.email,
            employee_id: entity.employee_id,
            terminated_by: entity.terminated_by,
            terminated_at: entity.terminated_at,
            reason: entity.reason,
        }
    }
}

/// Build the termination row for a user about to be removed
pub fn termination_from_user(
    user: &user::Model,
    terminated_by: i32,
    reason: &str,
) -> termination::ActiveModel {
    use sea_orm::ActiveValue::*;

    termination::ActiveModel {
        id: NotSet,
        user_id: Set(user.id),
        username: Set(user.username.clone()),
        name: Set(user.name.clone()),
        email: Set(user.email.clone()),
        employee_id: Set(user.employee_id.clone()),
        terminated_by: Set(terminated_by),
        terminated_at: Set(Utc::now()),
        reason: Set(reason.to_string()),
    }
}

// ===== Video Conversions =====

impl From<video::Model> for Video {
    fn from(entity: video::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            duration: entity.duration,
            category: entity.category,
            section: entity.section,
            module: entity.module,
            description: entity.description,
            thumbnail: entity.thumbnail,
            video_path: entity.video_path,
            file_size_mb: entity.file_size_mb,
            created_at: entity.created_at,
        }
    }
}

impl From<&NewVideo> for video::ActiveModel {
    fn from(model: &NewVideo) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: NotSet,
            title: Set(model.title.clone()),
            duration: Set(model.duration.clone()),
            category: Set(model.category.clone()),
            section: Set(model.section.clone()),
            module: Set(Some(model.module.clone())),
            description: Set(model.description.clone()),
            thumbnail: Set(model.thumbnail.clone()),
            video_path: Set(model.video_path.clone()),
            file_size_mb: Set(model.file_size_mb),
            created_at: Set(Utc::now()),
        }
    }
}

// ===== Progress Conversions =====

impl From<progress::Model> for VideoProgress {
    fn from(entity: progress::Model) -> Self {
        Self {
            video_id: entity.video_id,
            completed_at: entity.completed_at,
        }
    }
}
