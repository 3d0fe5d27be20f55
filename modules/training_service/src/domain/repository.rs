//! Repository traits for data access
//!
//! These traits are the relational store contract the domain depends on.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    ModuleRename, ModuleSlot, NewUser, NewVideo, ProfileUpdate, Termination, User,
    UserCredentials, Video, VideoPatch, VideoProgress,
};
use anyhow::Result;
use async_trait::async_trait;

/// Repository for active users and their employee codes
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Non-empty codes held by active users with role `employee`, ascending
    async fn list_active_employee_codes(&self) -> Result<Vec<String>>;

    /// Highest numeric suffix among codes shaped exactly `prefix` + 3 digits (0 if none)
    async fn max_suffix_for_prefix(&self, prefix: &str) -> Result<u32>;

    /// Whether any active user currently holds `code`
    async fn employee_code_in_use(&self, code: &str) -> Result<bool>;

    /// Set a user's employee code; returns false when no such user exists
    async fn update_employee_code(&self, user_id: i32, code: &str) -> Result<bool>;

    /// Insert a new user
    async fn create(&self, user: &NewUser) -> Result<User>;

    /// Find a user by primary key
    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>>;

    /// Find a user and their password hash by username
    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>>;

    /// Check whether an email is registered to an active user
    async fn email_exists(&self, email: &str) -> Result<bool>;

    /// Check whether a username is taken by an active user
    async fn username_exists(&self, username: &str) -> Result<bool>;

    /// Whether `username` belongs to an active user other than `user_id`
    async fn username_taken_by_other(&self, username: &str, user_id: i32) -> Result<bool>;

    /// Whether `email` belongs to an active user other than `user_id`
    async fn email_taken_by_other(&self, email: &str, user_id: i32) -> Result<bool>;

    /// Apply profile changes; returns the updated user or None if missing
    async fn update_profile(&self, user_id: i32, update: &ProfileUpdate) -> Result<Option<User>>;

    /// Stored password hash of a user
    async fn find_password_hash(&self, user_id: i32) -> Result<Option<String>>;

    /// Replace a user's password hash; returns false when no such user exists
    async fn update_password_hash(&self, user_id: i32, password_hash: &str) -> Result<bool>;

    /// List all active users ordered by id
    async fn list_all(&self) -> Result<Vec<User>>;

    /// Stamp the last successful login
    async fn record_login(&self, user_id: i32) -> Result<()>;

    /// Write a termination record for the user and remove the user row and
    /// their watch progress atomically
    async fn terminate(&self, user_id: i32, terminated_by: i32, reason: &str)
        -> Result<Termination>;
}

/// Repository for termination history
#[async_trait]
pub trait TerminationRepository: Send + Sync {
    /// Non-empty codes recorded in termination history, ascending
    async fn list_terminated_employee_codes(&self) -> Result<Vec<String>>;

    /// All termination records, newest first
    async fn list_all(&self) -> Result<Vec<Termination>>;
}

/// Repository for training videos
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Insert a new video
    async fn create(&self, video: &NewVideo) -> Result<Video>;

    /// Find a video by primary key
    async fn find_by_id(&self, video_id: i32) -> Result<Option<Video>>;

    /// List all videos ordered by id
    async fn list_all(&self) -> Result<Vec<Video>>;

    /// Apply a partial update; returns the updated video or None if missing
    async fn update(&self, video_id: i32, patch: &VideoPatch) -> Result<Option<Video>>;

    /// Delete a video and its watch progress; returns false when no such video exists
    async fn delete(&self, video_id: i32) -> Result<bool>;

    /// `{id, module}` of every video in `section`, ascending by id
    async fn list_by_section(&self, section: &str) -> Result<Vec<ModuleSlot>>;

    /// Apply all renames in a single transaction, all or nothing
    async fn bulk_update_modules(&self, renames: &[ModuleRename]) -> Result<()>;
}

/// Repository for per-user video completion
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Completed videos of a user, most recent first
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<VideoProgress>>;

    /// Record a completion, refreshing the timestamp when already recorded
    async fn mark_complete(&self, user_id: i32, video_id: i32) -> Result<VideoProgress>;
}
