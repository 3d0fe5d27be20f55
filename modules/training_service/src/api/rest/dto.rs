//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Auth DTOs =====

/// Login request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    #[schema(example = "jane.doe")]
    pub username: String,

    pub password: String,
}

/// Login response carrying the bearer token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// HS256 bearer token
    pub token: String,

    /// Seconds until the token expires
    pub expires_in: i64,

    pub user: UserDto,
}

// ===== User DTOs =====

/// User response DTO. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,

    #[schema(example = "jane.doe")]
    pub username: String,

    pub name: String,

    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    /// Employee code (agent ID)
    #[schema(example = "EMP007")]
    pub employee_id: Option<String>,

    #[schema(example = "employee")]
    pub role: String,

    pub created_at: DateTime<Utc>,

    pub last_login: Option<DateTime<Utc>>,
}

/// User creation request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateUserRequest {
    pub name: String,

    #[schema(example = "jane.doe@example.com")]
    pub email: String,

    pub password: String,

    pub phone: Option<String>,

    pub department: Option<String>,

    /// Explicit employee code; generated per role when absent or blank
    pub employee_id: Option<String>,

    /// `employee` (default) or `admin`
    pub role: Option<String>,
}

/// Partial profile update; omitted fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,

    pub name: Option<String>,

    pub email: Option<String>,

    /// Blank clears the stored value
    pub phone: Option<String>,

    /// Blank clears the stored value
    pub department: Option<String>,

    /// Admin only; ignored for other callers
    #[schema(example = "employee")]
    pub role: Option<String>,
}

/// Password change for the calling user
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    pub new_password: String,

    pub confirm_password: String,
}

/// List of active users
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsersListResponse {
    pub items: Vec<UserDto>,

    pub total: usize,
}

/// Termination record DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TerminationDto {
    pub id: i32,

    pub user_id: i32,

    pub username: String,

    pub name: String,

    pub email: String,

    pub employee_id: Option<String>,

    pub terminated_by: i32,

    pub terminated_at: DateTime<Utc>,

    #[schema(example = "Terminated by admin")]
    pub reason: String,
}

/// Termination history, newest first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TerminationsListResponse {
    pub items: Vec<TerminationDto>,

    pub total: usize,
}

// ===== Agent ID DTOs =====

/// Next agent ID from the recycling pool
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AgentIdPreviewDto {
    #[schema(example = "EMP003")]
    pub agent_id: String,

    pub is_recycled: bool,

    /// All currently recyclable codes; empty when a fresh code was minted
    pub recyclable_ids: Vec<String>,
}

/// Agent ID assignment request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AssignAgentIdRequest {
    pub user_id: Option<i32>,
}

/// Agent ID assignment result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AgentIdAssignmentDto {
    pub user_id: i32,

    #[schema(example = "EMP003")]
    pub agent_id: String,

    pub is_recycled: bool,
}

// ===== Video DTOs =====

/// Video response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoDto {
    pub id: i32,

    pub title: String,

    #[schema(example = "12:30")]
    pub duration: String,

    pub category: String,

    #[schema(example = "Chapter 1")]
    pub section: String,

    #[schema(example = "Module 01")]
    pub module: Option<String>,

    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size_mb: Option<f64>,

    pub created_at: DateTime<Utc>,
}

/// Video creation request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateVideoRequest {
    pub title: String,

    /// Defaults to `TBD`
    pub duration: Option<String>,

    pub category: String,

    pub section: String,

    pub module: String,

    /// Defaults to `No description`
    pub description: Option<String>,

    pub thumbnail: Option<String>,

    pub video_path: Option<String>,

    pub file_size_mb: Option<f64>,
}

/// Partial video update; omitted fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateVideoRequest {
    pub title: Option<String>,

    pub duration: Option<String>,

    pub category: Option<String>,

    pub section: Option<String>,

    pub module: Option<String>,

    pub description: Option<String>,
}

/// List of videos
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideosListResponse {
    pub items: Vec<VideoDto>,

    pub total: usize,
}

// ===== Progress DTOs =====

/// Mark-as-watched request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct MarkCompleteRequest {
    pub video_id: Option<i32>,
}

/// A completed video
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoProgressDto {
    pub video_id: i32,

    pub completed_at: DateTime<Utc>,
}

/// Completed videos of the caller, most recent first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProgressListResponse {
    pub items: Vec<VideoProgressDto>,

    pub total: usize,
}

// Note: Conversion implementations live in mapper.rs
