//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    auth::AdminUser,
    dto::*,
    error::{map_domain_error, map_token_error, Problem},
};
use crate::auth::{CurrentUser, TokenService};
use crate::contract::TrainingError;
use crate::domain::Service;
use axum::{extract::Path, http::StatusCode, Json};
use std::sync::Arc;

// ===== Auth Handlers =====

/// Exchange username and password for a bearer token
pub async fn login(
    service: Arc<Service>,
    tokens: Arc<TokenService>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Problem> {
    let user = service
        .authenticate(req.username.trim(), &req.password)
        .await
        .map_err(map_domain_error)?;

    let token = tokens.issue(&user).map_err(map_token_error)?;
    tracing::info!(user_id = user.id, username = %user.username, "user logged in");

    Ok(Json(LoginResponse {
        token,
        expires_in: tokens.ttl_secs(),
        user: user.into(),
    }))
}

// ===== User Handlers =====

/// List all active users
pub async fn list_users(
    service: Arc<Service>,
    _admin: AdminUser,
) -> Result<Json<UsersListResponse>, Problem> {
    let users = service.list_users().await.map_err(map_domain_error)?;

    let items: Vec<UserDto> = users.into_iter().map(|u| u.into()).collect();
    let total = items.len();

    Ok(Json(UsersListResponse { items, total }))
}

/// Get a user; callers may read themselves, admins anyone
pub async fn get_user(
    service: Arc<Service>,
    caller: CurrentUser,
    Path(user_id): Path<i32>,
) -> Result<Json<UserDto>, Problem> {
    if !caller.is_admin() && caller.id != user_id {
        return Err(map_domain_error(TrainingError::forbidden(
            "You can only view your own profile",
        )));
    }

    let user = service.get_user(user_id).await.map_err(map_domain_error)?;

    Ok(Json(user.into()))
}

/// Create a user
pub async fn create_user(
    service: Arc<Service>,
    _admin: AdminUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), Problem> {
    let user = service
        .create_user(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Update a profile; callers may edit themselves, admins anyone
pub async fn update_user(
    service: Arc<Service>,
    caller: CurrentUser,
    Path(user_id): Path<i32>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserDto>, Problem> {
    let user = service
        .update_user(&caller, user_id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(user.into()))
}

/// Change the caller's own password
pub async fn change_password(
    service: Arc<Service>,
    caller: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<StatusCode, Problem> {
    service
        .change_password(caller.id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Terminate a user, releasing their employee code for recycling
pub async fn terminate_user(
    service: Arc<Service>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<i32>,
) -> Result<Json<TerminationDto>, Problem> {
    let record = service
        .terminate_user(user_id, admin.id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(record.into()))
}

/// Termination history, newest first
pub async fn list_terminations(
    service: Arc<Service>,
    _admin: AdminUser,
) -> Result<Json<TerminationsListResponse>, Problem> {
    let records = service.list_terminations().await.map_err(map_domain_error)?;

    let items: Vec<TerminationDto> = records.into_iter().map(|t| t.into()).collect();
    let total = items.len();

    Ok(Json(TerminationsListResponse { items, total }))
}

// ===== Agent ID Handlers =====

/// Preview the next agent ID without assigning it
pub async fn next_agent_id(
    service: Arc<Service>,
    _admin: AdminUser,
) -> Result<Json<AgentIdPreviewDto>, Problem> {
    let preview = service.preview_agent_id().await.map_err(map_domain_error)?;

    Ok(Json(preview.into()))
}

/// Assign the next agent ID to a user
pub async fn assign_agent_id(
    service: Arc<Service>,
    _admin: AdminUser,
    Json(req): Json<AssignAgentIdRequest>,
) -> Result<Json<AgentIdAssignmentDto>, Problem> {
    let Some(user_id) = req.user_id else {
        return Err(map_domain_error(TrainingError::validation(
            "User ID is required",
        )));
    };

    let assignment = service
        .assign_agent_id(user_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(assignment.into()))
}

// ===== Video Handlers =====

/// List all videos
pub async fn list_videos(
    service: Arc<Service>,
    _caller: CurrentUser,
) -> Result<Json<VideosListResponse>, Problem> {
    let videos = service.list_videos().await.map_err(map_domain_error)?;

    let items: Vec<VideoDto> = videos.into_iter().map(|v| v.into()).collect();
    let total = items.len();

    Ok(Json(VideosListResponse { items, total }))
}

/// Get a specific video
pub async fn get_video(
    service: Arc<Service>,
    _caller: CurrentUser,
    Path(video_id): Path<i32>,
) -> Result<Json<VideoDto>, Problem> {
    let video = service.get_video(video_id).await.map_err(map_domain_error)?;

    Ok(Json(video.into()))
}

/// Create a video
pub async fn create_video(
    service: Arc<Service>,
    _admin: AdminUser,
    Json(req): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<VideoDto>), Problem> {
    let video = service
        .create_video(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(video.into())))
}

/// Patch a video
pub async fn update_video(
    service: Arc<Service>,
    _admin: AdminUser,
    Path(video_id): Path<i32>,
    Json(req): Json<UpdateVideoRequest>,
) -> Result<Json<VideoDto>, Problem> {
    let video = service
        .update_video(video_id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(video.into()))
}

/// Delete a video
pub async fn delete_video(
    service: Arc<Service>,
    _admin: AdminUser,
    Path(video_id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service
        .delete_video(video_id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Progress Handlers =====

/// Completed videos of the caller
pub async fn list_progress(
    service: Arc<Service>,
    caller: CurrentUser,
) -> Result<Json<ProgressListResponse>, Problem> {
    let progress = service
        .user_progress(caller.id)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<VideoProgressDto> = progress.into_iter().map(|p| p.into()).collect();
    let total = items.len();

    Ok(Json(ProgressListResponse { items, total }))
}

/// Mark a video as watched by the caller
pub async fn mark_complete(
    service: Arc<Service>,
    caller: CurrentUser,
    Json(req): Json<MarkCompleteRequest>,
) -> Result<Json<VideoProgressDto>, Problem> {
    let Some(video_id) = req.video_id else {
        return Err(map_domain_error(TrainingError::validation(
            "Video ID is required",
        )));
    };

    let progress = service
        .mark_video_complete(caller.id, video_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(progress.into()))
}
