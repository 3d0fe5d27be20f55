//! Route registration

use super::{auth::AdminUser, dto::*, error::Problem, handlers, openapi::ApiDoc};
use crate::auth::{CurrentUser, TokenService};
use crate::domain::Service;
use axum::{
    extract::Path,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

/// Register all REST routes
pub fn register_routes(router: Router, service: Arc<Service>, tokens: Arc<TokenService>) -> Router {
    router
        .route("/openapi.json", get(openapi_handler))
        // Auth
        .route("/auth/login", post(login_handler))
        .route("/auth/change-password", post(change_password_handler))
        // Users
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(terminate_user_handler),
        )
        .route("/terminations", get(list_terminations_handler))
        // Agent IDs
        .route("/agent-ids/next", get(next_agent_id_handler))
        .route("/agent-ids/assign", post(assign_agent_id_handler))
        // Videos
        .route("/videos", get(list_videos_handler).post(create_video_handler))
        .route(
            "/videos/{id}",
            get(get_video_handler)
                .put(update_video_handler)
                .delete(delete_video_handler),
        )
        // Progress
        .route("/progress", get(list_progress_handler).post(mark_complete_handler))
        // Shared state for handlers and the bearer extractors
        .layer(Extension(service))
        .layer(Extension(tokens))
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

// ===== Handler wrappers that extract service from Extension =====

async fn login_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(tokens): Extension<Arc<TokenService>>,
    json: Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Problem> {
    handlers::login(service, tokens, json).await
}

async fn list_users_handler(
    Extension(service): Extension<Arc<Service>>,
    admin: AdminUser,
) -> Result<Json<UsersListResponse>, Problem> {
    handlers::list_users(service, admin).await
}

async fn get_user_handler(
    Extension(service): Extension<Arc<Service>>,
    caller: CurrentUser,
    path: Path<i32>,
) -> Result<Json<UserDto>, Problem> {
    handlers::get_user(service, caller, path).await
}

async fn create_user_handler(
    Extension(service): Extension<Arc<Service>>,
    admin: AdminUser,
    json: Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), Problem> {
    handlers::create_user(service, admin, json).await
}

async fn update_user_handler(
    Extension(service): Extension<Arc<Service>>,
    caller: CurrentUser,
    path: Path<i32>,
    json: Json<UpdateUserRequest>,
) -> Result<Json<UserDto>, Problem> {
    handlers::update_user(service, caller, path, json).await
}

async fn change_password_handler(
    Extension(service): Extension<Arc<Service>>,
    caller: CurrentUser,
    json: Json<ChangePasswordRequest>,
) -> Result<StatusCode, Problem> {
    handlers::change_password(service, caller, json).await
}

async fn terminate_user_handler(
    Extension(service): Extension<Arc<Service>>,
    admin: AdminUser,
    path: Path<i32>,
) -> Result<Json<TerminationDto>, Problem> {
    handlers::terminate_user(service, admin, path).await
}

async fn list_terminations_handler(
    Extension(service): Extension<Arc<Service>>,
    admin: AdminUser,
) -> Result<Json<TerminationsListResponse>, Problem> {
    handlers::list_terminations(service, admin).await
}

async fn next_agent_id_handler(
    Extension(service): Extension<Arc<Service>>,
    admin: AdminUser,
) -> Result<Json<AgentIdPreviewDto>, Problem> {
    handlers::next_agent_id(service, admin).await
}

async fn assign_agent_id_handler(
    Extension(service): Extension<Arc<Service>>,
    admin: AdminUser,
    json: Json<AssignAgentIdRequest>,
) -> Result<Json<AgentIdAssignmentDto>, Problem> {
    handlers::assign_agent_id(service, admin, json).await
}

async fn list_videos_handler(
    Extension(service): Extension<Arc<Service>>,
    caller: CurrentUser,
) -> Result<Json<VideosListResponse>, Problem> {
    handlers::list_videos(service, caller).await
}

async fn get_video_handler(
    Extension(service): Extension<Arc<Service>>,
    caller: CurrentUser,
    path: Path<i32>,
) -> Result<Json<VideoDto>, Problem> {
    handlers::get_video(service, caller, path).await
}

async fn create_video_handler(
    Extension(service): Extension<Arc<Service>>,
    admin: AdminUser,
    json: Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<VideoDto>), Problem> {
    handlers::create_video(service, admin, json).await
}

async fn update_video_handler(
    Extension(service): Extension<Arc<Service>>,
    admin: AdminUser,
    path: Path<i32>,
    json: Json<UpdateVideoRequest>,
) -> Result<Json<VideoDto>, Problem> {
    handlers::update_video(service, admin, path, json).await
}

async fn delete_video_handler(
    Extension(service): Extension<Arc<Service>>,
    admin: AdminUser,
    path: Path<i32>,
) -> Result<StatusCode, Problem> {
    handlers::delete_video(service, admin, path).await
}

async fn list_progress_handler(
    Extension(service): Extension<Arc<Service>>,
    caller: CurrentUser,
) -> Result<Json<ProgressListResponse>, Problem> {
    handlers::list_progress(service, caller).await
}

async fn mark_complete_handler(
    Extension(service): Extension<Arc<Service>>,
    caller: CurrentUser,
    json: Json<MarkCompleteRequest>,
) -> Result<Json<VideoProgressDto>, Problem> {
    handlers::mark_complete(service, caller, json).await
}
