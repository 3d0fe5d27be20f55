//! Domain service - business logic orchestration

use super::agent_id::{format_code, next_from_pool};
use super::modules::plan_renumbering;
use super::password::{hash_password, verify_password};
use super::repository::{
    ProgressRepository, TerminationRepository, UserRepository, VideoRepository,
};
use super::validation;
use crate::auth::CurrentUser;
use crate::config::{BootstrapAdmin, Config};
use crate::contract::{
    AgentIdAssignment, AgentIdPreview, ChangePassword, CreateUser, NewUser, NewVideo, Role,
    Termination, TrainingError, User, UserPatch, Video, VideoPatch, VideoProgress,
};
use std::sync::Arc;

/// Reason recorded on terminations performed through the user endpoints
pub const ADMIN_TERMINATION_REASON: &str = "Terminated by admin";

/// Log a store failure and collapse it into an opaque internal error
fn store_error(operation: &'static str) -> impl FnOnce(anyhow::Error) -> TrainingError {
    move |e| {
        tracing::error!(operation, error = ?e, "store operation failed");
        TrainingError::Internal
    }
}

/// Domain service for the training portal
pub struct Service {
    users: Arc<dyn UserRepository>,
    terminations: Arc<dyn TerminationRepository>,
    videos: Arc<dyn VideoRepository>,
    progress: Arc<dyn ProgressRepository>,
    config: Config,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        users: Arc<dyn UserRepository>,
        terminations: Arc<dyn TerminationRepository>,
        videos: Arc<dyn VideoRepository>,
        progress: Arc<dyn ProgressRepository>,
        config: Config,
    ) -> Self {
        Self {
            users,
            terminations,
            videos,
            progress,
            config,
        }
    }

    // ===== Agent ID Operations =====

    /// Compute the next agent ID from the recycling pool without persisting it
    pub async fn preview_agent_id(&self) -> Result<AgentIdPreview, TrainingError> {
        let active = self
            .users
            .list_active_employee_codes()
            .await
            .map_err(store_error("list_active_employee_codes"))?;
        let terminated = self
            .terminations
            .list_terminated_employee_codes()
            .await
            .map_err(store_error("list_terminated_employee_codes"))?;

        let preview = next_from_pool(&active, &terminated);
        tracing::debug!(
            agent_id = %preview.agent_id,
            is_recycled = preview.is_recycled,
            recyclable = preview.recyclable_ids.len(),
            "computed next agent id"
        );
        Ok(preview)
    }

    /// Pick an agent ID from the recycling pool and store it on the user.
    ///
    /// The read and the write are not wrapped in one transaction, so two
    /// concurrent assignments can pick the same code.
    pub async fn assign_agent_id(&self, user_id: i32) -> Result<AgentIdAssignment, TrainingError> {
        let preview = self.preview_agent_id().await?;

        let updated = self
            .users
            .update_employee_code(user_id, &preview.agent_id)
            .await
            .map_err(store_error("update_employee_code"))?;
        if !updated {
            return Err(TrainingError::not_found("user", user_id));
        }

        tracing::info!(
            user_id,
            agent_id = %preview.agent_id,
            is_recycled = preview.is_recycled,
            "agent id assigned"
        );

        Ok(AgentIdAssignment {
            user_id,
            agent_id: preview.agent_id,
            is_recycled: preview.is_recycled,
        })
    }

    /// Next per-prefix code for `role` (`ADMnnn` / `EMPnnn`), never recycled
    pub async fn allocate_prefixed_code(&self, role: Role) -> Result<String, TrainingError> {
        let prefix = role.code_prefix();
        let max_suffix = self
            .users
            .max_suffix_for_prefix(prefix)
            .await
            .map_err(store_error("max_suffix_for_prefix"))?;

        let mut next = max_suffix + 1;
        loop {
            let candidate = format_code(prefix, next);
            let taken = self
                .users
                .employee_code_in_use(&candidate)
                .await
                .map_err(store_error("employee_code_in_use"))?;
            if !taken {
                return Ok(candidate);
            }
            tracing::debug!(%candidate, "employee code already held, trying next");
            next += 1;
        }
    }

    // ===== User Operations =====

    /// Create a user, deriving username and employee code when needed
    pub async fn create_user(&self, input: CreateUser) -> Result<User, TrainingError> {
        validation::validate_create_user(&input, self.config.min_password_length)?;
        let email = input.email.trim().to_string();

        if self
            .users
            .email_exists(&email)
            .await
            .map_err(store_error("email_exists"))?
        {
            return Err(TrainingError::conflict("Email already exists"));
        }

        let username = self.unique_username(validation::username_base(&email)).await?;

        let role = input.role.as_deref().map(Role::parse).unwrap_or(Role::Employee);
        let employee_id = match validation::clean_optional(input.employee_id) {
            Some(code) => code,
            None => self.allocate_prefixed_code(role).await?,
        };

        let password_hash = hash_password(&input.password).map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            TrainingError::Internal
        })?;

        let new_user = NewUser {
            username,
            name: input.name.trim().to_string(),
            email,
            password_hash,
            phone: validation::clean_optional(input.phone),
            department: validation::clean_optional(input.department),
            employee_id,
            role,
        };

        let user = self
            .users
            .create(&new_user)
            .await
            .map_err(store_error("create_user"))?;

        tracing::info!(
            user_id = user.id,
            username = %user.username,
            employee_id = user.employee_id.as_deref().unwrap_or(""),
            "user created"
        );
        Ok(user)
    }

    async fn unique_username(&self, base: &str) -> Result<String, TrainingError> {
        let mut candidate = base.to_string();
        let mut counter = 1;
        while self
            .users
            .username_exists(&candidate)
            .await
            .map_err(store_error("username_exists"))?
        {
            candidate = format!("{base}{counter}");
            counter += 1;
        }
        Ok(candidate)
    }

    /// Create the bootstrap administrator unless its email is already taken
    pub async fn ensure_admin(&self, seed: &BootstrapAdmin) -> Result<Option<User>, TrainingError> {
        if self
            .users
            .email_exists(seed.email.trim())
            .await
            .map_err(store_error("email_exists"))?
        {
            tracing::debug!(email = %seed.email, "bootstrap admin already present");
            return Ok(None);
        }

        let admin = self
            .create_user(CreateUser {
                name: seed.name.clone(),
                email: seed.email.clone(),
                password: seed.password.clone(),
                role: Some(Role::Admin.as_str().to_string()),
                ..Default::default()
            })
            .await?;
        Ok(Some(admin))
    }

    /// Get a user by id
    pub async fn get_user(&self, user_id: i32) -> Result<User, TrainingError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(store_error("find_user"))?
            .ok_or_else(|| TrainingError::not_found("user", user_id))
    }

    /// List all active users
    pub async fn list_users(&self) -> Result<Vec<User>, TrainingError> {
        self.users
            .list_all()
            .await
            .map_err(store_error("list_users"))
    }

    /// Update a profile. Users may edit themselves; administrators may edit
    /// anyone and change roles, except demoting themselves.
    pub async fn update_user(
        &self,
        actor: &CurrentUser,
        user_id: i32,
        patch: UserPatch,
    ) -> Result<User, TrainingError> {
        if !actor.is_admin() && actor.id != user_id {
            return Err(TrainingError::forbidden("Access denied"));
        }

        let update = validation::resolve_profile_update(patch, actor.is_admin())?;
        let demotes_self =
            actor.is_admin() && actor.id == user_id && update.role == Some(Role::Employee);
        if demotes_self {
            return Err(TrainingError::validation(
                "Admins cannot change their own role to non-admin",
            ));
        }
        if update.is_empty() {
            return Err(TrainingError::validation("No fields to update"));
        }

        self.get_user(user_id).await?;

        if let Some(username) = &update.username {
            if self
                .users
                .username_taken_by_other(username, user_id)
                .await
                .map_err(store_error("username_taken_by_other"))?
            {
                return Err(TrainingError::conflict("Username already exists"));
            }
        }
        if let Some(email) = &update.email {
            if self
                .users
                .email_taken_by_other(email, user_id)
                .await
                .map_err(store_error("email_taken_by_other"))?
            {
                return Err(TrainingError::conflict("Email already exists"));
            }
        }

        let user = self
            .users
            .update_profile(user_id, &update)
            .await
            .map_err(store_error("update_profile"))?
            .ok_or_else(|| TrainingError::not_found("user", user_id))?;

        tracing::info!(user_id, updated_by = actor.id, role = user.role.as_str(), "user updated");
        Ok(user)
    }

    /// Replace the caller's password after checking the current one
    pub async fn change_password(
        &self,
        user_id: i32,
        input: ChangePassword,
    ) -> Result<(), TrainingError> {
        validation::validate_password_change(&input, self.config.min_password_length)?;

        let current_hash = self
            .users
            .find_password_hash(user_id)
            .await
            .map_err(store_error("find_password_hash"))?
            .ok_or_else(|| TrainingError::not_found("user", user_id))?;

        if !verify_password(&input.current_password, &current_hash) {
            tracing::debug!(user_id, "password change rejected: current password mismatch");
            return Err(TrainingError::validation("Current password is incorrect"));
        }

        let password_hash = hash_password(&input.new_password).map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            TrainingError::Internal
        })?;

        let updated = self
            .users
            .update_password_hash(user_id, &password_hash)
            .await
            .map_err(store_error("update_password_hash"))?;
        if !updated {
            return Err(TrainingError::not_found("user", user_id));
        }

        tracing::info!(user_id, "password changed");
        Ok(())
    }

    /// Terminate a user on behalf of an administrator.
    ///
    /// The user's employee code becomes recyclable as soon as this returns.
    pub async fn terminate_user(
        &self,
        user_id: i32,
        terminated_by: i32,
    ) -> Result<Termination, TrainingError> {
        if user_id == terminated_by {
            return Err(TrainingError::validation(
                "You cannot delete your own account",
            ));
        }

        self.get_user(user_id).await?;

        let termination = self
            .users
            .terminate(user_id, terminated_by, ADMIN_TERMINATION_REASON)
            .await
            .map_err(store_error("terminate_user"))?;

        tracing::info!(
            user_id,
            terminated_by,
            employee_id = termination.employee_id.as_deref().unwrap_or(""),
            "user terminated"
        );
        Ok(termination)
    }

    /// Termination history, newest first
    pub async fn list_terminations(&self) -> Result<Vec<Termination>, TrainingError> {
        self.terminations
            .list_all()
            .await
            .map_err(store_error("list_terminations"))
    }

    /// Check a username/password pair and stamp the login time
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, TrainingError> {
        if username.is_empty() || password.is_empty() {
            return Err(TrainingError::validation(
                "Username and password are required",
            ));
        }

        let credentials = self
            .users
            .find_credentials(username)
            .await
            .map_err(store_error("find_credentials"))?;

        let Some(credentials) = credentials else {
            tracing::debug!(%username, "login failed: unknown user");
            return Err(TrainingError::unauthorized("Invalid username or password"));
        };
        if !verify_password(password, &credentials.password_hash) {
            tracing::debug!(%username, "login failed: password mismatch");
            return Err(TrainingError::unauthorized("Invalid username or password"));
        }

        let mut user = credentials.user;
        self.users
            .record_login(user.id)
            .await
            .map_err(store_error("record_login"))?;
        user.last_login = Some(chrono::Utc::now());
        Ok(user)
    }

    // ===== Video Operations =====

    /// Create a video, then reconcile module labels of its section
    pub async fn create_video(&self, mut video: NewVideo) -> Result<Video, TrainingError> {
        validation::validate_new_video(&video)?;
        validation::apply_video_defaults(&mut video);

        let created = self
            .videos
            .create(&video)
            .await
            .map_err(store_error("create_video"))?;

        self.reconcile_modules(&created.section).await;
        Ok(created)
    }

    /// Update a video, then reconcile module labels of its resulting section
    pub async fn update_video(&self, video_id: i32, patch: VideoPatch) -> Result<Video, TrainingError> {
        let existing = self.get_video(video_id).await?;

        if patch.is_empty() {
            return Err(TrainingError::validation("No fields to update"));
        }

        let updated = self
            .videos
            .update(video_id, &patch)
            .await
            .map_err(store_error("update_video"))?
            .ok_or_else(|| TrainingError::not_found("video", video_id))?;

        let section = patch.section.as_deref().unwrap_or(&existing.section);
        self.reconcile_modules(section).await;
        Ok(updated)
    }

    /// Get a video by id
    pub async fn get_video(&self, video_id: i32) -> Result<Video, TrainingError> {
        self.videos
            .find_by_id(video_id)
            .await
            .map_err(store_error("find_video"))?
            .ok_or_else(|| TrainingError::not_found("video", video_id))
    }

    /// List all videos
    pub async fn list_videos(&self) -> Result<Vec<Video>, TrainingError> {
        self.videos
            .list_all()
            .await
            .map_err(store_error("list_videos"))
    }

    /// Delete a video
    pub async fn delete_video(&self, video_id: i32) -> Result<(), TrainingError> {
        let deleted = self
            .videos
            .delete(video_id)
            .await
            .map_err(store_error("delete_video"))?;
        if !deleted {
            return Err(TrainingError::not_found("video", video_id));
        }
        Ok(())
    }

    // ===== Progress Operations =====

    /// Videos the user has completed, most recent first
    pub async fn user_progress(&self, user_id: i32) -> Result<Vec<VideoProgress>, TrainingError> {
        self.progress
            .list_for_user(user_id)
            .await
            .map_err(store_error("list_progress"))
    }

    /// Mark a video as watched by the user
    pub async fn mark_video_complete(
        &self,
        user_id: i32,
        video_id: i32,
    ) -> Result<VideoProgress, TrainingError> {
        self.get_video(video_id).await?;

        let progress = self
            .progress
            .mark_complete(user_id, video_id)
            .await
            .map_err(store_error("mark_complete"))?;

        tracing::debug!(user_id, video_id, "video marked complete");
        Ok(progress)
    }

    // ===== Module Reconciliation =====

    /// Best-effort post-commit hook: renumber module labels of `section` if
    /// any label repeats. Failures are logged and never reach the caller.
    pub async fn reconcile_modules(&self, section: &str) {
        match self.renumber_modules(section).await {
            Ok(0) => tracing::debug!(%section, "module labels already distinct"),
            Ok(renamed) => tracing::info!(%section, renamed, "module labels renumbered"),
            Err(e) => tracing::warn!(%section, error = ?e, "failed to reset module numbers"),
        }
    }

    /// Renumber module labels of `section` when a duplicate exists.
    ///
    /// Returns the number of videos renamed (0 when nothing changed).
    pub async fn renumber_modules(&self, section: &str) -> anyhow::Result<usize> {
        let slots = self.videos.list_by_section(section).await?;

        let Some(renames) = plan_renumbering(&slots) else {
            return Ok(0);
        };

        self.videos.bulk_update_modules(&renames).await?;
        Ok(renames.len())
    }
}
