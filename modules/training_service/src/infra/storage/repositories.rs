//! SeaORM repository implementations

use crate::contract::{
    ModuleRename, ModuleSlot, NewUser, NewVideo, ProfileUpdate, Role, Termination, User,
    UserCredentials, Video, VideoPatch, VideoProgress,
};
use crate::domain::agent_id::parse_suffix;
use crate::domain::repository::{
    ProgressRepository, TerminationRepository, UserRepository, VideoRepository,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    prelude::Expr, sea_query::OnConflict, ActiveModelTrait, ActiveValue::Set, ColumnTrait,
    DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use std::sync::Arc;

use super::entity::{progress, termination, user, video};
use super::mapper::{apply_profile_update, termination_from_user};

// ===== User Repository =====

pub struct SeaOrmUserRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn list_active_employee_codes(&self) -> Result<Vec<String>> {
        let codes: Vec<Option<String>> = user::Entity::find()
            .select_only()
            .column(user::Column::EmployeeId)
            .filter(user::Column::Role.eq(Role::Employee.as_str()))
            .filter(user::Column::EmployeeId.is_not_null())
            .filter(user::Column::EmployeeId.ne(""))
            .order_by_asc(user::Column::EmployeeId)
            .into_tuple()
            .all(&*self.db)
            .await?;

        Ok(codes.into_iter().flatten().collect())
    }

    async fn max_suffix_for_prefix(&self, prefix: &str) -> Result<u32> {
        // LIKE narrows the scan; the exact `PREFIX` + 3 digits shape is
        // checked in Rust so the query stays portable.
        let codes: Vec<Option<String>> = user::Entity::find()
            .select_only()
            .column(user::Column::EmployeeId)
            .filter(user::Column::EmployeeId.starts_with(prefix))
            .into_tuple()
            .all(&*self.db)
            .await?;

        Ok(codes
            .iter()
            .flatten()
            .filter_map(|code| parse_suffix(code, prefix))
            .max()
            .unwrap_or(0))
    }

    async fn employee_code_in_use(&self, code: &str) -> Result<bool> {
        let count = user::Entity::find()
            .filter(user::Column::EmployeeId.eq(code))
            .count(&*self.db)
            .await?;

        Ok(count > 0)
    }

    async fn update_employee_code(&self, user_id: i32, code: &str) -> Result<bool> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::EmployeeId, Expr::value(code))
            .filter(user::Column::Id.eq(user_id))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn create(&self, new_user: &NewUser) -> Result<User> {
        let active: user::ActiveModel = new_user.into();

        let result = user::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        Ok(result.into())
    }

    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>> {
        let result = user::Entity::find_by_id(user_id).one(&*self.db).await?;

        Ok(result.map(|e| e.into()))
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>> {
        let result = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.db)
            .await?;

        Ok(result.map(|e| e.into()))
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(&*self.db)
            .await?;

        Ok(count > 0)
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .count(&*self.db)
            .await?;

        Ok(count > 0)
    }

    async fn username_taken_by_other(&self, username: &str, user_id: i32) -> Result<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::Id.ne(user_id))
            .count(&*self.db)
            .await?;

        Ok(count > 0)
    }

    async fn email_taken_by_other(&self, email: &str, user_id: i32) -> Result<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::Id.ne(user_id))
            .count(&*self.db)
            .await?;

        Ok(count > 0)
    }

    async fn update_profile(&self, user_id: i32, update: &ProfileUpdate) -> Result<Option<User>> {
        let Some(existing) = user::Entity::find_by_id(user_id).one(&*self.db).await? else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();
        apply_profile_update(&mut active, update);

        let updated = active.update(&*self.db).await?;
        Ok(Some(updated.into()))
    }

    async fn find_password_hash(&self, user_id: i32) -> Result<Option<String>> {
        let hash: Option<String> = user::Entity::find_by_id(user_id)
            .select_only()
            .column(user::Column::PasswordHash)
            .into_tuple()
            .one(&*self.db)
            .await?;

        Ok(hash)
    }

    async fn update_password_hash(&self, user_id: i32, password_hash: &str) -> Result<bool> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(password_hash))
            .filter(user::Column::Id.eq(user_id))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        let results = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn record_login(&self, user_id: i32) -> Result<()> {
        user::Entity::update_many()
            .col_expr(user::Column::LastLogin, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(user_id))
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn terminate(
        &self,
        user_id: i32,
        terminated_by: i32,
        reason: &str,
    ) -> Result<Termination> {
        let txn = self.db.begin().await?;

        let existing = user::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| anyhow!("user {user_id} not found"))?;

        let record = termination::Entity::insert(termination_from_user(
            &existing,
            terminated_by,
            reason,
        ))
        .exec_with_returning(&txn)
        .await?;

        progress::Entity::delete_many()
            .filter(progress::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;
        user::Entity::delete_by_id(user_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(record.into())
    }
}

// ===== Termination Repository =====

pub struct SeaOrmTerminationRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTerminationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TerminationRepository for SeaOrmTerminationRepository {
    async fn list_terminated_employee_codes(&self) -> Result<Vec<String>> {
        let codes: Vec<Option<String>> = termination::Entity::find()
            .select_only()
            .column(termination::Column::EmployeeId)
            .filter(termination::Column::EmployeeId.is_not_null())
            .filter(termination::Column::EmployeeId.ne(""))
            .order_by_asc(termination::Column::EmployeeId)
            .into_tuple()
            .all(&*self.db)
            .await?;

        Ok(codes.into_iter().flatten().collect())
    }

    async fn list_all(&self) -> Result<Vec<Termination>> {
        let results = termination::Entity::find()
            .order_by_desc(termination::Column::TerminatedAt)
            .order_by_desc(termination::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }
}

// ===== Video Repository =====

pub struct SeaOrmVideoRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmVideoRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VideoRepository for SeaOrmVideoRepository {
    async fn create(&self, new_video: &NewVideo) -> Result<Video> {
        let active: video::ActiveModel = new_video.into();

        let result = video::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;

        Ok(result.into())
    }

    async fn find_by_id(&self, video_id: i32) -> Result<Option<Video>> {
        let result = video::Entity::find_by_id(video_id).one(&*self.db).await?;

        Ok(result.map(|e| e.into()))
    }

    async fn list_all(&self) -> Result<Vec<Video>> {
        let results = video::Entity::find()
            .order_by_asc(video::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn update(&self, video_id: i32, patch: &VideoPatch) -> Result<Option<Video>> {
        let Some(existing) = video::Entity::find_by_id(video_id).one(&*self.db).await? else {
            return Ok(None);
        };

        let mut active: video::ActiveModel = existing.into();
        if let Some(title) = &patch.title {
            active.title = Set(title.clone());
        }
        if let Some(duration) = &patch.duration {
            active.duration = Set(duration.clone());
        }
        if let Some(category) = &patch.category {
            active.category = Set(category.clone());
        }
        if let Some(section) = &patch.section {
            active.section = Set(section.clone());
        }
        if let Some(module) = &patch.module {
            active.module = Set(Some(module.clone()));
        }
        if let Some(description) = &patch.description {
            active.description = Set(description.clone());
        }

        let updated = active.update(&*self.db).await?;
        Ok(Some(updated.into()))
    }

    async fn delete(&self, video_id: i32) -> Result<bool> {
        let txn = self.db.begin().await?;

        progress::Entity::delete_many()
            .filter(progress::Column::VideoId.eq(video_id))
            .exec(&txn)
            .await?;
        let result = video::Entity::delete_by_id(video_id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    async fn list_by_section(&self, section: &str) -> Result<Vec<ModuleSlot>> {
        let rows: Vec<(i32, Option<String>)> = video::Entity::find()
            .select_only()
            .column(video::Column::Id)
            .column(video::Column::Module)
            .filter(video::Column::Section.eq(section))
            .order_by_asc(video::Column::Id)
            .into_tuple()
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, module)| ModuleSlot { id, module })
            .collect())
    }

    async fn bulk_update_modules(&self, renames: &[ModuleRename]) -> Result<()> {
        // Dropping the transaction on error rolls every rename back.
        let txn = self.db.begin().await?;

        for rename in renames {
            video::Entity::update_many()
                .col_expr(video::Column::Module, Expr::value(rename.module.clone()))
                .filter(video::Column::Id.eq(rename.id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(())
    }
}

// ===== Progress Repository =====

pub struct SeaOrmProgressRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmProgressRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProgressRepository for SeaOrmProgressRepository {
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<VideoProgress>> {
        let results = progress::Entity::find()
            .filter(progress::Column::UserId.eq(user_id))
            .order_by_desc(progress::Column::CompletedAt)
            .order_by_desc(progress::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn mark_complete(&self, user_id: i32, video_id: i32) -> Result<VideoProgress> {
        let completed_at = Utc::now();
        let active = progress::ActiveModel {
            user_id: Set(user_id),
            video_id: Set(video_id),
            completed_at: Set(completed_at),
            ..Default::default()
        };

        progress::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([progress::Column::UserId, progress::Column::VideoId])
                    .update_column(progress::Column::CompletedAt)
                    .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await?;

        Ok(VideoProgress {
            video_id,
            completed_at,
        })
    }
}
