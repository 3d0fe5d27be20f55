//! Shared test fixtures: an in-memory store implementing every repository

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use training_service::config::Config;
use training_service::contract::*;
use training_service::domain::repository::{
    ProgressRepository, TerminationRepository, UserRepository, VideoRepository,
};
use training_service::domain::Service;

#[derive(Default)]
struct State {
    users: BTreeMap<i32, (User, String)>,
    terminations: Vec<Termination>,
    videos: BTreeMap<i32, Video>,
    progress: Vec<(i32, VideoProgress)>,
    next_user_id: i32,
    next_termination_id: i32,
    next_video_id: i32,
}

/// In-memory stand-in for the relational store
#[derive(Default)]
pub struct MockStore {
    state: RwLock<State>,
    fail_bulk_update: AtomicBool,
    bulk_update_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every following `bulk_update_modules` call fail
    pub fn fail_module_updates(&self) {
        self.fail_bulk_update.store(true, Ordering::SeqCst);
    }

    /// Number of `bulk_update_modules` calls, failed ones included
    pub fn bulk_update_calls(&self) -> usize {
        self.bulk_update_calls.load(Ordering::SeqCst)
    }

    /// Insert a user directly, bypassing the service
    pub fn seed_user(&self, username: &str, role: Role, employee_id: Option<&str>) -> i32 {
        let mut state = self.state.write();
        state.next_user_id += 1;
        let id = state.next_user_id;
        let user = User {
            id,
            username: username.to_string(),
            name: username.to_string(),
            email: format!("{username}@example.com"),
            phone: None,
            department: None,
            employee_id: employee_id.map(str::to_string),
            role,
            created_at: Utc::now(),
            last_login: None,
        };
        state.users.insert(id, (user, String::new()));
        id
    }

    /// Record a termination directly, bypassing the service
    pub fn seed_termination(&self, employee_id: &str) {
        let mut state = self.state.write();
        state.next_termination_id += 1;
        let id = state.next_termination_id;
        state.terminations.push(Termination {
            id,
            user_id: 1000 + id,
            username: format!("former{id}"),
            name: format!("Former {id}"),
            email: format!("former{id}@example.com"),
            employee_id: Some(employee_id.to_string()),
            terminated_by: 1,
            terminated_at: Utc::now(),
            reason: "seeded".to_string(),
        });
    }

    /// Insert a video directly, bypassing the service and its reconciliation
    pub fn seed_video(&self, section: &str, module: Option<&str>) -> i32 {
        let mut state = self.state.write();
        state.next_video_id += 1;
        let id = state.next_video_id;
        state.videos.insert(
            id,
            Video {
                id,
                title: format!("Video {id}"),
                duration: "TBD".to_string(),
                category: "General".to_string(),
                section: section.to_string(),
                module: module.map(str::to_string),
                description: "No description".to_string(),
                thumbnail: None,
                video_path: None,
                file_size_mb: None,
                created_at: Utc::now(),
            },
        );
        id
    }

    pub fn user(&self, id: i32) -> Option<User> {
        self.state.read().users.get(&id).map(|(u, _)| u.clone())
    }

    pub fn active_codes(&self) -> Vec<String> {
        self.state
            .read()
            .users
            .values()
            .filter_map(|(u, _)| u.employee_id.clone())
            .collect()
    }

    /// Stored password hash of a user
    pub fn password_hash(&self, id: i32) -> Option<String> {
        self.state.read().users.get(&id).map(|(_, hash)| hash.clone())
    }

    /// Number of progress rows held for a user
    pub fn progress_rows(&self, user_id: i32) -> usize {
        self.state
            .read()
            .progress
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .count()
    }

    /// Module labels of a section in id order
    pub fn modules_in(&self, section: &str) -> Vec<Option<String>> {
        self.state
            .read()
            .videos
            .values()
            .filter(|v| v.section == section)
            .map(|v| v.module.clone())
            .collect()
    }
}

#[async_trait]
impl UserRepository for MockStore {
    async fn list_active_employee_codes(&self) -> anyhow::Result<Vec<String>> {
        let mut codes: Vec<String> = self
            .state
            .read()
            .users
            .values()
            .filter(|(u, _)| u.role == Role::Employee)
            .filter_map(|(u, _)| u.employee_id.clone())
            .filter(|c| !c.is_empty())
            .collect();
        codes.sort();
        Ok(codes)
    }

    async fn max_suffix_for_prefix(&self, prefix: &str) -> anyhow::Result<u32> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .filter_map(|(u, _)| u.employee_id.as_deref())
            .filter_map(|c| training_service::domain::agent_id::parse_suffix(c, prefix))
            .max()
            .unwrap_or(0))
    }

    async fn employee_code_in_use(&self, code: &str) -> anyhow::Result<bool> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .any(|(u, _)| u.employee_id.as_deref() == Some(code)))
    }

    async fn update_employee_code(&self, user_id: i32, code: &str) -> anyhow::Result<bool> {
        let mut state = self.state.write();
        match state.users.get_mut(&user_id) {
            Some((user, _)) => {
                user.employee_id = Some(code.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn create(&self, new_user: &NewUser) -> anyhow::Result<User> {
        let mut state = self.state.write();
        state.next_user_id += 1;
        let id = state.next_user_id;
        let user = User {
            id,
            username: new_user.username.clone(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            phone: new_user.phone.clone(),
            department: new_user.department.clone(),
            employee_id: Some(new_user.employee_id.clone()),
            role: new_user.role,
            created_at: Utc::now(),
            last_login: None,
        };
        state
            .users
            .insert(id, (user.clone(), new_user.password_hash.clone()));
        Ok(user)
    }

    async fn find_by_id(&self, user_id: i32) -> anyhow::Result<Option<User>> {
        Ok(self.user(user_id))
    }

    async fn find_credentials(&self, username: &str) -> anyhow::Result<Option<UserCredentials>> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .find(|(u, _)| u.username == username)
            .map(|(user, hash)| UserCredentials {
                user: user.clone(),
                password_hash: hash.clone(),
            }))
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        Ok(self.state.read().users.values().any(|(u, _)| u.email == email))
    }

    async fn username_exists(&self, username: &str) -> anyhow::Result<bool> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .any(|(u, _)| u.username == username))
    }

    async fn username_taken_by_other(&self, username: &str, user_id: i32) -> anyhow::Result<bool> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .any(|(u, _)| u.username == username && u.id != user_id))
    }

    async fn email_taken_by_other(&self, email: &str, user_id: i32) -> anyhow::Result<bool> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .any(|(u, _)| u.email == email && u.id != user_id))
    }

    async fn update_profile(
        &self,
        user_id: i32,
        update: &ProfileUpdate,
    ) -> anyhow::Result<Option<User>> {
        let mut state = self.state.write();
        let Some((user, _)) = state.users.get_mut(&user_id) else {
            return Ok(None);
        };
        if let Some(v) = &update.username {
            user.username = v.clone();
        }
        if let Some(v) = &update.name {
            user.name = v.clone();
        }
        if let Some(v) = &update.email {
            user.email = v.clone();
        }
        if let Some(v) = &update.phone {
            user.phone = v.clone();
        }
        if let Some(v) = &update.department {
            user.department = v.clone();
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        Ok(Some(user.clone()))
    }

    async fn find_password_hash(&self, user_id: i32) -> anyhow::Result<Option<String>> {
        Ok(self.password_hash(user_id))
    }

    async fn update_password_hash(&self, user_id: i32, password_hash: &str) -> anyhow::Result<bool> {
        let mut state = self.state.write();
        match state.users.get_mut(&user_id) {
            Some((_, hash)) => {
                *hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        Ok(self
            .state
            .read()
            .users
            .values()
            .map(|(u, _)| u.clone())
            .collect())
    }

    async fn record_login(&self, user_id: i32) -> anyhow::Result<()> {
        if let Some((user, _)) = self.state.write().users.get_mut(&user_id) {
            user.last_login = Some(Utc::now());
        }
        Ok(())
    }

    async fn terminate(
        &self,
        user_id: i32,
        terminated_by: i32,
        reason: &str,
    ) -> anyhow::Result<Termination> {
        let mut state = self.state.write();
        let (user, _) = state
            .users
            .remove(&user_id)
            .ok_or_else(|| anyhow::anyhow!("user {user_id} not found"))?;
        state.progress.retain(|(owner, _)| *owner != user_id);
        state.next_termination_id += 1;
        let record = Termination {
            id: state.next_termination_id,
            user_id,
            username: user.username,
            name: user.name,
            email: user.email,
            employee_id: user.employee_id,
            terminated_by,
            terminated_at: Utc::now(),
            reason: reason.to_string(),
        };
        state.terminations.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl TerminationRepository for MockStore {
    async fn list_terminated_employee_codes(&self) -> anyhow::Result<Vec<String>> {
        let mut codes: Vec<String> = self
            .state
            .read()
            .terminations
            .iter()
            .filter_map(|t| t.employee_id.clone())
            .filter(|c| !c.is_empty())
            .collect();
        codes.sort();
        Ok(codes)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Termination>> {
        let mut records = self.state.read().terminations.clone();
        records.reverse();
        Ok(records)
    }
}

#[async_trait]
impl VideoRepository for MockStore {
    async fn create(&self, new_video: &NewVideo) -> anyhow::Result<Video> {
        let mut state = self.state.write();
        state.next_video_id += 1;
        let id = state.next_video_id;
        let video = Video {
            id,
            title: new_video.title.clone(),
            duration: new_video.duration.clone(),
            category: new_video.category.clone(),
            section: new_video.section.clone(),
            module: Some(new_video.module.clone()),
            description: new_video.description.clone(),
            thumbnail: new_video.thumbnail.clone(),
            video_path: new_video.video_path.clone(),
            file_size_mb: new_video.file_size_mb,
            created_at: Utc::now(),
        };
        state.videos.insert(id, video.clone());
        Ok(video)
    }

    async fn find_by_id(&self, video_id: i32) -> anyhow::Result<Option<Video>> {
        Ok(self.state.read().videos.get(&video_id).cloned())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Video>> {
        Ok(self.state.read().videos.values().cloned().collect())
    }

    async fn update(&self, video_id: i32, patch: &VideoPatch) -> anyhow::Result<Option<Video>> {
        let mut state = self.state.write();
        let Some(video) = state.videos.get_mut(&video_id) else {
            return Ok(None);
        };
        if let Some(v) = &patch.title {
            video.title = v.clone();
        }
        if let Some(v) = &patch.duration {
            video.duration = v.clone();
        }
        if let Some(v) = &patch.category {
            video.category = v.clone();
        }
        if let Some(v) = &patch.section {
            video.section = v.clone();
        }
        if let Some(v) = &patch.module {
            video.module = Some(v.clone());
        }
        if let Some(v) = &patch.description {
            video.description = v.clone();
        }
        Ok(Some(video.clone()))
    }

    async fn delete(&self, video_id: i32) -> anyhow::Result<bool> {
        let mut state = self.state.write();
        state.progress.retain(|(_, p)| p.video_id != video_id);
        Ok(state.videos.remove(&video_id).is_some())
    }

    async fn list_by_section(&self, section: &str) -> anyhow::Result<Vec<ModuleSlot>> {
        Ok(self
            .state
            .read()
            .videos
            .values()
            .filter(|v| v.section == section)
            .map(|v| ModuleSlot {
                id: v.id,
                module: v.module.clone(),
            })
            .collect())
    }

    async fn bulk_update_modules(&self, renames: &[ModuleRename]) -> anyhow::Result<()> {
        self.bulk_update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_bulk_update.load(Ordering::SeqCst) {
            anyhow::bail!("injected bulk update failure");
        }
        let mut state = self.state.write();
        for rename in renames {
            if let Some(video) = state.videos.get_mut(&rename.id) {
                video.module = Some(rename.module.clone());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for MockStore {
    async fn list_for_user(&self, user_id: i32) -> anyhow::Result<Vec<VideoProgress>> {
        let mut items: Vec<VideoProgress> = self
            .state
            .read()
            .progress
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, p)| p.clone())
            .collect();
        // Later rows win ties on the timestamp
        items.reverse();
        items.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(items)
    }

    async fn mark_complete(&self, user_id: i32, video_id: i32) -> anyhow::Result<VideoProgress> {
        let mut state = self.state.write();
        state
            .progress
            .retain(|(owner, p)| !(*owner == user_id && p.video_id == video_id));
        let progress = VideoProgress {
            video_id,
            completed_at: Utc::now(),
        };
        state.progress.push((user_id, progress.clone()));
        Ok(progress)
    }
}

/// Service wired to a single mock store
pub fn service_with(store: &Arc<MockStore>) -> Service {
    Service::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        Config::default(),
    )
}
