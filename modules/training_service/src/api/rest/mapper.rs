//! Conversions between REST DTOs and contract models

use super::dto::*;
use crate::contract;

// ===== User conversions =====

impl From<contract::User> for UserDto {
    fn from(user: contract::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            phone: user.phone,
            department: user.department,
            employee_id: user.employee_id,
            role: user.role.as_str().to_string(),
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

impl From<CreateUserRequest> for contract::CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            phone: req.phone,
            department: req.department,
            employee_id: req.employee_id,
            role: req.role,
        }
    }
}

impl From<UpdateUserRequest> for contract::UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            username: req.username,
            name: req.name,
            email: req.email,
            phone: req.phone,
            department: req.department,
            role: req.role,
        }
    }
}

impl From<ChangePasswordRequest> for contract::ChangePassword {
    fn from(req: ChangePasswordRequest) -> Self {
        Self {
            current_password: req.current_password,
            new_password: req.new_password,
            confirm_password: req.confirm_password,
        }
    }
}

impl From<contract::Termination> for TerminationDto {
    fn from(record: contract::Termination) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            username: record.username,
            name: record.name,
            email: record.email,
            employee_id: record.employee_id,
            terminated_by: record.terminated_by,
            terminated_at: record.terminated_at,
            reason: record.reason,
        }
    }
}

// ===== Agent ID conversions =====

impl From<contract::AgentIdPreview> for AgentIdPreviewDto {
    fn from(preview: contract::AgentIdPreview) -> Self {
        Self {
            agent_id: preview.agent_id,
            is_recycled: preview.is_recycled,
            recyclable_ids: preview.recyclable_ids,
        }
    }
}

impl From<contract::AgentIdAssignment> for AgentIdAssignmentDto {
    fn from(assignment: contract::AgentIdAssignment) -> Self {
        Self {
            user_id: assignment.user_id,
            agent_id: assignment.agent_id,
            is_recycled: assignment.is_recycled,
        }
    }
}

// ===== Video conversions =====

impl From<contract::Video> for VideoDto {
    fn from(video: contract::Video) -> Self {
        Self {
            id: video.id,
            title: video.title,
            duration: video.duration,
            category: video.category,
            section: video.section,
            module: video.module,
            description: video.description,
            thumbnail: video.thumbnail,
            video_path: video.video_path,
            file_size_mb: video.file_size_mb,
            created_at: video.created_at,
        }
    }
}

impl From<CreateVideoRequest> for contract::NewVideo {
    fn from(req: CreateVideoRequest) -> Self {
        // Blank duration/description are defaulted by the service
        Self {
            title: req.title,
            duration: req.duration.unwrap_or_default(),
            category: req.category,
            section: req.section,
            module: req.module,
            description: req.description.unwrap_or_default(),
            thumbnail: req.thumbnail,
            video_path: req.video_path,
            file_size_mb: req.file_size_mb,
        }
    }
}

impl From<UpdateVideoRequest> for contract::VideoPatch {
    fn from(req: UpdateVideoRequest) -> Self {
        Self {
            title: req.title,
            duration: req.duration,
            category: req.category,
            section: req.section,
            module: req.module,
            description: req.description,
        }
    }
}

// ===== Progress conversions =====

impl From<contract::VideoProgress> for VideoProgressDto {
    fn from(progress: contract::VideoProgress) -> Self {
        Self {
            video_id: progress.video_id,
            completed_at: progress.completed_at,
        }
    }
}
