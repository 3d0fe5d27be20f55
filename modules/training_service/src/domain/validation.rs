//! Input validation for user and video writes

use crate::contract::{
    ChangePassword, CreateUser, NewVideo, ProfileUpdate, Role, TrainingError, UserPatch,
};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .unwrap_or_else(|e| unreachable!("email pattern is a literal: {e}"))
});

/// Reject a missing or blank required field
pub fn require(field: &str, value: &str) -> Result<(), TrainingError> {
    if value.trim().is_empty() {
        return Err(TrainingError::validation(format!(
            "Field '{}' is required",
            field
        )));
    }
    Ok(())
}

/// Validate email syntax
pub fn validate_email(email: &str) -> Result<(), TrainingError> {
    if !EMAIL_RE.is_match(email) {
        return Err(TrainingError::validation("Invalid email format"));
    }
    Ok(())
}

/// Validate user creation input
pub fn validate_create_user(input: &CreateUser, min_password_length: usize) -> Result<(), TrainingError> {
    require("name", &input.name)?;
    require("email", &input.email)?;
    require("password", &input.password)?;
    validate_email(input.email.trim())?;

    if input.password.chars().count() < min_password_length {
        return Err(TrainingError::validation(format!(
            "Password must be at least {} characters long",
            min_password_length
        )));
    }
    Ok(())
}

/// Trim and check a profile patch. Role changes are dropped unless
/// `allow_role` is set.
pub fn resolve_profile_update(
    patch: UserPatch,
    allow_role: bool,
) -> Result<ProfileUpdate, TrainingError> {
    let required = |field: &str, value: Option<String>| -> Result<Option<String>, TrainingError> {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if v.is_empty() => Err(TrainingError::validation(format!(
                "Field '{}' cannot be empty",
                field
            ))),
            other => Ok(other),
        }
    };

    let username = required("username", patch.username)?;
    let name = required("name", patch.name)?;
    let email = required("email", patch.email)?;
    if let Some(email) = &email {
        validate_email(email)?;
    }

    let role = match patch.role {
        Some(role) if allow_role => Some(Role::try_parse(role.trim()).ok_or_else(|| {
            TrainingError::validation("Role must be 'employee' or 'admin'")
        })?),
        _ => None,
    };

    Ok(ProfileUpdate {
        username,
        name,
        email,
        phone: patch.phone.map(|v| clean_optional(Some(v))),
        department: patch.department.map(|v| clean_optional(Some(v))),
        role,
    })
}

/// Validate a self-service password change before touching the store
pub fn validate_password_change(
    input: &ChangePassword,
    min_password_length: usize,
) -> Result<(), TrainingError> {
    if input.current_password.is_empty()
        || input.new_password.is_empty()
        || input.confirm_password.is_empty()
    {
        return Err(TrainingError::validation("All password fields are required"));
    }
    if input.new_password != input.confirm_password {
        return Err(TrainingError::validation(
            "New password and confirmation do not match",
        ));
    }
    if input.new_password.chars().count() < min_password_length {
        return Err(TrainingError::validation(format!(
            "New password must be at least {} characters long",
            min_password_length
        )));
    }
    Ok(())
}

/// Validate video creation input
pub fn validate_new_video(video: &NewVideo) -> Result<(), TrainingError> {
    if [&video.title, &video.category, &video.section, &video.module]
        .iter()
        .any(|v| v.trim().is_empty())
    {
        return Err(TrainingError::validation(
            "Title, category, section, and module are required",
        ));
    }
    Ok(())
}

/// Duration stored for videos created without one
pub const DEFAULT_DURATION: &str = "TBD";

/// Description stored for videos created without one
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Fill blank optional video fields with their defaults
pub fn apply_video_defaults(video: &mut NewVideo) {
    if video.duration.trim().is_empty() {
        video.duration = DEFAULT_DURATION.to_string();
    }
    if video.description.trim().is_empty() {
        video.description = DEFAULT_DESCRIPTION.to_string();
    }
}

/// Username derived from the local part of an email address
pub fn username_base(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Trim an optional free-text field, dropping it when blank
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str, password: &str) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_fields() {
        assert!(validate_create_user(&user("Ann", "ann@example.com", "secret1"), 6).is_ok());
        assert!(validate_create_user(&user("  ", "ann@example.com", "secret1"), 6).is_err());
        assert!(validate_create_user(&user("Ann", "", "secret1"), 6).is_err());
        assert!(validate_create_user(&user("Ann", "ann@example.com", ""), 6).is_err());
    }

    #[test]
    fn test_email_format() {
        assert!(validate_email("first.last@corp.example.com").is_ok());
        assert!(validate_email("no-at-sign.example.com").is_err());
        assert!(validate_email("ann@localhost").is_err());
        assert!(validate_email("ann@@example.com").is_err());
    }

    #[test]
    fn test_password_length() {
        let result = validate_create_user(&user("Ann", "ann@example.com", "12345"), 6);
        assert_eq!(
            result,
            Err(TrainingError::validation(
                "Password must be at least 6 characters long"
            ))
        );
    }

    #[test]
    fn test_new_video_requires_labels() {
        let mut video = NewVideo {
            title: "Onboarding".to_string(),
            category: "HR".to_string(),
            section: "Chapter 1".to_string(),
            module: "Module 01".to_string(),
            ..Default::default()
        };
        assert!(validate_new_video(&video).is_ok());

        video.module = " ".to_string();
        assert!(validate_new_video(&video).is_err());
    }

    #[test]
    fn test_video_defaults() {
        let mut video = NewVideo {
            description: "Kept".to_string(),
            ..Default::default()
        };
        apply_video_defaults(&mut video);
        assert_eq!(video.duration, "TBD");
        assert_eq!(video.description, "Kept");
    }

    #[test]
    fn test_profile_update_trims_and_clears() {
        let update = resolve_profile_update(
            UserPatch {
                name: Some("  Ann Lee ".to_string()),
                phone: Some("   ".to_string()),
                department: Some(" Sales ".to_string()),
                ..Default::default()
            },
            false,
        )
        .unwrap();

        assert_eq!(update.name.as_deref(), Some("Ann Lee"));
        assert_eq!(update.phone, Some(None));
        assert_eq!(update.department, Some(Some("Sales".to_string())));
        assert!(update.username.is_none());
    }

    #[test]
    fn test_profile_update_rejects_blank_required_fields() {
        let result = resolve_profile_update(
            UserPatch {
                username: Some(" ".to_string()),
                ..Default::default()
            },
            true,
        );
        assert_eq!(
            result,
            Err(TrainingError::validation("Field 'username' cannot be empty"))
        );

        let result = resolve_profile_update(
            UserPatch {
                email: Some("not-an-email".to_string()),
                ..Default::default()
            },
            true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_update_role_requires_permission() {
        let patch = UserPatch {
            role: Some("admin".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_profile_update(patch.clone(), false).unwrap().role, None);
        assert_eq!(
            resolve_profile_update(patch, true).unwrap().role,
            Some(Role::Admin)
        );

        let bogus = UserPatch {
            role: Some("owner".to_string()),
            ..Default::default()
        };
        assert!(resolve_profile_update(bogus, true).is_err());
    }

    #[test]
    fn test_password_change_rules() {
        let change = |current: &str, new: &str, confirm: &str| ChangePassword {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        };

        assert!(validate_password_change(&change("old-pass", "new-pass", "new-pass"), 6).is_ok());
        assert_eq!(
            validate_password_change(&change("", "new-pass", "new-pass"), 6),
            Err(TrainingError::validation("All password fields are required"))
        );
        assert_eq!(
            validate_password_change(&change("old-pass", "new-pass", "other-pass"), 6),
            Err(TrainingError::validation(
                "New password and confirmation do not match"
            ))
        );
        assert_eq!(
            validate_password_change(&change("old-pass", "abc", "abc"), 6),
            Err(TrainingError::validation(
                "New password must be at least 6 characters long"
            ))
        );
    }

    #[test]
    fn test_username_base() {
        assert_eq!(username_base("jane.doe@example.com"), "jane.doe");
        assert_eq!(username_base("plain"), "plain");
    }
}
