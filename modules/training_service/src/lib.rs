//! Training Service Module
//!
//! Employee code allocation, user terminations, training video catalogue
//! and watch progress for the training portal. Employee codes freed by terminations
//! are recycled; module labels inside a video section are renumbered when
//! they collide.

// Public exports
pub mod contract;
pub use contract::{
    error::TrainingError, AgentIdAssignment, AgentIdPreview, Role, Termination, User, Video,
    VideoProgress,
};

pub mod module;
pub use module::TrainingServiceModule;

pub mod auth;
pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
