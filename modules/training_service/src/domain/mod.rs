//! Domain layer - business logic and services

pub mod agent_id;
pub mod modules;
pub mod password;
pub mod repository;
pub mod service;
pub mod validation;

pub use repository::{
    ProgressRepository, TerminationRepository, UserRepository, VideoRepository,
};
pub use service::Service;
