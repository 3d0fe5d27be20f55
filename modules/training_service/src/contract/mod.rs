//! Contract layer - transport-agnostic models and errors
//!
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::TrainingError;
pub use model::{
    AgentIdAssignment, AgentIdPreview, ChangePassword, CreateUser, ModuleRename, ModuleSlot,
    NewUser, NewVideo, ProfileUpdate, Role, Termination, User, UserCredentials, UserPatch, Video,
    VideoPatch, VideoProgress, ADMIN_CODE_PREFIX, EMPLOYEE_CODE_PREFIX,
};
