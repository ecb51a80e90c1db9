/// Database models for TaskLab
///
/// This module contains all database models and their operations.
///
/// # Models
///
/// - `user`: User accounts, roles, and lookup/search
/// - `task`: Tasks with status, due date, and paginated listing
/// - `collaborator`: Task-user association rows, owned by their task

pub mod collaborator;
pub mod task;
pub mod user;
