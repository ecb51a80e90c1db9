/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (login, create account)
/// - `task`: Task endpoints (create, list, edit, get, delete)
/// - `user`: User search endpoint

pub mod auth;
pub mod health;
pub mod task;
pub mod user;
