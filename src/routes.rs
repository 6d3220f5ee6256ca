mod auth;
mod projects;
mod sessions;

pub use auth::{authenticate, SESSION_COOKIE};
pub use projects::{create_project, list_projects};
pub use sessions::{login, logout};
