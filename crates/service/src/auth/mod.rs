//! Auth module: plain username/password check against the `users` table.
//!
//! No session or token is issued; the caller keeps the returned role.

pub mod domain;
pub mod errors;
pub mod service;

pub use service::AuthService;
