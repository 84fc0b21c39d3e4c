//! User accounts: listing with password redaction, validated creation, deletion.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::UserService;
