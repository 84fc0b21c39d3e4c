//! Student records: repository abstraction and the CRUD service on top of it.

pub mod repository;
pub mod service;

pub use service::StudentService;
