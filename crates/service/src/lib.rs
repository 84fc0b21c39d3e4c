//! Service layer providing business-oriented operations on top of models.
//! - Repository traits separate business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Each service takes its repository by constructor injection.

pub mod errors;
pub mod students;
pub mod users;
pub mod auth;
#[cfg(test)]
pub mod test_support;
