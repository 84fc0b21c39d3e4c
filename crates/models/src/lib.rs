//! SeaORM entities for the `students` and `users` tables, their field
//! validation, and the parameterized queries the service layer builds on.

pub mod db;
pub mod errors;
pub mod student;
pub mod user;

#[cfg(test)]
mod tests;
