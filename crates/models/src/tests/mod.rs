/// CRUD operations tests for both entities against in-memory SQLite
pub mod crud_tests;
