//! Cross-cutting helpers shared by the server crates.

pub mod types;
pub mod utils;
