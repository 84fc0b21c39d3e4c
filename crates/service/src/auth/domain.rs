use serde::{Deserialize, Serialize};

use models::user::Role;

/// Login input. Missing fields deserialize as empty strings and simply fail to match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: Role,
}
