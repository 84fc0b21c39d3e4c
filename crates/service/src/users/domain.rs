use serde::{Deserialize, Serialize};

use models::user::Role;

/// Account creation payload. Fields are optional so each missing one gets its own message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl CreateUserInput {
    pub fn new(username: &str, password: &str, role: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            role: Some(role.to_string()),
        }
    }
}

/// What a successful creation reports back; never the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}
