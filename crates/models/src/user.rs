use sea_orm::{entity::prelude::*, DatabaseConnection, PaginatorTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors;

/// Access level of an account. Stored and serialized as `ADMIN` / `USER`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "USER")]
    User,
}

impl Role {
    /// Exact, case-sensitive match on `ADMIN` / `USER`.
    pub fn parse(s: &str) -> Result<Self, errors::ModelError> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            _ => Err(errors::ModelError::Validation("Role must be ADMIN or USER.".into())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "users")]
#[schema(as = User)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    /// Plain text. Cleared by [`Model::redacted`] before leaving the server.
    pub password: String,
    pub role: Role,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn redacted(mut self) -> Self {
        self.password.clear();
        self
    }
}

pub fn validate_username(username: &str) -> Result<(), errors::ModelError> {
    if username.trim().is_empty() {
        return Err(errors::ModelError::Validation("Username is required.".into()));
    }
    Ok(())
}

/// At least four characters (not bytes).
pub fn validate_password(password: &str) -> Result<(), errors::ModelError> {
    if password.chars().count() < 4 {
        return Err(errors::ModelError::Validation("Password must be at least 4 characters.".into()));
    }
    Ok(())
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(errors::ModelError::from_db)
}

pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(errors::ModelError::from_db)
}

/// Exact username match.
pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Username.eq(username))
        .one(db)
        .await
        .map_err(errors::ModelError::from_db)
}

pub async fn create(db: &DatabaseConnection, username: &str, password: &str, role: Role) -> Result<Model, errors::ModelError> {
    validate_username(username)?;
    validate_password(password)?;
    let am = ActiveModel {
        username: Set(username.to_string()),
        password: Set(password.to_string()),
        role: Set(role),
        ..Default::default()
    };
    am.insert(db).await.map_err(errors::ModelError::from_db)
}

/// Returns true if a row was removed.
pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(errors::ModelError::from_db)?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_is_exact() {
        assert_eq!(Role::parse("ADMIN").ok(), Some(Role::Admin));
        assert_eq!(Role::parse("USER").ok(), Some(Role::User));
        assert!(Role::parse("ROOT").is_err());
        assert!(Role::parse("admin").is_err());
        assert!(Role::parse("").is_err());
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(serde_json::to_value(Role::Admin).ok(), Some(serde_json::json!("ADMIN")));
        assert_eq!(Role::User.as_str(), "USER");
    }

    #[test]
    fn password_boundary_counts_chars() {
        assert!(validate_password("abc").is_err());
        assert!(validate_password("abcd").is_ok());
        assert!(validate_password("äöü").is_err());
        assert!(validate_password("äöüß").is_ok());
    }

    #[test]
    fn blank_username_rejected() {
        assert!(validate_username("   ").is_err());
        assert!(validate_username("admin").is_ok());
    }

    #[test]
    fn redacted_clears_password_only() {
        let u = Model { id: 3, username: "admin".into(), password: "admin123".into(), role: Role::Admin };
        let r = u.redacted();
        assert_eq!(r.password, "");
        assert_eq!(r.username, "admin");
        assert_eq!(r.role, Role::Admin);
    }
}
