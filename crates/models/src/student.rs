use sea_orm::{
    entity::prelude::*,
    sea_query::{Expr, Func, LikeExpr},
    ConnectionTrait, DatabaseConnection, DbBackend, PaginatorTrait, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "students")]
#[schema(as = Student)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub course: String,
    pub department: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Student fields as submitted by a client. Any `id` in the payload is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub department: String,
}

impl StudentInput {
    pub fn new(name: &str, email: &str, course: &str, department: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            course: course.to_string(),
            department: department.to_string(),
        }
    }

    /// All four fields are required; the first blank one is reported.
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("course", &self.course),
            ("department", &self.department),
        ] {
            if value.trim().is_empty() {
                return Err(errors::ModelError::Validation(format!("{field} is required")));
            }
        }
        Ok(())
    }
}

/// Escape LIKE wildcards so the fragment matches literally.
fn like_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '%' | '_' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            c => out.push(c),
        }
    }
    out
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

/// Lowercase `s` the way the backend's `LOWER()` does. SQLite only folds ASCII.
fn fold_case(backend: DbBackend, s: &str) -> String {
    match backend {
        DbBackend::Sqlite => s.to_ascii_lowercase(),
        _ => s.to_lowercase(),
    }
}

/// `LOWER(name) LIKE '%fragment%'`; an empty fragment matches every row.
pub async fn find_by_name_containing_ignore_case(
    db: &DatabaseConnection,
    fragment: &str,
) -> Result<Vec<Model>, errors::ModelError> {
    let folded = fold_case(db.get_database_backend(), fragment);
    let pattern = format!("%{}%", like_escape(&folded));
    Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col(Column::Name))).like(LikeExpr::new(pattern).escape('\\')))
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(errors::ModelError::from_db)
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, errors::ModelError> {
    Entity::find().count(db).await.map_err(errors::ModelError::from_db)
}

pub async fn exists_by_id(db: &DatabaseConnection, id: i64) -> Result<bool, errors::ModelError> {
    let n = Entity::find_by_id(id).count(db).await.map_err(errors::ModelError::from_db)?;
    Ok(n > 0)
}

pub async fn create(db: &DatabaseConnection, input: &StudentInput) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let am = ActiveModel {
        name: Set(input.name.clone()),
        email: Set(input.email.clone()),
        course: Set(input.course.clone()),
        department: Set(input.department.clone()),
        ..Default::default()
    };
    am.insert(db).await.map_err(errors::ModelError::from_db)
}

/// Overwrite every mutable field of `existing`; the id is kept.
pub async fn update(db: &DatabaseConnection, existing: Model, input: &StudentInput) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let mut am: ActiveModel = existing.into();
    am.name = Set(input.name.clone());
    am.email = Set(input.email.clone());
    am.course = Set(input.course.clone());
    am.department = Set(input.department.clone());
    am.update(db).await.map_err(errors::ModelError::from_db)
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
    fn validate_reports_first_blank_field() {
        let input = StudentInput::new("Alice", "  ", "", "CS");
        match input.validate() {
            Err(errors::ModelError::Validation(msg)) => assert_eq!(msg, "email is required"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(StudentInput::new("Alice", "a@x.edu", "B.Tech", "CS").validate().is_ok());
    }

    #[test]
    fn fold_case_matches_backend_lower() {
        assert_eq!(fold_case(DbBackend::Sqlite, "ÉLOdie"), "Élodie");
        assert_eq!(fold_case(DbBackend::Postgres, "ÉLOdie"), "élodie");
    }

    #[test]
    fn like_escape_quotes_wildcards() {
        assert_eq!(like_escape("50%_a\\b"), "50\\%\\_a\\\\b");
        assert_eq!(like_escape("ali"), "ali");
    }

    #[test]
    fn input_ignores_id_and_defaults_missing_fields() {
        let input: StudentInput = serde_json::from_str(r#"{"id": 99, "name": "Bo", "email": "bo@x.edu"}"#)
            .expect("deserialize");
        assert_eq!(input.name, "Bo");
        assert_eq!(input.course, "");
        assert!(input.validate().is_err());
    }
}
