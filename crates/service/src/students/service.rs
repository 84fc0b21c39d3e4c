use std::sync::Arc;

use tracing::{info, instrument};

use models::student::{self, StudentInput};

use crate::errors::ServiceError;
use crate::students::repository::StudentRepository;

/// Student CRUD independent of the web framework.
pub struct StudentService<R: StudentRepository> {
    repo: Arc<R>,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<student::Model>, ServiceError> {
        self.repo.find_all().await
    }

    /// Case-insensitive substring match on the name. An empty fragment returns every student.
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<student::Model>, ServiceError> {
        self.repo.find_by_name_containing_ignore_case(fragment).await
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        self.repo.count().await
    }

    pub async fn get(&self, id: i64) -> Result<student::Model, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student", id))
    }

    /// Persist a new student; the id is assigned by storage.
    ///
    /// # Examples
    /// ```
    /// use service::students::{StudentService, repository::mock::MockStudentRepository};
    /// use models::student::StudentInput;
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(MockStudentRepository::default()));
    /// let input = StudentInput::new("Alice", "alice@example.edu", "B.Tech", "Computer Science");
    /// let saved = tokio_test::block_on(svc.create(&input)).unwrap();
    /// assert_eq!(saved.name, "Alice");
    /// assert!(saved.id > 0);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: &StudentInput) -> Result<student::Model, ServiceError> {
        input.validate()?;
        let created = self.repo.insert(input).await.map_err(|e| match e {
            ServiceError::Conflict(_) => ServiceError::Conflict(format!("email '{}' is already registered", input.email)),
            other => other,
        })?;
        info!(student_id = created.id, "student_created");
        Ok(created)
    }

    /// Overwrite name, email, course and department of an existing student.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: &StudentInput) -> Result<student::Model, ServiceError> {
        let existing = self.get(id).await?;
        input.validate()?;
        let updated = self.repo.update(existing, input).await.map_err(|e| match e {
            ServiceError::Conflict(_) => ServiceError::Conflict(format!("email '{}' is already registered", input.email)),
            other => other,
        })?;
        info!(student_id = updated.id, "student_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::not_found("Student", id));
        }
        if !self.repo.delete_by_id(id).await? {
            // removed concurrently between the existence check and the delete
            return Err(ServiceError::not_found("Student", id));
        }
        info!(student_id = id, "student_deleted");
        Ok(())
    }
}
