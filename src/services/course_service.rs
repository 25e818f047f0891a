use std::sync::Arc;

use tracing::{info, warn};

use crate::db::{CourseRepository, UserRepository};
use crate::error::AppError;
use crate::models::{Course, NewCourse};

#[derive(Clone)]
pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
    users: Arc<dyn UserRepository>,
}

impl CourseService {
    pub fn new(courses: Arc<dyn CourseRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { courses, users }
    }

    /// Validates `course` and persists it. Nothing is written when validation fails.
    pub async fn create_course(&self, course: NewCourse) -> Result<Course, AppError> {
        if course.title.as_deref().is_none_or(str::is_empty) {
            warn!("rejected course without title");
            return Err(AppError::Validation("title required".to_string()));
        }

        if let Some(instructor) = course.instructor {
            if !self.users.exists(instructor.id).await? {
                warn!("rejected course with unknown instructor {}", instructor.id);
                return Err(AppError::Validation("instructor not found".to_string()));
            }
        }

        let created = self.courses.save(&course).await?;
        info!("created course {} ({})", created.id, created.title);
        Ok(created)
    }

    pub async fn find_all(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.courses.find_all().await?)
    }
}
