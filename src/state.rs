use std::sync::Arc;

use sqlx::SqlitePool;

use crate::db::{SqliteCourseRepository, SqliteUserRepository};
use crate::services::{CourseService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub courses: CourseService,
    pub users: UserService,
}

impl AppState {
    /// Wires the SQLite repositories into the services.
    pub fn new(db: SqlitePool) -> Self {
        let user_repo = Arc::new(SqliteUserRepository::new(db.clone()));
        let course_repo = Arc::new(SqliteCourseRepository::new(db.clone()));

        Self {
            courses: CourseService::new(course_repo, user_repo.clone()),
            users: UserService::new(user_repo),
            db,
        }
    }
}
