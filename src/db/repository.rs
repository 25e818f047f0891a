use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

use crate::models::{Course, NewCourse, NewUser, User, UserRef};

/// Durable storage for courses.
///
/// `save` assigns the identifier; callers never choose one.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn save(&self, course: &NewCourse) -> Result<Course, sqlx::Error>;
    async fn find_all(&self) -> Result<Vec<Course>, sqlx::Error>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &NewUser) -> Result<User, sqlx::Error>;
    async fn find_all(&self) -> Result<Vec<User>, sqlx::Error>;
    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error>;
}

#[derive(Debug, FromRow)]
struct CourseRow {
    id: i64,
    title: String,
    description: Option<String>,
    price: Option<f64>,
    instructor_id: Option<i64>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            instructor: row.instructor_id.map(|id| UserRef { id }),
        }
    }
}

#[derive(Clone)]
pub struct SqliteCourseRepository {
    db: SqlitePool,
}

impl SqliteCourseRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for SqliteCourseRepository {
    async fn save(&self, course: &NewCourse) -> Result<Course, sqlx::Error> {
        let instructor_id = course.instructor.map(|r| r.id);

        let id = sqlx::query(
            "INSERT INTO courses (title, description, price, instructor_id) VALUES (?1, ?2, ?3, ?4)"
        )
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.price)
        .bind(instructor_id)
        .execute(&self.db)
        .await?
        .last_insert_rowid();

        sqlx::query_as::<_, CourseRow>(
            "SELECT id, title, description, price, instructor_id FROM courses WHERE id = ?"
        )
        .bind(id)
        .fetch_one(&self.db)
        .await
        .map(Course::from)
    }

    async fn find_all(&self) -> Result<Vec<Course>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CourseRow>(
            "SELECT id, title, description, price, instructor_id FROM courses ORDER BY id"
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Course::from).collect())
    }
}

#[derive(Clone)]
pub struct SqliteUserRepository {
    db: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn save(&self, user: &NewUser) -> Result<User, sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        let id = sqlx::query(
            "INSERT INTO users (name, email, created_at) VALUES (?1, ?2, ?3)"
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&now)
        .execute(&self.db)
        .await?
        .last_insert_rowid();

        sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users WHERE id = ?"
        )
        .bind(id)
        .fetch_one(&self.db)
        .await
    }

    async fn find_all(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users ORDER BY id"
        )
        .fetch_all(&self.db)
        .await
    }

    async fn exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;

    async fn setup_test_db() -> SqlitePool {
        connect_in_memory().await.expect("Failed to create test db")
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_fetches_course() {
        let pool = setup_test_db().await;
        let repo = SqliteCourseRepository::new(pool);

        let mut new_course = NewCourse::titled("Intro to Systems");
        new_course.description = Some("Processes, memory, files".to_string());
        new_course.price = Some(99.0);

        let course = repo.save(&new_course).await.expect("Failed to save course");
        assert!(course.id > 0);
        assert_eq!(course.title, "Intro to Systems");
        assert_eq!(course.price, Some(99.0));
        assert_eq!(course.instructor, None);

        let courses = repo.find_all().await.expect("Failed to fetch courses");
        assert_eq!(courses, vec![course]);
    }

    #[tokio::test]
    async fn test_find_all_on_empty_store() {
        let repo = SqliteCourseRepository::new(setup_test_db().await);
        let courses = repo.find_all().await.expect("Failed to fetch courses");
        assert!(courses.is_empty());
    }

    #[tokio::test]
    async fn test_ids_are_distinct() {
        let repo = SqliteCourseRepository::new(setup_test_db().await);

        let first = repo.save(&NewCourse::titled("A")).await.unwrap();
        let second = repo.save(&NewCourse::titled("B")).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_course_keeps_instructor_reference() {
        let pool = setup_test_db().await;
        let users = SqliteUserRepository::new(pool.clone());
        let courses = SqliteCourseRepository::new(pool);

        let user = users
            .save(&NewUser {
                name: Some("Ada".to_string()),
                email: Some("ada@example.com".to_string()),
            })
            .await
            .expect("Failed to save user");

        let mut new_course = NewCourse::titled("Analytical Engines");
        new_course.instructor = Some(UserRef { id: user.id });

        let course = courses.save(&new_course).await.expect("Failed to save course");
        assert_eq!(course.instructor, Some(UserRef { id: user.id }));

        let fetched = courses.find_all().await.unwrap();
        assert_eq!(fetched[0].instructor, Some(UserRef { id: user.id }));
    }

    #[tokio::test]
    async fn test_foreign_key_rejects_unknown_instructor() {
        let repo = SqliteCourseRepository::new(setup_test_db().await);

        let mut new_course = NewCourse::titled("Orphan");
        new_course.instructor = Some(UserRef { id: 404 });

        assert!(repo.save(&new_course).await.is_err());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_exists() {
        let repo = SqliteUserRepository::new(setup_test_db().await);
        assert!(!repo.exists(1).await.unwrap());

        let user = repo
            .save(&NewUser {
                name: Some("Grace".to_string()),
                email: None,
            })
            .await
            .unwrap();

        assert!(repo.exists(user.id).await.unwrap());
        assert_eq!(repo.find_all().await.unwrap(), vec![user]);
    }
}
