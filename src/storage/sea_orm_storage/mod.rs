//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod courses;
mod enrollments;
mod materials;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{CourseHubError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CourseHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CourseHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CourseHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 直接从已有连接构建（测试用）
    #[cfg(test)]
    pub(crate) fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    courses::{entities::Course, requests::CreateCourseRequest},
    enrollments::entities::Enrollment,
    materials::{entities::Material, requests::CreateMaterialRequest},
    submissions::{entities::Submission, responses::SubmissionInfo},
    users::{
        entities::{User, UserStatus},
        requests::CreateUserRequest,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.list_users_impl().await
    }

    async fn set_user_status(&self, id: i64, status: UserStatus) -> Result<bool> {
        self.set_user_status_impl(id, status).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 课程模块
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(teacher_id, course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.list_courses_impl().await
    }

    async fn list_courses_by_teacher(&self, teacher_id: i64) -> Result<Vec<Course>> {
        self.list_courses_by_teacher_impl(teacher_id).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    async fn count_courses(&self) -> Result<u64> {
        self.count_courses_impl().await
    }

    // 选课模块
    async fn enroll_student(&self, student_id: i64, course_id: i64) -> Result<Enrollment> {
        self.enroll_student_impl(student_id, course_id).await
    }

    async fn get_enrollment(&self, student_id: i64, course_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(student_id, course_id).await
    }

    async fn list_enrolled_courses(&self, student_id: i64) -> Result<Vec<Course>> {
        self.list_enrolled_courses_impl(student_id).await
    }

    async fn list_available_courses(&self, student_id: i64) -> Result<Vec<Course>> {
        self.list_available_courses_impl(student_id).await
    }

    async fn count_enrollments(&self) -> Result<u64> {
        self.count_enrollments_impl().await
    }

    // 资料模块
    async fn create_material(
        &self,
        course_id: i64,
        material: CreateMaterialRequest,
    ) -> Result<Material> {
        self.create_material_impl(course_id, material).await
    }

    async fn list_materials_by_course(&self, course_id: i64) -> Result<Vec<Material>> {
        self.list_materials_by_course_impl(course_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        course_id: i64,
        assignment: CreateAssignmentRequest,
        due_date: chrono::DateTime<chrono::Utc>,
    ) -> Result<Assignment> {
        self.create_assignment_impl(course_id, assignment, due_date)
            .await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments_by_course(&self, course_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_course_impl(course_id).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: String,
    ) -> Result<Submission> {
        self.create_submission_impl(assignment_id, student_id, content)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn list_submissions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionInfo>> {
        self.list_submissions_by_assignment_impl(assignment_id)
            .await
    }

    async fn set_submission_grade(&self, submission_id: i64, grade: String) -> Result<bool> {
        self.set_submission_grade_impl(submission_id, grade).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    async fn test_storage() -> SeaOrmStorage {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        SeaOrmStorage::from_connection(db)
    }

    fn user_request(username: &str, email: &str, role: UserRole) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            // 测试不关心哈希内容，存一个占位值
            password: "$argon2id$placeholder".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let storage = test_storage().await;

        let user = storage
            .create_user(user_request("alice", "alice@example.com", UserRole::Student))
            .await
            .expect("create user");
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, UserRole::Student);
        assert_eq!(user.status, UserStatus::Active);

        let by_name = storage
            .get_user_by_username("alice")
            .await
            .expect("query")
            .expect("found");
        assert_eq!(by_name.id, user.id);

        let by_identifier = storage
            .get_user_by_username_or_email("alice@example.com")
            .await
            .expect("query")
            .expect("found");
        assert_eq!(by_identifier.id, user.id);

        assert!(
            storage
                .get_user_by_username("nobody")
                .await
                .expect("query")
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let storage = test_storage().await;

        storage
            .create_user(user_request("alice", "alice@example.com", UserRole::Student))
            .await
            .expect("create user");

        let err = storage
            .create_user(user_request("alice", "other@example.com", UserRole::Student))
            .await
            .expect_err("duplicate username must fail");
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_user_status_toggle() {
        let storage = test_storage().await;

        let user = storage
            .create_user(user_request("bob", "bob@example.com", UserRole::Teacher))
            .await
            .expect("create user");

        assert!(
            storage
                .set_user_status(user.id, UserStatus::Inactive)
                .await
                .expect("deactivate")
        );
        let reloaded = storage
            .get_user_by_id(user.id)
            .await
            .expect("query")
            .expect("found");
        assert_eq!(reloaded.status, UserStatus::Inactive);
        assert!(!reloaded.is_active());

        assert!(
            storage
                .set_user_status(user.id, UserStatus::Active)
                .await
                .expect("activate")
        );
        assert!(
            !storage
                .set_user_status(9999, UserStatus::Active)
                .await
                .expect("missing user")
        );
    }

    #[tokio::test]
    async fn test_enroll_is_unique_per_student_course() {
        let storage = test_storage().await;

        let teacher = storage
            .create_user(user_request("teach", "teach@example.com", UserRole::Teacher))
            .await
            .expect("teacher");
        let student = storage
            .create_user(user_request("stud", "stud@example.com", UserRole::Student))
            .await
            .expect("student");
        let course = storage
            .create_course(
                teacher.id,
                CreateCourseRequest {
                    title: "Biology".to_string(),
                    description: None,
                },
            )
            .await
            .expect("course");

        storage
            .enroll_student(student.id, course.id)
            .await
            .expect("first enroll");

        // 同一学生重复选同一门课必须被唯一约束挡下
        let err = storage
            .enroll_student(student.id, course.id)
            .await
            .expect_err("second enroll must fail");
        assert!(err.is_unique_violation());

        assert_eq!(storage.count_enrollments().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn test_available_vs_enrolled_courses() {
        let storage = test_storage().await;

        let teacher = storage
            .create_user(user_request("teach", "teach@example.com", UserRole::Teacher))
            .await
            .expect("teacher");
        let student = storage
            .create_user(user_request("stud", "stud@example.com", UserRole::Student))
            .await
            .expect("student");

        let math = storage
            .create_course(
                teacher.id,
                CreateCourseRequest {
                    title: "Math".to_string(),
                    description: None,
                },
            )
            .await
            .expect("math");
        let physics = storage
            .create_course(
                teacher.id,
                CreateCourseRequest {
                    title: "Physics".to_string(),
                    description: None,
                },
            )
            .await
            .expect("physics");

        storage
            .enroll_student(student.id, math.id)
            .await
            .expect("enroll math");

        let enrolled = storage
            .list_enrolled_courses(student.id)
            .await
            .expect("enrolled");
        assert_eq!(enrolled.len(), 1);
        assert_eq!(enrolled[0].id, math.id);

        let available = storage
            .list_available_courses(student.id)
            .await
            .expect("available");
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, physics.id);
    }

    #[tokio::test]
    async fn test_delete_course_cascades() {
        let storage = test_storage().await;

        let teacher = storage
            .create_user(user_request("teach", "teach@example.com", UserRole::Teacher))
            .await
            .expect("teacher");
        let student = storage
            .create_user(user_request("stud", "stud@example.com", UserRole::Student))
            .await
            .expect("student");
        let course = storage
            .create_course(
                teacher.id,
                CreateCourseRequest {
                    title: "History".to_string(),
                    description: Some("Modern history".to_string()),
                },
            )
            .await
            .expect("course");

        storage
            .create_material(
                course.id,
                CreateMaterialRequest {
                    title: "Syllabus".to_string(),
                    material_type: crate::models::materials::entities::MaterialType::Note,
                    content: Some("Week 1: intro".to_string()),
                },
            )
            .await
            .expect("material");
        let assignment = storage
            .create_assignment(
                course.id,
                CreateAssignmentRequest {
                    title: "Essay".to_string(),
                    description: None,
                    due_date: "2024-06-01 23:59".to_string(),
                },
                chrono::Utc::now(),
            )
            .await
            .expect("assignment");
        storage
            .enroll_student(student.id, course.id)
            .await
            .expect("enroll");
        storage
            .create_submission(assignment.id, student.id, "my essay".to_string())
            .await
            .expect("submission");

        assert!(storage.delete_course(course.id).await.expect("delete"));

        assert!(
            storage
                .get_course_by_id(course.id)
                .await
                .expect("query")
                .is_none()
        );
        assert!(
            storage
                .list_materials_by_course(course.id)
                .await
                .expect("materials")
                .is_empty()
        );
        assert!(
            storage
                .list_assignments_by_course(course.id)
                .await
                .expect("assignments")
                .is_empty()
        );
        assert_eq!(storage.count_enrollments().await.expect("count"), 0);
        assert!(
            storage
                .get_assignment_by_id(assignment.id)
                .await
                .expect("query")
                .is_none()
        );

        // 已删除课程再次删除返回 false
        assert!(!storage.delete_course(course.id).await.expect("redelete"));
    }

    #[tokio::test]
    async fn test_submission_listing_and_grading() {
        let storage = test_storage().await;

        let teacher = storage
            .create_user(user_request("teach", "teach@example.com", UserRole::Teacher))
            .await
            .expect("teacher");
        let student = storage
            .create_user(user_request("stud", "stud@example.com", UserRole::Student))
            .await
            .expect("student");
        let course = storage
            .create_course(
                teacher.id,
                CreateCourseRequest {
                    title: "Algebra I".to_string(),
                    description: None,
                },
            )
            .await
            .expect("course");
        let assignment = storage
            .create_assignment(
                course.id,
                CreateAssignmentRequest {
                    title: "Homework 1".to_string(),
                    description: Some("Solve all problems".to_string()),
                    due_date: "2024-03-01 09:00".to_string(),
                },
                chrono::DateTime::parse_from_rfc3339("2024-03-01T09:00:00Z")
                    .expect("parse")
                    .with_timezone(&chrono::Utc),
            )
            .await
            .expect("assignment");

        storage
            .enroll_student(student.id, course.id)
            .await
            .expect("enroll");
        let submission = storage
            .create_submission(assignment.id, student.id, "my answer".to_string())
            .await
            .expect("submit");

        let listing = storage
            .list_submissions_by_assignment(assignment.id)
            .await
            .expect("list");
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].submission.content, "my answer");
        assert_eq!(listing[0].student_username.as_deref(), Some("stud"));
        assert!(listing[0].submission.grade.is_none());

        assert!(
            storage
                .set_submission_grade(submission.id, "A-".to_string())
                .await
                .expect("grade")
        );
        let graded = storage
            .get_submission_by_id(submission.id)
            .await
            .expect("query")
            .expect("found");
        assert_eq!(graded.grade.as_deref(), Some("A-"));

        assert!(
            !storage
                .set_submission_grade(9999, "F".to_string())
                .await
                .expect("missing submission")
        );
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let storage = test_storage().await;

        let teacher = storage
            .create_user(user_request("teach", "teach@example.com", UserRole::Teacher))
            .await
            .expect("teacher");
        storage
            .create_user(user_request("stud", "stud@example.com", UserRole::Student))
            .await
            .expect("student");
        storage
            .create_course(
                teacher.id,
                CreateCourseRequest {
                    title: "Chemistry".to_string(),
                    description: None,
                },
            )
            .await
            .expect("course");

        assert_eq!(storage.count_users().await.expect("users"), 2);
        assert_eq!(storage.count_courses().await.expect("courses"), 1);
        assert_eq!(storage.count_enrollments().await.expect("enrollments"), 0);
        assert_eq!(storage.list_users().await.expect("list").len(), 2);
    }

    // 完整业务链路：建课 → 布置作业 → 选课 → 提交 → 列表里能看到这一条
    #[tokio::test]
    async fn test_full_course_flow() {
        let storage = test_storage().await;

        let teacher = storage
            .create_user(user_request("alice", "alice@example.com", UserRole::Teacher))
            .await
            .expect("teacher");
        let course = storage
            .create_course(
                teacher.id,
                CreateCourseRequest {
                    title: "Algebra I".to_string(),
                    description: Some("Introductory algebra".to_string()),
                },
            )
            .await
            .expect("course");
        assert!(course.is_owned_by(teacher.id));

        let due = crate::services::teacher::add_assignment::parse_due_date("2024-03-01 09:00")
            .expect("due date");
        assert_eq!(due.to_rfc3339(), "2024-03-01T09:00:00+00:00");
        let assignment = storage
            .create_assignment(
                course.id,
                CreateAssignmentRequest {
                    title: "Homework 1".to_string(),
                    description: None,
                    due_date: "2024-03-01 09:00".to_string(),
                },
                due,
            )
            .await
            .expect("assignment");

        let student = storage
            .create_user(user_request("bob", "bob@example.com", UserRole::Student))
            .await
            .expect("student");
        storage
            .enroll_student(student.id, course.id)
            .await
            .expect("enroll");
        storage
            .create_submission(assignment.id, student.id, "my answer".to_string())
            .await
            .expect("submit");

        let listing = storage
            .list_submissions_by_assignment(assignment.id)
            .await
            .expect("list");
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].submission.content, "my answer");
        assert_eq!(listing[0].student_username.as_deref(), Some("bob"));
    }
}
