use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出全部用户（管理面板）
    async fn list_users(&self) -> Result<Vec<User>>;
    // 设置用户启用/停用状态
    async fn set_user_status(&self, id: i64, status: UserStatus) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 列出全部课程
    async fn list_courses(&self) -> Result<Vec<Course>>;
    // 列出某教师的课程
    async fn list_courses_by_teacher(&self, teacher_id: i64) -> Result<Vec<Course>>;
    // 删除课程（级联删除资料、作业、选课与提交）
    async fn delete_course(&self, course_id: i64) -> Result<bool>;
    // 统计课程数量
    async fn count_courses(&self) -> Result<u64>;

    /// 选课管理方法
    // 学生选课
    async fn enroll_student(&self, student_id: i64, course_id: i64) -> Result<Enrollment>;
    // 查询学生在某课程的选课记录
    async fn get_enrollment(&self, student_id: i64, course_id: i64) -> Result<Option<Enrollment>>;
    // 列出学生已选课程
    async fn list_enrolled_courses(&self, student_id: i64) -> Result<Vec<Course>>;
    // 列出学生未选课程
    async fn list_available_courses(&self, student_id: i64) -> Result<Vec<Course>>;
    // 统计选课数量
    async fn count_enrollments(&self) -> Result<u64>;

    /// 课程资料方法
    // 添加资料
    async fn create_material(
        &self,
        course_id: i64,
        material: CreateMaterialRequest,
    ) -> Result<Material>;
    // 列出课程资料
    async fn list_materials_by_course(&self, course_id: i64) -> Result<Vec<Material>>;

    /// 作业方法
    // 布置作业
    async fn create_assignment(
        &self,
        course_id: i64,
        assignment: CreateAssignmentRequest,
        due_date: chrono::DateTime<chrono::Utc>,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出课程作业
    async fn list_assignments_by_course(&self, course_id: i64) -> Result<Vec<Assignment>>;

    /// 提交方法
    // 学生提交作业
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: String,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 列出作业的全部提交（附带提交人用户名）
    async fn list_submissions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionInfo>>;
    // 给提交打分
    async fn set_submission_grade(&self, submission_id: i64, grade: String) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
