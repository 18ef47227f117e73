pub mod available_courses;
pub mod course_detail;
pub mod dashboard;
pub mod enroll;
pub mod submit_assignment;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    #[cfg(test)]
    pub(crate) fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 已选课程（学生首页）
    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::handle_dashboard(self, request).await
    }

    // 可选课程（尚未选修的）
    pub async fn available_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        available_courses::handle_available_courses(self, request).await
    }

    // 选课
    pub async fn enroll(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        enroll::handle_enroll(self, request, course_id).await
    }

    // 已选课程的详情（含资料与作业）
    pub async fn course_detail(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        course_detail::handle_course_detail(self, request, course_id).await
    }

    // 提交作业
    pub async fn submit_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        submission_data: crate::models::submissions::requests::CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        submit_assignment::handle_submit_assignment(self, request, assignment_id, submission_data)
            .await
    }
}

/// 取出当前登录学生的用户 ID
pub(crate) fn require_student_id(request: &HttpRequest) -> Result<i64, HttpResponse> {
    RequireJWT::extract_user_id(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user id",
        ))
    })
}

/// 选课关系校验
///
/// 学生必须已选该课程，否则返回 403。
pub(crate) async fn require_enrollment(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    course_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_enrollment(student_id, course_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotEnrolled,
            "You are not enrolled in this course.",
        ))),
        Err(e) => {
            tracing::error!("Failed to get enrollment: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while checking enrollment",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::submissions::requests::CreateSubmissionRequest;
    use crate::models::users::entities::UserRole;
    use crate::services::teacher::add_assignment::parse_due_date;
    use crate::services::testing;

    // 未选课的学生提交作业：403 且不留下提交记录
    #[tokio::test]
    async fn test_non_enrolled_student_submit_denied() {
        let storage = testing::storage().await;
        let teacher = testing::create_user(&storage, "teach", UserRole::Teacher).await;
        let student = testing::create_user(&storage, "stud", UserRole::Student).await;
        let course = storage
            .create_course(
                teacher.id,
                CreateCourseRequest {
                    title: "Algebra I".to_string(),
                    description: None,
                },
            )
            .await
            .expect("create course");
        let assignment = storage
            .create_assignment(
                course.id,
                CreateAssignmentRequest {
                    title: "Homework 1".to_string(),
                    description: None,
                    due_date: "2024-03-01 09:00".to_string(),
                },
                parse_due_date("2024-03-01 09:00").expect("due date"),
            )
            .await
            .expect("create assignment");

        let service = StudentService::with_storage(storage.clone());
        let request = testing::request_as(&student);
        let resp = service
            .submit_assignment(
                &request,
                assignment.id,
                CreateSubmissionRequest {
                    content: "my answer".to_string(),
                },
            )
            .await
            .expect("handler");

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let json = testing::response_json(resp).await;
        assert_eq!(json["code"], ErrorCode::NotEnrolled as i32);
        assert!(json.get("data").is_none());

        let submissions = storage
            .list_submissions_by_assignment(assignment.id)
            .await
            .expect("list submissions");
        assert!(submissions.is_empty());
    }

    // 重复选课幂等：第二次返回成功提示，选课记录不重复
    #[tokio::test]
    async fn test_duplicate_enroll_is_idempotent() {
        let storage = testing::storage().await;
        let teacher = testing::create_user(&storage, "teach", UserRole::Teacher).await;
        let student = testing::create_user(&storage, "stud", UserRole::Student).await;
        let course = storage
            .create_course(
                teacher.id,
                CreateCourseRequest {
                    title: "Algebra I".to_string(),
                    description: None,
                },
            )
            .await
            .expect("create course");

        let service = StudentService::with_storage(storage.clone());
        let request = testing::request_as(&student);

        let first = service.enroll(&request, course.id).await.expect("enroll");
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = service.enroll(&request, course.id).await.expect("enroll");
        assert_eq!(second.status(), StatusCode::OK);
        let json = testing::response_json(second).await;
        assert_eq!(json["code"], ErrorCode::Success as i32);
        assert_eq!(json["message"], "Already enrolled in this course.");

        assert_eq!(
            storage.count_enrollments().await.expect("count"),
            1,
            "duplicate enroll must not insert a second row"
        );
    }
}
