pub mod add_assignment;
pub mod add_material;
pub mod course_detail;
pub mod create_course;
pub mod grade_submission;
pub mod list_courses;
pub mod view_submissions;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::courses::entities::Course;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
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

    // 我的课程列表
    pub async fn list_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list_courses::handle_list_courses(self, request).await
    }

    // 开设课程
    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course_data: crate::models::courses::requests::CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create_course::handle_create_course(self, request, course_data).await
    }

    // 课程详情（含资料与作业）
    pub async fn course_detail(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        course_detail::handle_course_detail(self, request, course_id).await
    }

    // 添加课程资料（multipart，pdf 类型带文件）
    pub async fn add_material(
        &self,
        request: &HttpRequest,
        course_id: i64,
        payload: actix_multipart::Multipart,
    ) -> ActixResult<HttpResponse> {
        add_material::handle_add_material(self, request, course_id, payload).await
    }

    // 布置作业
    pub async fn add_assignment(
        &self,
        request: &HttpRequest,
        course_id: i64,
        assignment_data: crate::models::assignments::requests::CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        add_assignment::handle_add_assignment(self, request, course_id, assignment_data).await
    }

    // 查看作业提交
    pub async fn view_submissions(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        view_submissions::handle_view_submissions(self, request, assignment_id).await
    }

    // 给提交打分
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        grade_data: crate::models::submissions::requests::GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade_submission::handle_grade_submission(self, request, submission_id, grade_data).await
    }
}

/// 所有权校验辅助函数
///
/// 课程必须存在且属于当前登录教师，否则返回可直接使用的错误响应。
pub(crate) async fn require_owned_course(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    course_id: i64,
) -> Result<Course, HttpResponse> {
    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => {
            if course.is_owned_by(uid) {
                Ok(course)
            } else {
                Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::CoursePermissionDenied,
                    "You do not own this course.",
                )))
            }
        }
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => {
            tracing::error!("Failed to get course by id: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching course",
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
    use crate::models::users::entities::UserRole;
    use crate::services::testing;

    // 非所有者查看课程详情：403 且不带任何课程数据
    #[tokio::test]
    async fn test_non_owner_course_detail_denied() {
        let storage = testing::storage().await;
        let owner = testing::create_user(&storage, "owner", UserRole::Teacher).await;
        let other = testing::create_user(&storage, "other", UserRole::Teacher).await;
        let course = storage
            .create_course(
                owner.id,
                CreateCourseRequest {
                    title: "Algebra I".to_string(),
                    description: None,
                },
            )
            .await
            .expect("create course");

        let service = TeacherService::with_storage(storage.clone());
        let request = testing::request_as(&other);
        let resp = service
            .course_detail(&request, course.id)
            .await
            .expect("handler");

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let json = testing::response_json(resp).await;
        assert_eq!(json["code"], ErrorCode::CoursePermissionDenied as i32);
        assert!(json.get("data").is_none());
    }

    // 非所有者布置作业：403 且不产生任何记录
    #[tokio::test]
    async fn test_non_owner_add_assignment_denied() {
        let storage = testing::storage().await;
        let owner = testing::create_user(&storage, "owner", UserRole::Teacher).await;
        let other = testing::create_user(&storage, "other", UserRole::Teacher).await;
        let course = storage
            .create_course(
                owner.id,
                CreateCourseRequest {
                    title: "Algebra I".to_string(),
                    description: None,
                },
            )
            .await
            .expect("create course");

        let service = TeacherService::with_storage(storage.clone());
        let request = testing::request_as(&other);
        let resp = service
            .add_assignment(
                &request,
                course.id,
                CreateAssignmentRequest {
                    title: "Homework 1".to_string(),
                    description: None,
                    due_date: "2024-03-01 09:00".to_string(),
                },
            )
            .await
            .expect("handler");

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let json = testing::response_json(resp).await;
        assert_eq!(json["code"], ErrorCode::CoursePermissionDenied as i32);
        assert!(json.get("data").is_none());

        let assignments = storage
            .list_assignments_by_course(course.id)
            .await
            .expect("list assignments");
        assert!(assignments.is_empty());
    }
}
