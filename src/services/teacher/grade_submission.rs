use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TeacherService, require_owned_course};
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::FieldErrors;

pub async fn handle_grade_submission(
    service: &TeacherService,
    request: &HttpRequest,
    submission_id: i64,
    grade_data: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 提交 → 作业 → 课程，逐级解析后校验所有权；载荷校验在所有权之后
    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to get submission: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching submission",
                )),
            );
        }
    };

    let assignment = match storage.get_assignment_by_id(submission.assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to get assignment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching assignment",
                )),
            );
        }
    };

    if let Err(resp) = require_owned_course(&storage, request, assignment.course_id).await {
        return Ok(resp);
    }

    // 字段校验：成绩为短字符串（如 "A-"、"85"）
    let mut errors = FieldErrors::new();
    let grade = grade_data.grade.trim().to_string();
    if grade.is_empty() {
        errors.add("grade", "Grade is required");
    } else if grade.len() > 10 {
        errors.add("grade", "Grade must be at most 10 characters");
    }
    if !errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ValidationFailed,
            errors,
            "Validation failed",
        )));
    }

    match storage.set_submission_grade(submission_id, grade).await {
        Ok(true) => {
            info!("Submission {} graded", submission_id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("Grade saved successfully!")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to save grade: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use crate::models::ErrorCode;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::submissions::requests::GradeSubmissionRequest;
    use crate::models::users::entities::{User, UserRole};
    use crate::services::TeacherService;
    use crate::services::teacher::add_assignment::parse_due_date;
    use crate::services::testing;
    use crate::storage::Storage;
    use std::sync::Arc;

    async fn seed_submission(storage: &Arc<dyn Storage>, owner: &User) -> i64 {
        let student = testing::create_user(storage, "stud", UserRole::Student).await;
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
        storage
            .create_submission(assignment.id, student.id, "my answer".to_string())
            .await
            .expect("create submission")
            .id
    }

    // 非所有者即使带着非法成绩也只会看到 403，看不到字段错误
    #[tokio::test]
    async fn test_non_owner_denied_before_grade_validation() {
        let storage = testing::storage().await;
        let owner = testing::create_user(&storage, "owner", UserRole::Teacher).await;
        let other = testing::create_user(&storage, "other", UserRole::Teacher).await;
        let submission_id = seed_submission(&storage, &owner).await;

        let service = TeacherService::with_storage(storage.clone());
        let request = testing::request_as(&other);
        let resp = service
            .grade_submission(
                &request,
                submission_id,
                GradeSubmissionRequest {
                    grade: String::new(),
                },
            )
            .await
            .expect("handler");

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let json = testing::response_json(resp).await;
        assert_eq!(json["code"], ErrorCode::CoursePermissionDenied as i32);
        assert!(json.get("data").is_none());

        let untouched = storage
            .get_submission_by_id(submission_id)
            .await
            .expect("query submission")
            .expect("submission exists");
        assert!(untouched.grade.is_none());
    }

    // 所有者提交空成绩仍然收到字段校验错误
    #[tokio::test]
    async fn test_owner_empty_grade_rejected() {
        let storage = testing::storage().await;
        let owner = testing::create_user(&storage, "owner", UserRole::Teacher).await;
        let submission_id = seed_submission(&storage, &owner).await;

        let service = TeacherService::with_storage(storage.clone());
        let request = testing::request_as(&owner);
        let resp = service
            .grade_submission(
                &request,
                submission_id,
                GradeSubmissionRequest {
                    grade: "   ".to_string(),
                },
            )
            .await
            .expect("handler");

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = testing::response_json(resp).await;
        assert_eq!(json["code"], ErrorCode::ValidationFailed as i32);
        assert!(json["data"].get("grade").is_some());
    }
}
