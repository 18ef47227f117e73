use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, require_enrollment, require_student_id};
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::FieldErrors;

/// 提交作业
///
/// 允许重复提交，每次提交都是独立记录，教师端按时间排序查看。
pub async fn handle_submit_assignment(
    service: &StudentService,
    request: &HttpRequest,
    assignment_id: i64,
    submission_data: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let student_id = match require_student_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
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

    if let Err(resp) = require_enrollment(&storage, student_id, assignment.course_id).await {
        return Ok(resp);
    }

    let mut errors = FieldErrors::new();
    let content = submission_data.content.trim().to_string();
    if content.is_empty() {
        errors.add("content", "Content is required");
    }
    if !errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ValidationFailed,
            errors,
            "Validation failed",
        )));
    }

    match storage
        .create_submission(assignment_id, student_id, content)
        .await
    {
        Ok(submission) => {
            info!(
                "Student {} submitted assignment {}",
                student_id, assignment_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                submission,
                "Assignment submitted successfully!",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to submit assignment: {e}"),
            )),
        ),
    }
}
