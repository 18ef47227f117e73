use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherService, require_owned_course};
use crate::models::submissions::responses::SubmissionListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_view_submissions(
    service: &TeacherService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 作业必须存在，且其所属课程归当前教师所有
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

    if let Err(resp) = require_owned_course(&storage, request, assignment.course_id).await {
        return Ok(resp);
    }

    match storage.list_submissions_by_assignment(assignment_id).await {
        Ok(items) => {
            let response = SubmissionListResponse {
                assignment,
                total: items.len() as u64,
                items,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Submissions retrieved")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list submissions: {e}"),
            )),
        ),
    }
}
