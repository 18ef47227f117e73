use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, require_enrollment, require_student_id};
use crate::models::courses::responses::CourseDetailResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_course_detail(
    service: &StudentService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let student_id = match require_student_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to get course by id: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching course",
                )),
            );
        }
    };

    if let Err(resp) = require_enrollment(&storage, student_id, course_id).await {
        return Ok(resp);
    }

    let materials = match storage.list_materials_by_course(course_id).await {
        Ok(materials) => materials,
        Err(e) => {
            tracing::error!("Failed to list materials: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while listing materials",
                )),
            );
        }
    };
    let assignments = match storage.list_assignments_by_course(course_id).await {
        Ok(assignments) => assignments,
        Err(e) => {
            tracing::error!("Failed to list assignments: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while listing assignments",
                )),
            );
        }
    };

    let response = CourseDetailResponse {
        course,
        materials,
        assignments,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Course detail retrieved")))
}
