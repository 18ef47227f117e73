use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherService, require_owned_course};
use crate::models::courses::responses::CourseDetailResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_course_detail(
    service: &TeacherService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let course = match require_owned_course(&storage, request, course_id).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };

    let materials = match storage.list_materials_by_course(course_id).await {
        Ok(materials) => materials,
        Err(e) => return Ok(internal_error(format!("Failed to list materials: {e}"))),
    };
    let assignments = match storage.list_assignments_by_course(course_id).await {
        Ok(assignments) => assignments,
        Err(e) => return Ok(internal_error(format!("Failed to list assignments: {e}"))),
    };

    let response = CourseDetailResponse {
        course,
        materials,
        assignments,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Course detail retrieved")))
}

fn internal_error(msg: String) -> HttpResponse {
    tracing::error!("{}", msg);
    HttpResponse::InternalServerError()
        .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg))
}
