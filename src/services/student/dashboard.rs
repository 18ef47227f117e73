use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, require_student_id};
use crate::models::courses::responses::CourseListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_dashboard(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let student_id = match require_student_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    match storage.list_enrolled_courses(student_id).await {
        Ok(items) => {
            let response = CourseListResponse {
                total: items.len() as u64,
                items,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Enrolled courses retrieved")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list enrolled courses: {e}"),
            )),
        ),
    }
}
