use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::courses::responses::CourseListResponse;
use crate::models::{ApiResponse, ErrorCode};

use super::TeacherService;

pub async fn handle_list_courses(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    match storage.list_courses_by_teacher(uid).await {
        Ok(courses) => {
            let response = CourseListResponse {
                total: courses.len() as u64,
                items: courses,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Courses retrieved")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list courses: {e}"),
            )),
        ),
    }
}
