use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::middlewares::RequireJWT;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::FieldErrors;

pub async fn handle_create_course(
    service: &TeacherService,
    request: &HttpRequest,
    course_data: CreateCourseRequest,
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

    // 字段校验
    let mut errors = FieldErrors::new();
    if course_data.title.trim().is_empty() {
        errors.add("title", "Title is required");
    } else if course_data.title.len() > 120 {
        errors.add("title", "Title must be at most 120 characters");
    }
    if !errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ValidationFailed,
            errors,
            "Validation failed",
        )));
    }

    match storage.create_course(uid, course_data).await {
        Ok(course) => {
            info!("Course {} created by teacher {}", course.title, uid);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully!")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Course creation failed: {e}"),
            )),
        ),
    }
}
