use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::responses::AdminDashboardResponse;
use crate::models::{ApiResponse, ErrorCode};

use super::AdminService;

pub async fn handle_dashboard(
    service: &AdminService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let users = match storage.list_users().await {
        Ok(users) => users,
        Err(e) => return Ok(internal_error(format!("Failed to list users: {e}"))),
    };
    let courses = match storage.list_courses().await {
        Ok(courses) => courses,
        Err(e) => return Ok(internal_error(format!("Failed to list courses: {e}"))),
    };
    let enrollment_count = match storage.count_enrollments().await {
        Ok(count) => count,
        Err(e) => return Ok(internal_error(format!("Failed to count enrollments: {e}"))),
    };

    let response = AdminDashboardResponse {
        users_count: users.len() as u64,
        courses_count: courses.len() as u64,
        enrollment_count,
        users,
        courses,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Dashboard loaded")))
}

fn internal_error(msg: String) -> HttpResponse {
    tracing::error!("{}", msg);
    HttpResponse::InternalServerError()
        .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg))
}
