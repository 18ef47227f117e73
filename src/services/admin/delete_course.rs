use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::{ApiResponse, ErrorCode};

use super::AdminService;

pub async fn handle_delete_course(
    service: &AdminService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 外键级联负责清理资料、作业、选课与提交
    match storage.delete_course(course_id).await {
        Ok(true) => {
            info!("Course {} deleted by admin", course_id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("Course deleted successfully!")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete course: {e}"),
            )),
        ),
    }
}
