use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, require_student_id};
use crate::models::{ApiResponse, ErrorCode};

/// 选课
///
/// 重复选课按幂等处理：已有记录时直接返回成功提示，不报错。
/// 并发下的重复插入由数据库唯一索引兜底，同样视为已选。
pub async fn handle_enroll(
    service: &StudentService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let student_id = match require_student_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
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
    }

    match storage.get_enrollment(student_id, course_id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Already enrolled in this course.",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to get enrollment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while checking enrollment",
                )),
            );
        }
    }

    match storage.enroll_student(student_id, course_id).await {
        Ok(enrollment) => {
            info!("Student {} enrolled in course {}", student_id, course_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(enrollment, "Enrolled successfully!")))
        }
        Err(e) if e.is_unique_violation() => {
            // 与预检查之间发生了并发插入
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Already enrolled in this course.",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to enroll: {e}"),
            )),
        ),
    }
}
