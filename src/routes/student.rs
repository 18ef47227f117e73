use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::users::entities::UserRole;
use crate::services::StudentService;
use crate::utils::{SafeAssignmentIdI64, SafeCourseIdI64};

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn dashboard(request: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.dashboard(&request).await
}

pub async fn available_courses(request: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.available_courses(&request).await
}

pub async fn enroll(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.enroll(&req, course_id.0).await
}

pub async fn course_detail(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.course_detail(&req, course_id.0).await
}

pub async fn submit_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
    submission_data: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .submit_assignment(&req, assignment_id.0, submission_data.into_inner())
        .await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles()))
                    .route("/courses", web::get().to(dashboard))
                    .route("/courses/available", web::get().to(available_courses))
                    .route("/courses/{course_id}/enroll", web::post().to(enroll))
                    .route("/courses/{course_id}", web::get().to(course_detail))
                    .route(
                        "/assignments/{assignment_id}/submissions",
                        web::post().to(submit_assignment),
                    ),
            ),
    );
}
