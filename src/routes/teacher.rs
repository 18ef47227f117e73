use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::models::users::entities::UserRole;
use crate::services::TeacherService;
use crate::utils::{SafeAssignmentIdI64, SafeCourseIdI64, SafeSubmissionIdI64};

// 懒加载的全局 TeacherService 实例
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

pub async fn list_courses(request: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_courses(&request).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .create_course(&req, course_data.into_inner())
        .await
}

pub async fn course_detail(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.course_detail(&req, course_id.0).await
}

pub async fn add_material(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .add_material(&req, course_id.0, payload)
        .await
}

pub async fn add_assignment(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .add_assignment(&req, course_id.0, assignment_data.into_inner())
        .await
}

pub async fn view_submissions(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .view_submissions(&req, assignment_id.0)
        .await
}

pub async fn grade_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
    grade_data: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .grade_submission(&req, submission_id.0, grade_data.into_inner())
        .await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("/courses", web::get().to(list_courses))
                    .route("/courses", web::post().to(create_course))
                    .route("/courses/{course_id}", web::get().to(course_detail))
                    .service(
                        web::resource("/courses/{course_id}/materials")
                            .wrap(middlewares::RateLimit::material_upload())
                            .route(web::post().to(add_material)),
                    )
                    .route(
                        "/courses/{course_id}/assignments",
                        web::post().to(add_assignment),
                    )
                    .route(
                        "/assignments/{assignment_id}/submissions",
                        web::get().to(view_submissions),
                    )
                    .route(
                        "/submissions/{submission_id}/grade",
                        web::post().to(grade_submission),
                    ),
            ),
    );
}
