use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::{UserRole, UserStatus};
use crate::services::AdminService;
use crate::utils::{SafeCourseIdI64, SafeUserIdI64};

// 懒加载的全局 AdminService 实例
static ADMIN_SERVICE: Lazy<AdminService> = Lazy::new(AdminService::new_lazy);

pub async fn dashboard(request: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.dashboard(&request).await
}

pub async fn activate_user(req: HttpRequest, user_id: SafeUserIdI64) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .set_user_status(&req, user_id.0, UserStatus::Active)
        .await
}

pub async fn deactivate_user(
    req: HttpRequest,
    user_id: SafeUserIdI64,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .set_user_status(&req, user_id.0, UserStatus::Inactive)
        .await
}

pub async fn delete_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.delete_course(&req, course_id.0).await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("/dashboard", web::get().to(dashboard))
                    .route("/users/{user_id}/activate", web::post().to(activate_user))
                    .route(
                        "/users/{user_id}/deactivate",
                        web::post().to(deactivate_user),
                    )
                    .route("/courses/{course_id}", web::delete().to(delete_course)),
            ),
    );
}
