use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserStatus;
use crate::models::{ApiResponse, ErrorCode};

use super::AdminService;

pub async fn handle_set_user_status(
    service: &AdminService,
    request: &HttpRequest,
    user_id: i64,
    status: UserStatus,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 管理员不能停用自己的账号
    if status == UserStatus::Inactive && RequireJWT::extract_user_id(request) == Some(user_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "You cannot deactivate your own account.",
        )));
    }

    match storage.set_user_status(user_id, status.clone()).await {
        Ok(true) => {
            info!("User {} status set to {}", user_id, status);
            let message = match status {
                UserStatus::Active => "User activated successfully!",
                UserStatus::Inactive => "User deactivated successfully!",
            };
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(message)))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update user status: {e}"),
            )),
        ),
    }
}
