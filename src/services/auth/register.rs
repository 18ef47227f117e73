use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    auth::RegisterRequest,
    users::{entities::UserRole, requests::CreateUserRequest},
};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{FieldErrors, validate_email, validate_password, validate_username};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 字段校验不短路，所有错误一次性返回
    let errors = collect_field_errors(&storage, &register_request).await?;
    if !errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ValidationFailed,
            errors,
            "Validation failed",
        )));
    }

    // 2. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Registration failed",
                )),
            );
        }
    };

    // 3. 创建用户；并发下的重名由唯一约束兜底
    let create_request = CreateUserRequest {
        username: register_request.username,
        email: register_request.email,
        password: password_hash,
        role: register_request.role,
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            tracing::info!("User {} registered", user.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                user,
                "Registration successful! You can now log in.",
            )))
        }
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UserNameAlreadyExists, "Account already exists"),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Registration failed: {e}"),
            )),
        ),
    }
}

/// 汇总注册请求的全部字段错误
async fn collect_field_errors(
    storage: &Arc<dyn Storage>,
    req: &RegisterRequest,
) -> ActixResult<FieldErrors> {
    let mut errors = FieldErrors::new();

    if req.username.trim().is_empty() {
        errors.add("username", "Username is required");
    } else if let Err(msg) = validate_username(&req.username) {
        errors.add("username", msg);
    } else if username_taken(storage, &req.username).await {
        errors.add("username", "Username already in use.");
    }

    if req.email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if let Err(msg) = validate_email(&req.email) {
        errors.add("email", msg);
    } else if email_taken(storage, &req.email).await {
        errors.add("email", "Email already registered.");
    }

    let password_check = validate_password(&req.password);
    for msg in password_check.errors {
        errors.add("password", msg);
    }

    if req.confirm_password != req.password {
        errors.add("confirm_password", "Passwords must match");
    }

    // 管理员账号只能由启动引导创建，不开放自助注册
    if req.role == UserRole::Admin {
        errors.add("role", "Cannot register as admin");
    }

    Ok(errors)
}

async fn username_taken(storage: &Arc<dyn Storage>, username: &str) -> bool {
    matches!(storage.get_user_by_username(username).await, Ok(Some(_)))
}

async fn email_taken(storage: &Arc<dyn Storage>, email: &str) -> bool {
    matches!(storage.get_user_by_email(email).await, Ok(Some(_)))
}
