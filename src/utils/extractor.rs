//! 路径参数安全提取器
//!
//! 把 `/courses/{course_id}` 这类路径段解析为 i64，
//! 解析失败时直接返回统一格式的 400 响应，避免在每个
//! handler 里重复校验。

use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorBadRequest};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let result = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0)
                    .map($name)
                    .ok_or_else(|| {
                        ErrorBadRequest(
                            serde_json::to_string(&ApiResponse::<()>::error_empty(
                                ErrorCode::BadRequest,
                                format!("Invalid path parameter: {}", $param),
                            ))
                            .unwrap_or_default(),
                        )
                    });
                ready(result)
            }
        }

        impl std::ops::Deref for $name {
            type Target = i64;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }
    };
}

define_safe_i64_extractor!(SafeUserIdI64, "user_id");
define_safe_i64_extractor!(SafeCourseIdI64, "course_id");
define_safe_i64_extractor!(SafeAssignmentIdI64, "assignment_id");
define_safe_i64_extractor!(SafeSubmissionIdI64, "submission_id");
