//! 业务数据模型
//!
//! 按领域划分：每个领域包含 entities / requests / responses 三类模型。
//! `common` 提供统一的 API 响应封装与业务错误码。

pub mod common;

pub mod assignments;
pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod materials;
pub mod submissions;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;

/// 程序启动时间，用于统计预处理耗时
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
