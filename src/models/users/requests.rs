use serde::Deserialize;

use crate::models::users::entities::UserRole;

// 创建用户请求（存储层入参，password 字段为已哈希密码）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}
