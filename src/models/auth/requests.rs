use serde::Deserialize;

use crate::models::users::entities::UserRole;

// 登录请求，username 字段同时接受用户名或邮箱
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

// 注册请求
//
// role 只允许 teacher / student，管理员账号由启动期播种或既有管理员创建。
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: UserRole,
}
