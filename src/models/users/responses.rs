use serde::Serialize;

use crate::models::courses::entities::Course;
use crate::models::users::entities::User;

// 管理员仪表盘：全量用户/课程列表与统计数字
#[derive(Debug, Serialize)]
pub struct AdminDashboardResponse {
    pub users: Vec<User>,
    pub courses: Vec<Course>,
    pub users_count: u64,
    pub courses_count: u64,
    pub enrollment_count: u64,
}
