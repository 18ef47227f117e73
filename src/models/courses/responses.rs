use serde::Serialize;

use crate::models::assignments::entities::Assignment;
use crate::models::courses::entities::Course;
use crate::models::materials::entities::Material;

// 课程列表响应
#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub total: u64,
}

// 课程详情：课程本体加上资料与作业
#[derive(Debug, Serialize)]
pub struct CourseDetailResponse {
    pub course: Course,
    pub materials: Vec<Material>,
    pub assignments: Vec<Assignment>,
}
