use serde::Serialize;

use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::Submission;

// 附带提交者用户名的提交信息（教师查看视角）
#[derive(Debug, Serialize)]
pub struct SubmissionInfo {
    #[serde(flatten)]
    pub submission: Submission,
    pub student_username: Option<String>,
}

// 某个作业的提交列表
#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    pub assignment: Assignment,
    pub items: Vec<SubmissionInfo>,
    pub total: u64,
}
