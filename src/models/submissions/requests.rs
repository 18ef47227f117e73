use serde::Deserialize;

// 提交作业请求
#[derive(Debug, Deserialize)]
pub struct CreateSubmissionRequest {
    pub content: String,
}

// 评分请求
#[derive(Debug, Deserialize)]
pub struct GradeSubmissionRequest {
    pub grade: String,
}
