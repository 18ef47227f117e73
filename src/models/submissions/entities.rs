use serde::{Deserialize, Serialize};

// 提交实体
//
// 同一学生可对同一作业多次提交，存储层不做唯一约束。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: String,
    pub grade: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
