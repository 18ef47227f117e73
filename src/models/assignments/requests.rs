use serde::Deserialize;

// 创建作业请求
//
// due_date 为 `YYYY-MM-DD HH:MM` 文本，由服务层解析；
// 解析失败是字段级校验错误，不会写入任何数据。
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: String,
}
