use crate::models::materials::entities::MaterialType;

// 创建资料请求
//
// 由 multipart 表单解析并通过校验后得到的干净载荷；
// pdf 类型在有上传文件时 content 为存储文件名。
#[derive(Debug, Clone)]
pub struct CreateMaterialRequest {
    pub title: String,
    pub material_type: MaterialType,
    pub content: Option<String>,
}
