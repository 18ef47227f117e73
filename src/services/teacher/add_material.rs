use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::str::FromStr;
use std::{fs::File, path::Path};
use uuid::Uuid;

use super::{TeacherService, require_owned_course};
use crate::config::AppConfig;
use crate::errors::CourseHubError;
use crate::models::materials::{entities::MaterialType, requests::CreateMaterialRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::FieldErrors;
use crate::utils::validate_magic_bytes;

/// 添加课程资料
///
/// multipart 表单字段：title、material_type（note/link/pdf）、
/// content（note 正文或 link 地址）、file（仅 pdf 类型）。
/// pdf 类型的 content 记录为服务器上的存储文件名。
pub async fn handle_add_material(
    service: &TeacherService,
    request: &HttpRequest,
    course_id: i64,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = require_owned_course(&storage, request, course_id).await {
        return Ok(resp);
    }

    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    // 确保上传目录存在
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        tracing::error!("{}", CourseHubError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "Failed to create upload directory",
            )),
        );
    }

    // 解析 multipart 字段
    let mut title = String::new();
    let mut material_type_raw = String::new();
    let mut text_content = String::new();
    let mut stored_name: Option<String> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        match name.as_str() {
            "title" => title = read_text_field(&mut field).await?,
            "material_type" => material_type_raw = read_text_field(&mut field).await?,
            "content" => text_content = read_text_field(&mut field).await?,
            "file" => {
                if stored_name.is_some() {
                    discard_stored_file(upload_dir, stored_name.as_deref());
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::BadRequest,
                        "Only one file can be uploaded at a time",
                    )));
                }

                let original_name = content_disposition
                    .and_then(|cd| cd.get_filename())
                    .map(|s| s.to_string())
                    .unwrap_or_default();

                // 提取扩展名并校验
                let extension = Path::new(&original_name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| format!(".{}", ext.to_lowercase()))
                    .unwrap_or_default();

                if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileTypeNotAllowed,
                        "File type not allowed",
                    )));
                }

                let name_on_disk =
                    format!("{}-{}.bin", chrono::Utc::now().timestamp(), Uuid::new_v4());
                let file_path = format!("{upload_dir}/{name_on_disk}");
                let mut f = match File::create(&file_path) {
                    Ok(file) => file,
                    Err(e) => {
                        tracing::error!("{}", CourseHubError::file_operation(format!("{e}")));
                        return Ok(HttpResponse::InternalServerError().json(
                            ApiResponse::<()>::error_empty(
                                ErrorCode::FileUploadFailed,
                                "Failed to create file",
                            ),
                        ));
                    }
                };

                let mut total_size: usize = 0;
                let mut first_chunk = true;
                while let Some(chunk) = field.next().await {
                    let data = chunk?;

                    // 第一个 chunk 时验证魔术字节
                    if first_chunk {
                        first_chunk = false;
                        if !validate_magic_bytes(&data, &extension) {
                            let _ = fs::remove_file(&file_path);
                            return Ok(HttpResponse::BadRequest().json(
                                ApiResponse::error_empty(
                                    ErrorCode::FileTypeNotAllowed,
                                    "File content does not match its extension",
                                ),
                            ));
                        }
                    }

                    total_size += data.len();
                    if total_size > max_size {
                        let _ = fs::remove_file(&file_path);
                        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::FileSizeExceeded,
                            "File size exceeds the limit",
                        )));
                    }
                    f.write_all(&data)?;
                }
                stored_name = Some(name_on_disk);
            }
            _ => {}
        }
    }

    // 字段校验；被拒绝的请求不能在磁盘上留下文件
    let material_type = MaterialType::from_str(&material_type_raw).ok();
    let errors = material_field_errors(&title, &material_type, &text_content, stored_name.is_some());
    if !errors.is_empty() {
        discard_stored_file(upload_dir, stored_name.as_deref());
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ValidationFailed,
            errors,
            "Validation failed",
        )));
    }

    let material_type = material_type.unwrap_or(MaterialType::Note);
    let is_pdf = material_type == MaterialType::Pdf;
    let content = if is_pdf {
        stored_name.clone()
    } else {
        // note/link 不使用上传文件
        discard_stored_file(upload_dir, stored_name.as_deref());
        Some(text_content)
    };

    let create_request = CreateMaterialRequest {
        title,
        material_type,
        content,
    };

    match storage.create_material(course_id, create_request).await {
        Ok(material) => {
            tracing::info!("Material {} added to course {}", material.id, course_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(material, "Material added successfully!")))
        }
        Err(e) => {
            if is_pdf {
                discard_stored_file(upload_dir, stored_name.as_deref());
            }
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to add material: {e}"),
                )),
            )
        }
    }
}

/// 汇总资料表单的字段错误
fn material_field_errors(
    title: &str,
    material_type: &Option<MaterialType>,
    text_content: &str,
    has_file: bool,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if title.trim().is_empty() {
        errors.add("title", "Title is required");
    }
    match material_type {
        Some(MaterialType::Pdf) => {
            if !has_file {
                errors.add("file", "A PDF file is required for pdf materials");
            }
        }
        Some(_) => {
            if text_content.trim().is_empty() {
                errors.add("content", "Content is required");
            }
        }
        None => {
            errors.add(
                "material_type",
                "Material type must be one of: note, link, pdf",
            );
        }
    }
    errors
}

/// 删除已落盘但最终未被资料记录引用的上传文件
fn discard_stored_file(upload_dir: &str, stored_name: Option<&str>) {
    if let Some(name) = stored_name {
        let path = format!("{upload_dir}/{name}");
        if let Err(e) = fs::remove_file(&path) {
            tracing::warn!("Failed to remove discarded upload {}: {}", path, e);
        }
    }
}

/// 读取文本字段内容
async fn read_text_field(field: &mut actix_multipart::Field) -> actix_web::Result<String> {
    let mut value = Vec::new();
    while let Some(chunk) = field.next().await {
        value.extend_from_slice(&chunk?);
    }
    Ok(String::from_utf8_lossy(&value).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_upload_dir() -> String {
        let dir = std::env::temp_dir().join(format!("coursehub-uploads-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).expect("create temp upload dir");
        dir.to_string_lossy().into_owned()
    }

    #[test]
    fn test_missing_title_fails_validation() {
        let errors = material_field_errors("", &Some(MaterialType::Pdf), "", true);
        assert!(errors.get("title").is_some());
    }

    #[test]
    fn test_type_specific_requirements() {
        let errors = material_field_errors("Notes", &Some(MaterialType::Pdf), "", false);
        assert!(errors.get("file").is_some());

        let errors = material_field_errors("Notes", &Some(MaterialType::Note), "  ", false);
        assert!(errors.get("content").is_some());

        let errors = material_field_errors("Notes", &None, "whatever", false);
        assert!(errors.get("material_type").is_some());
    }

    // 校验失败时已落盘的文件必须被删除，不能留下孤儿文件
    #[test]
    fn test_rejected_upload_is_removed_from_disk() {
        let dir = temp_upload_dir();
        let name = format!("{}-{}.bin", chrono::Utc::now().timestamp(), Uuid::new_v4());
        fs::write(format!("{dir}/{name}"), b"%PDF-1.4").expect("write stored file");

        let stored_name = Some(name.clone());
        let errors = material_field_errors("", &Some(MaterialType::Pdf), "", stored_name.is_some());
        assert!(!errors.is_empty());
        discard_stored_file(&dir, stored_name.as_deref());

        assert!(!Path::new(&format!("{dir}/{name}")).exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_discard_without_stored_file_is_noop() {
        discard_stored_file("/nonexistent-upload-dir", None);
    }
}
