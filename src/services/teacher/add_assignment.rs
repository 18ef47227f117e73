use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::info;

use super::{TeacherService, require_owned_course};
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::FieldErrors;

/// 截止时间的表单格式
const DUE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 解析截止时间字符串
///
/// 输入按 UTC 解释，格式如 "2024-01-15 10:30"。
pub fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw.trim(), DUE_DATE_FORMAT).map(|naive| naive.and_utc())
}

pub async fn handle_add_assignment(
    service: &TeacherService,
    request: &HttpRequest,
    course_id: i64,
    assignment_data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = require_owned_course(&storage, request, course_id).await {
        return Ok(resp);
    }

    // 字段校验
    let mut errors = FieldErrors::new();
    if assignment_data.title.trim().is_empty() {
        errors.add("title", "Title is required");
    } else if assignment_data.title.len() > 120 {
        errors.add("title", "Title must be at most 120 characters");
    }

    let due_date = match parse_due_date(&assignment_data.due_date) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add("due_date", "Invalid date format. Use YYYY-MM-DD HH:MM");
            None
        }
    };

    if !errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ValidationFailed,
            errors,
            "Validation failed",
        )));
    }

    let due_date = match due_date {
        Some(d) => d,
        None => {
            // errors 为空时 due_date 必然已解析成功
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::DueDateInvalid,
                "Invalid date format. Use YYYY-MM-DD HH:MM",
            )));
        }
    };

    match storage
        .create_assignment(course_id, assignment_data, due_date)
        .await
    {
        Ok(assignment) => {
            info!(
                "Assignment {} created in course {}",
                assignment.id, course_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Assignment created successfully!",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create assignment: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_due_date() {
        let parsed = parse_due_date("2024-01-15 10:30").unwrap();
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.month(), 1);
        assert_eq!(parsed.day(), 15);
        assert_eq!(parsed.hour(), 10);
        assert_eq!(parsed.minute(), 30);
    }

    #[test]
    fn test_parse_due_date_trims_whitespace() {
        assert!(parse_due_date("  2024-03-01 09:00  ").is_ok());
    }

    #[test]
    fn test_parse_due_date_rejects_bad_input() {
        assert!(parse_due_date("2024-01-15").is_err());
        assert!(parse_due_date("15/01/2024 10:30").is_err());
        assert!(parse_due_date("not a date").is_err());
        assert!(parse_due_date("2024-13-40 99:99").is_err());
    }
}
