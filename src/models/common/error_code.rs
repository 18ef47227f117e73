// 业务错误码
//
// 约定：高三位对应 HTTP 状态，低两位区分具体场景。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 400xx - 请求错误
    BadRequest = 40000,
    ValidationFailed = 40001,
    DueDateInvalid = 40002,
    FileTypeNotAllowed = 40003,
    FileSizeExceeded = 40004,
    FileNotFound = 40005,

    // 401xx - 认证错误
    Unauthorized = 40100,
    AuthFailed = 40101,
    AccountInactive = 40102,

    // 403xx - 授权错误
    Forbidden = 40300,
    CoursePermissionDenied = 40301,
    NotEnrolled = 40302,

    // 404xx - 资源不存在
    NotFound = 40400,
    UserNotFound = 40401,
    CourseNotFound = 40402,
    AssignmentNotFound = 40403,
    SubmissionNotFound = 40404,

    // 409xx - 冲突
    UserNameAlreadyExists = 40901,
    UserEmailAlreadyExists = 40902,

    // 429xx - 频率限制
    TooManyRequests = 42900,

    // 500xx - 服务器错误
    InternalServerError = 50000,
    RegisterFailed = 50001,
    FileUploadFailed = 50002,
}
