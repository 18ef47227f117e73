pub mod admin;
pub mod auth;
pub mod student;
pub mod teacher;

pub use admin::AdminService;
pub use auth::AuthService;
pub use student::StudentService;
pub use teacher::TeacherService;

/// 服务层测试基建
///
/// 真实迁移跑在内存 SQLite 上，请求对象通过扩展携带已认证用户，
/// 与 RequireJWT 注入用户的方式一致。
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use actix_web::{HttpMessage, HttpRequest, HttpResponse, test::TestRequest};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    use crate::models::users::entities::{User, UserRole};
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

    pub async fn storage() -> Arc<dyn Storage> {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        Arc::new(SeaOrmStorage::from_connection(db))
    }

    pub async fn create_user(storage: &Arc<dyn Storage>, username: &str, role: UserRole) -> User {
        storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "$argon2id$placeholder".to_string(),
                role,
            })
            .await
            .expect("create user")
    }

    /// 构造一个已通过认证的请求
    pub fn request_as(user: &User) -> HttpRequest {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(user.clone());
        req
    }

    pub async fn response_json(resp: HttpResponse) -> serde_json::Value {
        let body = actix_web::body::to_bytes(resp.into_body())
            .await
            .expect("read response body");
        serde_json::from_slice(&body).expect("json response body")
    }
}
