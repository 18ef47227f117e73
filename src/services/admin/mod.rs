pub mod dashboard;
pub mod delete_course;
pub mod user_status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::entities::UserStatus;
use crate::storage::Storage;

pub struct AdminService {
    storage: Option<Arc<dyn Storage>>,
}

impl AdminService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 管理面板：用户与课程总览
    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::handle_dashboard(self, request).await
    }

    // 启用/停用用户
    pub async fn set_user_status(
        &self,
        request: &HttpRequest,
        user_id: i64,
        status: UserStatus,
    ) -> ActixResult<HttpResponse> {
        user_status::handle_set_user_status(self, request, user_id, status).await
    }

    // 删除课程（级联）
    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete_course::handle_delete_course(self, request, course_id).await
    }
}
