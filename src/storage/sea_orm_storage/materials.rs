use super::SeaOrmStorage;
use crate::entity::materials::{ActiveModel, Column, Entity as Materials};
use crate::errors::{CourseHubError, Result};
use crate::models::materials::{entities::Material, requests::CreateMaterialRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 添加课程资料
    pub async fn create_material_impl(
        &self,
        course_id: i64,
        req: CreateMaterialRequest,
    ) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            title: Set(req.title),
            material_type: Set(req.material_type.to_string()),
            content: Set(req.content),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("添加资料失败: {e}")))?;

        Ok(result.into_material())
    }

    /// 列出课程资料，按添加时间正序
    pub async fn list_materials_by_course_impl(&self, course_id: i64) -> Result<Vec<Material>> {
        let materials = Materials::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询资料列表失败: {e}")))?;

        Ok(materials.into_iter().map(|m| m.into_material()).collect())
    }
}
