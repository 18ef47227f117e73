use super::SeaOrmStorage;
use crate::entity::prelude::Users;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{CourseHubError, Result};
use crate::models::submissions::{entities::Submission, responses::SubmissionInfo};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 学生提交作业
    ///
    /// 允许同一学生对同一作业多次提交，每次都是独立记录。
    pub async fn create_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: String,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            content: Set(content),
            grade: Set(None),
            submitted_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("提交作业失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出作业的全部提交，关联提交人用户名
    pub async fn list_submissions_by_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionInfo>> {
        let rows = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::SubmittedAt)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(submission, user)| SubmissionInfo {
                submission: submission.into_submission(),
                student_username: user.map(|u| u.username),
            })
            .collect())
    }

    /// 给提交打分
    pub async fn set_submission_grade_impl(
        &self,
        submission_id: i64,
        grade: String,
    ) -> Result<bool> {
        let result = Submissions::update_many()
            .col_expr(Column::Grade, sea_orm::sea_query::Expr::value(grade))
            .filter(Column::Id.eq(submission_id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("更新成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
