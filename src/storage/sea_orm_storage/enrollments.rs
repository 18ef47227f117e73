use super::SeaOrmStorage;
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::{CourseHubError, Result};
use crate::models::{courses::entities::Course, enrollments::entities::Enrollment};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 学生选课
    ///
    /// (student_id, course_id) 上有唯一索引，并发下的重复选课
    /// 会以唯一约束错误返回，调用方用 is_unique_violation 识别。
    pub async fn enroll_student_impl(&self, student_id: i64, course_id: i64) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            enrolled_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("选课失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 查询学生在某课程的选课记录
    pub async fn get_enrollment_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 列出学生已选课程
    pub async fn list_enrolled_courses_impl(&self, student_id: i64) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .filter(
                CourseColumn::Id.in_subquery(
                    Query::select()
                        .column(Column::CourseId)
                        .from(Enrollments)
                        .and_where(Column::StudentId.eq(student_id))
                        .to_owned(),
                ),
            )
            .order_by_desc(CourseColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询已选课程失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 列出学生未选课程
    pub async fn list_available_courses_impl(&self, student_id: i64) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .filter(
                CourseColumn::Id.not_in_subquery(
                    Query::select()
                        .column(Column::CourseId)
                        .from(Enrollments)
                        .and_where(Column::StudentId.eq(student_id))
                        .to_owned(),
                ),
            )
            .order_by_desc(CourseColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询可选课程失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 统计选课数量
    pub async fn count_enrollments_impl(&self) -> Result<u64> {
        let count = Enrollments::find()
            .count(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("统计选课数量失败: {e}")))?;

        Ok(count)
    }
}
