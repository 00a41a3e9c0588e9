use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{QueryFilter, Set};
use serde::Serialize;

/// Daily presence of a student at the facility.
///
/// One row per student and calendar day (UTC). Checkout sets
/// `check_out_time`; a later checkin on the same day reopens the row and
/// records that checkin's time and staff member.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub check_in_time: DateTime<Utc>,
    pub checked_in_by: i64,
    pub device_id: Option<i64>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub checked_out_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_checked_out(&self) -> bool {
        self.check_out_time.is_some()
    }

    pub async fn for_day<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Date.eq(date))
            .one(db)
            .await
    }

    /// Opens today's record: inserts it, or reopens a record that was
    /// already closed today with the new check-in time and staff member. An
    /// open record is returned untouched.
    pub async fn check_in_or_reopen<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        staff_id: i64,
        device_id: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        match Self::for_day(db, student_id, now.date_naive()).await? {
            None => {
                ActiveModel {
                    student_id: Set(student_id),
                    date: Set(now.date_naive()),
                    check_in_time: Set(now),
                    checked_in_by: Set(staff_id),
                    device_id: Set(device_id),
                    check_out_time: Set(None),
                    checked_out_by: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(db)
                .await
            }
            Some(existing) if existing.is_checked_out() => {
                let mut am: ActiveModel = existing.into();
                am.check_in_time = Set(now);
                am.checked_in_by = Set(staff_id);
                am.device_id = Set(device_id);
                am.check_out_time = Set(None);
                am.checked_out_by = Set(None);
                am.updated_at = Set(now);
                am.update(db).await
            }
            Some(open) => Ok(open),
        }
    }

    /// Records the checkout on an open record. Returns `false` if the record
    /// was already checked out.
    pub async fn check_out<C: ConnectionTrait>(
        db: &C,
        id: i64,
        staff_id: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::CheckOutTime, Expr::value(now))
            .col_expr(Column::CheckedOutBy, Expr::value(staff_id))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::CheckOutTime.is_null())
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{seed_staff, seed_student, setup_test_db};
    use chrono::TimeZone;

    #[tokio::test]
    async fn reopening_records_latest_check_in() {
        let db = setup_test_db().await;
        let student = seed_student(&db, "Lena", None).await;
        let first_staff = seed_staff(&db, "frau.weber@ogs.test").await;
        let second_staff = seed_staff(&db, "herr.kaya@ogs.test").await;
        let morning = Utc.with_ymd_and_hms(2025, 10, 6, 7, 30, 0).unwrap();

        let first = Model::check_in_or_reopen(&db, student.id, first_staff.id, None, morning)
            .await
            .unwrap();
        assert!(Model::check_out(&db, first.id, first_staff.id, morning).await.unwrap());
        assert!(!Model::check_out(&db, first.id, first_staff.id, morning).await.unwrap());

        let later = morning + chrono::Duration::hours(1);
        let reopened = Model::check_in_or_reopen(&db, student.id, second_staff.id, None, later)
            .await
            .unwrap();

        assert_eq!(reopened.id, first.id);
        assert_eq!(reopened.check_in_time, later);
        assert_eq!(reopened.checked_in_by, second_staff.id);
        assert!(reopened.check_out_time.is_none());
        assert!(reopened.checked_out_by.is_none());
    }

    #[tokio::test]
    async fn open_record_is_returned_unchanged() {
        let db = setup_test_db().await;
        let student = seed_student(&db, "Jonas", None).await;
        let staff = seed_staff(&db, "frau.yilmaz@ogs.test").await;
        let now = Utc::now();

        let a = Model::check_in_or_reopen(&db, student.id, staff.id, Some(4), now)
            .await
            .unwrap();
        let b = Model::check_in_or_reopen(&db, student.id, staff.id, None, now)
            .await
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(b.device_id, Some(4));
    }
}
