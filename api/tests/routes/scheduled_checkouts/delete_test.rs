#[cfg(test)]
mod tests {
    use crate::helpers::{app::token_for, make_test_app};
    use chrono::{Duration, Utc};
    use db::models::scheduled_checkout::{self, ScheduledCheckoutStatus};
    use db::test_utils::{seed_staff_with_account, seed_student};
    use sea_orm::EntityTrait;

    /// Test Case: cancelling twice succeeds both times and leaves one cancellation
    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let t = make_test_app().await;
        let db = t.db();
        let (account, staff) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        let student = seed_student(db, "Mia", None).await;
        let row = scheduled_checkout::Model::create(
            db,
            student.id,
            staff.id,
            Utc::now() + Duration::hours(1),
            None,
        )
        .await
        .unwrap();
        let token = token_for(&account);
        let uri = format!("/api/scheduled-checkouts/{}", row.id);

        let (status, body) = t.send("DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["status"], "cancelled");
        assert_eq!(body["message"], "Scheduled checkout cancelled successfully");
        let first = scheduled_checkout::Entity::find_by_id(row.id).one(db).await.unwrap().unwrap();

        let (status, body) = t.send("DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, 200);
        assert_eq!(body["message"], "Scheduled checkout was already cancelled");
        let second = scheduled_checkout::Entity::find_by_id(row.id).one(db).await.unwrap().unwrap();

        assert_eq!(second.status, ScheduledCheckoutStatus::Cancelled);
        assert_eq!(first.cancelled_at, second.cancelled_at);
        assert_eq!(second.cancelled_by, Some(staff.id));
    }

    #[tokio::test]
    async fn test_cancel_executed_conflicts_and_unknown_not_found() {
        let t = make_test_app().await;
        let db = t.db();
        let (account, staff) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        let student = seed_student(db, "Mia", None).await;
        let row = scheduled_checkout::Model::create(db, student.id, staff.id, Utc::now(), None)
            .await
            .unwrap();
        scheduled_checkout::Model::claim(db, row.id, Utc::now()).await.unwrap();
        scheduled_checkout::Model::mark_executed(db, row.id, Utc::now()).await.unwrap();
        let token = token_for(&account);

        let (status, _) = t
            .send("DELETE", &format!("/api/scheduled-checkouts/{}", row.id), Some(&token), None)
            .await;
        assert_eq!(status, 409);

        let (status, _) = t.send("DELETE", "/api/scheduled-checkouts/9999", Some(&token), None).await;
        assert_eq!(status, 404);
    }
}
