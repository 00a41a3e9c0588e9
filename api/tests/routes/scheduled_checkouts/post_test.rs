#[cfg(test)]
mod tests {
    use crate::helpers::{app::token_for, make_test_app};
    use chrono::{Duration, Utc};
    use db::models::{
        account, attendance,
        scheduled_checkout::{self, ScheduledCheckoutStatus},
    };
    use db::test_utils::{TEST_PASSWORD, seed_education_group, seed_student, seed_teacher_of};
    use sea_orm::EntityTrait;
    use serde_json::json;

    #[tokio::test]
    async fn test_schedule_checkout_by_home_teacher() {
        let t = make_test_app().await;
        let db = t.db();
        let class = seed_education_group(db, "Sonnengruppe").await;
        let (account, staff) = seed_teacher_of(db, "lehrer@ogs.test", class.id).await;
        let student = seed_student(db, "Mia", Some(class.id)).await;
        let token = token_for(&account);
        let when = Utc::now() + Duration::hours(3);

        let body = json!({ "student_id": student.id, "scheduled_for": when.to_rfc3339(), "reason": "Arzttermin" });
        let (status, resp) = t.send("POST", "/api/scheduled-checkouts", Some(&token), Some(body.clone())).await;

        assert_eq!(status, 201);
        assert_eq!(resp["data"]["status"], "pending");
        assert_eq!(resp["data"]["scheduled_by"], staff.id);
        assert_eq!(resp["data"]["reason"], "Arzttermin");

        let (status, _) = t.send("POST", "/api/scheduled-checkouts", Some(&token), Some(body)).await;
        assert_eq!(status, 409);

        let (status, resp) = t
            .send("GET", &format!("/api/scheduled-checkouts/student/{}", student.id), Some(&token), None)
            .await;
        assert_eq!(status, 200);
        assert_eq!(resp["data"]["student_id"], student.id);
    }

    #[tokio::test]
    async fn test_schedule_checkout_in_the_past_is_bad_request() {
        let t = make_test_app().await;
        let db = t.db();
        let class = seed_education_group(db, "Sonnengruppe").await;
        let (account, _) = seed_teacher_of(db, "lehrer@ogs.test", class.id).await;
        let student = seed_student(db, "Mia", Some(class.id)).await;

        let when = Utc::now() - Duration::minutes(5);
        let (status, _) = t
            .send(
                "POST",
                "/api/scheduled-checkouts",
                Some(&token_for(&account)),
                Some(json!({ "student_id": student.id, "scheduled_for": when.to_rfc3339() })),
            )
            .await;

        assert_eq!(status, 400);
    }

    /// Test Case: one due checkout succeeds, one fails because the student
    /// never checked in; the run reports partial success
    #[tokio::test]
    async fn test_process_partial_success_is_206() {
        let t = make_test_app().await;
        let db = t.db();
        let class = seed_education_group(db, "Sonnengruppe").await;
        let (account, staff) = seed_teacher_of(db, "lehrer@ogs.test", class.id).await;
        let present = seed_student(db, "Anna", Some(class.id)).await;
        let absent = seed_student(db, "Karl", Some(class.id)).await;
        attendance::Model::check_in_or_reopen(db, present.id, staff.id, None, Utc::now())
            .await
            .unwrap();

        let due = Utc::now() - Duration::seconds(1);
        let ok = scheduled_checkout::Model::create(db, present.id, staff.id, due, None).await.unwrap();
        let bad = scheduled_checkout::Model::create(db, absent.id, staff.id, due, None).await.unwrap();

        let (status, body) = t
            .send("POST", "/api/scheduled-checkouts/process", Some(&token_for(&account)), None)
            .await;

        assert_eq!(status, 206);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["checkouts_executed"], 1);
        assert_eq!(body["data"]["attempted"], 2);
        assert_eq!(body["data"]["failed"], 1);
        assert_eq!(body["data"]["errors"][0]["scheduled_checkout_id"], bad.id);

        let ok = scheduled_checkout::Entity::find_by_id(ok.id).one(db).await.unwrap().unwrap();
        let bad = scheduled_checkout::Entity::find_by_id(bad.id).one(db).await.unwrap().unwrap();
        assert_eq!(ok.status, ScheduledCheckoutStatus::Executed);
        assert_eq!(bad.status, ScheduledCheckoutStatus::Failed);
        assert!(bad.error_message.is_some());
    }

    #[tokio::test]
    async fn test_process_with_nothing_due_is_ok() {
        let t = make_test_app().await;
        let class = seed_education_group(t.db(), "Sonnengruppe").await;
        let (account, _) = seed_teacher_of(t.db(), "lehrer@ogs.test", class.id).await;

        let (status, body) = t
            .send("POST", "/api/scheduled-checkouts/process", Some(&token_for(&account)), None)
            .await;

        assert_eq!(status, 200);
        assert_eq!(body["data"]["checkouts_executed"], 0);
        assert_eq!(body["data"]["attempted"], 0);
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_status() {
        let t = make_test_app().await;
        let class = seed_education_group(t.db(), "Sonnengruppe").await;
        let (account, _) = seed_teacher_of(t.db(), "lehrer@ogs.test", class.id).await;
        let token = token_for(&account);

        let (status, _) = t.send("GET", "/api/scheduled-checkouts?status=later", Some(&token), None).await;
        assert_eq!(status, 400);

        let (status, body) = t.send("GET", "/api/scheduled-checkouts?status=pending", Some(&token), None).await;
        assert_eq!(status, 200);
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    /// Test Case: an account without a staff record cannot run the processor
    #[tokio::test]
    async fn test_process_requires_staff() {
        let t = make_test_app().await;
        let db = t.db();
        let class = seed_education_group(db, "Sonnengruppe").await;
        let (_, staff) = seed_teacher_of(db, "lehrer@ogs.test", class.id).await;
        let student = seed_student(db, "Ida", Some(class.id)).await;
        attendance::Model::check_in_or_reopen(db, student.id, staff.id, None, Utc::now())
            .await
            .unwrap();
        let due = Utc::now() - Duration::seconds(1);
        let row = scheduled_checkout::Model::create(db, student.id, staff.id, due, None).await.unwrap();
        let outsider = account::Model::create(db, "eltern@ogs.test", TEST_PASSWORD, false)
            .await
            .unwrap();

        let (status, body) = t
            .send("POST", "/api/scheduled-checkouts/process", Some(&token_for(&outsider)), None)
            .await;

        assert_eq!(status, 403);
        assert_eq!(body["success"], false);
        let row = scheduled_checkout::Entity::find_by_id(row.id).one(db).await.unwrap().unwrap();
        assert_eq!(row.status, ScheduledCheckoutStatus::Pending);
    }
}
