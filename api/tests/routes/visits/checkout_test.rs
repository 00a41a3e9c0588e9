#[cfg(test)]
mod tests {
    use crate::helpers::{app::token_for, make_test_app};
    use chrono::{Duration, Utc};
    use db::models::{
        attendance, group_supervisor,
        scheduled_checkout::{self, ScheduledCheckoutStatus},
        visit,
    };
    use db::test_utils::{
        seed_education_group, seed_live_group, seed_staff_with_account, seed_student,
        seed_teacher_of,
    };
    use sea_orm::EntityTrait;
    use serde_json::json;

    /// Test Case: supervisor checks a visiting student out; visit, attendance and
    /// the pending scheduled checkout are all closed
    #[tokio::test]
    async fn test_checkout_by_supervisor_closes_everything() {
        let t = make_test_app().await;
        let db = t.db();
        let group = seed_live_group(db, "Bauraum").await;
        let (account, staff) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        group_supervisor::Model::assign(db, staff.id, group.id, "supervisor", Utc::now())
            .await
            .unwrap();
        let student = seed_student(db, "Mia", None).await;
        let token = token_for(&account);

        let (status, _) = t
            .send(
                "POST",
                &format!("/api/visits/student/{}/checkin", student.id),
                Some(&token),
                Some(json!({ "active_group_id": group.id })),
            )
            .await;
        assert_eq!(status, 200);

        let pending = scheduled_checkout::Model::create(
            db,
            student.id,
            staff.id,
            Utc::now() + Duration::hours(2),
            None,
        )
        .await
        .unwrap();

        let (status, body) = t
            .send(
                "POST",
                &format!("/api/visits/student/{}/checkout", student.id),
                Some(&token),
                None,
            )
            .await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        let data = &body["data"];
        assert_eq!(data["student_id"], student.id);
        assert_eq!(data["action"], "checked_out");
        assert_eq!(data["attendance_status"], "checked_out");
        assert_eq!(data["checked_out_by"], staff.id);
        assert!(data["check_out_time"].is_string());

        assert!(visit::Model::current_for_student(db, student.id).await.unwrap().is_none());
        let record = attendance::Entity::find_by_id(data["attendance_id"].as_i64().unwrap())
            .one(db)
            .await
            .unwrap()
            .unwrap();
        assert!(record.check_out_time.is_some());
        let cancelled = scheduled_checkout::Entity::find_by_id(pending.id)
            .one(db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cancelled.status, ScheduledCheckoutStatus::Cancelled);
    }

    /// Test Case: student is checked in for the day but not in any room; the
    /// home-group teacher can still check them out
    #[tokio::test]
    async fn test_checkout_without_visit_by_home_teacher() {
        let t = make_test_app().await;
        let db = t.db();
        let class = seed_education_group(db, "Sonnengruppe").await;
        let (account, staff) = seed_teacher_of(db, "lehrer@ogs.test", class.id).await;
        let student = seed_student(db, "Paul", Some(class.id)).await;
        attendance::Model::check_in_or_reopen(db, student.id, staff.id, None, Utc::now())
            .await
            .unwrap();

        let (status, body) = t
            .send(
                "POST",
                &format!("/api/visits/student/{}/checkout", student.id),
                Some(&token_for(&account)),
                None,
            )
            .await;

        assert_eq!(status, 200);
        assert_eq!(body["data"]["attendance_status"], "checked_out");
    }

    /// Test Case: supervisor of room A may not check out a child visiting room B
    #[tokio::test]
    async fn test_checkout_by_supervisor_of_other_room_forbidden() {
        let t = make_test_app().await;
        let db = t.db();
        let room_a = seed_live_group(db, "Raum A").await;
        let room_b = seed_live_group(db, "Raum B").await;
        let (sup_a, staff_a) = seed_staff_with_account(db, "a@ogs.test", false).await;
        let (sup_b, staff_b) = seed_staff_with_account(db, "b@ogs.test", false).await;
        group_supervisor::Model::assign(db, staff_a.id, room_a.id, "supervisor", Utc::now())
            .await
            .unwrap();
        group_supervisor::Model::assign(db, staff_b.id, room_b.id, "supervisor", Utc::now())
            .await
            .unwrap();
        let student = seed_student(db, "Emil", None).await;

        let (status, _) = t
            .send(
                "POST",
                &format!("/api/visits/student/{}/checkin", student.id),
                Some(&token_for(&sup_b)),
                Some(json!({ "active_group_id": room_b.id })),
            )
            .await;
        assert_eq!(status, 200);

        let (status, body) = t
            .send(
                "POST",
                &format!("/api/visits/student/{}/checkout", student.id),
                Some(&token_for(&sup_a)),
                None,
            )
            .await;

        assert_eq!(status, 403);
        assert_eq!(body["success"], false);
        assert!(visit::Model::current_for_student(db, student.id).await.unwrap().is_some());
    }

    /// Test Case: a student who never checked in today cannot be checked out
    #[tokio::test]
    async fn test_checkout_not_checked_in_is_not_found() {
        let t = make_test_app().await;
        let db = t.db();
        let class = seed_education_group(db, "Mondgruppe").await;
        let (account, _) = seed_teacher_of(db, "lehrer@ogs.test", class.id).await;
        let student = seed_student(db, "Lina", Some(class.id)).await;

        let (status, body) = t
            .send(
                "POST",
                &format!("/api/visits/student/{}/checkout", student.id),
                Some(&token_for(&account)),
                None,
            )
            .await;

        assert_eq!(status, 404);
        assert_eq!(body["message"], "Student is not currently checked in");
    }
}
