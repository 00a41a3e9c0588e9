#[cfg(test)]
mod tests {
    use crate::helpers::{app::token_for, make_test_app};
    use chrono::Utc;
    use db::models::attendance;
    use db::test_utils::{seed_staff_with_account, seed_student};

    #[tokio::test]
    async fn test_status_follows_the_day() {
        let t = make_test_app().await;
        let db = t.db();
        let (account, staff) = seed_staff_with_account(db, "sup@ogs.test", false).await;
        let student = seed_student(db, "Mia", None).await;
        let token = token_for(&account);
        let uri = format!("/api/attendance/student/{}/status", student.id);

        let (status, resp) = t.send("GET", &uri, Some(&token), None).await;
        assert_eq!(status, 200);
        assert_eq!(resp["data"]["status"], "not_checked_in");
        assert!(resp["data"]["attendance_id"].is_null());

        let record = attendance::Model::check_in_or_reopen(db, student.id, staff.id, None, Utc::now())
            .await
            .unwrap();
        let (_, resp) = t.send("GET", &uri, Some(&token), None).await;
        assert_eq!(resp["data"]["status"], "checked_in");
        assert_eq!(resp["data"]["attendance_id"], record.id);

        attendance::Model::check_out(db, record.id, staff.id, Utc::now()).await.unwrap();
        let (_, resp) = t.send("GET", &uri, Some(&token), None).await;
        assert_eq!(resp["data"]["status"], "checked_out");
        assert_eq!(resp["data"]["checked_out_by"], staff.id);
    }

    #[tokio::test]
    async fn test_status_of_unknown_student_is_not_found() {
        let t = make_test_app().await;
        let (account, _) = seed_staff_with_account(t.db(), "sup@ogs.test", false).await;

        let (status, _) = t
            .send("GET", "/api/attendance/student/777/status", Some(&token_for(&account)), None)
            .await;
        assert_eq!(status, 404);
    }
}
