//! Throwaway databases and fixture builders for tests across the workspace.

use crate::models::{
    account, active_group, activity, education_group, group_teacher, person, room, staff,
    student, teacher,
};
use chrono::Utc;
use migration::Migrator;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

pub const TEST_PASSWORD: &str = "password123";

pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn seed_room(db: &DatabaseConnection, name: &str) -> room::Model {
    room::Model::create(db, name, None, Some(20))
        .await
        .expect("seed room")
}

pub async fn seed_activity(db: &DatabaseConnection, name: &str) -> activity::Model {
    activity::Model::create(db, name, None, None)
        .await
        .expect("seed activity")
}

/// A fresh room with a live session in it.
pub async fn seed_live_group(db: &DatabaseConnection, room_name: &str) -> active_group::Model {
    let room = seed_room(db, room_name).await;
    let activity = seed_activity(db, &format!("{room_name} Betreuung")).await;
    active_group::Model::start(db, activity.id, room.id, 30, Utc::now())
        .await
        .expect("seed active group")
}

pub async fn seed_education_group(db: &DatabaseConnection, name: &str) -> education_group::Model {
    education_group::Model::create(db, name, None)
        .await
        .expect("seed education group")
}

/// Account, person and staff row. Returns the account (for tokens) and staff.
pub async fn seed_staff_with_account(
    db: &DatabaseConnection,
    email: &str,
    admin: bool,
) -> (account::Model, staff::Model) {
    let account = account::Model::create(db, email, TEST_PASSWORD, admin)
        .await
        .expect("seed account");
    let person = person::Model::create(db, "Test", "Staff", Some(account.id))
        .await
        .expect("seed person");
    let staff = staff::Model::create(db, person.id)
        .await
        .expect("seed staff");
    (account, staff)
}

pub async fn seed_staff(db: &DatabaseConnection, email: &str) -> staff::Model {
    seed_staff_with_account(db, email, false).await.1
}

/// Staff who teaches the given education group.
pub async fn seed_teacher_of(
    db: &DatabaseConnection,
    email: &str,
    group_id: i64,
) -> (account::Model, staff::Model) {
    let (account, staff) = seed_staff_with_account(db, email, false).await;
    let teacher = teacher::Model::create(db, staff.id, None)
        .await
        .expect("seed teacher");
    group_teacher::Model::assign(db, group_id, teacher.id)
        .await
        .expect("seed group teacher");
    (account, staff)
}

pub async fn seed_student(
    db: &DatabaseConnection,
    first_name: &str,
    group_id: Option<i64>,
) -> student::Model {
    let person = person::Model::create(db, first_name, "Kind", None)
        .await
        .expect("seed person");
    student::Model::create(db, person.id, "2a", group_id)
        .await
        .expect("seed student")
}
