use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202510010001_create_accounts::Migration),
            Box::new(migrations::m202510010002_create_persons::Migration),
            Box::new(migrations::m202510010003_create_staff::Migration),
            Box::new(migrations::m202510010004_create_rooms::Migration),
            Box::new(migrations::m202510010005_create_education_groups::Migration),
            Box::new(migrations::m202510010006_create_students::Migration),
            Box::new(migrations::m202510010007_create_activities::Migration),
            Box::new(migrations::m202510020001_create_active_groups::Migration),
            Box::new(migrations::m202510020002_create_group_supervisors::Migration),
            Box::new(migrations::m202510020003_create_visits::Migration),
            Box::new(migrations::m202510020004_create_attendance::Migration),
            Box::new(migrations::m202510020005_create_scheduled_checkouts::Migration),
            Box::new(migrations::m202510030001_create_combined_groups::Migration),
        ]
    }
}
