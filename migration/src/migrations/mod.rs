pub mod m202510010001_create_accounts;
pub mod m202510010002_create_persons;
pub mod m202510010003_create_staff;
pub mod m202510010004_create_rooms;
pub mod m202510010005_create_education_groups;
pub mod m202510010006_create_students;
pub mod m202510010007_create_activities;
pub mod m202510020001_create_active_groups;
pub mod m202510020002_create_group_supervisors;
pub mod m202510020003_create_visits;
pub mod m202510020004_create_attendance;
pub mod m202510020005_create_scheduled_checkouts;
pub mod m202510030001_create_combined_groups;
