pub mod account;
pub mod active_group;
pub mod activity;
pub mod attendance;
pub mod combined_group;
pub mod education_group;
pub mod group_mapping;
pub mod group_supervisor;
pub mod group_teacher;
pub mod person;
pub mod room;
pub mod scheduled_checkout;
pub mod staff;
pub mod student;
pub mod teacher;
pub mod visit;
