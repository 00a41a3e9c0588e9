mod active_groups;
mod attendance;
mod auth;
mod combined_groups;
mod health_test;
mod scheduled_checkouts;
mod visits;
