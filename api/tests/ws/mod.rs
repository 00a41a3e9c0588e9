mod events_test;
mod upgrade_test;
