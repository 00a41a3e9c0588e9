mod delete_test;
mod post_test;
