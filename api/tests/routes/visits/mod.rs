mod checkin_test;
mod checkout_test;
mod get_test;
