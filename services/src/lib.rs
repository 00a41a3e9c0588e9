//! Checkin/checkout workflow and the session bookkeeping around it.

pub mod attendance_state;
pub mod authorization;
pub mod checkin;
pub mod checkout;
pub mod error;
pub mod scheduled_checkout;
pub mod session;
pub mod staff;
pub mod supervision;

pub use error::{ServiceError, ServiceResult};
