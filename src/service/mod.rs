//! Service module
//!
//! Services hold the business logic of the application. They are used by the
//! actors to perform operations on the data and must ensure that the data is
//! consistent.

mod voucher_system;

pub use voucher_system::*;
