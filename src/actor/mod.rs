//! # Actor module
//!
//! The actors are controllers. They use services and adapters to perform
//! their tasks and run one after the other: the loader builds the system, the
//! reporter writes about it.

mod loader;
mod reporter;

pub use loader::*;
pub use reporter::*;
