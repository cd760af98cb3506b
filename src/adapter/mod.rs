//! The adapter module holds the tools that deal with the outside world.
//! Here it reads the CSV data sources into records.

mod csv_source;

pub use csv_source::*;
