mod barcode;
mod field;
mod order;
mod summary;

pub use barcode::*;
pub use field::*;
pub use order::*;
pub use summary::*;

pub type OrderId = u64;
pub type CustomerId = u64;
pub type BarcodeValue = String;
