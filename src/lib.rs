//! MINI VOUCHERS LIBRARY
//!
//! This library reads barcode and order data from CSV files, links orders to
//! their customers and barcodes, and reports on the resulting vouchers.

pub mod actor;
pub mod adapter;
pub mod config;
pub mod error;
pub mod model;
pub mod service;

pub type Result<T> = anyhow::Result<T>;
