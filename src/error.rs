//! Errors that abort a run.

use std::{fmt, path::PathBuf};

use thiserror::Error;

use crate::model::OrderId;

/// The side of an order/barcode link that could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReference {
    Barcode,
    Order,
}

impl fmt::Display for MissingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Barcode => write!(f, "barcode"),
            Self::Order => write!(f, "order"),
        }
    }
}

/// Every error kind is fatal to the run: no partial report is produced.
#[derive(Debug, Error)]
pub enum VoucherError {
    /// A CSV row is structurally wrong or a value cannot be coerced.
    #[error("MalformedRow: {source_name} line {line}: {reason}")]
    MalformedRow {
        /// The name of the source, usually its path.
        source_name: String,

        /// The 1-based line of the row in the source.
        line: u64,

        /// What is wrong with the row.
        reason: String,
    },

    /// An order and a barcode are linked but one of them does not exist.
    #[error("DanglingReference: order {order_id} and barcode '{barcode}' are linked but the {missing} is unknown.")]
    DanglingReference {
        order_id: OrderId,
        barcode: String,
        missing: MissingReference,
    },

    /// The input path is missing, unreadable or not a regular file.
    #[error("SourceNotFound: '{}': {source}", .path.display())]
    SourceNotFound {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl VoucherError {
    /// The name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedRow { .. } => "MalformedRow",
            Self::DanglingReference { .. } => "DanglingReference",
            Self::SourceNotFound { .. } => "SourceNotFound",
        }
    }
}
