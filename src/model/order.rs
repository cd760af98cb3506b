use std::collections::BTreeSet;

use serde::Deserialize;

use super::{field, BarcodeValue, CustomerId, FieldError, OrderId};

/// An order row as read from the order CSV source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CSVOrderEntity {
    /// The order identifier.
    #[serde(alias = "id")]
    pub order_id: Option<String>,

    /// The customer identifier.
    #[serde(alias = "customer")]
    pub customer_id: Option<String>,

    /// Barcodes assigned by the order, separated by `;` or whitespace.
    #[serde(alias = "barcode")]
    pub barcodes: Option<String>,
}

/// An order as exported in a CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedOrder {
    /// The order identifier.
    pub order_id: OrderId,

    /// The customer identifier.
    pub customer_id: CustomerId,

    /// The barcodes listed by the order row itself, possibly none.
    pub barcodes: Vec<BarcodeValue>,
}

impl ExportedOrder {
    /// Create an order that does not list barcodes itself.
    pub fn new(order_id: OrderId, customer_id: CustomerId) -> Self {
        Self {
            order_id,
            customer_id,
            barcodes: Vec::new(),
        }
    }

    /// Add barcodes listed by the order.
    pub fn with_barcodes<I, S>(mut self, barcodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<BarcodeValue>,
    {
        self.barcodes.extend(barcodes.into_iter().map(Into::into));
        self
    }
}

impl CSVOrderEntity {
    /// Turn the row into an order. Rows without any value yield `None`.
    ///
    /// `barcodes_required` is set when the source has a barcodes column: the
    /// order must then list at least one barcode.
    ///
    /// ```
    /// use mini_vouchers::model::{CSVOrderEntity, ExportedOrder, FieldError};
    ///
    /// let row = CSVOrderEntity {
    ///     order_id: Some("24".into()),
    ///     customer_id: Some("42".into()),
    ///     barcodes: Some("B; C  D".into()),
    /// };
    /// assert_eq!(
    ///     row.into_exported(true).unwrap(),
    ///     Some(ExportedOrder::new(24, 42).with_barcodes(["B", "C", "D"]))
    /// );
    ///
    /// assert_eq!(CSVOrderEntity::default().into_exported(true).unwrap(), None);
    ///
    /// let row = CSVOrderEntity { order_id: Some("1".into()), ..Default::default() };
    /// assert_eq!(row.into_exported(false).unwrap_err(), FieldError::MissingField("customer_id"));
    ///
    /// let row = CSVOrderEntity {
    ///     order_id: Some("2".into()),
    ///     customer_id: Some("20".into()),
    ///     barcodes: None,
    /// };
    /// assert_eq!(row.into_exported(true).unwrap_err(), FieldError::MissingField("barcodes"));
    ///
    /// let row = CSVOrderEntity {
    ///     order_id: Some("0".into()),
    ///     customer_id: Some("b".into()),
    ///     barcodes: None,
    /// };
    /// assert!(matches!(
    ///     row.into_exported(false),
    ///     Err(FieldError::InvalidInteger { field: "customer_id", .. })
    /// ));
    /// ```
    pub fn into_exported(
        self,
        barcodes_required: bool,
    ) -> Result<Option<ExportedOrder>, FieldError> {
        if self.order_id.is_none() && self.customer_id.is_none() && self.barcodes.is_none() {
            return Ok(None);
        }
        let order_id = field::parse_id("order_id", &field::require("order_id", self.order_id)?)?;
        let customer_id =
            field::parse_id("customer_id", &field::require("customer_id", self.customer_id)?)?;
        let barcodes = self
            .barcodes
            .as_deref()
            .map(split_barcodes)
            .unwrap_or_default();
        if barcodes_required && barcodes.is_empty() {
            return Err(FieldError::MissingField("barcodes"));
        }

        Ok(Some(ExportedOrder {
            order_id,
            customer_id,
            barcodes,
        }))
    }
}

fn split_barcodes(cell: &str) -> Vec<BarcodeValue> {
    cell.split(|c: char| c == ';' || c.is_whitespace())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// An order known to the system with the barcodes attributed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// The order identifier.
    pub order_id: OrderId,

    /// The customer identifier.
    pub customer_id: CustomerId,

    /// The attributed barcodes.
    pub barcodes: BTreeSet<BarcodeValue>,
}

impl Order {
    /// Create an order without barcodes.
    pub fn new(order_id: OrderId, customer_id: CustomerId) -> Self {
        Self {
            order_id,
            customer_id,
            barcodes: BTreeSet::new(),
        }
    }
}
