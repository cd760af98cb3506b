use serde::Deserialize;

use super::{field, BarcodeValue, FieldError, OrderId};

/// A barcode row as read from the barcode CSV source.
///
/// Empty cells and absent columns both deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CSVBarcodeEntity {
    /// The barcode value.
    #[serde(alias = "value")]
    pub barcode: Option<String>,

    /// The order the barcode is assigned to, if any.
    pub order_id: Option<String>,
}

/// A barcode as exported in a CSV file.
///
/// The barcode is available if the order identifier is undefined. Otherwise,
/// it is assigned to that very order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedBarcode {
    /// The barcode value.
    pub barcode: BarcodeValue,

    /// The optional order identifier.
    pub order_id: Option<OrderId>,
}

impl ExportedBarcode {
    /// Create an available barcode.
    pub fn available(barcode: impl Into<BarcodeValue>) -> Self {
        Self {
            barcode: barcode.into(),
            order_id: None,
        }
    }

    /// Create a barcode assigned to the given order.
    pub fn assigned(barcode: impl Into<BarcodeValue>, order_id: OrderId) -> Self {
        Self {
            barcode: barcode.into(),
            order_id: Some(order_id),
        }
    }
}

impl CSVBarcodeEntity {
    /// Turn the row into a barcode. Rows without any value yield `None`.
    ///
    /// ```
    /// use mini_vouchers::model::{CSVBarcodeEntity, ExportedBarcode, FieldError};
    ///
    /// let row = CSVBarcodeEntity { barcode: Some("abc".into()), order_id: Some("1".into()) };
    /// assert_eq!(row.into_exported().unwrap(), Some(ExportedBarcode::assigned("abc", 1)));
    ///
    /// let row = CSVBarcodeEntity { barcode: Some("g".into()), order_id: None };
    /// assert_eq!(row.into_exported().unwrap(), Some(ExportedBarcode::available("g")));
    ///
    /// // blank rows are skipped
    /// assert_eq!(CSVBarcodeEntity::default().into_exported().unwrap(), None);
    ///
    /// // an order without its barcode is not
    /// let row = CSVBarcodeEntity { barcode: None, order_id: Some("123".into()) };
    /// assert_eq!(row.into_exported().unwrap_err(), FieldError::MissingField("barcode"));
    ///
    /// let row = CSVBarcodeEntity { barcode: Some("abc".into()), order_id: Some("z".into()) };
    /// assert!(matches!(
    ///     row.into_exported(),
    ///     Err(FieldError::InvalidInteger { field: "order_id", .. })
    /// ));
    /// ```
    pub fn into_exported(self) -> Result<Option<ExportedBarcode>, FieldError> {
        if self.barcode.is_none() && self.order_id.is_none() {
            return Ok(None);
        }
        let barcode = field::require("barcode", self.barcode)?;
        let order_id = self
            .order_id
            .map(|value| field::parse_id("order_id", &value))
            .transpose()?;

        Ok(Some(ExportedBarcode { barcode, order_id }))
    }
}
