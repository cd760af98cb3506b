use std::fmt;

/// The aggregate counts of a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of orders.
    pub total_orders: usize,

    /// Number of distinct customers having placed an order.
    pub distinct_customers: usize,

    /// Number of distinct barcodes assigned to an order.
    pub barcodes_assigned: usize,

    /// Number of distinct barcodes.
    pub total_barcodes: usize,
}

impl Summary {
    /// Barcodes not assigned to any order.
    pub fn barcodes_unassigned(&self) -> usize {
        self.total_barcodes.saturating_sub(self.barcodes_assigned)
    }
}

/// The two-line report.
///
/// ```
/// use mini_vouchers::model::Summary;
///
/// let summary = Summary {
///     total_orders: 2,
///     distinct_customers: 1,
///     barcodes_assigned: 3,
///     total_barcodes: 3,
/// };
///
/// assert_eq!(
///     summary.to_string(),
///     "The dataset contains 2 orders from 1 customers.\n\
///      There are 3 barcodes available out of a total of 3 barcodes."
/// );
/// ```
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The dataset contains {} orders from {} customers.",
            self.total_orders, self.distinct_customers
        )?;
        write!(
            f,
            "There are {} barcodes available out of a total of {} barcodes.",
            self.barcodes_assigned, self.total_barcodes
        )
    }
}
