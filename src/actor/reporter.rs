//! # Reporter Actor
//!
//! The reporter writes the result of an [Action] on the populated system.

use std::io::Write;

use log::debug;

use crate::{config::Action, service::VoucherSystem, Result};

/// The reporter actor.
pub struct Reporter<W: Write> {
    /// The populated voucher system.
    system: VoucherSystem,

    /// Where the report is written to.
    writer: W,
}

impl<W: Write> Reporter<W> {
    /// Create a new reporter actor.
    pub fn new(system: VoucherSystem, writer: W) -> Self {
        Self { system, writer }
    }

    /// Run the reporter actor and give the writer back.
    pub fn run(mut self, action: Action, limit: usize) -> Result<W> {
        debug!("Reporter Actor started ({:?})", action);

        match action {
            Action::Print => self.print()?,
            Action::Summary => self.summary()?,
            Action::Top => self.top(limit)?,
        }
        self.writer.flush()?;

        debug!("Reporter Actor stopped");

        Ok(self.writer)
    }

    /// Print one voucher per line, sorted by customer and order:
    /// `customer_id, order_id, barcode[, barcode...]`.
    fn print(&mut self) -> Result<()> {
        for order in self.system.orders_by_customer() {
            let barcodes: Vec<&str> = order.barcodes.iter().map(String::as_str).collect();
            writeln!(
                self.writer,
                "{}, {}, {}",
                order.customer_id,
                order.order_id,
                barcodes.join(", ")
            )?;
        }

        Ok(())
    }

    fn summary(&mut self) -> Result<()> {
        writeln!(self.writer, "{}", self.system.summary())?;

        Ok(())
    }

    /// `customer_id, barcode_count` for the best customers.
    fn top(&mut self, limit: usize) -> Result<()> {
        for (customer_id, total) in self.system.top_customers(limit) {
            writeln!(self.writer, "{}, {}", customer_id, total)?;
        }

        Ok(())
    }
}
