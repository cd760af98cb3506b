//! Loader actor
//!
//! The loader actor reads the barcode and order sources and links them into
//! a [VoucherSystem].

use log::{debug, info};

use crate::{adapter::CsvSource, config::Config, service::VoucherSystem, Result};

/// Loader actor.
pub struct Loader {
    barcodes: CsvSource,
    orders: CsvSource,
}

impl Loader {
    /// Create a new loader actor from already opened sources.
    pub fn new(barcodes: CsvSource, orders: CsvSource) -> Self {
        Self { barcodes, orders }
    }

    /// Open the sources named by the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            CsvSource::open(&config.barcodes)?,
            CsvSource::open(&config.orders)?,
        ))
    }

    /// Run the loader actor.
    /// Both sources are fully parsed before being linked. The first error
    /// aborts the run.
    pub fn run(self) -> Result<VoucherSystem> {
        debug!("Loader Actor started");

        let exported_barcodes = self.barcodes.read_barcodes()?;
        let exported_orders = self.orders.read_orders()?;
        info!(
            "Read {} barcodes and {} orders.",
            exported_barcodes.len(),
            exported_orders.len()
        );
        let system = VoucherSystem::populate(exported_barcodes, exported_orders)?;

        debug!("Loader Actor stopped");

        Ok(system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::VoucherError;

    fn loader(barcodes: &'static str, orders: &'static str) -> Loader {
        Loader::new(
            CsvSource::new("barcodes.csv", Box::new(barcodes.as_bytes())),
            CsvSource::new("orders.csv", Box::new(orders.as_bytes())),
        )
    }

    #[test]
    fn test_run() {
        let system = loader(
            "barcode,order_id\nA,1\nB,2\nC,2\nD,\n",
            "order_id,customer_id\n1,10\n2,10\n",
        )
        .run()
        .unwrap();
        let summary = system.summary();

        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.distinct_customers, 1);
        assert_eq!(summary.barcodes_assigned, 3);
        assert_eq!(summary.total_barcodes, 4);
    }

    #[test]
    fn malformed_orders_abort_the_run() {
        let error = loader("barcode\nA\n", "order_id,customer_id\n1,x\n")
            .run()
            .unwrap_err();

        match error.downcast_ref::<VoucherError>() {
            Some(VoucherError::MalformedRow {
                source_name, line, ..
            }) => {
                assert_eq!(source_name, "orders.csv");
                assert_eq!(*line, 2);
            }
            other => panic!("expected a MalformedRow error, got {:?}", other),
        }
    }

    #[test]
    fn dangling_reference_aborts_the_run() {
        let error = loader("barcode\nA\n", "order_id,customer_id,barcodes\n1,1,B\n")
            .run()
            .unwrap_err();

        assert_eq!(
            error.downcast_ref::<VoucherError>().map(VoucherError::kind),
            Some("DanglingReference")
        );
    }

    #[test]
    fn missing_source() {
        let config = Config {
            barcodes: "/this/file/does/not/exist.csv".into(),
            ..Config::default()
        };
        let error = Loader::from_config(&config).err().unwrap();

        assert_eq!(
            error.downcast_ref::<VoucherError>().map(VoucherError::kind),
            Some("SourceNotFound")
        );
    }
}
