use std::collections::{btree_map::Entry, BTreeMap, BTreeSet, HashMap};

use log::{debug, warn};

use crate::error::{MissingReference, VoucherError};
use crate::model::{
    BarcodeValue, CustomerId, ExportedBarcode, ExportedOrder, Order, OrderId, Summary,
};
use crate::Result;

/// The [VoucherSystem] holds the pool of barcodes and the orders placed by
/// customers with the barcodes they were attributed.
///
/// Each order has a unique identifier and barcodes are unique themselves. A
/// barcode is attributed to at most one order and every order holds at least
/// one barcode.
#[derive(Debug, Default)]
pub struct VoucherSystem {
    /// All known barcodes mapped to the order they are attributed to.
    barcodes: BTreeMap<BarcodeValue, Option<OrderId>>,

    /// The orders addressed by their identifier.
    orders: BTreeMap<OrderId, Order>,
}

impl VoucherSystem {
    /// Populate a system with data previously exported.
    ///
    /// The data is first cleaned and then validated:
    ///  - duplicate orders are discarded based on the order identifier,
    ///  - duplicate barcodes are discarded based on the barcode value, even if
    ///    they hold a different attribution,
    ///  - a barcode already attributed keeps its first order,
    ///  - orders left without barcodes are dropped.
    ///
    /// Links to an unknown barcode or order are errors.
    ///
    /// ```
    /// use mini_vouchers::model::{ExportedBarcode, ExportedOrder};
    /// use mini_vouchers::service::VoucherSystem;
    ///
    /// let barcodes = vec![ExportedBarcode::assigned("a", 10), ExportedBarcode::available("z")];
    /// let orders = vec![ExportedOrder::new(10, 7)];
    /// let system = VoucherSystem::populate(barcodes, orders).unwrap();
    ///
    /// assert_eq!(system.available_barcodes(), vec!["z"]);
    /// let orders: Vec<_> = system.orders().collect();
    /// assert_eq!(orders.len(), 1);
    /// assert_eq!(orders[0].customer_id, 7);
    /// assert!(orders[0].barcodes.contains("a"));
    /// ```
    pub fn populate(
        exported_barcodes: impl IntoIterator<Item = ExportedBarcode>,
        exported_orders: impl IntoIterator<Item = ExportedOrder>,
    ) -> Result<Self> {
        let mut orders: BTreeMap<OrderId, Order> = BTreeMap::new();
        // Barcodes listed by the order rows, attributed once all barcodes are known.
        let mut listed: Vec<(OrderId, BarcodeValue)> = Vec::new();

        for exported_order in exported_orders {
            match orders.entry(exported_order.order_id) {
                Entry::Vacant(entry) => {
                    debug!("Adding new order {:?}", exported_order);
                    entry.insert(Order::new(
                        exported_order.order_id,
                        exported_order.customer_id,
                    ));
                    listed.extend(
                        exported_order
                            .barcodes
                            .into_iter()
                            .map(|barcode| (exported_order.order_id, barcode)),
                    );
                }
                Entry::Occupied(_) if exported_order.barcodes.is_empty() => {
                    warn!("Discarding duplicate order {:?}", exported_order)
                }
                Entry::Occupied(_) => warn!(
                    "Discarding duplicate order {:?}, its barcodes {:?} are not checked",
                    exported_order, exported_order.barcodes
                ),
            }
        }

        let mut barcodes: BTreeMap<BarcodeValue, Option<OrderId>> = BTreeMap::new();

        for exported_barcode in exported_barcodes {
            if barcodes.contains_key(&exported_barcode.barcode) {
                warn!("Discarding duplicate barcode {:?}", exported_barcode);
                continue;
            }
            if let Some(order_id) = exported_barcode.order_id {
                match orders.get_mut(&order_id) {
                    Some(order) => {
                        order.barcodes.insert(exported_barcode.barcode.clone());
                    }
                    None => {
                        return Err(dangling(
                            order_id,
                            exported_barcode.barcode,
                            MissingReference::Order,
                        ))
                    }
                }
            }
            debug!("Adding new barcode {:?}", exported_barcode);
            barcodes.insert(exported_barcode.barcode, exported_barcode.order_id);
        }

        for (order_id, barcode) in listed {
            let Some(attribution) = barcodes.get_mut(&barcode) else {
                return Err(dangling(order_id, barcode, MissingReference::Barcode));
            };
            match *attribution {
                None => {
                    *attribution = Some(order_id);
                    if let Some(order) = orders.get_mut(&order_id) {
                        order.barcodes.insert(barcode);
                    }
                }
                Some(owner) if owner == order_id => {}
                Some(owner) => warn!(
                    "Discarding barcode '{}' from order {}, already attributed to order {}",
                    barcode, order_id, owner
                ),
            }
        }

        orders.retain(|_, order| {
            if order.barcodes.is_empty() {
                warn!("Discarding order without barcodes {:?}", order);
            }
            !order.barcodes.is_empty()
        });

        Ok(Self { barcodes, orders })
    }

    /// The barcodes not attributed to any order, sorted by value.
    pub fn available_barcodes(&self) -> Vec<&str> {
        self.barcodes
            .iter()
            .filter(|(_, order_id)| order_id.is_none())
            .map(|(barcode, _)| barcode.as_str())
            .collect()
    }

    /// The orders sorted by identifier.
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// The orders sorted by customer identifier then order identifier.
    pub fn orders_by_customer(&self) -> Vec<&Order> {
        let mut orders: Vec<&Order> = self.orders.values().collect();
        orders.sort_by_key(|order| (order.customer_id, order.order_id));

        orders
    }

    /// The customers having ordered the most barcodes with their amount of
    /// barcodes, ranked from high to low. Ties are ranked by customer
    /// identifier.
    pub fn top_customers(&self, limit: usize) -> Vec<(CustomerId, usize)> {
        let mut totals: HashMap<CustomerId, usize> = HashMap::new();
        for order in self.orders.values() {
            *totals.entry(order.customer_id).or_default() += order.barcodes.len();
        }
        let mut ranking: Vec<(CustomerId, usize)> = totals.into_iter().collect();
        ranking.sort_by(|(customer_a, total_a), (customer_b, total_b)| {
            total_b.cmp(total_a).then(customer_a.cmp(customer_b))
        });
        ranking.truncate(limit);

        ranking
    }

    /// Compute the summary counts of the system.
    pub fn summary(&self) -> Summary {
        let customers: BTreeSet<CustomerId> =
            self.orders.values().map(|order| order.customer_id).collect();

        Summary {
            total_orders: self.orders.len(),
            distinct_customers: customers.len(),
            barcodes_assigned: self
                .barcodes
                .values()
                .filter(|order_id| order_id.is_some())
                .count(),
            total_barcodes: self.barcodes.len(),
        }
    }
}

fn dangling(order_id: OrderId, barcode: BarcodeValue, missing: MissingReference) -> anyhow::Error {
    VoucherError::DanglingReference {
        order_id,
        barcode,
        missing,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_barcodes() -> Vec<ExportedBarcode> {
        ["A", "B", "C"]
            .into_iter()
            .map(ExportedBarcode::available)
            .collect()
    }

    fn assert_dangling(error: anyhow::Error, expected: MissingReference) {
        match error.downcast_ref::<VoucherError>() {
            Some(VoucherError::DanglingReference { missing, .. }) => assert_eq!(*missing, expected),
            other => panic!("expected a DanglingReference error, got {:?}", other),
        }
    }

    #[test]
    fn orders_listing_their_barcodes() {
        let orders = vec![
            ExportedOrder::new(1, 10).with_barcodes(["A"]),
            ExportedOrder::new(2, 10).with_barcodes(["B", "C"]),
        ];
        let summary = VoucherSystem::populate(abc_barcodes(), orders)
            .unwrap()
            .summary();

        assert_eq!(
            summary,
            Summary {
                total_orders: 2,
                distinct_customers: 1,
                barcodes_assigned: 3,
                total_barcodes: 3,
            }
        );
        let report = summary.to_string();
        assert!(report.contains("2 orders from 1 customers"));
        assert!(report.contains("3 barcodes available out of a total of 3 barcodes"));
    }

    #[test]
    fn barcodes_attributed_to_orders() {
        let barcodes = vec![
            ExportedBarcode::assigned("A", 1),
            ExportedBarcode::assigned("B", 2),
            ExportedBarcode::available("C"),
        ];
        let orders = vec![ExportedOrder::new(1, 10), ExportedOrder::new(2, 20)];
        let system = VoucherSystem::populate(barcodes, orders).unwrap();

        assert_eq!(system.available_barcodes(), vec!["C"]);
        assert_eq!(
            system.summary(),
            Summary {
                total_orders: 2,
                distinct_customers: 2,
                barcodes_assigned: 2,
                total_barcodes: 3,
            }
        );
        assert_eq!(system.summary().barcodes_unassigned(), 1);
    }

    #[test]
    fn order_listing_an_unknown_barcode() {
        let orders = vec![ExportedOrder::new(1, 10).with_barcodes(["A", "Z"])];
        let error = VoucherSystem::populate(abc_barcodes(), orders).unwrap_err();

        assert_dangling(error, MissingReference::Barcode);
    }

    #[test]
    fn barcode_attributed_to_an_unknown_order() {
        let barcodes = vec![ExportedBarcode::assigned("A", 99)];
        let error = VoucherSystem::populate(barcodes, vec![]).unwrap_err();

        assert_dangling(error, MissingReference::Order);
    }

    #[test]
    fn empty_dataset() {
        let system = VoucherSystem::populate(vec![], vec![]).unwrap();

        assert_eq!(system.summary(), Summary::default());
        assert_eq!(
            system.summary().to_string(),
            "The dataset contains 0 orders from 0 customers.\n\
             There are 0 barcodes available out of a total of 0 barcodes."
        );
    }

    #[test]
    fn duplicate_orders_are_discarded() {
        let barcodes = vec![ExportedBarcode::assigned("a", 10)];
        let orders = vec![ExportedOrder::new(10, 7), ExportedOrder::new(10, 5)];
        let system = VoucherSystem::populate(barcodes, orders).unwrap();
        let orders: Vec<&Order> = system.orders().collect();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].customer_id, 7);
    }

    #[test]
    fn duplicate_barcodes_are_discarded() {
        let barcodes = vec![
            ExportedBarcode::available("a"),
            ExportedBarcode::assigned("a", 1),
        ];
        let orders = vec![ExportedOrder::new(1, 1).with_barcodes(["a"])];
        let system = VoucherSystem::populate(barcodes, orders).unwrap();

        // the first record wins, the order then gets it through its own listing
        assert!(system.available_barcodes().is_empty());
        assert_eq!(system.summary().total_barcodes, 1);
        assert_eq!(system.summary().barcodes_assigned, 1);
    }

    #[test]
    fn duplicate_order_barcodes_are_not_linked() {
        let orders = vec![
            ExportedOrder::new(1, 10).with_barcodes(["A"]),
            ExportedOrder::new(1, 10).with_barcodes(["Z"]),
        ];
        let system = VoucherSystem::populate(abc_barcodes(), orders).unwrap();
        let orders: Vec<&Order> = system.orders().collect();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].barcodes.iter().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(system.summary().total_barcodes, 3);
    }

    #[test]
    fn orders_without_barcodes_are_dropped() {
        let system = VoucherSystem::populate(vec![], vec![ExportedOrder::new(10, 7)]).unwrap();

        assert_eq!(system.orders().count(), 0);
        assert_eq!(system.summary().distinct_customers, 0);
    }

    #[test]
    fn barcode_keeps_its_first_order() {
        let barcodes = vec![ExportedBarcode::assigned("A", 1), ExportedBarcode::available("B")];
        let orders = vec![
            ExportedOrder::new(1, 10).with_barcodes(["A"]),
            ExportedOrder::new(2, 20).with_barcodes(["A", "B"]),
        ];
        let system = VoucherSystem::populate(barcodes, orders).unwrap();
        let orders: Vec<&Order> = system.orders().collect();

        assert_eq!(orders[0].barcodes.iter().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(orders[1].barcodes.iter().collect::<Vec<_>>(), vec!["B"]);
        assert_eq!(system.summary().barcodes_assigned, 2);
    }

    #[test]
    fn orders_by_customer() {
        let barcodes = vec![
            ExportedBarcode::assigned("a", 3),
            ExportedBarcode::assigned("b", 1),
            ExportedBarcode::assigned("c", 2),
        ];
        let orders = vec![
            ExportedOrder::new(1, 20),
            ExportedOrder::new(2, 10),
            ExportedOrder::new(3, 10),
        ];
        let system = VoucherSystem::populate(barcodes, orders).unwrap();
        let keys: Vec<(CustomerId, OrderId)> = system
            .orders_by_customer()
            .into_iter()
            .map(|order| (order.customer_id, order.order_id))
            .collect();

        assert_eq!(keys, vec![(10, 2), (10, 3), (20, 1)]);
    }

    #[test]
    fn top_customers() {
        let mut barcodes = Vec::new();
        let mut orders = Vec::new();
        for (base, customer_id, amount) in [(100, 33, 4), (200, 44, 19), (300, 55, 9)] {
            for i in 1..=amount {
                let barcode = format!("{}-{}", customer_id, i);
                barcodes.push(ExportedBarcode::assigned(barcode, base + i));
                orders.push(ExportedOrder::new(base + i, customer_id));
            }
        }
        let system = VoucherSystem::populate(barcodes, orders).unwrap();

        assert_eq!(system.top_customers(2), vec![(44, 19), (55, 9)]);
        assert_eq!(system.top_customers(10).len(), 3);
        assert!(system.top_customers(0).is_empty());
    }

    #[test]
    fn top_customers_ties_are_ranked_by_identifier() {
        let barcodes = vec![
            ExportedBarcode::assigned("a", 1),
            ExportedBarcode::assigned("b", 2),
        ];
        let orders = vec![ExportedOrder::new(1, 9), ExportedOrder::new(2, 3)];
        let system = VoucherSystem::populate(barcodes, orders).unwrap();

        assert_eq!(system.top_customers(5), vec![(3, 1), (9, 1)]);
    }

    #[test]
    fn summary_counts_are_ordered() {
        let datasets: Vec<(Vec<ExportedBarcode>, Vec<ExportedOrder>)> = vec![
            (vec![], vec![]),
            (abc_barcodes(), vec![]),
            (
                abc_barcodes(),
                vec![ExportedOrder::new(1, 1).with_barcodes(["A", "B", "C"])],
            ),
            (
                vec![
                    ExportedBarcode::assigned("x", 1),
                    ExportedBarcode::assigned("y", 2),
                    ExportedBarcode::assigned("z", 3),
                    ExportedBarcode::available("w"),
                ],
                vec![
                    ExportedOrder::new(1, 1),
                    ExportedOrder::new(2, 2),
                    ExportedOrder::new(3, 1),
                    ExportedOrder::new(4, 4),
                ],
            ),
        ];

        for (barcodes, orders) in datasets {
            let summary = VoucherSystem::populate(barcodes, orders).unwrap().summary();

            assert!(summary.total_barcodes >= summary.barcodes_assigned);
            assert!(summary.total_orders >= summary.distinct_customers);
        }
    }
}
