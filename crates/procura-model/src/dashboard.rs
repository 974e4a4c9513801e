//! Dashboard summaries over tenders, stock movements and deliveries

use crate::tender::{Delivery, DeliveryStatus, StockTransaction, Tender, TenderStatus, TransactionKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Server-computed stock summary (`stock-transaction-dashboard-stats`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTransactionStats {
    /// Number of transactions
    pub total_transactions: u64,
    /// Quantity received
    pub total_in: i64,
    /// Quantity issued
    pub total_out: i64,
    /// Distinct item codes moved
    #[serde(default)]
    pub distinct_items: u64,
}

impl StockTransactionStats {
    /// Received minus issued
    #[inline]
    #[must_use]
    pub fn net_quantity(&self) -> i64 {
        self.total_in.saturating_sub(self.total_out)
    }
}

/// Locally aggregated dashboard summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Number of tenders
    pub total_tenders: usize,
    /// Tenders still in flight
    pub open_tenders: usize,
    /// Tender count per status
    pub tenders_by_status: BTreeMap<TenderStatus, usize>,
    /// Sum of estimated tender values
    pub estimated_value: f64,
    /// Distinct offices referenced by any tender
    pub offices_covered: usize,
    /// Quantity received
    pub stock_in: i64,
    /// Quantity issued
    pub stock_out: i64,
    /// Net adjustments
    pub adjustments: i64,
    /// Value of received stock at transaction prices
    pub inbound_value: f64,
    /// Delivery count per status
    pub deliveries_by_status: BTreeMap<DeliveryStatus, usize>,
    /// Quantity on completed or partial deliveries
    pub delivered_quantity: i64,
}

impl DashboardStats {
    /// Aggregate the three record sets
    #[must_use]
    pub fn aggregate(
        tenders: &[Tender],
        transactions: &[StockTransaction],
        deliveries: &[Delivery],
    ) -> Self {
        let mut stats = Self {
            total_tenders: tenders.len(),
            ..Self::default()
        };

        let mut offices = BTreeSet::new();
        for tender in tenders {
            *stats.tenders_by_status.entry(tender.status).or_default() += 1;
            if tender.status.is_open() {
                stats.open_tenders += 1;
            }
            stats.estimated_value += tender.estimated_value.unwrap_or(0.0);
            offices.extend(tender.office_ids.numeric());
        }
        stats.offices_covered = offices.len();

        for tx in transactions {
            match tx.kind {
                TransactionKind::In => {
                    stats.stock_in = stats.stock_in.saturating_add(tx.quantity);
                    #[allow(clippy::cast_precision_loss)]
                    let value = tx.quantity as f64 * tx.unit_price.unwrap_or(0.0);
                    stats.inbound_value += value;
                }
                TransactionKind::Out => {
                    stats.stock_out = stats.stock_out.saturating_add(tx.quantity);
                }
                TransactionKind::Adjustment => {
                    stats.adjustments = stats.adjustments.saturating_add(tx.quantity);
                }
            }
        }

        for delivery in deliveries {
            *stats.deliveries_by_status.entry(delivery.status).or_default() += 1;
            if matches!(
                delivery.status,
                DeliveryStatus::Completed | DeliveryStatus::Partial
            ) {
                stats.delivered_quantity = stats
                    .delivered_quantity
                    .saturating_add(delivery.total_quantity());
            }
        }

        stats
    }

    /// Quantity on hand implied by the movements
    #[inline]
    #[must_use]
    pub fn stock_balance(&self) -> i64 {
        self.stock_in
            .saturating_sub(self.stock_out)
            .saturating_add(self.adjustments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdList;
    use pretty_assertions::assert_eq;

    fn tx(kind: TransactionKind, quantity: i64, price: Option<f64>) -> StockTransaction {
        StockTransaction {
            id: 0,
            tender_id: None,
            item_code: "CEM-50".into(),
            kind,
            quantity,
            unit_price: price,
            transaction_date: None,
        }
    }

    #[test]
    fn empty_inputs() {
        let stats = DashboardStats::aggregate(&[], &[], &[]);
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn aggregates_all_three_sets() {
        let mut priced = Tender::new(1, "Cement").with_status(TenderStatus::Published);
        priced.estimated_value = Some(1000.0);
        let tenders = vec![
            priced.with_associations(vec![1, 2], IdList::new(), IdList::new()),
            Tender::new(2, "Steel")
                .with_status(TenderStatus::Closed)
                .with_associations(vec![2, 3], IdList::new(), IdList::new()),
        ];
        let transactions = vec![
            tx(TransactionKind::In, 10, Some(2.5)),
            tx(TransactionKind::Out, 4, None),
            tx(TransactionKind::Adjustment, -1, None),
        ];
        let mut done = Delivery::new(1, "DN-1").with_item("CEM-50", 6);
        done.status = DeliveryStatus::Completed;
        let deliveries = vec![done, Delivery::new(2, "DN-2").with_item("STL-12", 3)];

        let stats = DashboardStats::aggregate(&tenders, &transactions, &deliveries);

        assert_eq!(stats.total_tenders, 2);
        assert_eq!(stats.open_tenders, 1);
        assert_eq!(stats.tenders_by_status[&TenderStatus::Closed], 1);
        assert_eq!(stats.offices_covered, 3);
        assert_eq!(stats.estimated_value, 1000.0);
        assert_eq!(stats.stock_balance(), 5);
        assert_eq!(stats.inbound_value, 25.0);
        assert_eq!(stats.deliveries_by_status[&DeliveryStatus::Pending], 1);
        assert_eq!(stats.delivered_quantity, 6);
    }

    #[test]
    fn huge_quantities_saturate() {
        let transactions = vec![
            tx(TransactionKind::In, i64::MAX, None),
            tx(TransactionKind::In, i64::MAX, None),
            tx(TransactionKind::Out, i64::MIN, None),
            tx(TransactionKind::Adjustment, i64::MIN, None),
            tx(TransactionKind::Adjustment, -1, None),
        ];
        let mut done = Delivery::new(1, "DN-1")
            .with_item("CEM-50", i64::MAX)
            .with_item("CEM-50", 1);
        done.status = DeliveryStatus::Completed;

        let stats = DashboardStats::aggregate(&[], &transactions, &[done.clone(), done]);

        assert_eq!(stats.stock_in, i64::MAX);
        assert_eq!(stats.stock_out, i64::MIN);
        assert_eq!(stats.adjustments, i64::MIN);
        assert_eq!(stats.delivered_quantity, i64::MAX);
        assert_eq!(stats.stock_balance(), -1);

        let server = StockTransactionStats {
            total_in: i64::MIN,
            total_out: 1,
            ..StockTransactionStats::default()
        };
        assert_eq!(server.net_quantity(), i64::MIN);
    }

    #[test]
    fn server_stats_net() {
        let stats: StockTransactionStats = serde_json::from_value(serde_json::json!({
            "totalTransactions": 3, "totalIn": 12, "totalOut": 5
        }))
        .unwrap();
        assert_eq!(stats.net_quantity(), 7);
        assert_eq!(stats.distinct_items, 0);
    }
}
