//! Tender, delivery and dashboard reads and writes
//!
//! Writes are never retried: a failed save is surfaced once to the caller.

use crate::error::StoreResult;
use crate::executor::{decode_one, decode_rows, encode_param, QueryExecutor, QueryParams};
use procura_model::{
    DashboardStats, Delivery, DeliveryId, Session, StockTransaction, StockTransactionStats,
    Tender, TenderId,
};
use serde::Deserialize;
use std::sync::Arc;

const TENDERS: &str = "tenders";
const STOCK_TRANSACTIONS: &str = "stock-transactions";
const DELIVERIES: &str = "deliveries";
const STOCK_STATS: &str = "stock-transaction-dashboard-stats";
const GET_TENDER_DELIVERIES: &str = "get_tender_deliveries";
const SAVE_DELIVERY_WITH_ITEMS: &str = "save_delivery_with_items";

/// Tender reads
#[derive(Clone)]
pub struct TenderRepository {
    executor: Arc<dyn QueryExecutor>,
}

impl TenderRepository {
    /// Create repository over an executor
    #[must_use]
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Tenders visible to the session
    ///
    /// # Errors
    /// Backend or contract errors from the executor.
    pub async fn list(&self, session: &Session) -> StoreResult<Vec<Tender>> {
        let payload = self
            .executor
            .query(TENDERS, &QueryParams::scoped(session))
            .await?;
        decode_rows(TENDERS, payload)
    }

    /// One tender by identity
    ///
    /// # Errors
    /// Backend or contract errors from the executor.
    pub async fn get(&self, session: &Session, id: TenderId) -> StoreResult<Option<Tender>> {
        let params = QueryParams::scoped(session).with("id", id.get());
        let payload = self.executor.query(TENDERS, &params).await?;
        let tenders: Vec<Tender> = decode_rows(TENDERS, payload)?;
        Ok(tenders.into_iter().find(|t| t.id == id))
    }
}

/// Saved-delivery acknowledgement
#[derive(Debug, Deserialize)]
struct SavedDelivery {
    id: DeliveryId,
}

/// Delivery reads and writes
#[derive(Clone)]
pub struct DeliveryRepository {
    executor: Arc<dyn QueryExecutor>,
}

impl DeliveryRepository {
    /// Create repository over an executor
    #[must_use]
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Deliveries recorded against a tender
    ///
    /// # Errors
    /// Backend or contract errors from the executor.
    pub async fn tender_deliveries(&self, tender: TenderId) -> StoreResult<Vec<Delivery>> {
        let params = QueryParams::new().with("p_tender_id", tender.get());
        let payload = self.executor.rpc(GET_TENDER_DELIVERIES, &params).await?;
        decode_rows(GET_TENDER_DELIVERIES, payload)
    }

    /// Save a delivery and its line items in one call
    ///
    /// Not retried; the first failure is returned.
    ///
    /// # Errors
    /// Backend or contract errors from the executor, or `StoreError::Encode`
    /// when the line items cannot be serialized.
    pub async fn save_with_items(
        &self,
        session: &Session,
        delivery: &Delivery,
    ) -> StoreResult<DeliveryId> {
        let header = serde_json::json!({
            "id": delivery.id,
            "tender_id": delivery.tender_id,
            "delivery_number": delivery.delivery_number,
            "status": delivery.status,
            "delivery_date": delivery.delivery_date,
        });
        let items = encode_param(SAVE_DELIVERY_WITH_ITEMS, "p_items", &delivery.items)?;
        let params = QueryParams::new()
            .with("p_delivery", header)
            .with("p_items", items)
            .with("p_user_id", session.user_id.clone());

        match self.executor.rpc(SAVE_DELIVERY_WITH_ITEMS, &params).await {
            Ok(payload) => {
                let saved: SavedDelivery = decode_one(SAVE_DELIVERY_WITH_ITEMS, payload)?;
                tracing::info!(
                    "saved delivery {} ({} items) for tender {}",
                    saved.id,
                    delivery.items.len(),
                    delivery.tender_id
                );
                Ok(saved.id)
            }
            Err(e) => {
                tracing::error!("saving delivery {} failed: {}", delivery.delivery_number, e);
                Err(e)
            }
        }
    }
}

/// Dashboard summaries
#[derive(Clone)]
pub struct DashboardRepository {
    executor: Arc<dyn QueryExecutor>,
}

impl DashboardRepository {
    /// Create repository over an executor
    #[must_use]
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Server-computed stock movement summary
    ///
    /// # Errors
    /// Backend or contract errors from the executor.
    pub async fn stock_transaction_stats(
        &self,
        session: &Session,
    ) -> StoreResult<StockTransactionStats> {
        let payload = self
            .executor
            .query(STOCK_STATS, &QueryParams::scoped(session))
            .await?;
        decode_one(STOCK_STATS, payload)
    }

    /// Summary aggregated locally from tenders, stock movements and deliveries
    ///
    /// # Errors
    /// The first error from any of the three reads.
    pub async fn summary(&self, session: &Session) -> StoreResult<DashboardStats> {
        let params = QueryParams::scoped(session);
        let (tenders, transactions, deliveries) = futures::try_join!(
            self.executor.query(TENDERS, &params),
            self.executor.query(STOCK_TRANSACTIONS, &params),
            self.executor.query(DELIVERIES, &params),
        )?;

        let tenders: Vec<Tender> = decode_rows(TENDERS, tenders)?;
        let transactions: Vec<StockTransaction> = decode_rows(STOCK_TRANSACTIONS, transactions)?;
        let deliveries: Vec<Delivery> = decode_rows(DELIVERIES, deliveries)?;

        tracing::debug!(
            tenders = tenders.len(),
            transactions = transactions.len(),
            deliveries = deliveries.len(),
            "aggregating dashboard"
        );
        Ok(DashboardStats::aggregate(&tenders, &transactions, &deliveries))
    }
}
