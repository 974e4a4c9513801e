//! Tenders, stock transactions and deliveries

use crate::ids::{DeliveryId, IdList, TenderId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tender lifecycle status
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TenderStatus {
    /// Being authored
    #[default]
    Draft,
    /// Open for bids
    Published,
    /// Bids under evaluation
    Evaluation,
    /// Contract awarded
    Awarded,
    /// Finished
    Closed,
    /// Withdrawn
    Cancelled,
    /// Status this build does not recognize
    #[serde(other)]
    Unknown,
}

impl TenderStatus {
    /// Whether the tender is still in flight
    #[inline]
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Published | Self::Evaluation | Self::Awarded)
    }

    /// Wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Evaluation => "evaluation",
            Self::Awarded => "awarded",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Procurement record associated with any number of offices, wings and DECs
///
/// The three association lists are independent and unordered sets in
/// meaning; they are kept in arrival order for stable display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tender {
    /// Identity
    pub id: TenderId,
    /// Human reference number
    #[serde(default)]
    pub reference_number: Option<String>,
    /// Title
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Lifecycle status
    #[serde(default)]
    pub status: TenderStatus,
    /// Estimated contract value
    #[serde(default)]
    pub estimated_value: Option<f64>,
    /// Publication date
    #[serde(default)]
    pub publish_date: Option<NaiveDate>,
    /// Bid closing date
    #[serde(default)]
    pub closing_date: Option<NaiveDate>,
    /// Associated offices
    #[serde(default)]
    pub office_ids: IdList,
    /// Associated wings
    #[serde(default)]
    pub wing_ids: IdList,
    /// Associated DECs
    #[serde(default)]
    pub dec_ids: IdList,
}

impl Tender {
    /// Create draft tender with no associations
    #[must_use]
    pub fn new(id: impl Into<TenderId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reference_number: None,
            title: title.into(),
            description: None,
            status: TenderStatus::Draft,
            estimated_value: None,
            publish_date: None,
            closing_date: None,
            office_ids: IdList::new(),
            wing_ids: IdList::new(),
            dec_ids: IdList::new(),
        }
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: TenderStatus) -> Self {
        self.status = status;
        self
    }

    /// With associations
    #[inline]
    #[must_use]
    pub fn with_associations(
        mut self,
        office_ids: impl Into<IdList>,
        wing_ids: impl Into<IdList>,
        dec_ids: impl Into<IdList>,
    ) -> Self {
        self.office_ids = office_ids.into();
        self.wing_ids = wing_ids.into();
        self.dec_ids = dec_ids.into();
        self
    }
}

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Goods received
    In,
    /// Goods issued
    Out,
    /// Signed correction
    Adjustment,
}

/// One stock movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransaction {
    /// Identity
    pub id: i64,
    /// Tender the goods were procured under
    #[serde(default)]
    pub tender_id: Option<TenderId>,
    /// Item code
    pub item_code: String,
    /// Direction
    pub kind: TransactionKind,
    /// Quantity (signed only for adjustments)
    pub quantity: i64,
    /// Unit price at transaction time
    #[serde(default)]
    pub unit_price: Option<f64>,
    /// Transaction date
    #[serde(default)]
    pub transaction_date: Option<NaiveDate>,
}

/// Delivery progress
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// Not yet received
    #[default]
    Pending,
    /// Some items received
    Partial,
    /// Fully received
    Completed,
    /// Cancelled
    Cancelled,
}

/// Line item of a delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryItem {
    /// Item code
    pub item_code: String,
    /// Delivered quantity
    pub quantity: i64,
}

/// Delivery against a tender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    /// Identity; absent until saved
    #[serde(default)]
    pub id: Option<DeliveryId>,
    /// Tender delivered against
    pub tender_id: TenderId,
    /// Delivery note number
    pub delivery_number: String,
    /// Progress
    #[serde(default)]
    pub status: DeliveryStatus,
    /// Delivery date
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    /// Line items
    #[serde(default)]
    pub items: Vec<DeliveryItem>,
}

impl Delivery {
    /// Create pending, unsaved delivery
    #[must_use]
    pub fn new(tender_id: impl Into<TenderId>, delivery_number: impl Into<String>) -> Self {
        Self {
            id: None,
            tender_id: tender_id.into(),
            delivery_number: delivery_number.into(),
            status: DeliveryStatus::Pending,
            delivery_date: None,
            items: Vec::new(),
        }
    }

    /// Add a line item
    #[must_use]
    pub fn with_item(mut self, item_code: impl Into<String>, quantity: i64) -> Self {
        self.items.push(DeliveryItem {
            item_code: item_code.into(),
            quantity,
        });
        self
    }

    /// Total quantity across line items
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |total, i| total.saturating_add(i.quantity))
    }
}
