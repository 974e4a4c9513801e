//! Testing utilities for the Procura workspace
//!
//! Shared fixtures: a small office/wing/DEC hierarchy, tenders that point
//! into it (including one stale reference), and an executor serving them.

#![allow(missing_docs)]

use procura_model::{Dec, Office, Session, Role, Tender, TenderStatus, Wing};
use procura_store::{InMemoryExecutor, QueryParams, StoreError};
use serde_json::{json, Value};

pub fn sample_offices() -> Vec<Office> {
    vec![
        Office::new(1, "Head Office"),
        Office::new(2, "Regional North").with_parent(1),
        Office::new(3, "Regional South").with_parent(1),
        Office::new(4, "Closed Depot").with_parent(1).inactive(),
    ]
}

pub fn sample_wings() -> Vec<Wing> {
    vec![
        Wing::new(10, "Works", 2),
        Wing::new(11, "Stores", 2),
        Wing::new(12, "Accounts", 3),
    ]
}

pub fn sample_decs() -> Vec<Dec> {
    vec![
        Dec::new(100, "Circle North-1", 10),
        Dec::new(101, "Circle North-2", 10),
        Dec::new(102, "Circle South-1", 12),
    ]
}

pub fn sample_tenders() -> Vec<Tender> {
    vec![
        Tender::new(1, "Cement supply")
            .with_status(TenderStatus::Published)
            .with_associations(vec![2], vec![10, 11], vec![100]),
        // Office 9 and DEC 999 do not exist
        Tender::new(2, "Steel rebar")
            .with_status(TenderStatus::Awarded)
            .with_associations(vec![2, 3, 9, 1], vec![12], vec![999]),
    ]
}

pub fn admin_session() -> Session {
    Session::new("admin-1", Role::Admin)
}

pub fn staff_session() -> Session {
    Session::new("staff-7", Role::Staff).with_office(2).with_wing(10)
}

fn rows<T: serde::Serialize>(items: &[T]) -> Vec<Value> {
    items
        .iter()
        .map(|item| serde_json::to_value(item).unwrap())
        .collect()
}

/// Executor serving the sample hierarchy and tenders
///
/// Tender 2's `office_ids` is stored JSON-encoded, the way legacy rows are.
pub fn seeded_executor() -> InMemoryExecutor {
    let mut tenders = rows(&sample_tenders());
    tenders[1]["office_ids"] = json!("[2,3,9,1]");

    InMemoryExecutor::new()
        .with_table("offices", rows(&sample_offices()))
        .with_table("wings", rows(&sample_wings()))
        .with_table("decs", rows(&sample_decs()))
        .with_table("tenders", tenders)
        .with_table(
            "stock-transactions",
            vec![
                json!({"id": 1, "tender_id": 1, "item_code": "CEM-50", "kind": "in", "quantity": 40, "unit_price": 7.5}),
                json!({"id": 2, "tender_id": 1, "item_code": "CEM-50", "kind": "out", "quantity": 15}),
            ],
        )
        .with_table(
            "deliveries",
            vec![json!({
                "id": 1, "tender_id": 1, "delivery_number": "DN-001", "status": "completed",
                "items": [{"item_code": "CEM-50", "quantity": 40}]
            })],
        )
        .with_document(
            "stock-transaction-dashboard-stats",
            json!({"totalTransactions": 2, "totalIn": 40, "totalOut": 15, "distinctItems": 1}),
        )
        .with_rpc("get_tender_deliveries", |params: &QueryParams| {
            match params.get("p_tender_id").and_then(Value::as_i64) {
                Some(1) => Ok(json!([{
                    "id": 1, "tender_id": 1, "delivery_number": "DN-001", "status": "completed",
                    "items": [{"item_code": "CEM-50", "quantity": 40}]
                }])),
                Some(_) => Ok(json!([])),
                None => Err(StoreError::Backend("p_tender_id is required".into())),
            }
        })
        .with_rpc("save_delivery_with_items", |_params: &QueryParams| {
            Ok(json!({"id": 42}))
        })
}
