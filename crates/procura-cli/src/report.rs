//! Plain-text and JSON rendering of reports

use procura_model::{
    DashboardStats, Hierarchy, Office, OfficeId, StockTransactionStats, Tender, TenderId,
    TenderStatus,
};
use procura_resolver::{AssociationLabels, NameResolver, TenderLabels};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Write;

/// One tender with its resolved associations
#[derive(Debug, Clone, Serialize)]
pub struct TenderRow {
    /// Identity
    pub id: TenderId,
    /// Reference number, if any
    pub reference_number: Option<String>,
    /// Title
    pub title: String,
    /// Lifecycle status
    pub status: TenderStatus,
    /// Office column
    pub offices: AssociationLabels,
    /// Wing column
    pub wings: AssociationLabels,
    /// DEC column
    pub decs: AssociationLabels,
}

/// Resolve every tender's associations
#[must_use]
pub fn tender_rows(tenders: &[Tender], resolver: &NameResolver) -> Vec<TenderRow> {
    tenders
        .iter()
        .map(|tender| {
            let TenderLabels {
                offices,
                wings,
                decs,
                ..
            } = TenderLabels::from_tender(tender, resolver);
            TenderRow {
                id: tender.id,
                reference_number: tender.reference_number.clone(),
                title: tender.title.clone(),
                status: tender.status,
                offices,
                wings,
                decs,
            }
        })
        .collect()
}

/// Tender table, one block per tender
#[must_use]
pub fn render_tenders(rows: &[TenderRow]) -> String {
    if rows.is_empty() {
        return "No tenders\n".to_owned();
    }

    let mut out = String::new();
    for row in rows {
        let reference = row.reference_number.as_deref().unwrap_or("-");
        let _ = writeln!(out, "#{} [{}] {} ({})", row.id, reference, row.title, row.status);
        for labels in [&row.offices, &row.wings, &row.decs] {
            let _ = writeln!(out, "  {:<8} {}", format!("{}:", labels.kind.plural()), labels.summary);
        }
    }
    out
}

/// Office tree with wings and DECs, followed by any violations
#[must_use]
pub fn render_hierarchy(hierarchy: &Hierarchy) -> String {
    let mut out = String::new();
    let mut seen = BTreeSet::new();

    let tops = hierarchy.offices().filter(|office| match office.parent_id {
        None => true,
        Some(parent) => hierarchy.office(parent).is_none(),
    });
    for office in tops {
        render_office(hierarchy, office, 0, &mut seen, &mut out);
    }
    // Members of a parent cycle are never reached from a top-level office
    for office in hierarchy.offices() {
        if !seen.contains(&office.id) {
            render_office(hierarchy, office, 0, &mut seen, &mut out);
        }
    }

    let violations = hierarchy.validate();
    if !violations.is_empty() {
        let _ = writeln!(out, "\n{} violation(s):", violations.len());
        for violation in violations {
            let _ = writeln!(out, "  - {violation}");
        }
    }
    out
}

fn render_office(
    hierarchy: &Hierarchy,
    office: &Office,
    depth: usize,
    seen: &mut BTreeSet<OfficeId>,
    out: &mut String,
) {
    if !seen.insert(office.id) {
        return;
    }

    let pad = "  ".repeat(depth);
    let _ = writeln!(out, "{pad}{} (#{})", office.name, office.id);
    for wing in hierarchy.wings_of(office.id) {
        let _ = writeln!(out, "{pad}  wing {} (#{})", wing.name, wing.id);
        for dec in hierarchy.decs_of(wing.id) {
            let _ = writeln!(out, "{pad}    DEC {} (#{})", dec.name, dec.id);
        }
    }
    for child in hierarchy.children_of(office.id) {
        render_office(hierarchy, child, depth + 1, seen, out);
    }
}

/// Dashboard summary text
#[must_use]
pub fn render_stats(stats: &DashboardStats, stock: &StockTransactionStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tenders: {} ({} open)", stats.total_tenders, stats.open_tenders);
    for (status, count) in &stats.tenders_by_status {
        let _ = writeln!(out, "  {status}: {count}");
    }
    let _ = writeln!(out, "Estimated value: {:.2}", stats.estimated_value);
    let _ = writeln!(out, "Offices covered: {}", stats.offices_covered);
    let _ = writeln!(
        out,
        "Stock: in {} / out {} / adjustments {} / balance {}",
        stats.stock_in,
        stats.stock_out,
        stats.adjustments,
        stats.stock_balance()
    );
    let _ = writeln!(out, "Inbound value: {:.2}", stats.inbound_value);
    let _ = writeln!(
        out,
        "Server stock stats: {} transactions, {} items, net {}",
        stock.total_transactions,
        stock.distinct_items,
        stock.net_quantity()
    );
    let _ = writeln!(out, "Delivered quantity: {}", stats.delivered_quantity);
    for (status, count) in &stats.deliveries_by_status {
        let _ = writeln!(out, "  {status:?}: {count}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use procura_model::{Dec, IdList, Wing};

    fn hierarchy() -> Hierarchy {
        Hierarchy::new(
            vec![
                Office::new(1, "HQ"),
                Office::new(2, "North").with_parent(1),
            ],
            vec![Wing::new(10, "Works", 2)],
            vec![Dec::new(100, "Circle 1", 10)],
        )
    }

    #[test]
    fn tender_rows_resolve_and_fall_back() {
        let h = hierarchy();
        let resolver = NameResolver::from_hierarchy(&h);
        let tenders = vec![Tender::new(5, "Cement").with_associations(
            vec![1, 7],
            vec![10],
            IdList::new(),
        )];

        let rows = tender_rows(&tenders, &resolver);

        assert_eq!(rows[0].offices.summary, "HQ, Office-7");
        assert_eq!(rows[0].wings.summary, "Works");
        assert_eq!(rows[0].decs.summary, "No DECs");
        let text = render_tenders(&rows);
        assert!(text.starts_with("#5 [-] Cement (draft)\n"));
        assert!(text.contains("offices: HQ, Office-7"));
    }

    #[test]
    fn empty_tender_list() {
        assert_eq!(render_tenders(&[]), "No tenders\n");
    }

    #[test]
    fn hierarchy_tree_nests_children() {
        let text = render_hierarchy(&hierarchy());
        assert_eq!(
            text,
            "HQ (#1)\n  North (#2)\n    wing Works (#10)\n      DEC Circle 1 (#100)\n"
        );
    }

    #[test]
    fn hierarchy_lists_violations_and_cycles() {
        let h = Hierarchy::new(
            vec![
                Office::new(1, "A").with_parent(2),
                Office::new(2, "B").with_parent(1),
            ],
            vec![Wing::new(10, "Lost", 9)],
            vec![],
        );
        let text = render_hierarchy(&h);
        assert!(text.contains("A (#1)"));
        assert!(text.contains("B (#2)"));
        assert!(text.contains("violation(s):"));
        assert!(text.contains("wing 10 references missing office 9"));
    }

    #[test]
    fn stats_text() {
        let stats = DashboardStats::aggregate(
            &[Tender::new(1, "x").with_status(TenderStatus::Published)],
            &[],
            &[],
        );
        let stock = StockTransactionStats {
            total_transactions: 3,
            total_in: 10,
            total_out: 4,
            distinct_items: 2,
        };
        let text = render_stats(&stats, &stock);
        assert!(text.starts_with("Tenders: 1 (1 open)\n  published: 1\n"));
        assert!(text.contains("net 6"));
    }
}
