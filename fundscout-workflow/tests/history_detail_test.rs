//! Tests for the history store, selection, and detail tab controller

use fundscout_core::{ContextItem, Opportunity, ReportReference};
use fundscout_workflow::workflow::render;
use fundscout_workflow::{
    DetailTab, DetailTabController, FinishedResearch, HistoryStore,
};
use std::sync::Arc;

fn record(id: i64, title: &str) -> FinishedResearch {
    let items = vec![ContextItem {
        title: format!("{} context", title),
        url: "#".to_string(),
        description: "A context item".to_string(),
    }];
    let opportunities = vec![Opportunity {
        origin: format!("{} origin", title),
        description: "An opportunity".to_string(),
        financing_type: "Grant".to_string(),
        application_deadline: "2025-12-31".to_string(),
    }];
    let report = ReportReference {
        url: "#".to_string(),
        file_name: format!("{}.pdf", title),
    };

    FinishedResearch {
        id,
        title: title.to_string(),
        summary: format!("Summary of {}", title),
        date: chrono::Utc::now(),
        opportunities_count: opportunities.len(),
        context_fragment: render::render_context_items(&items),
        opportunities_fragment: render::render_opportunities(&opportunities),
        report_fragment: render::render_report_link(&report),
    }
}

#[tokio::test]
async fn insert_prepends_most_recent_first() {
    let store = HistoryStore::new();
    let r1 = store.insert(record(1, "first")).await;
    let r2 = store.insert(record(2, "second")).await;

    let records = store.records().await;
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![r2.id, r1.id]);
}

#[tokio::test]
async fn colliding_time_derived_ids_are_made_unique() {
    let store = HistoryStore::new();
    let r1 = store.insert(record(7, "first")).await;
    let r2 = store.insert(record(7, "second")).await;

    assert_ne!(r1.id, r2.id);
    assert!(store.find(r1.id).await.is_some());
    assert!(store.find(r2.id).await.is_some());
}

#[tokio::test]
async fn selecting_unknown_record_is_a_no_op() {
    let store = HistoryStore::new();
    let r1 = store.insert(record(1, "only")).await;
    store.select(r1.id).await;

    store.select(999).await;
    assert_eq!(store.selected().await, Some(r1.id));
}

#[tokio::test]
async fn selection_is_single_and_never_dangling() {
    let store = HistoryStore::new();
    assert!(store.selected_record().await.is_none());

    let r1 = store.insert(record(1, "first")).await;
    let r2 = store.insert(record(2, "second")).await;

    store.select(r1.id).await;
    assert_eq!(store.selected().await, Some(r1.id));
    store.select(r2.id).await;
    assert_eq!(store.selected().await, Some(r2.id));
    assert_eq!(store.selected_record().await.map(|r| r.id), Some(r2.id));
}

#[tokio::test]
async fn detail_show_of_unknown_record_changes_nothing() {
    let store = Arc::new(HistoryStore::new());
    let detail = DetailTabController::new(store.clone());
    let r1 = store.insert(record(1, "known")).await;

    detail.show(r1.id, DetailTab::Opportunities).await;
    let before = detail.panel().await;

    detail.show(424242, DetailTab::Context).await;
    assert_eq!(detail.panel().await, before, "no partial render on lookup miss");
}

#[tokio::test]
async fn selection_change_resets_detail_tab_to_context() {
    let store = Arc::new(HistoryStore::new());
    let detail = DetailTabController::new(store.clone());
    let a = store.insert(record(1, "a")).await;
    let b = store.insert(record(2, "b")).await;

    detail.select(a.id).await;
    assert_eq!(detail.active_tab().await, Some(DetailTab::Context));

    // User flips to the report facet of A
    detail.show(a.id, DetailTab::Report).await;
    assert_eq!(detail.active_tab().await, Some(DetailTab::Report));

    // Selecting B, then A again, lands on context each time
    detail.select(b.id).await;
    let panel = detail.panel().await.unwrap();
    assert_eq!(panel.record_id, b.id);
    assert_eq!(panel.active_tab, DetailTab::Context);

    detail.show(b.id, DetailTab::Opportunities).await;
    detail.select(a.id).await;
    let panel = detail.panel().await.unwrap();
    assert_eq!(panel.record_id, a.id);
    assert_eq!(panel.active_tab, DetailTab::Context);
}

#[tokio::test]
async fn detail_facets_come_from_the_selected_record() {
    let store = Arc::new(HistoryStore::new());
    let detail = DetailTabController::new(store.clone());
    let a = store.insert(record(1, "alpha")).await;

    detail.select(a.id).await;
    let panel = detail.panel().await.unwrap();
    assert_eq!(panel.context, a.context_fragment);
    assert_eq!(panel.opportunities, a.opportunities_fragment);
    assert_eq!(panel.report, a.report_fragment);
}

#[test]
fn render_functions_are_pure() {
    let items = vec![ContextItem {
        title: "Stable".to_string(),
        url: "https://example.org".to_string(),
        description: "Same input, same fragment".to_string(),
    }];
    assert_eq!(
        render::render_context_items(&items),
        render::render_context_items(&items)
    );

    let opportunities = vec![Opportunity {
        origin: "Origin".to_string(),
        description: "Description".to_string(),
        financing_type: "Grant".to_string(),
        application_deadline: "2025-01-01".to_string(),
    }];
    assert_eq!(
        render::render_opportunities(&opportunities),
        render::render_opportunities(&opportunities)
    );

    let report = ReportReference {
        url: "#".to_string(),
        file_name: "r.pdf".to_string(),
    };
    assert_eq!(
        render::render_report_link(&report),
        render::render_report_link(&report)
    );
}
