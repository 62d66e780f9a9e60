//! End-to-end tests for the workflow orchestrator

use fundscout_core::{
    CancelToken, ContextItem, FundscoutConfig, Opportunity, ProjectMetadata, ReportReference,
    ResearchDatasets, WorkflowTimings,
};
use fundscout_workflow::workflow::render;
use fundscout_workflow::{
    DetailTab, ResearchWorkbench, RunOutcome, WorkflowError, WorkflowUpdate,
};
use std::sync::Arc;

fn test_project() -> ProjectMetadata {
    ProjectMetadata {
        title: "Opportunity Analysis: AI Deforestation Detection".to_string(),
        description: "Deforestation detection in rural areas using AI.".to_string(),
        summary: "Research into AI-based monitoring of deforestation.".to_string(),
        keywords: vec!["AI".to_string(), "Environment".to_string()],
        created_at: chrono::Utc::now(),
    }
}

fn test_datasets() -> ResearchDatasets {
    ResearchDatasets {
        context_items: vec![
            ContextItem {
                title: "Climate Change AI Innovation Grants".to_string(),
                url: "#".to_string(),
                description: "2025 innovation grants program.".to_string(),
            },
            ContextItem {
                title: "Sustainability Open Calls".to_string(),
                url: "#".to_string(),
                description: "Open call for applied AI projects.".to_string(),
            },
            ContextItem {
                title: "TechFunding - Deforestation Solutions".to_string(),
                url: "#".to_string(),
                description: "Proposals for AI deforestation monitoring.".to_string(),
            },
        ],
        opportunities: vec![
            Opportunity {
                origin: "Climate Change AI Grants".to_string(),
                description: "Up to $150,000 for AI climate projects.".to_string(),
                financing_type: "Grant".to_string(),
                application_deadline: "2025-12-15".to_string(),
            },
            Opportunity {
                origin: "National Call 821".to_string(),
                description: "R&D support for environmental sustainability.".to_string(),
                financing_type: "National Funding".to_string(),
                application_deadline: "2025-11-30".to_string(),
            },
        ],
        report: ReportReference {
            url: "#".to_string(),
            file_name: "Deforestation_AI_Report_2025.pdf".to_string(),
        },
    }
}

fn instant_config() -> FundscoutConfig {
    FundscoutConfig {
        workflow: WorkflowTimings {
            queries_ms: 0,
            search_ms: 0,
            identification_ms: 0,
            report_ms: 0,
            settle_delay_ms: 0,
        },
        ..FundscoutConfig::default()
    }
}

fn instant_workbench() -> ResearchWorkbench {
    ResearchWorkbench::builder(test_project(), test_datasets())
        .with_config(instant_config())
        .build()
        .unwrap()
}

#[tokio::test]
async fn full_run_archives_one_record_with_correct_facets() {
    let workbench = instant_workbench();
    let (_handle, token) = CancelToken::new();

    let outcome = workbench.run_workflow(&token).await.unwrap();
    let record_id = match outcome {
        RunOutcome::Finished { record_id } => record_id,
        RunOutcome::Cancelled => panic!("run should not be cancelled"),
    };

    // Exactly one history record for the completed run
    let history = workbench.research_history().await;
    assert_eq!(history.len(), 1);
    let record = &history[0];
    assert_eq!(record.id, record_id);
    assert_eq!(record.opportunities_count, 2);
    assert_eq!(record.title, test_project().title);

    // The new record is auto-selected
    assert_eq!(workbench.selected_research().await.map(|r| r.id), Some(record_id));

    // Default detail view is the context render of the 3 items
    let panel = workbench.detail_panel().await.expect("panel populated");
    assert_eq!(panel.active_tab, DetailTab::Context);
    assert_eq!(
        panel.context,
        render::render_context_items(&test_datasets().context_items)
    );
}

#[tokio::test]
async fn tab_registration_matches_tab_worthy_steps() {
    let workbench = instant_workbench();
    let (_handle, token) = CancelToken::new();

    assert!(workbench.result_tabs().await.is_empty());
    workbench.run_workflow(&token).await.unwrap();

    // 4 steps, first excluded: 3 tabs in completion order
    let tabs = workbench.result_tabs().await;
    let step_ids: Vec<&str> = tabs.iter().map(|t| t.step_id.as_str()).collect();
    assert_eq!(step_ids, vec!["search", "identification", "report"]);

    // Last-registered tab stole focus
    assert_eq!(workbench.visible_result_tab().await.as_deref(), Some("report"));

    // The user can pick an earlier tab afterwards
    workbench.show_result_tab("search").await;
    assert_eq!(workbench.visible_result_tab().await.as_deref(), Some("search"));

    // Unknown step ids change nothing
    workbench.show_result_tab("nope").await;
    assert_eq!(workbench.visible_result_tab().await.as_deref(), Some("search"));
}

#[tokio::test]
async fn update_stream_reports_steps_in_declared_order() {
    let workbench = instant_workbench();
    let mut updates = workbench.subscribe_updates();
    let (_handle, token) = CancelToken::new();

    workbench.run_workflow(&token).await.unwrap();

    let mut started = Vec::new();
    let mut completed = Vec::new();
    let mut finished = false;
    while let Ok(update) = updates.try_recv() {
        match update {
            WorkflowUpdate::StepStarted { step_id, .. } => {
                // A step starts only after the previous one completed:
                // never more than one active at any instant
                assert_eq!(started.len(), completed.len());
                started.push(step_id);
            }
            WorkflowUpdate::StepCompleted { step_id } => {
                assert_eq!(started.last(), Some(&step_id));
                completed.push(step_id);
            }
            WorkflowUpdate::Finished { .. } => finished = true,
            _ => {}
        }
    }

    let expected = vec!["queries", "search", "identification", "report"];
    assert_eq!(started, expected);
    assert_eq!(completed, expected);
    assert!(finished);
}

#[tokio::test]
async fn workflow_runs_exactly_once() {
    let workbench = instant_workbench();
    let (_handle, token) = CancelToken::new();

    workbench.run_workflow(&token).await.unwrap();
    let second = workbench.run_workflow(&token).await;
    assert!(matches!(second, Err(WorkflowError::Workflow { .. })));

    // The first run's record is still the only one
    assert_eq!(workbench.research_history().await.len(), 1);
}

#[tokio::test]
async fn cancellation_leaves_no_history_record() {
    let mut config = instant_config();
    config.workflow.search_ms = 60_000;
    let workbench = Arc::new(
        ResearchWorkbench::builder(test_project(), test_datasets())
            .with_config(config)
            .build()
            .unwrap(),
    );
    let (handle, token) = CancelToken::new();

    let runner = {
        let workbench = workbench.clone();
        tokio::spawn(async move { workbench.run_workflow(&token).await })
    };

    handle.cancel();
    let outcome = runner.await.unwrap().unwrap();
    assert_eq!(outcome, RunOutcome::Cancelled);
    assert!(workbench.research_history().await.is_empty());
    assert!(workbench.selected_research().await.is_none());
}

#[tokio::test]
async fn malformed_step_lists_are_rejected_at_construction() {
    let empty = ResearchWorkbench::builder(test_project(), test_datasets())
        .with_steps(vec![])
        .build();
    assert!(empty.is_err());

    let mut steps = fundscout_workflow::WorkflowStep::standard_pipeline(
        &test_datasets(),
        &WorkflowTimings::default(),
    );
    steps[1].id = steps[0].id.clone();
    let duplicated = ResearchWorkbench::builder(test_project(), test_datasets())
        .with_steps(steps)
        .build();
    assert!(duplicated.is_err());
}
