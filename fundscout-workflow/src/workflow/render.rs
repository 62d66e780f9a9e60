//! Render functions mapping step result data to display fragments
//!
//! All functions here are pure and total over their input type: no state,
//! no side effects, identical fragments for identical payloads. Escaping is
//! the responsibility of the consuming display surface.

use fundscout_core::{ContextItem, Opportunity, ReportReference};

use super::types::{Fragment, FragmentKind};

/// Render a fixed status narrative for steps without an artifact
pub fn render_status(text: &str) -> Fragment {
    Fragment {
        kind: FragmentKind::Status,
        body: text.to_string(),
    }
}

/// Render context items as a count line plus an ordered entry list
pub fn render_context_items(items: &[ContextItem]) -> Fragment {
    let mut body = format!("{} context items found:\n", items.len());
    for item in items {
        body.push_str(&format!(
            "- [{}]({})\n  {}\n",
            item.title, item.url, item.description
        ));
    }
    Fragment {
        kind: FragmentKind::ContextItems,
        body,
    }
}

/// Render opportunities as an ordered list of cards
pub fn render_opportunities(opportunities: &[Opportunity]) -> Fragment {
    let mut body = String::new();
    for opportunity in opportunities {
        body.push_str(&format!(
            "### {}\n{}\n{} | Deadline: {}\n",
            opportunity.origin,
            opportunity.description,
            opportunity.financing_type,
            opportunity.application_deadline
        ));
    }
    Fragment {
        kind: FragmentKind::Opportunities,
        body,
    }
}

/// Render a single link referencing the report artifact
pub fn render_report_link(report: &ReportReference) -> Fragment {
    Fragment {
        kind: FragmentKind::Report,
        body: format!(
            "The executive report has been generated and is ready for review.\n[View {}]({})",
            report.file_name, report.url
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_items_render_in_input_order() {
        let items = vec![
            ContextItem {
                title: "First".to_string(),
                url: "https://example.org/a".to_string(),
                description: "First hit".to_string(),
            },
            ContextItem {
                title: "Second".to_string(),
                url: "https://example.org/b".to_string(),
                description: "Second hit".to_string(),
            },
        ];

        let fragment = render_context_items(&items);
        assert_eq!(fragment.kind, FragmentKind::ContextItems);
        assert!(fragment.body.starts_with("2 context items found:"));
        let first = fragment.body.find("First").unwrap();
        let second = fragment.body.find("Second").unwrap();
        assert!(first < second, "entries must keep input order");
    }

    #[test]
    fn empty_opportunity_list_renders_empty_body() {
        let fragment = render_opportunities(&[]);
        assert_eq!(fragment.kind, FragmentKind::Opportunities);
        assert!(fragment.body.is_empty());
    }

    #[test]
    fn report_link_names_the_artifact() {
        let report = ReportReference {
            url: "#".to_string(),
            file_name: "Report_2025.pdf".to_string(),
        };
        let fragment = render_report_link(&report);
        assert!(fragment.body.contains("Report_2025.pdf"));
    }
}
