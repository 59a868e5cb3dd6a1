//! Shared report fixtures for unit tests.

use super::types::{AuditCategory, AuditReport, AuditSection, ImprovementPoint};
use strum::IntoEnumIterator;

/// A valid five-section report. The first three sections carry a
/// visualizable improvement point.
pub(crate) fn sample_report() -> AuditReport {
    AuditReport {
        overall_score: 42,
        summary: "Solid structure, slow hero image.".into(),
        sections: AuditCategory::iter()
            .zip(0u32..)
            .map(|(category, i)| AuditSection {
                title: category.title().to_string(),
                explanation: format!("About {category}."),
                score: i + 5,
                positive_points: vec![format!("Good {i}")],
                areas_for_improvement: vec![ImprovementPoint {
                    point: format!("Fix {i}"),
                    is_visualizable: i < 3,
                }],
            })
            .collect(),
    }
}

/// `sample_report` with a custom summary, serialized as the model would
/// return it: fenced and with a chatty preamble.
pub(crate) fn model_reply(summary: &str) -> String {
    let mut report = sample_report();
    report.summary = summary.to_string();
    let json = serde_json::to_string_pretty(&report).unwrap_or_default();
    format!("Here is the audit:\n```json\n{json}\n```")
}
