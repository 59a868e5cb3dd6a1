pub mod extract;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod orchestrator;
pub mod prompt;
pub mod retry;
pub mod state;
pub mod types;
pub mod visualize;

pub use extract::{extract_json_object, parse_audit_report, parse_json_object};
pub use orchestrator::{AuditSettings, Auditor};
pub use retry::{RetryPolicy, Retryable};
pub use state::{AuditSession, VisualizationStatus, VisualizationTask, WorkflowState};
pub use types::{
    AuditCategory, AuditData, AuditReport, AuditSection, GroundingSource, ImprovementPoint,
    VisualExample, WebSource,
};
pub use visualize::{VisualizationSettings, Visualizer};
