//! Observable workflow state for the presentation layer.
//!
//! Snapshots are published through [`ArcSwap`] so readers never block and
//! never observe a half-written transition.

use super::orchestrator::Auditor;
use super::types::{AuditData, VisualExample};
use super::visualize::Visualizer;
use crate::error::AuditError;
use arc_swap::ArcSwap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState<T> {
    Idle,
    InFlight,
    Succeeded(T),
    /// Human-readable cause of the last failure.
    Failed(String),
}

impl<T> WorkflowState<T> {
    fn settled(result: &Result<T, AuditError>) -> Self
    where
        T: Clone,
    {
        match result {
            Ok(value) => Self::Succeeded(value.clone()),
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

/// Clears the busy flag even if the audit future is dropped mid-flight.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One user-facing audit session. At most one audit runs at a time; a
/// request arriving while one is in flight is rejected.
pub struct AuditSession {
    auditor: Auditor,
    busy: AtomicBool,
    state: ArcSwap<WorkflowState<AuditData>>,
}

impl AuditSession {
    pub fn new(auditor: Auditor) -> Self {
        Self {
            auditor,
            busy: AtomicBool::new(false),
            state: ArcSwap::from_pointee(WorkflowState::Idle),
        }
    }

    pub fn state(&self) -> Arc<WorkflowState<AuditData>> {
        self.state.load_full()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Run an audit of `url`. Returns `None` without touching state if an
    /// audit is already in flight.
    pub async fn run(&self, url: &str) -> Option<Result<AuditData, AuditError>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!(url, "Audit already in progress, ignoring request");
            return None;
        }
        let _guard = BusyGuard(&self.busy);

        self.state.store(Arc::new(WorkflowState::InFlight));
        let result = self.auditor.perform_ui_audit(url).await;
        self.state.store(Arc::new(WorkflowState::settled(&result)));
        Some(result)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualizationStatus {
    Idle,
    AnalyzingStyle,
    GeneratingImage,
    Ready(VisualExample),
    Failed(String),
}

/// State of one visualization request, scoped to a single improvement point.
pub struct VisualizationTask {
    point: String,
    status: ArcSwap<VisualizationStatus>,
}

impl VisualizationTask {
    pub fn new(point: impl Into<String>) -> Self {
        Self {
            point: point.into(),
            status: ArcSwap::from_pointee(VisualizationStatus::Idle),
        }
    }

    pub fn point(&self) -> &str {
        &self.point
    }

    pub fn status(&self) -> Arc<VisualizationStatus> {
        self.status.load_full()
    }

    /// Coarse view for callers that only care about in-flight vs. settled.
    pub fn workflow_state(&self) -> WorkflowState<VisualExample> {
        match self.status().as_ref() {
            VisualizationStatus::Idle => WorkflowState::Idle,
            VisualizationStatus::AnalyzingStyle | VisualizationStatus::GeneratingImage => {
                WorkflowState::InFlight
            }
            VisualizationStatus::Ready(example) => WorkflowState::Succeeded(example.clone()),
            VisualizationStatus::Failed(cause) => WorkflowState::Failed(cause.clone()),
        }
    }

    pub async fn run(
        &self,
        visualizer: &Visualizer,
        url: &str,
    ) -> Result<VisualExample, AuditError> {
        let result = self.stages(visualizer, url).await;
        self.status.store(Arc::new(match &result {
            Ok(example) => VisualizationStatus::Ready(example.clone()),
            Err(err) => VisualizationStatus::Failed(err.to_string()),
        }));
        result
    }

    async fn stages(&self, visualizer: &Visualizer, url: &str) -> Result<VisualExample, AuditError> {
        self.status.store(Arc::new(VisualizationStatus::AnalyzingStyle));
        let style = visualizer.website_style_description(url).await?;

        self.status.store(Arc::new(VisualizationStatus::GeneratingImage));
        visualizer.generate_visual_example(&self.point, &style).await
    }
}
