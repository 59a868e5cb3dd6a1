use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

pub use crate::llm::types::{GroundingSource, WebSource};

/// The five report sections, in the order the audit prompt lists them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
    strum::EnumCount,
)]
pub enum AuditCategory {
    #[strum(serialize = "Heuristic Evaluation & Usability")]
    Usability,
    #[strum(serialize = "Visual Design & Aesthetics")]
    VisualDesign,
    #[strum(serialize = "Accessibility (WCAG Compliance)")]
    Accessibility,
    #[strum(serialize = "Content Clarity & Information Architecture")]
    ContentClarity,
    #[strum(serialize = "Performance & Load Speed")]
    Performance,
}

impl AuditCategory {
    /// Exact section title the model is asked to emit.
    pub fn title(self) -> &'static str {
        self.into()
    }

    /// Title match tolerant of surrounding whitespace and ASCII case.
    pub fn matches_title(self, title: &str) -> bool {
        title.trim().eq_ignore_ascii_case(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementPoint {
    pub point: String,
    /// Model's hint that a wireframe would illustrate the fix well.
    #[serde(default)]
    pub is_visualizable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSection {
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    /// 0..=10
    pub score: u32,
    #[serde(default)]
    pub positive_points: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<ImprovementPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// 0..=100
    pub overall_score: u32,
    pub summary: String,
    pub sections: Vec<AuditSection>,
}

impl AuditReport {
    pub const MAX_OVERALL_SCORE: u32 = 100;
    pub const MAX_SECTION_SCORE: u32 = 10;

    /// Every improvement point flagged as visualizable, with its section title.
    pub fn visualizable_points(&self) -> impl Iterator<Item = (&str, &ImprovementPoint)> {
        self.sections.iter().flat_map(|section| {
            section
                .areas_for_improvement
                .iter()
                .filter(|item| item.is_visualizable)
                .map(move |item| (section.title.as_str(), item))
        })
    }
}

/// Result of one audit: the parsed report plus the citations the model's
/// search tool attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditData {
    pub audit: AuditReport,
    pub sources: Vec<GroundingSource>,
}

/// A generated wireframe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualExample {
    /// Base64 payload exactly as the provider returned it.
    pub image_base64: String,
    pub mime_type: String,
}

impl VisualExample {
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.image_base64.trim())
    }
}
