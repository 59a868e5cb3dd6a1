//! Tolerant extraction of the audit report from free-form model text.
//!
//! Models wrap JSON in markdown fences or conversational prose despite being
//! told not to. Extraction strips a leading fence, then takes everything
//! between the first `{` and the last `}`.

use super::types::{AuditCategory, AuditReport};
use crate::error::ExtractError;
use serde::de::DeserializeOwned;
use strum::{EnumCount, IntoEnumIterator};

const FENCE: &str = "```";

/// Strip a leading code fence (with optional language tag) and its closing
/// fence. Text that does not start with a fence is returned unchanged.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix(FENCE) else {
        return text;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    let body = match rest.rfind(FENCE) {
        Some(end) => &rest[..end],
        None => rest,
    };
    body.trim()
}

/// Locate the outermost JSON object candidate in `text`.
pub fn extract_json_object(text: &str) -> Result<&str, ExtractError> {
    let text = strip_code_fence(text.trim());

    let start = text.find('{').ok_or(ExtractError::NoJsonObject)?;
    let end = text.rfind('}').ok_or(ExtractError::NoJsonObject)?;
    if end < start {
        return Err(ExtractError::NoJsonObject);
    }

    Ok(&text[start..=end])
}

/// Extract and deserialize any JSON object type from model text.
///
/// Syntax errors are [`ExtractError::MalformedJson`]; well-formed JSON that
/// does not fit `T` is [`ExtractError::InvalidReport`].
pub fn parse_json_object<T: DeserializeOwned>(text: &str) -> Result<T, ExtractError> {
    let json = extract_json_object(text)?;
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(ExtractError::MalformedJson)?;
    serde_json::from_value(value).map_err(|e| ExtractError::InvalidReport(e.to_string()))
}

/// Extract, deserialize and validate an [`AuditReport`].
pub fn parse_audit_report(text: &str) -> Result<AuditReport, ExtractError> {
    let report: AuditReport = parse_json_object(text)?;
    validate_report(&report)?;
    Ok(report)
}

/// Bounds and section-order checks.
///
/// The first five sections must be the fixed categories in prompt order.
/// Sections after those are passed through untouched. Scores are never
/// clamped.
pub fn validate_report(report: &AuditReport) -> Result<(), ExtractError> {
    if report.overall_score > AuditReport::MAX_OVERALL_SCORE {
        return Err(ExtractError::InvalidReport(format!(
            "overallScore {} is outside 0..={}",
            report.overall_score,
            AuditReport::MAX_OVERALL_SCORE
        )));
    }

    if report.sections.len() < AuditCategory::COUNT {
        return Err(ExtractError::InvalidReport(format!(
            "expected {} sections, found {}",
            AuditCategory::COUNT,
            report.sections.len()
        )));
    }

    for (index, (section, category)) in report.sections.iter().zip(AuditCategory::iter()).enumerate() {
        if !category.matches_title(&section.title) {
            return Err(ExtractError::InvalidReport(format!(
                "section {} is \"{}\", expected \"{}\"",
                index + 1,
                section.title,
                category.title()
            )));
        }
    }

    if let Some(section) = report
        .sections
        .iter()
        .find(|section| section.score > AuditReport::MAX_SECTION_SCORE)
    {
        return Err(ExtractError::InvalidReport(format!(
            "section \"{}\" score {} is outside 0..={}",
            section.title,
            section.score,
            AuditReport::MAX_SECTION_SCORE
        )));
    }

    Ok(())
}
