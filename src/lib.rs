#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod audit;
pub mod config;
pub mod error;
pub mod llm;
pub mod observability;
pub mod ui;

pub use audit::{AuditData, AuditReport, Auditor, RetryPolicy, Visualizer};
pub use config::Config;
pub use error::{AuditError, ConfigError, ExtractError, LlmError};
