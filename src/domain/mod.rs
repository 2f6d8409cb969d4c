//! Core domain types for intervention reports

mod kind;
pub mod options;
mod record;
mod report;

pub use kind::CriKind;
pub use record::{InterventionRecord, parse_timestamp, parse_timestamp_str};
pub use report::{CriReport, site_id_for};
