//! Turns a backup folder of exported configuration-policy JSON into a static
//! HTML audit report: one heading per subfolder, one Setting/Value table per policy.

pub mod browser;
pub mod config;
pub mod error;
pub mod flatten;
pub mod key_format;
pub mod output;
pub mod render;
pub mod report;

pub use config::Config;
pub use report::{ReportBuilder, ReportSummary};
