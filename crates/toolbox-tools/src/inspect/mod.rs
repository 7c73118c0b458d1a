//! Inspectors: tools that analyse their input rather than convert it.

mod certificate;
mod schedule;
mod text;
mod token;
mod web;

pub use certificate::certificate;
pub use schedule::{CronReport, UPCOMING_COUNT, cron, cron_report, parse_schedule};
pub use text::{regex, string_inspector, text_diff};
pub use token::jwt;
pub use web::{html_preview, markdown_preview, url_parser};
