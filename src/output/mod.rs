//! Output rendering: console and JSON formatters plus history reporting.

pub mod formatter;
pub mod report;

pub use formatter::{ConsoleFormatter, JsonFormatter, OutputFormatter};
pub use report::{format_summary, summarize, Summary};
