mod line;
mod locator;
mod reader;
mod types;

pub use line::LineExtractor;
pub use locator::{LogLocator, REPORT_EXTENSION, parse_log_name, report_path_for};
pub use reader::LogReader;
pub use types::*;
