mod renderer;
mod template;
mod writer;

pub use renderer::ReportRenderer;
pub use template::{ReportTemplate, TABLE_PLACEHOLDER};
pub use writer::ReportWriter;

use serde::{Deserialize, Serialize};

/// Decimal places kept for every numeric report field
pub const PRECISION: i32 = 3;

/// One line of the rendered report table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub url: String,
    pub count: usize,
    pub count_perc: f64,
    pub time_sum: f64,
    pub time_perc: f64,
    pub time_avg: f64,
    pub time_max: f64,
    pub time_med: f64,
}

pub(crate) fn round(value: f64) -> f64 {
    let factor = 10f64.powi(PRECISION);
    (value * factor).round() / factor
}
