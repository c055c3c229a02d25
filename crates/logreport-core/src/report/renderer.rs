use super::{ReportRow, ReportTemplate, round};
use crate::Result;
use crate::analysis::{AggregationResult, UrlStats};

/// Builds the top-N table of URLs by total request time
pub struct ReportRenderer {
    row_limit: usize,
}

impl ReportRenderer {
    pub fn new(row_limit: usize) -> Self {
        Self { row_limit }
    }

    /// Rows for the `row_limit` URLs with the largest total request time
    ///
    /// The sort is stable, so URLs with equal totals keep their lexical order.
    pub fn rows(&self, result: &AggregationResult) -> Vec<ReportRow> {
        let mut ranked: Vec<(&String, &UrlStats, f64)> = result
            .urls
            .iter()
            .map(|(url, stats)| (url, stats, stats.time_sum()))
            .collect();

        ranked.sort_by(|a, b| b.2.total_cmp(&a.2));
        ranked.truncate(self.row_limit);

        ranked
            .into_iter()
            .map(|(url, stats, time_sum)| ReportRow {
                url: url.clone(),
                count: stats.count(),
                count_perc: round(result.count_perc(stats)),
                time_sum: round(time_sum),
                time_perc: round(result.time_perc(stats)),
                time_avg: round(stats.time_avg()),
                time_max: round(stats.time_max()),
                time_med: round(stats.time_med()),
            })
            .collect()
    }

    /// The report table serialized as a JSON array
    ///
    /// `<`, `>` and `&` are written as unicode escapes so a URL can never
    /// close the surrounding `<script>` element of an HTML template.
    pub fn render_table(&self, result: &AggregationResult) -> Result<String> {
        let rows = self.rows(result);
        tracing::debug!("Rendering report table with {} rows", rows.len());

        let json = serde_json::to_string(&rows)?;
        Ok(escape_for_html(&json))
    }

    /// Full report body: the template with the table substituted in
    pub fn render(&self, result: &AggregationResult, template: &ReportTemplate) -> Result<String> {
        let table = self.render_table(result)?;
        Ok(template.substitute(&table))
    }
}

// These characters only occur inside JSON strings, where `\uXXXX` escapes are valid
fn escape_for_html(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            _ => escaped.push(c),
        }
    }
    escaped
}
