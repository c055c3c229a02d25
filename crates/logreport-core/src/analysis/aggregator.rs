use super::{AggregationResult, UrlStats};
use crate::logs::LineSample;

/// Accumulates per-URL latency samples for one run
#[derive(Debug, Default)]
pub struct Aggregator {
    result: AggregationResult,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, sample: LineSample<'_>) {
        self.result.total_lines += 1;

        match sample {
            LineSample::Parsed { url, latency } => {
                match self.result.urls.get_mut(url) {
                    Some(stats) => stats.record(latency),
                    None => {
                        let mut stats = UrlStats::default();
                        stats.record(latency);
                        self.result.urls.insert(url.to_string(), stats);
                    }
                }
                self.result.total_samples += 1;
                self.result.total_latency += latency;
            }
            LineSample::Unparsed => self.result.unparsed += 1,
        }
    }

    pub fn snapshot(&self) -> AggregationResult {
        self.result.clone()
    }

    pub fn finish(self) -> AggregationResult {
        tracing::debug!(
            "Aggregated {} lines: {} parsed, {} unparsed, {} distinct URLs",
            self.result.total_lines,
            self.result.total_samples,
            self.result.unparsed,
            self.result.urls.len()
        );
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::LineExtractor;

    #[test]
    fn test_update_parsed_and_unparsed() {
        let mut aggregator = Aggregator::new();
        aggregator.update(LineSample::Parsed {
            url: "/a",
            latency: 0.5,
        });
        aggregator.update(LineSample::Parsed {
            url: "/a",
            latency: 0.25,
        });
        aggregator.update(LineSample::Parsed {
            url: "/b",
            latency: 1.0,
        });
        aggregator.update(LineSample::Unparsed);

        let result = aggregator.snapshot();
        assert_eq!(result.total_lines, 4);
        assert_eq!(result.total_samples, 3);
        assert_eq!(result.unparsed, 1);
        assert_eq!(result.total_latency, 1.75);
        assert_eq!(result.urls["/a"].count(), 2);
        assert_eq!(result.urls["/a"].samples(), &[0.5, 0.25]);
        assert_eq!(result.urls["/b"].count(), 1);
    }

    #[test]
    fn test_snapshot_does_not_reset() {
        let mut aggregator = Aggregator::new();
        aggregator.update(LineSample::Unparsed);

        assert_eq!(aggregator.snapshot(), aggregator.snapshot());
        assert_eq!(aggregator.finish().total_lines, 1);
    }

    #[test]
    fn test_conservation_over_mixed_input() {
        let lines = [
            r#"1.1.1.1 - - [-] "GET /a HTTP/1.1" 200 1 0.1"#,
            "garbage",
            r#"1.1.1.1 - - [-] "DELETE /a HTTP/1.1" 200 1 0.1"#,
            r#"1.1.1.1 - - [-] "POST /b HTTP/1.1" 200 1 0.2"#,
            "",
        ];

        let mut aggregator = Aggregator::new();
        for line in lines {
            aggregator.update(LineExtractor::extract(line));
        }
        let result = aggregator.finish();

        assert_eq!(result.total_lines, lines.len());
        assert_eq!(result.total_samples + result.unparsed, result.total_lines);
        assert_eq!(result.unparsed, 3);
        let counted: usize = result.urls.values().map(|s| s.count()).sum();
        assert_eq!(counted, result.total_samples);
    }
}
