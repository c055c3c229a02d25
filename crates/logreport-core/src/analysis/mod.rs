mod aggregator;

pub use aggregator::Aggregator;

use serde::Serialize;
use std::collections::BTreeMap;

/// Latency samples recorded for one URL
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UrlStats {
    samples: Vec<f64>,
}

impl UrlStats {
    pub(crate) fn record(&mut self, latency: f64) {
        self.samples.push(latency);
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn time_sum(&self) -> f64 {
        self.samples.iter().sum()
    }

    pub fn time_avg(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.time_sum() / self.samples.len() as f64
    }

    pub fn time_max(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }

    pub fn time_med(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }

        let mut times = self.samples.clone();
        times.sort_by(|a, b| a.total_cmp(b));
        if times.len().is_multiple_of(2) {
            let mid = times.len() / 2;
            (times[mid - 1] + times[mid]) / 2.0
        } else {
            times[times.len() / 2]
        }
    }
}

/// Everything collected from one log file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationResult {
    pub urls: BTreeMap<String, UrlStats>,
    pub total_samples: usize,
    pub total_latency: f64,
    pub unparsed: usize,
    pub total_lines: usize,
}

impl AggregationResult {
    /// Share of lines that could not be parsed, in percent
    pub fn error_percent(&self) -> f64 {
        if self.total_lines == 0 {
            return 0.0;
        }
        100.0 * self.unparsed as f64 / self.total_lines as f64
    }

    /// Share of parsed requests that hit this URL, in percent
    pub fn count_perc(&self, stats: &UrlStats) -> f64 {
        if self.total_samples == 0 {
            return 0.0;
        }
        100.0 * stats.count() as f64 / self.total_samples as f64
    }

    /// Share of total request time spent on this URL, in percent
    pub fn time_perc(&self, stats: &UrlStats) -> f64 {
        if self.total_latency <= 0.0 {
            return 0.0;
        }
        100.0 * stats.time_sum() / self.total_latency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(samples: &[f64]) -> UrlStats {
        let mut stats = UrlStats::default();
        for s in samples {
            stats.record(*s);
        }
        stats
    }

    #[test]
    fn test_url_stats_odd_count() {
        let s = stats(&[0.3, 0.1, 0.2]);
        assert_eq!(s.count(), 3);
        assert!((s.time_sum() - 0.6).abs() < 1e-9);
        assert!((s.time_avg() - 0.2).abs() < 1e-9);
        assert_eq!(s.time_max(), 0.3);
        assert_eq!(s.time_med(), 0.2);
    }

    #[test]
    fn test_url_stats_even_median() {
        let s = stats(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(s.time_med(), 2.5);
        assert_eq!(s.time_max(), 4.0);
    }

    #[test]
    fn test_url_stats_keeps_sample_order() {
        let s = stats(&[0.5, 0.1]);
        assert_eq!(s.samples(), &[0.5, 0.1]);
    }

    #[test]
    fn test_error_percent() {
        let result = AggregationResult {
            unparsed: 50,
            total_lines: 100,
            ..Default::default()
        };
        assert_eq!(result.error_percent(), 50.0);
    }

    #[test]
    fn test_error_percent_empty_log() {
        assert_eq!(AggregationResult::default().error_percent(), 0.0);
    }

    #[test]
    fn test_percentages_use_parsed_requests() {
        let a = stats(&[1.0, 1.0, 1.0]);
        let b = stats(&[5.0]);
        let result = AggregationResult {
            total_samples: 4,
            total_latency: 8.0,
            unparsed: 6,
            total_lines: 10,
            ..Default::default()
        };

        assert_eq!(result.count_perc(&a), 75.0);
        assert_eq!(result.count_perc(&b), 25.0);
        assert_eq!(result.time_perc(&a), 37.5);
        assert_eq!(result.time_perc(&b), 62.5);
    }

    #[test]
    fn test_time_perc_zero_total_latency() {
        let a = stats(&[0.0]);
        let result = AggregationResult {
            total_samples: 1,
            total_latency: 0.0,
            total_lines: 1,
            ..Default::default()
        };
        assert_eq!(result.time_perc(&a), 0.0);
    }
}
