use super::types::LineSample;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // prefix [timestamp] "METHOD url HTTP/x" ... request_time
    static ref ACCESS_LINE_PATTERN: Regex = Regex::new(
        r#"^.*?\[[^\]]+\]\s+"(?:GET|POST|HEAD|PUT|OPTIONS)\s+(?P<url>\S+)\s+HTTP/[^"\s]+"\s(?:.*\s)?(?P<time>\d+\.\d+)\s*$"#
    )
    .unwrap();
}

pub struct LineExtractor;

impl LineExtractor {
    /// Extract the requested URL and its request time from one access log line
    pub fn extract(line: &str) -> LineSample<'_> {
        let Some(caps) = ACCESS_LINE_PATTERN.captures(line) else {
            return LineSample::Unparsed;
        };

        let (Some(url), Some(time)) = (caps.name("url"), caps.name("time")) else {
            return LineSample::Unparsed;
        };

        match time.as_str().parse::<f64>() {
            Ok(latency) if latency.is_finite() && latency >= 0.0 => LineSample::Parsed {
                url: url.as_str(),
                latency,
            },
            _ => LineSample::Unparsed,
        }
    }
}
