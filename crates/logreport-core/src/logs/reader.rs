use super::types::LogFile;
use crate::{Error, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};

pub struct LogReader;

impl LogReader {
    /// Open a log file, decompressing it on the fly when it is gzipped
    pub fn open(log_file: &LogFile) -> Result<Box<dyn BufRead>> {
        tracing::debug!(
            "Opening log file {} (compressed: {})",
            log_file.path.display(),
            log_file.compressed
        );

        let file = File::open(&log_file.path).map_err(|source| Error::ReadLog {
            path: log_file.path.clone(),
            source,
        })?;

        if log_file.compressed {
            Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
        } else {
            Ok(Box::new(BufReader::new(file)))
        }
    }

    /// Feed every line of the log file to `f`, returning the number of lines read
    ///
    /// Line terminators are stripped and invalid UTF-8 is replaced rather than
    /// rejected, so a single garbled line never aborts the read.
    pub fn for_each_line<F>(log_file: &LogFile, mut f: F) -> Result<usize>
    where
        F: FnMut(&str),
    {
        let mut reader = Self::open(log_file)?;
        let mut buf = Vec::new();
        let mut lines = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| Error::ReadLog {
                    path: log_file.path.clone(),
                    source,
                })?;
            if read == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            f(line.trim_end_matches(['\n', '\r']));
            lines += 1;
        }

        tracing::debug!("Read {} lines from {}", lines, log_file.path.display());

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    fn log_file(path: &Path, compressed: bool) -> LogFile {
        LogFile {
            path: path.to_path_buf(),
            date: NaiveDate::from_ymd_opt(2017, 6, 30).unwrap(),
            compressed,
            report_path: path.with_extension("html"),
        }
    }

    fn collect(log_file: &LogFile) -> Vec<String> {
        let mut lines = Vec::new();
        let count = LogReader::for_each_line(log_file, |line| lines.push(line.to_string())).unwrap();
        assert_eq!(count, lines.len());
        lines
    }

    #[test]
    fn test_read_plain_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("service.log-20170630");
        std::fs::write(&path, "first\r\nsecond\nthird").unwrap();

        let lines = collect(&log_file(&path, false));
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_read_gzip_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("service.log-20170630.gz");

        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"first\nsecond\n").unwrap();
        encoder.finish().unwrap();

        let lines = collect(&log_file(&path, true));
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("service.log-20170630");
        std::fs::write(&path, b"ok\n\xff\xfe\n").unwrap();

        let lines = collect(&log_file(&path, false));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "ok");
    }

    #[test]
    fn test_corrupt_gzip_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("service.log-20170630.gz");
        std::fs::write(&path, b"definitely not gzip").unwrap();

        let result = LogReader::for_each_line(&log_file(&path, true), |_| {});
        assert!(matches!(result, Err(Error::ReadLog { .. })));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("service.log-20170630");

        let result = LogReader::for_each_line(&log_file(&path, false), |_| {});
        assert!(matches!(result, Err(Error::ReadLog { .. })));
    }
}
